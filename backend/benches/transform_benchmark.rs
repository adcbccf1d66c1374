use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use lmi_rust::models::{Month, Sector, SectorRecord, TimeRange};
use lmi_rust::services::{
    compute_ai_pressure, find_ai_matches, multi_series_view, MultiSeriesOptions, PostingItem,
    PressureOptions,
};

fn sample_records(months: u32, sectors: &[&str]) -> Vec<SectorRecord> {
    let anchor: Month = "2024-12".parse().unwrap();
    let mut records = Vec::new();
    for offset in 0..months {
        let date = anchor.months_back(offset);
        for (i, key) in sectors.iter().enumerate() {
            let value = 5000.0 + (offset as f64) * 3.0 + (i as f64) * 700.0;
            records.push(SectorRecord::new(date, Sector::from_key(key), value));
        }
    }
    records
}

fn bench_multi_series_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_series_view");

    let sectors = [
        "total",
        "manufacturing",
        "healthcare",
        "retail",
        "professional",
        "information",
        "government",
    ];
    let selected: Vec<Sector> = sectors.iter().map(|k| Sector::from_key(k)).collect();

    for months in [60u32, 120] {
        let records = sample_records(months, &sectors);
        group.bench_with_input(
            BenchmarkId::new("pivot_and_trend", months),
            &records,
            |b, records| {
                b.iter(|| {
                    multi_series_view(
                        black_box(records),
                        black_box(&selected),
                        MultiSeriesOptions {
                            range: TimeRange::ThreeYears,
                            ..MultiSeriesOptions::default()
                        },
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_keyword_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyword_matcher");

    let short = "Data Scientist position. Machine learning and PyTorch required.";
    let long = format!(
        "{} {}",
        "Designs and develops mission systems, coordinates with stakeholders, \
         prepares reports, and maintains dashboards. Experience with large \
         language model fine-tuning, retrieval-augmented generation, vector \
         database operations, and prompt engineering preferred."
            .repeat(20),
        "Knowledge of natural language processing and computer vision."
    );

    group.bench_function("short_posting", |b| {
        b.iter(|| find_ai_matches(black_box(short)));
    });
    group.bench_function("long_posting", |b| {
        b.iter(|| find_ai_matches(black_box(&long)));
    });

    group.finish();
}

fn bench_pressure_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("pressure");

    let items: Vec<PostingItem> = (0..500)
        .map(|i| PostingItem {
            title: Some(format!("Posting {i}")),
            agency: None,
            department: None,
            url: None,
            match_text: if i % 5 == 0 {
                format!("Posting {i}. Applies machine learning and deep learning.")
            } else {
                format!("Posting {i}. General administrative duties.")
            },
        })
        .collect();

    group.bench_function("compute_500_postings", |b| {
        b.iter(|| compute_ai_pressure(black_box(&items), PressureOptions::default()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_multi_series_view,
    bench_keyword_matcher,
    bench_pressure_aggregation
);
criterion_main!(benches);
