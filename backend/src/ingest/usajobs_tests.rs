use super::*;

fn descriptor(value: serde_json::Value) -> MatchedObjectDescriptor {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_match_text_joins_title_and_detail_fields() {
    let desc = descriptor(serde_json::json!({
        "PositionTitle": "Data Scientist",
        "QualificationSummary": "Experience with machine learning required.",
        "UserArea": {
            "Details": {
                "MajorDuties": "Build models.",
                "MajorDutiesList": ["Deploy pipelines", "Tune prompts"],
                "RequirementsSummary": "PyTorch preferred."
            }
        }
    }));

    let text = desc.match_text();
    assert_eq!(
        text,
        "Data Scientist\nExperience with machine learning required.\nBuild models.\nDeploy pipelines Tune prompts\nPyTorch preferred."
    );
}

#[test]
fn test_match_text_with_no_fields_is_empty() {
    let desc = descriptor(serde_json::json!({}));
    assert_eq!(desc.match_text(), "");
}

#[test]
fn test_into_posting_keeps_display_metadata() {
    let desc = descriptor(serde_json::json!({
        "PositionTitle": "IT Specialist",
        "OrganizationName": "Forest Service",
        "DepartmentName": "Department of Agriculture",
        "PositionURI": "https://www.usajobs.gov/job/123"
    }));

    let posting = desc.into_posting();
    assert_eq!(posting.title.as_deref(), Some("IT Specialist"));
    assert_eq!(posting.agency.as_deref(), Some("Forest Service"));
    assert_eq!(posting.department.as_deref(), Some("Department of Agriculture"));
    assert_eq!(posting.url.as_deref(), Some("https://www.usajobs.gov/job/123"));
    assert_eq!(posting.match_text, "IT Specialist");
}

#[test]
fn test_search_response_tolerates_missing_descriptor() {
    let parsed: SearchResponse = serde_json::from_value(serde_json::json!({
        "SearchResult": {
            "SearchResultItems": [
                {},
                { "MatchedObjectDescriptor": { "PositionTitle": "Analyst" } }
            ]
        }
    }))
    .unwrap();

    let items = parsed.search_result.map(|r| r.items).unwrap_or_default();
    assert_eq!(items.len(), 2);
    assert!(items[0].descriptor.is_none());
    assert!(items[1].descriptor.is_some());
}

#[test]
fn test_category_map_covers_expected_sectors() {
    assert_eq!(category_codes_for_sector("total"), Some(&["0000"][..]));
    assert_eq!(
        category_codes_for_sector("professional"),
        Some(&["0300", "0500", "0900", "1100"][..])
    );
    assert_eq!(category_codes_for_sector("unemployment_rate"), None);
}

#[test]
fn test_search_options_defaults() {
    let options = SearchOptions::default();
    assert_eq!(options.page_limit, 2);
    assert_eq!(options.results_per_page, 250);
}
