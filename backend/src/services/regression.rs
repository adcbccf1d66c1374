//! Ordinary-least-squares trendline fitting.
//!
//! Trendlines are fit over (index, value) pairs of a filtered series, so `x`
//! is an ordinal position rather than a calendar distance.

use serde::{Deserialize, Serialize};

/// One (x, y) observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointXY {
    pub x: f64,
    pub y: f64,
}

/// Closed-form OLS fit result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionResult {
    /// Fitted line value at `x`.
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Least-squares fit via the closed form over sums.
///
/// Degenerate inputs never divide: zero points yield `{0, 0}`, and a zero
/// denominator (all x identical, or a single point) yields slope 0 with the
/// mean of y as intercept.
pub fn linear_regression(points: &[PointXY]) -> RegressionResult {
    let n = points.len() as f64;
    if points.is_empty() {
        return RegressionResult {
            slope: 0.0,
            intercept: 0.0,
        };
    }

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for point in points {
        sum_x += point.x;
        sum_y += point.y;
        sum_xy += point.x * point.y;
        sum_x2 += point.x * point.x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return RegressionResult {
            slope: 0.0,
            intercept: sum_y / n,
        };
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    RegressionResult { slope, intercept }
}
