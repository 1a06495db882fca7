use serde::Serialize;

/// Before/after comparison of a note and its summary.
///
/// Lengths are in characters, matching what a reviewer sees in a text box,
/// not tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSnapshot {
    pub original_length: usize,
    pub summary_length: usize,
    pub reduction_percentage: f64,
}

/// Derive length and reduction metrics for any pair of strings.
///
/// Total and pure: empty inputs are fine, an empty original yields a
/// reduction of 0 rather than a division by zero.
pub fn get_statistics(original: &str, summary: &str) -> StatisticsSnapshot {
    let original_length = original.chars().count();
    let summary_length = summary.chars().count();

    let reduction_percentage = if original_length == 0 {
        0.0
    } else {
        (1.0 - summary_length as f64 / original_length as f64) * 100.0
    };

    StatisticsSnapshot {
        original_length,
        summary_length,
        reduction_percentage,
    }
}
