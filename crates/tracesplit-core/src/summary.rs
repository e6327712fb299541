//! Good/defect split of a session.

use serde::Serialize;

/// Counts and percentages of good and defect records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub good: usize,
    pub defect: usize,
    pub good_pct: f64,
    pub defect_pct: f64,
}

impl Summary {
    /// Build a summary, or `None` when there is nothing to summarise.
    pub fn from_counts(good: usize, defect: usize) -> Option<Self> {
        let total = good + defect;
        if total == 0 {
            return None;
        }
        Some(Self {
            total,
            good,
            defect,
            good_pct: good as f64 / total as f64 * 100.0,
            defect_pct: defect as f64 / total as f64 * 100.0,
        })
    }

    /// Category labels and counts, in chart order.
    pub fn categories(&self) -> [(&'static str, usize, f64); 2] {
        [
            ("Good Data", self.good, self.good_pct),
            ("Defect Data", self.defect, self.defect_pct),
        ]
    }
}
