//! Run progress shared between concurrent translation calls
//!
//! Progress is kept as whole units (one unit = one translated leaf in one
//! language) and converted to a percentage on read, so a completed run
//! reports exactly 100 regardless of how the total divides 100.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct ProgressState {
    completed: AtomicUsize,
    total: AtomicUsize,
}

impl ProgressState {
    pub fn new(total_units: usize) -> Self {
        ProgressState {
            completed: AtomicUsize::new(0),
            total: AtomicUsize::new(total_units),
        }
    }

    /// Start over with a new total
    pub fn reset(&self, total_units: usize) {
        self.total.store(total_units, Ordering::SeqCst);
        self.completed.store(0, Ordering::SeqCst);
    }

    /// Record one completed unit and return the new percentage
    pub fn advance(&self) -> f64 {
        let completed = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        percent_of(completed, self.total.load(Ordering::SeqCst))
    }

    pub fn percent(&self) -> f64 {
        self.snapshot().percent
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let completed = self.completed.load(Ordering::SeqCst);
        let total = self.total.load(Ordering::SeqCst);
        ProgressSnapshot {
            completed,
            total,
            percent: percent_of(completed, total),
        }
    }
}

/// Clamped to 100. Units beyond the total (strings inside arrays are
/// translated but not counted) never push the percentage past 100.
fn percent_of(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return if completed > 0 { 100.0 } else { 0.0 };
    }
    completed.min(total) as f64 * 100.0 / total as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}

impl ProgressSnapshot {
    pub fn is_complete(&self) -> bool {
        self.percent >= 100.0
    }

    pub fn label(&self) -> &'static str {
        if self.is_complete() {
            "Task Completed"
        } else {
            "Task in Progress"
        }
    }

    /// "40% Complete" or "33.33% Complete"
    pub fn percent_text(&self) -> String {
        if self.percent.fract() == 0.0 {
            format!("{:.0}% Complete", self.percent)
        } else {
            format!("{:.2}% Complete", self.percent)
        }
    }
}
