//! Progress tracking for export operations
//!
//! A spinner with a document counter and throughput. The total count of a
//! collection is unknown until its stream is exhausted, so there is no
//! percentage bar to draw.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner-style progress display for one collection's drain phase.
pub struct ProgressTracker {
    start_time: Instant,
    bar: Option<ProgressBar>,
}

impl ProgressTracker {
    /// Create a tracker; when `enabled` is false all updates are no-ops.
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {pos} documents {msg}")
                    .unwrap(),
            );
            Some(bar)
        } else {
            None
        };

        Self {
            start_time: Instant::now(),
            bar,
        }
    }

    /// Update with the total number of documents read so far.
    pub fn update(&self, count: u64) {
        if let Some(ref bar) = self.bar {
            bar.set_position(count);

            let elapsed = self.start_time.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                let speed = count as f64 / elapsed;
                bar.set_message(format!("({:.0} docs/sec)", speed));
            }
        }
    }

    /// Finish and clear the spinner.
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
