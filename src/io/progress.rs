//! Multi-job progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display for batch operations
///
/// Shows one bar per job for small batches and adds a single batch bar once
/// there are more jobs than individual bars.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    job_bars: Vec<ProgressBar>,
    /// Stores (`name`, `current_step`, `total_steps`) for rolling window display
    job_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Jobs: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            job_bars: Vec::new(),
            job_states: Vec::new(),
        }
    }

    /// Create the bars for `job_count` jobs
    pub fn initialize(&mut self, job_count: usize) {
        if job_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(job_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..job_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(PROGRESS_STYLE.clone());
            self.job_bars.push(self.multi_progress.add(bar));
        }
        self.job_states = vec![(String::new(), 0, 0); job_count];
    }

    /// Configure the display for a starting job
    pub fn start_job(&mut self, index: usize, name: &str, steps: usize) {
        if let Some(state) = self.job_states.get_mut(index) {
            *state = (name.to_string(), 0, steps);
        }
        self.update_bars();
    }

    /// Report the current step of a job
    pub fn update_step(&mut self, index: usize, step: usize) {
        if let Some(state) = self.job_states.get_mut(index) {
            state.1 = step;
        }
        self.update_bars();
    }

    /// Mark a job as completed and advance the batch bar
    pub fn complete_job(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.job_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All jobs processed");
        }
        let _ = self.multi_progress.clear();
    }

    // Shows the most recent jobs that have started
    fn update_bars(&self) {
        let active: Vec<&(String, usize, usize)> = self
            .job_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar, (name, current, total)) in self.job_bars.iter().zip(visible) {
            bar.set_length(*total as u64);
            bar.set_position(*current as u64);
            let width = total.to_string().len();
            bar.set_message(format!("{current:>width$}/{total}"));
            bar.set_prefix(name.clone());
        }

        for bar in self.job_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
