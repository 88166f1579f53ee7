//! Progress bar utilities using indicatif for terminal output
//!
//! The search reports one tick per scanned total through [`ProgressSink`],
//! a [`FindingSink`] decorator that forwards everything to the real sink.

use std::time::Duration;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::domain::errors::DomainResult;
use crate::domain::models::{Finding, Outcome};
use crate::domain::ports::FindingSink;

/// Style templates for different progress bar types
const PROGRESS_TEMPLATE: &str =
    "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg} (ETA: {eta})";

/// Progress bar characters for visual effect
const PROGRESS_CHARS: &str = "█▓▒░ ";

/// Create a standard progress bar with ETA calculation
///
/// # Example
/// ```
/// use burau_search::cli::output::progress::create_progress_bar;
///
/// let pb = create_progress_bar(176);
/// pb.set_message("total 1300");
/// pb.inc(1);
/// pb.finish_and_clear();
/// ```
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(PROGRESS_CHARS),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a progress bar that never draws (for tests and `--quiet`)
pub fn create_hidden_progress_bar(total: u64) -> ProgressBar {
    ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::hidden())
}

/// Extension trait for ProgressBar to add common utility methods
pub trait ProgressBarExt {
    /// Finish with a success message (green checkmark)
    fn finish_success(&self, message: impl Into<String>);

    /// Finish with a warning message (yellow !)
    fn finish_warning(&self, message: impl Into<String>);
}

impl ProgressBarExt for ProgressBar {
    fn finish_success(&self, message: impl Into<String>) {
        self.finish_with_message(format!("✓ {}", message.into()));
    }

    fn finish_warning(&self, message: impl Into<String>) {
        self.finish_with_message(format!("! {}", message.into()));
    }
}

/// Ticks a progress bar as totals are reported.
pub struct ProgressSink<S> {
    inner: S,
    bar: ProgressBar,
    overflows: u64,
}

impl<S> ProgressSink<S> {
    pub const fn new(inner: S, bar: ProgressBar) -> Self {
        Self {
            inner,
            bar,
            overflows: 0,
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    pub const fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

#[async_trait]
impl<S> FindingSink for ProgressSink<S>
where
    S: FindingSink,
{
    async fn begin_total(&mut self, total: u32) -> DomainResult<()> {
        self.bar.inc(1);
        self.bar.set_message(format!("total {total}"));
        self.inner.begin_total(total).await
    }

    async fn record(&mut self, finding: &Finding) -> DomainResult<()> {
        if finding.outcome() == Outcome::Overflow {
            self.overflows += 1;
        }
        self.inner.record(finding).await
    }

    async fn finish(&mut self, total_min: u32, total_max: u32) -> DomainResult<()> {
        let message = format!("checked {total_min} to {total_max}");
        if self.overflows > 0 {
            self.bar
                .finish_warning(format!("{message} ({} overflows)", self.overflows));
        } else {
            self.bar.finish_success(message);
        }
        self.inner.finish(total_min, total_max).await
    }
}
