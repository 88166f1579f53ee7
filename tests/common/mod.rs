//! Common test utilities for integration tests
//!
//! Provides shared fixtures and stub classifiers used across multiple
//! integration test files.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use burau_search::domain::models::SearchConfig;
use burau_search::{Classifier, DomainError, DomainResult, Finding, FindingSink, Outcome, Partition};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
#[allow(dead_code)]
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Search range with the given bounds and concurrency.
#[allow(dead_code)]
pub fn search_range(total_min: u32, total_max: u32, total_step: u32, jobs: usize) -> SearchConfig {
    SearchConfig {
        total_min,
        total_max,
        total_step,
        jobs,
    }
}

/// Returns fixed outcomes for chosen pairs and `Failure` otherwise.
#[derive(Default)]
#[allow(dead_code)]
pub struct ScriptedClassifier {
    script: HashMap<([u32; 3], i64), Outcome>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, widths: [u32; 3], leftend: i64, outcome: Outcome) -> Self {
        self.script.insert((widths, leftend), outcome);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for ScriptedClassifier {
    fn classify(&self, partition: &Partition, leftend: i64) -> DomainResult<Outcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .script
            .get(&(partition.widths(), leftend))
            .copied()
            .unwrap_or(Outcome::Failure))
    }
}

/// Sink whose disk "fills up" when a given total is reported.
#[allow(dead_code)]
pub struct FailingSink {
    pub fail_at: u32,
    pub totals: Vec<u32>,
}

#[allow(dead_code)]
impl FailingSink {
    pub const fn new(fail_at: u32) -> Self {
        Self {
            fail_at,
            totals: Vec::new(),
        }
    }
}

#[async_trait]
impl FindingSink for FailingSink {
    async fn begin_total(&mut self, total: u32) -> DomainResult<()> {
        if total == self.fail_at {
            return Err(DomainError::Sink("no space left on device".to_string()));
        }
        self.totals.push(total);
        Ok(())
    }

    async fn record(&mut self, _finding: &Finding) -> DomainResult<()> {
        Ok(())
    }

    async fn finish(&mut self, _total_min: u32, _total_max: u32) -> DomainResult<()> {
        Ok(())
    }
}
