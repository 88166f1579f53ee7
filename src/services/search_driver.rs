//! Exhaustive search over totals, width triples and leftends.
//!
//! For every total `T` in the configured range the driver enumerates the
//! width triples `(w0, w1, T - w0 - w1)` with `w0 = 3, 5, 7, ...` and
//! `w1 = 0, 2, 4, ...`, and for each triple tries every leftend from `T / 2`
//! down to `0` that is coprime with the gcd of the widths. Non-failure
//! outcomes are reported to a [`FindingSink`].
//!
//! Totals are independent, so with `jobs > 1` several are scanned at once on
//! the blocking pool. Reports are still emitted in ascending total order,
//! which keeps the research log identical to a sequential run.
//!
//! If reporting fails the driver returns at once and raises a shared cancel
//! flag; scans still on the blocking pool stop at the next width triple.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{Finding, Outcome, Partition, SearchConfig, HUMPS};
use crate::domain::ports::{Classifier, FindingSink};
use crate::services::gcd::{gcd, gcd_of};

/// Smallest width of the origin hump.
pub const FIRST_WIDTH: u32 = 3;

/// Stride of the first two widths.
pub const WIDTH_STEP: usize = 2;

/// Width triples scanned for `total`, in scan order.
pub fn width_triples(total: u32) -> impl Iterator<Item = [u32; HUMPS]> {
    (FIRST_WIDTH..=total).step_by(WIDTH_STEP).flat_map(move |w0| {
        (0..=total - w0)
            .step_by(WIDTH_STEP)
            .map(move |w1| [w0, w1, total - w0 - w1])
    })
}

/// Leftends worth classifying for a width triple, from `T / 2` down to `0`.
///
/// A leftend sharing a factor with every width gives a trajectory that is a
/// multiple of a smaller one, so only leftends coprime with the gcd of the
/// widths are kept. In particular leftend `0` survives only when the widths
/// are themselves coprime.
pub fn admissible_leftends(widths: [u32; HUMPS]) -> impl Iterator<Item = i64> {
    let widths_gcd = gcd_of(widths.map(u64::from));
    (0..=half_total(widths))
        .rev()
        .filter(move |leftend| gcd(widths_gcd, leftend.unsigned_abs()) == 1)
}

fn half_total(widths: [u32; HUMPS]) -> i64 {
    widths.iter().copied().map(i64::from).sum::<i64>() / 2
}

/// Per-outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeTally {
    pub complete: u64,
    pub partial: u64,
    pub failure: u64,
    pub overflow: u64,
}

impl OutcomeTally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Complete => self.complete += 1,
            Outcome::Partial => self.partial += 1,
            Outcome::Failure => self.failure += 1,
            Outcome::Overflow => self.overflow += 1,
        }
    }

    pub fn merge(&mut self, other: &Self) {
        self.complete += other.complete;
        self.partial += other.partial;
        self.failure += other.failure;
        self.overflow += other.overflow;
    }

    pub const fn runs(&self) -> u64 {
        self.complete + self.partial + self.failure + self.overflow
    }
}

/// Result of trying every admissible leftend for one width triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionScan {
    pub widths: [u32; HUMPS],
    pub skipped: u64,
    pub tally: OutcomeTally,
    pub findings: Vec<Finding>,
}

/// Result of scanning every width triple of one total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalScan {
    pub total: u32,
    pub partitions: u64,
    pub skipped: u64,
    pub tally: OutcomeTally,
    pub findings: Vec<Finding>,
}

/// Classify every admissible leftend of one width triple.
pub fn scan_partition<C>(classifier: &C, widths: [u32; HUMPS]) -> DomainResult<PartitionScan>
where
    C: Classifier + ?Sized,
{
    let mut scan = PartitionScan {
        widths,
        skipped: 0,
        tally: OutcomeTally::default(),
        findings: Vec::new(),
    };

    let candidates = u64::try_from(half_total(widths) + 1).unwrap_or(0);
    let leftends: Vec<i64> = admissible_leftends(widths).collect();
    if !leftends.is_empty() {
        let partition = Partition::new(widths)?;
        for leftend in leftends {
            let outcome = classifier.classify(&partition, leftend)?;
            scan.tally.record(outcome);
            if let Some(finding) = Finding::from_outcome(widths, leftend, outcome) {
                scan.findings.push(finding);
            }
        }
    }
    scan.skipped = candidates - scan.tally.runs();

    Ok(scan)
}

/// Scan every width triple of `total`.
pub fn scan_total<C>(classifier: &C, total: u32) -> DomainResult<TotalScan>
where
    C: Classifier + ?Sized,
{
    let never = AtomicBool::new(false);
    scan_total_until(classifier, total, &never)
        .map(|scan| scan.unwrap_or_else(|| TotalScan::empty(total)))
}

/// Like [`scan_total`], but gives up with `None` once `cancelled` is set.
///
/// The flag is checked before every width triple.
pub fn scan_total_until<C>(
    classifier: &C,
    total: u32,
    cancelled: &AtomicBool,
) -> DomainResult<Option<TotalScan>>
where
    C: Classifier + ?Sized,
{
    let mut scan = TotalScan::empty(total);

    for widths in width_triples(total) {
        if cancelled.load(Ordering::Relaxed) {
            debug!(total, partitions = scan.partitions, "scan cancelled");
            return Ok(None);
        }
        let partition_scan = scan_partition(classifier, widths)?;
        scan.partitions += 1;
        scan.skipped += partition_scan.skipped;
        scan.tally.merge(&partition_scan.tally);
        scan.findings.extend(partition_scan.findings);
    }

    debug!(
        total,
        partitions = scan.partitions,
        runs = scan.tally.runs(),
        findings = scan.findings.len(),
        "scanned total"
    );

    Ok(Some(scan))
}

impl TotalScan {
    const fn empty(total: u32) -> Self {
        Self {
            total,
            partitions: 0,
            skipped: 0,
            tally: OutcomeTally {
                complete: 0,
                partial: 0,
                failure: 0,
                overflow: 0,
            },
            findings: Vec::new(),
        }
    }
}

/// Sets the flag when dropped, so every exit path from `run` stops the
/// workers it leaves behind.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Totals over a completed search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchSummary {
    pub total_min: u32,
    pub total_max: u32,
    pub totals: u64,
    pub partitions: u64,
    pub leftends_skipped: u64,
    pub tally: OutcomeTally,
    pub findings: Vec<Finding>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SearchSummary {
    fn new(config: &SearchConfig) -> Self {
        let now = Utc::now();
        Self {
            total_min: config.total_min,
            total_max: config.total_max,
            totals: 0,
            partitions: 0,
            leftends_skipped: 0,
            tally: OutcomeTally::default(),
            findings: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    fn absorb(&mut self, scan: TotalScan) {
        self.totals += 1;
        self.partitions += scan.partitions;
        self.leftends_skipped += scan.skipped;
        self.tally.merge(&scan.tally);
        self.findings.extend(scan.findings);
    }
}

/// Drives a classifier over the configured search range.
pub struct SearchDriver<C> {
    classifier: Arc<C>,
    config: SearchConfig,
}

impl<C> SearchDriver<C>
where
    C: Classifier + 'static,
{
    pub fn new(classifier: C, config: SearchConfig) -> Self {
        Self {
            classifier: Arc::new(classifier),
            config,
        }
    }

    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the whole search, reporting into `sink`.
    pub async fn run<S>(&self, sink: &mut S) -> Result<SearchSummary>
    where
        S: FindingSink + ?Sized,
    {
        let mut summary = SearchSummary::new(&self.config);
        let jobs = self.config.jobs.max(1);

        info!(
            total_min = self.config.total_min,
            total_max = self.config.total_max,
            total_step = self.config.total_step,
            jobs,
            "starting search"
        );

        let cancel = CancelOnDrop(Arc::new(AtomicBool::new(false)));
        let cancelled = Arc::clone(&cancel.0);
        let classifier = Arc::clone(&self.classifier);
        let mut scans = stream::iter(self.config.totals())
            .map(move |total| {
                let classifier = Arc::clone(&classifier);
                let cancelled = Arc::clone(&cancelled);
                tokio::task::spawn_blocking(move || {
                    scan_total_until(classifier.as_ref(), total, &cancelled)
                })
            })
            .buffered(jobs);

        while let Some(joined) = scans.next().await {
            let Some(scan) = joined.context("search worker panicked")?? else {
                anyhow::bail!("search cancelled");
            };

            sink.begin_total(scan.total)
                .await
                .with_context(|| format!("failed to report total {}", scan.total))?;
            for finding in &scan.findings {
                match finding.outcome() {
                    Outcome::Overflow => warn!(
                        widths = ?finding.widths(),
                        leftend = finding.leftend(),
                        "coefficient window overflowed"
                    ),
                    Outcome::Complete | Outcome::Partial => info!(
                        widths = ?finding.widths(),
                        leftend = finding.leftend(),
                        outcome = %finding.outcome(),
                        "candidate kernel element"
                    ),
                    Outcome::Failure => {}
                }
                sink.record(finding).await.context("failed to record finding")?;
            }

            summary.absorb(scan);
        }

        sink.finish(self.config.total_min, self.config.total_max)
            .await
            .context("failed to finish search log")?;
        summary.finished_at = Utc::now();

        info!(
            totals = summary.totals,
            partitions = summary.partitions,
            runs = summary.tally.runs(),
            overflow = summary.tally.overflow,
            partial = summary.tally.partial,
            complete = summary.tally.complete,
            "search finished"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every leftend it is asked about and always fails.
    #[derive(Default)]
    struct RecordingClassifier {
        calls: Mutex<Vec<([u32; HUMPS], i64)>>,
    }

    impl Classifier for RecordingClassifier {
        fn classify(&self, partition: &Partition, leftend: i64) -> DomainResult<Outcome> {
            self.calls.lock().unwrap().push((partition.widths(), leftend));
            Ok(Outcome::Failure)
        }
    }

    #[test]
    fn test_width_triples_for_small_total() {
        let triples: Vec<_> = width_triples(8).collect();
        assert_eq!(
            triples,
            vec![[3, 0, 5], [3, 2, 3], [3, 4, 1], [5, 0, 3], [5, 2, 1], [7, 0, 1]]
        );
    }

    #[test]
    fn test_width_triples_empty_below_first_width() {
        assert_eq!(width_triples(2).count(), 0);
        assert_eq!(width_triples(3).collect::<Vec<_>>(), vec![[3, 0, 0]]);
    }

    #[test]
    fn test_admissible_leftends_descend() {
        assert_eq!(admissible_leftends([3, 0, 5]).collect::<Vec<_>>(), vec![4, 3, 2, 1, 0]);
        assert_eq!(admissible_leftends([6, 0, 6]).collect::<Vec<_>>(), vec![5, 1]);
    }

    #[test]
    fn test_empty_domain_never_reaches_classifier() {
        let classifier = RecordingClassifier::default();
        let scan = scan_partition(&classifier, [0, 0, 0]).unwrap();

        assert!(classifier.calls.lock().unwrap().is_empty());
        assert_eq!(scan.skipped, 1);
        assert_eq!(scan.tally.runs(), 0);
    }

    #[test]
    fn test_leftends_sharing_width_factor_are_skipped() {
        let classifier = RecordingClassifier::default();
        let scan = scan_partition(&classifier, [6, 0, 6]).unwrap();

        let calls = classifier.calls.lock().unwrap();
        assert_eq!(*calls, vec![([6, 0, 6], 5), ([6, 0, 6], 1)]);
        assert_eq!(scan.skipped, 5);
        assert_eq!(scan.tally.failure, 2);
        assert!(scan.findings.is_empty());
    }

    #[test]
    fn test_scan_total_counts_partitions() {
        let classifier = RecordingClassifier::default();
        let scan = scan_total(&classifier, 8).unwrap();

        assert_eq!(scan.total, 8);
        assert_eq!(scan.partitions, 6);
        // Every triple of an even total with odd w0 has gcd 1: all 5 leftends run.
        assert_eq!(scan.tally.runs(), 30);
        assert_eq!(scan.skipped, 0);
    }

    #[test]
    fn test_cancelled_scan_never_reaches_classifier() {
        let classifier = RecordingClassifier::default();
        let cancelled = AtomicBool::new(true);

        let scan = scan_total_until(&classifier, 8, &cancelled).unwrap();

        assert!(scan.is_none());
        assert!(classifier.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_cancel_guard_raises_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        drop(CancelOnDrop(Arc::clone(&flag)));
        assert!(flag.load(Ordering::Relaxed));
    }

    #[test]
    fn test_tally_merge() {
        let mut left = OutcomeTally::default();
        left.record(Outcome::Overflow);
        left.record(Outcome::Failure);
        let mut right = OutcomeTally::default();
        right.record(Outcome::Complete);
        right.record(Outcome::Partial);
        left.merge(&right);

        assert_eq!(
            left,
            OutcomeTally { complete: 1, partial: 1, failure: 1, overflow: 1 }
        );
        assert_eq!(left.runs(), 4);
    }
}
