//! The billiard trajectory over a partitioned cyclic domain.
//!
//! A [`Trajectory`] starts at the middle of hump 0 and repeatedly
//!
//! 1. touches the coefficient at the current level (incrementing or
//!    decrementing it depending on parity) and adjusts the running norm,
//! 2. reflects the position about the leftend axis,
//! 3. folds it within the hump it lands in, shifting the level for the hump
//!    crossing and for every axis marker passed on the way.
//!
//! The walk stops at a fixed point of the fold, when the level leaves the
//! configured window, or when the norm can no longer reach zero in the
//! distance that remains.
//!
//! The norm always equals the sum of the absolute values of the touched
//! coefficients, so it never goes negative and the walk performs at most
//! `T / 2 + 1` iterations.

use std::cmp::Ordering;
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::Classifier;

use super::outcome::Outcome;
use super::partition::{Partition, HUMPS};

/// Level shift applied when a fold crosses the origin hump.
const ORIGIN_HUMP_SHIFT: i64 = HUMPS as i64 + 1;

/// Capacity and starting offset of the coefficient window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLimits {
    /// Number of addressable levels; a level outside `0..levels` overflows.
    pub levels: usize,
    /// Level the trajectory starts at.
    pub start_level: i64,
}

impl LevelLimits {
    pub const DEFAULT_LEVELS: usize = 10_000;
    pub const DEFAULT_START_LEVEL: i64 = 5_000;

    pub const fn new(levels: usize, start_level: i64) -> Self {
        Self {
            levels,
            start_level,
        }
    }

    /// Slot for `level`, or `None` when it falls outside the window.
    fn slot(&self, level: i64) -> Option<usize> {
        usize::try_from(level).ok().filter(|&slot| slot < self.levels)
    }
}

impl Default for LevelLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEVELS, Self::DEFAULT_START_LEVEL)
    }
}

/// Signed coefficients indexed by level, materialised lazily.
///
/// Only the contiguous range of levels touched so far is stored; growing in
/// either direction zero-fills the new slots.
#[derive(Debug, Clone, Default)]
pub struct CoefficientWindow {
    lo: usize,
    coeffs: VecDeque<i64>,
}

impl CoefficientWindow {
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Lowest and highest touched slots.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        if self.coeffs.is_empty() {
            None
        } else {
            Some((self.lo, self.lo + self.coeffs.len() - 1))
        }
    }

    /// Coefficient at `slot`, zero when untouched.
    pub fn get(&self, slot: usize) -> i64 {
        slot.checked_sub(self.lo)
            .and_then(|index| self.coeffs.get(index))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of absolute values over the window.
    pub fn l1_norm(&self) -> i64 {
        self.coeffs.iter().map(|c| c.abs()).sum()
    }

    fn touch(&mut self, slot: usize) -> &mut i64 {
        if self.coeffs.is_empty() {
            self.lo = slot;
            self.coeffs.push_back(0);
        }
        while slot < self.lo {
            self.coeffs.push_front(0);
            self.lo -= 1;
        }
        while slot >= self.lo + self.coeffs.len() {
            self.coeffs.push_back(0);
        }
        &mut self.coeffs[slot - self.lo]
    }
}

/// Scalar state threaded through the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrajectoryState {
    pub position: i64,
    pub level: i64,
    pub parity: bool,
    pub norm: i64,
    pub remaining: i64,
}

/// Snapshot taken after each completed, non-terminal iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub position: i64,
    pub level: i64,
    pub norm: i64,
    pub remaining: i64,
}

/// Result of a single [`Trajectory::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Continue(StepRecord),
    Finished(Outcome),
}

/// Classify a fixed point from the norm and the distance still to travel.
pub const fn classify_fixed_point(norm: i64, remaining: i64) -> Outcome {
    if norm != 0 {
        Outcome::Failure
    } else if remaining > 0 {
        Outcome::Partial
    } else {
        Outcome::Complete
    }
}

/// One run over a partition for a fixed leftend.
#[derive(Debug, Clone)]
pub struct Trajectory<'a> {
    partition: &'a Partition,
    limits: LevelLimits,
    leftend: i64,
    rightend: i64,
    state: TrajectoryState,
    window: CoefficientWindow,
    finished: Option<Outcome>,
}

impl<'a> Trajectory<'a> {
    /// Start a walk. `leftend` must lie in `0..=T/2`.
    pub fn new(partition: &'a Partition, leftend: i64, limits: LevelLimits) -> DomainResult<Self> {
        let half = partition.max_leftend();
        if !(0..=half).contains(&leftend) {
            return Err(DomainError::LeftendOutOfRange {
                leftend,
                max: half,
            });
        }

        Ok(Self {
            partition,
            limits,
            leftend,
            rightend: leftend + half,
            state: TrajectoryState {
                position: partition.boundary()[0] / 2,
                level: limits.start_level,
                parity: false,
                norm: 0,
                remaining: half,
            },
            window: CoefficientWindow::default(),
            finished: None,
        })
    }

    pub const fn state(&self) -> &TrajectoryState {
        &self.state
    }

    pub const fn window(&self) -> &CoefficientWindow {
        &self.window
    }

    pub const fn outcome(&self) -> Option<Outcome> {
        self.finished
    }

    /// Perform one iteration. Once finished, keeps returning the outcome.
    pub fn advance(&mut self) -> Progress {
        if let Some(outcome) = self.finished {
            return Progress::Finished(outcome);
        }
        match self.iterate() {
            Progress::Finished(outcome) => {
                self.finished = Some(outcome);
                Progress::Finished(outcome)
            }
            progress @ Progress::Continue(_) => progress,
        }
    }

    /// Walk to completion.
    pub fn run(mut self) -> Outcome {
        loop {
            if let Progress::Finished(outcome) = self.advance() {
                return outcome;
            }
        }
    }

    /// Walk to completion, keeping every intermediate step.
    pub fn run_traced(mut self) -> (Outcome, Vec<StepRecord>) {
        let mut steps = Vec::new();
        loop {
            match self.advance() {
                Progress::Continue(step) => steps.push(step),
                Progress::Finished(outcome) => return (outcome, steps),
            }
        }
    }

    fn iterate(&mut self) -> Progress {
        if self.state.remaining < self.state.norm {
            return Progress::Finished(Outcome::Failure);
        }

        let Some(slot) = self.limits.slot(self.state.level) else {
            return Progress::Finished(Outcome::Overflow);
        };

        let coeff = self.window.touch(slot);
        if self.state.parity {
            self.state.norm += if *coeff >= 0 { 1 } else { -1 };
            *coeff += 1;
        } else {
            self.state.norm += if *coeff <= 0 { 1 } else { -1 };
            *coeff -= 1;
        }
        self.state.remaining -= 1;

        let position = self.reflect(self.state.position);
        let hump = self.partition.hump_of(position);
        let folded = self.partition.fold()[hump] - position;

        let direction = match folded.cmp(&position) {
            Ordering::Less => -1,
            Ordering::Greater => 1,
            Ordering::Equal => {
                return Progress::Finished(classify_fixed_point(
                    self.state.norm,
                    self.state.remaining,
                ));
            }
        };

        let hump_shift = if hump == 0 {
            self.state.parity = !self.state.parity;
            ORIGIN_HUMP_SHIFT
        } else {
            1
        };
        let axis_shift = self.axis_crossings(position, folded);
        self.state.level += direction * (hump_shift + axis_shift);
        self.state.position = folded;

        Progress::Continue(StepRecord {
            position: folded,
            level: self.state.level,
            norm: self.state.norm,
            remaining: self.state.remaining,
        })
    }

    /// Reflect about the leftend axis and wrap once into `[0, T)`.
    fn reflect(&self, position: i64) -> i64 {
        let total = self.partition.total();
        let reflected = 2 * self.leftend - 1 - position;
        if reflected < 0 {
            reflected + total
        } else if reflected >= total {
            reflected - total
        } else {
            reflected
        }
    }

    /// Number of axis markers in `(min(from, to), max(from, to)]`.
    fn axis_crossings(&self, from: i64, to: i64) -> i64 {
        let (lo, hi) = if from < to { (from, to) } else { (to, from) };
        [self.leftend, self.rightend]
            .into_iter()
            .map(|marker| i64::from(lo < marker && marker <= hi))
            .sum()
    }
}

/// Outcome together with the recorded walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceReport {
    pub outcome: Outcome,
    pub steps: Vec<StepRecord>,
}

/// Stateless front end classifying `(partition, leftend)` pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrajectorySimulator {
    limits: LevelLimits,
}

impl TrajectorySimulator {
    pub const fn new(limits: LevelLimits) -> Self {
        Self { limits }
    }

    pub const fn limits(&self) -> LevelLimits {
        self.limits
    }

    pub fn classify(&self, partition: &Partition, leftend: i64) -> DomainResult<Outcome> {
        Ok(Trajectory::new(partition, leftend, self.limits)?.run())
    }

    pub fn trace(&self, partition: &Partition, leftend: i64) -> DomainResult<TraceReport> {
        let (outcome, steps) = Trajectory::new(partition, leftend, self.limits)?.run_traced();
        Ok(TraceReport { outcome, steps })
    }
}

impl Classifier for TrajectorySimulator {
    fn classify(&self, partition: &Partition, leftend: i64) -> DomainResult<Outcome> {
        Self::classify(self, partition, leftend)
    }
}
