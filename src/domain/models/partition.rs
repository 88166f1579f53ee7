//! Partition of the cyclic domain into three humps.
//!
//! A [`Partition`] is built from three segment widths and caches the two
//! derived arrays the trajectory walks over:
//!
//! - `boundary[i]`: cumulative width through hump `i`, i.e. the exclusive
//!   upper bound of hump `i` in `[0, T)`.
//! - `fold[i]`: `boundary[i - 1] + boundary[i] - 1`, the reflection point of
//!   hump `i` (with `boundary[-1] = 0`).

use serde::Serialize;

use crate::domain::errors::{DomainError, DomainResult};

/// Number of humps the cyclic domain is split into.
pub const HUMPS: usize = 3;

/// A cyclic domain of size `T` split into [`HUMPS`] contiguous segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Partition {
    widths: [u32; HUMPS],
    boundary: [i64; HUMPS],
    fold: [i64; HUMPS],
}

impl Partition {
    /// Derive boundaries and fold points from the three widths.
    ///
    /// Fails only when every width is zero, since an empty domain has no
    /// positions to walk.
    pub fn new(widths: [u32; HUMPS]) -> DomainResult<Self> {
        let mut boundary = [0i64; HUMPS];
        let mut fold = [0i64; HUMPS];
        let mut previous = 0i64;

        for (i, &width) in widths.iter().enumerate() {
            boundary[i] = previous + i64::from(width);
            fold[i] = previous + boundary[i] - 1;
            previous = boundary[i];
        }

        if previous == 0 {
            return Err(DomainError::EmptyPartition(widths));
        }

        Ok(Self {
            widths,
            boundary,
            fold,
        })
    }

    pub const fn widths(&self) -> [u32; HUMPS] {
        self.widths
    }

    pub const fn boundary(&self) -> [i64; HUMPS] {
        self.boundary
    }

    pub const fn fold(&self) -> [i64; HUMPS] {
        self.fold
    }

    /// Size `T` of the cyclic domain.
    pub const fn total(&self) -> i64 {
        self.boundary[HUMPS - 1]
    }

    /// Largest admissible leftend, `T / 2`.
    pub const fn max_leftend(&self) -> i64 {
        self.total() / 2
    }

    /// Index of the hump containing `position`: the smallest `i` with
    /// `boundary[i] > position`.
    ///
    /// Positions at or past `T` are clamped to the last hump; the simulator
    /// only asks about positions already wrapped into `[0, T)`.
    pub fn hump_of(&self, position: i64) -> usize {
        self.boundary
            .iter()
            .position(|&bound| bound > position)
            .unwrap_or(HUMPS - 1)
    }
}
