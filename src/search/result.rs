//! Search result types and statistics

#![allow(dead_code)]

use crate::sequence::DigitSequence;
use std::fmt;
use std::ops::AddAssign;
use std::time::Duration;

/// A pandivisible number found by the search.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Solution {
    pub base: u32,
    /// Digits in reading order, most significant first.
    pub digits: Vec<u32>,
}

impl Solution {
    pub fn new(base: u32, digits: Vec<u32>) -> Self {
        Self { base, digits }
    }

    /// The numeric value, or `None` if it does not fit in a `u128`.
    pub fn value(&self) -> Option<u128> {
        self.digits.iter().try_fold(0u128, |acc, &d| {
            acc.checked_mul(u128::from(self.base))?
                .checked_add(u128::from(d))
        })
    }
}

impl From<&DigitSequence> for Solution {
    fn from(sequence: &DigitSequence) -> Self {
        Self::new(sequence.base(), sequence.digits())
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, digit) in self.digits.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{}", digit)?;
        }
        write!(f, "]")
    }
}

/// Counters kept by a single worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStatistics {
    /// Tasks popped and run through the divisibility test
    pub candidates_evaluated: u64,
    /// Candidates whose prefix was not divisible by its length
    pub pruned: u64,
    /// Complete candidates reported as solutions
    pub solutions_found: u64,
    /// Extensions pushed back onto the queue
    pub children_pushed: u64,
    /// Divisible prefixes with no usable digit left
    pub dead_ends: u64,
}

impl WorkerStatistics {
    /// Fraction of evaluated candidates that failed the divisibility test.
    pub fn prune_rate(&self) -> f64 {
        if self.candidates_evaluated == 0 {
            0.0
        } else {
            self.pruned as f64 / self.candidates_evaluated as f64
        }
    }
}

impl AddAssign for WorkerStatistics {
    fn add_assign(&mut self, other: Self) {
        self.candidates_evaluated += other.candidates_evaluated;
        self.pruned += other.pruned;
        self.solutions_found += other.solutions_found;
        self.children_pushed += other.children_pushed;
        self.dead_ends += other.dead_ends;
    }
}

/// Totals for a whole search.
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Sum over every worker
    pub totals: WorkerStatistics,
    /// Root sequences placed on the queue before the workers start
    pub roots_seeded: u64,
    /// Worker threads started (zero when the search was short-circuited)
    pub workers_spawned: usize,
    /// Wall time from seeding to the last join
    pub elapsed_time: Duration,
}

impl SearchStatistics {
    /// Candidates evaluated per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.totals.candidates_evaluated as f64 / secs
        }
    }
}

/// Outcome of an exhaustive search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub base: u32,
    /// Every pandivisible number in `base`, sorted by digits.
    pub solutions: Vec<Solution>,
    pub statistics: SearchStatistics,
    /// Per-worker counters, ordered by worker id.
    pub worker_statistics: Vec<(usize, WorkerStatistics)>,
}

impl SearchResult {
    /// A result for a search that never had to run.
    pub fn empty(base: u32) -> Self {
        Self {
            base,
            solutions: Vec::new(),
            statistics: SearchStatistics::default(),
            worker_statistics: Vec::new(),
        }
    }

    pub fn found_any(&self) -> bool {
        !self.solutions.is_empty()
    }

    /// One-line summary for the end of a run.
    pub fn summary(&self) -> String {
        match self.solutions.len() {
            0 => format!("No pandivisible numbers found in base {}.", self.base),
            1 => format!("1 pandivisible number found in base {}.", self.base),
            n => format!("{} pandivisible numbers found in base {}.", n, self.base),
        }
    }
}
