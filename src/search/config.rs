//! Configuration for the pandivisible search

use crate::error::SearchError;

/// Parameters of one exhaustive search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base the numbers are written in.
    pub base: u32,
    /// Number of worker threads to spawn.
    pub num_workers: usize,
    /// Print each solution to stdout as soon as a worker finds it.
    pub echo_solutions: bool,
}

impl SearchConfig {
    /// A single-worker search in `base` that does not print solutions.
    pub fn new(base: u32) -> Self {
        Self {
            base,
            num_workers: 1,
            echo_solutions: false,
        }
    }

    /// Set the number of worker threads (at least one).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Enable or disable eager printing of solutions.
    pub fn with_echo(mut self, echo_solutions: bool) -> Self {
        self.echo_solutions = echo_solutions;
        self
    }

    /// Check the parameters before any worker is started.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.base < 2 {
            return Err(SearchError::BaseOutOfRange(self.base));
        }
        if self.num_workers == 0 {
            return Err(SearchError::NoWorkers);
        }
        Ok(())
    }

    /// Odd bases admit no pandivisible numbers, so no search is needed.
    pub fn is_trivially_empty(&self) -> bool {
        self.base % 2 == 1
    }
}
