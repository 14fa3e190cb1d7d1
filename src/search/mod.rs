//! Concurrent backtracking search for pandivisible numbers
//!
//! Candidates grow one digit at a time. Each step keeps only prefixes whose
//! value is divisible by their length, and only extends them with unused
//! digits of the parity the next position requires.

pub mod config;
pub mod parallel;
pub mod queue;
pub mod result;
pub mod worker;

pub use config::SearchConfig;
pub use parallel::run_search;
#[allow(unused_imports)]
pub use result::{SearchResult, Solution};
