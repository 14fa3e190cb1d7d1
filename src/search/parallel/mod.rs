//! Parallel execution of the search over a pool of worker threads.
//!
//! # Architecture
//!
//! - A **coordinator** seeds the task queue with one-digit roots, spawns the
//!   workers, and aggregates what they report
//! - **Workers** claim sequences from the shared [`TaskQueue`], test them, and
//!   push their extensions back
//! - A **channel** carries found solutions and final per-worker statistics
//!   back to the coordinator
//!
//! Termination is decided by the queue alone: a worker exits once nothing is
//! pending and no claimed task can push more work.
//!
//! # Example
//!
//! ```ignore
//! let config = SearchConfig::new(10).with_workers(4);
//! let result = run_search(&config)?;
//! assert_eq!(result.solutions[0].to_string(), "[3:8:1:6:5:4:7:2:9]");
//! ```
//!
//! [`TaskQueue`]: crate::search::queue::TaskQueue

pub mod channel;
pub mod coordinator;

pub use coordinator::run_search;
