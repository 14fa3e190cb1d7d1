//! Error types for the search engine

use thiserror::Error;

/// Raised by [`TaskQueue::pop`](crate::search::queue::TaskQueue::pop) once the
/// queue is empty and no claimed task can produce more work.
///
/// This is the normal end of a worker loop, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no tasks left in queue")]
pub struct NoMoreTasks;

/// Errors that stop a search from running or completing.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("base {0} out of range (must be at least 2)")]
    BaseOutOfRange(u32),

    #[error("number of threads out of range (must be at least 1)")]
    NoWorkers,

    #[error("failed to spawn worker {worker_id}: {source}")]
    Spawn {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },
}
