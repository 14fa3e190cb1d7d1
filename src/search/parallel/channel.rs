//! Worker-to-coordinator messaging and the shared solution sink.

use crate::search::result::{Solution, WorkerStatistics};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Message sent from workers to the coordinator.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// Worker found a pandivisible number.
    Found { worker_id: usize, solution: Solution },
    /// Worker saw the queue run dry and exited its loop.
    Finished {
        worker_id: usize,
        statistics: WorkerStatistics,
    },
}

/// Output shared by all workers.
///
/// Solutions are written eagerly, one line at a time, under a single lock
/// so lines from different workers never interleave.
#[derive(Debug)]
pub struct SolutionSink {
    echo: bool,
    output: Mutex<()>,
    found: AtomicU64,
}

impl SolutionSink {
    pub fn new(echo: bool) -> Self {
        Self {
            echo,
            output: Mutex::new(()),
            found: AtomicU64::new(0),
        }
    }

    /// Record a solution and, if echoing, print its `Found` line.
    pub fn report(&self, solution: &Solution) {
        self.found.fetch_add(1, Ordering::SeqCst);
        if !self.echo {
            return;
        }

        let _guard = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        // A closed stdout must not take the search down with it.
        let _ = writeln!(out, "Found {}", solution);
        let _ = out.flush();
    }

    /// Number of solutions reported so far.
    pub fn found(&self) -> u64 {
        self.found.load(Ordering::SeqCst)
    }
}

/// Channel endpoints for a worker.
pub struct WorkerChannels {
    /// Send messages to coordinator.
    pub to_coordinator: Sender<WorkerMessage>,
    /// Shared solution sink.
    pub sink: Arc<SolutionSink>,
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Receive messages from workers.
    pub from_workers: Receiver<WorkerMessage>,
    /// Shared solution sink.
    pub sink: Arc<SolutionSink>,
}

/// Create channels for a search with the given number of workers.
pub fn create_channels(num_workers: usize, echo: bool) -> (CoordinatorChannels, Vec<WorkerChannels>) {
    let sink = Arc::new(SolutionSink::new(echo));

    // Unbounded so workers never block on reporting
    let (worker_tx, coordinator_rx) = unbounded();

    let worker_channels: Vec<WorkerChannels> = (0..num_workers)
        .map(|_| WorkerChannels {
            to_coordinator: worker_tx.clone(),
            sink: Arc::clone(&sink),
        })
        .collect();

    // Only the workers hold senders now, so the receiver disconnects once
    // every worker has exited.
    drop(worker_tx);

    let coordinator = CoordinatorChannels {
        from_workers: coordinator_rx,
        sink,
    };

    (coordinator, worker_channels)
}
