//! The per-thread search loop: prune, report, or expand each claimed task.

use crate::search::parallel::channel::{WorkerChannels, WorkerMessage};
use crate::search::queue::TaskQueue;
use crate::search::result::{Solution, WorkerStatistics};
use crate::sequence::{parity_class, DigitSequence};
use log::{debug, trace};

/// What happened to a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The prefix is not divisible by its length.
    Pruned,
    /// Every nonzero digit is used and every prefix divides its length.
    Solution,
    /// The task was extended by this many digits (possibly zero).
    Expanded(usize),
}

/// Digits that may follow `task`: the parity class of the next position,
/// minus every digit already used.
pub fn usable_digits(task: &DigitSequence) -> Vec<u32> {
    let used = task.used_digits();
    parity_class(task.base(), task.len() + 1)
        .filter(|&d| !used[d as usize])
        .collect()
}

/// Run one task through the divisibility test and, if it survives, push its
/// extensions onto `queue`.
pub fn process_task(task: &DigitSequence, queue: &TaskQueue<DigitSequence>) -> Step {
    let len = task.len();
    if task.modulo(len as u64) != 0 {
        return Step::Pruned;
    }

    if len == task.base() as usize - 1 {
        return Step::Solution;
    }

    let digits = usable_digits(task);
    for &digit in &digits {
        queue.push(task.extend(digit));
    }
    Step::Expanded(digits.len())
}

/// Pop and process tasks until the queue reports quiescence.
///
/// Each claimed task is marked done when its guard drops, whichever way
/// processing ends.
pub fn run_worker(
    worker_id: usize,
    queue: &TaskQueue<DigitSequence>,
    channels: WorkerChannels,
) -> WorkerStatistics {
    let mut stats = WorkerStatistics::default();

    while let Ok(task) = queue.claim() {
        stats.candidates_evaluated += 1;

        match process_task(&task, queue) {
            Step::Pruned => stats.pruned += 1,
            Step::Solution => {
                stats.solutions_found += 1;
                let solution = Solution::from(&*task);
                trace!("Worker {} found {}", worker_id, solution);
                channels.sink.report(&solution);
                let _ = channels
                    .to_coordinator
                    .send(WorkerMessage::Found { worker_id, solution });
            }
            Step::Expanded(0) => stats.dead_ends += 1,
            Step::Expanded(n) => stats.children_pushed += n as u64,
        }
    }

    debug!(
        "Worker {} stats: evaluated={}, pruned={} ({:.1}%), solutions={}, pushed={}, dead_ends={}",
        worker_id,
        stats.candidates_evaluated,
        stats.pruned,
        stats.prune_rate() * 100.0,
        stats.solutions_found,
        stats.children_pushed,
        stats.dead_ends
    );

    let _ = channels.to_coordinator.send(WorkerMessage::Finished {
        worker_id,
        statistics: stats,
    });

    stats
}
