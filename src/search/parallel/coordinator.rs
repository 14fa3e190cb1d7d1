//! Search coordinator: seeds the queue, runs the worker pool, and gathers
//! what the workers report.

use crate::error::SearchError;
use crate::search::config::SearchConfig;
use crate::search::parallel::channel::{create_channels, CoordinatorChannels, WorkerMessage};
use crate::search::queue::TaskQueue;
use crate::search::result::{SearchResult, SearchStatistics, WorkerStatistics};
use crate::search::worker::run_worker;
use crate::sequence::{partition_digits, DigitSequence};
use log::{info, warn};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Run an exhaustive search for pandivisible numbers.
///
/// Odd bases return an empty result without starting any worker.
pub fn run_search(config: &SearchConfig) -> Result<SearchResult, SearchError> {
    config.validate()?;

    if config.is_trivially_empty() {
        info!("Base {} is odd, no pandivisible numbers exist", config.base);
        return Ok(SearchResult::empty(config.base));
    }

    let cpus = num_cpus::get();
    if config.num_workers > cpus {
        warn!(
            "Running {} workers on {} logical CPUs",
            config.num_workers, cpus
        );
    }

    let start_time = Instant::now();
    let queue = Arc::new(TaskQueue::new());

    // Position 1 is odd, so only odd digits can lead.
    let (odd, _even) = partition_digits(config.base);
    for &digit in &odd {
        queue.push(DigitSequence::root(config.base, digit));
    }
    info!(
        "Searching base {} with {} workers from {} roots",
        config.base,
        config.num_workers,
        odd.len()
    );

    let (coordinator_channels, worker_channels) =
        create_channels(config.num_workers, config.echo_solutions);

    let mut worker_handles = Vec::with_capacity(config.num_workers);
    let mut spawn_error = None;
    for (worker_id, channels) in worker_channels.into_iter().enumerate() {
        let queue = Arc::clone(&queue);
        let spawned = thread::Builder::new()
            .name(format!("worker-{}", worker_id))
            .spawn(move || run_worker(worker_id, &queue, channels));
        match spawned {
            Ok(handle) => worker_handles.push((worker_id, handle)),
            Err(source) => {
                // Workers already running still drain the queue; stop adding
                // more and report after they finish.
                spawn_error = Some(SearchError::Spawn { worker_id, source });
                break;
            }
        }
    }
    let workers_spawned = worker_handles.len();

    let mut result = collect_results(config.base, coordinator_channels);

    let mut panicked = None;
    for (worker_id, handle) in worker_handles {
        if handle.join().is_err() {
            panicked.get_or_insert(SearchError::WorkerPanicked { worker_id });
        }
    }
    if let Some(err) = panicked.or(spawn_error) {
        return Err(err);
    }
    debug_assert!(queue.is_exhausted());

    result.statistics.roots_seeded = odd.len() as u64;
    result.statistics.workers_spawned = workers_spawned;
    result.statistics.elapsed_time = start_time.elapsed();

    info!(
        "Search of base {} finished in {:?}: {} evaluated ({:.0}/s), {} solutions",
        config.base,
        result.statistics.elapsed_time,
        result.statistics.totals.candidates_evaluated,
        result.statistics.throughput(),
        result.solutions.len()
    );

    Ok(result)
}

/// Receive worker messages until every worker has dropped its sender.
fn collect_results(base: u32, channels: CoordinatorChannels) -> SearchResult {
    let mut result = SearchResult::empty(base);

    for msg in channels.from_workers.iter() {
        match msg {
            WorkerMessage::Found { solution, .. } => result.solutions.push(solution),
            WorkerMessage::Finished {
                worker_id,
                statistics,
            } => result.worker_statistics.push((worker_id, statistics)),
        }
    }

    result.solutions.sort();
    result.worker_statistics.sort_by_key(|(id, _)| *id);

    let mut totals = WorkerStatistics::default();
    for (_, stats) in &result.worker_statistics {
        totals += *stats;
    }
    result.statistics = SearchStatistics {
        totals,
        ..SearchStatistics::default()
    };

    debug_assert_eq!(channels.sink.found(), result.solutions.len() as u64);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::result::Solution;

    /// Every arrangement of `1..base` whose prefixes all divide their length,
    /// found by plain permutation enumeration.
    fn brute_force(base: u32) -> Vec<Vec<u32>> {
        fn permute(base: u64, prefix: &mut Vec<u32>, rest: &mut Vec<u32>, out: &mut Vec<Vec<u32>>) {
            if rest.is_empty() {
                let mut value = 0u64;
                for (i, &d) in prefix.iter().enumerate() {
                    value = value * base + u64::from(d);
                    if value % (i as u64 + 1) != 0 {
                        return;
                    }
                }
                out.push(prefix.clone());
                return;
            }
            for i in 0..rest.len() {
                let d = rest.remove(i);
                prefix.push(d);
                permute(base, prefix, rest, out);
                prefix.pop();
                rest.insert(i, d);
            }
        }

        let mut out = Vec::new();
        let mut rest: Vec<u32> = (1..base).collect();
        permute(u64::from(base), &mut Vec::new(), &mut rest, &mut out);
        out.sort();
        out
    }

    fn found_digits(result: &SearchResult) -> Vec<Vec<u32>> {
        result.solutions.iter().map(|s| s.digits.clone()).collect()
    }

    #[test]
    fn test_base_10_single_worker() {
        let result = run_search(&SearchConfig::new(10)).unwrap();

        assert_eq!(
            result.solutions,
            vec![Solution::new(10, vec![3, 8, 1, 6, 5, 4, 7, 2, 9])]
        );
        assert_eq!(result.solutions[0].value(), Some(381_654_729));
        assert_eq!(result.statistics.workers_spawned, 1);
        assert_eq!(result.statistics.roots_seeded, 5);
        assert_eq!(result.statistics.totals.solutions_found, 1);
    }

    #[test]
    fn test_base_10_many_workers() {
        let result = run_search(&SearchConfig::new(10).with_workers(8)).unwrap();

        assert_eq!(found_digits(&result), vec![vec![3, 8, 1, 6, 5, 4, 7, 2, 9]]);
        assert_eq!(result.worker_statistics.len(), 8);
        let ids: Vec<_> = result.worker_statistics.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_matches_brute_force_small_bases() {
        for base in [2u32, 4, 6, 8, 10] {
            let expected = brute_force(base);
            for workers in [1, 3] {
                let result = run_search(&SearchConfig::new(base).with_workers(workers)).unwrap();
                assert_eq!(
                    found_digits(&result),
                    expected,
                    "base {} with {} workers",
                    base,
                    workers
                );
            }
        }
    }

    #[test]
    fn test_known_small_results() {
        let result = run_search(&SearchConfig::new(2)).unwrap();
        assert_eq!(found_digits(&result), vec![vec![1]]);

        let result = run_search(&SearchConfig::new(4)).unwrap();
        assert_eq!(found_digits(&result), vec![vec![1, 2, 3], vec![3, 2, 1]]);

        let result = run_search(&SearchConfig::new(6).with_workers(2)).unwrap();
        assert_eq!(
            found_digits(&result),
            vec![vec![1, 4, 3, 2, 5], vec![5, 4, 3, 2, 1]]
        );
    }

    #[test]
    fn test_odd_base_short_circuits() {
        for base in [3u32, 5, 7, 9, 11, 13, 101] {
            let result = run_search(&SearchConfig::new(base).with_workers(4)).unwrap();
            assert!(!result.found_any(), "base {}", base);
            assert_eq!(result.statistics.workers_spawned, 0);
            assert_eq!(result.statistics.totals.candidates_evaluated, 0);
            assert!(result.worker_statistics.is_empty());
        }
    }

    #[test]
    fn test_statistics_add_up() {
        let result = run_search(&SearchConfig::new(8).with_workers(4)).unwrap();
        let totals = result.statistics.totals;

        // Every evaluated task is either a root or a pushed child.
        assert_eq!(
            totals.candidates_evaluated,
            result.statistics.roots_seeded + totals.children_pushed
        );
        // And each one ends in exactly one outcome.
        assert!(totals.pruned + totals.solutions_found <= totals.candidates_evaluated);
        assert_eq!(totals.solutions_found, result.solutions.len() as u64);
        assert_eq!(totals.dead_ends, 0);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            run_search(&SearchConfig::new(1)),
            Err(SearchError::BaseOutOfRange(1))
        ));
        assert!(matches!(
            run_search(&SearchConfig::new(0)),
            Err(SearchError::BaseOutOfRange(0))
        ));
    }
}
