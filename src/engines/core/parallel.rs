//! Parallel processing primitives
//!
//! This module provides the fan-out/fan-in framework used by the match
//! engine and the file ingester: worker count resolution, balanced
//! contiguous chunking and a thread pool built fresh for every run.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// Get the default number of threads to use
pub fn default_num_threads() -> usize {
    num_cpus::get().max(1)
}

/// Resolve the number of workers for a run.
///
/// `None` or `Some(0)` selects the host parallelism. The result is capped
/// by rayon's thread budget and is never below 1.
pub fn resolve_num_threads(requested: Option<usize>) -> usize {
    let requested = requested
        .filter(|&n| n > 0)
        .unwrap_or_else(default_num_threads);

    requested.min(rayon::max_num_threads()).max(1)
}

/// Calculate the chunk size that splits `total_size` items across
/// `num_workers` workers, i.e. `ceil(total_size / num_workers)`
pub fn calculate_chunk_size(total_size: usize, num_workers: usize) -> usize {
    let num_workers = num_workers.max(1);
    ((total_size + num_workers - 1) / num_workers).max(1)
}

/// Chunk a slice into at most `num_workers` contiguous, near-equal chunks.
///
/// Only the final chunk may be shorter and no empty chunk is produced.
pub fn chunk_slice<T>(slice: &[T], num_workers: usize) -> Vec<&[T]> {
    if slice.is_empty() {
        return Vec::new();
    }

    let chunk_size = calculate_chunk_size(slice.len(), num_workers);
    slice.chunks(chunk_size).collect()
}

/// Build a thread pool with the given number of workers
pub fn build_pool(num_threads: usize) -> Result<ThreadPool, ThreadPoolBuildError> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|idx| format!("lottery-worker-{}", idx))
        .build()
}

/// Apply `f` to every item on its own worker, keeping input order.
///
/// A pool of `min(num_workers, items.len())` threads is built for the call
/// and dropped afterwards. A single item, a single worker, or a pool that
/// cannot be built runs on the calling thread instead.
pub fn parallel_map<T, R, F>(items: &[T], num_workers: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Send + Sync,
{
    let num_threads = num_workers.min(items.len());

    if num_threads <= 1 {
        return items.iter().map(f).collect();
    }

    match build_pool(num_threads) {
        Ok(pool) => pool.install(|| items.par_iter().map(&f).collect()),
        Err(err) => {
            log::warn!("Falling back to sequential processing: {}", err);
            items.iter().map(f).collect()
        }
    }
}

/// Split a slice into worker chunks, process them in parallel and join
/// the partial results.
///
/// `join` must be commutative and associative with `identity()` as its
/// neutral element; the result then does not depend on `num_workers`.
pub fn parallel_split_join<T, R, FP, FI, FJ>(
    items: &[T],
    num_workers: usize,
    process_func: FP,
    identity: FI,
    join_func: FJ,
) -> R
where
    T: Sync,
    R: Send,
    FP: Fn(&[T]) -> R + Send + Sync,
    FI: Fn() -> R,
    FJ: Fn(R, R) -> R,
{
    let chunks = chunk_slice(items, num_workers);
    let partials = parallel_map(&chunks, num_workers, |chunk| process_func(chunk));

    partials.into_iter().fold(identity(), join_func)
}
