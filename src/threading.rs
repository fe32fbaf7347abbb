//! Fork-join splitting of elementwise work.
//!
//! The canonical index range `[0, totalsize)` of an output array is divided
//! into contiguous, disjoint chunks. Each chunk is paired with its own slice
//! of the output buffer and handed to a task on the rayon pool; the call
//! returns once every task has finished. Inputs are only read, so the loop
//! bodies need no synchronization.

use std::ops::Range;

use crate::PARALLEL_THRESHOLD;

/// Environment variable overriding the parallel threshold in
/// [`ParallelPolicy::from_env`].
pub const THRESHOLD_ENV: &str = "STRIDED_NDARRAY_PARALLEL_THRESHOLD";

/// Decides whether an elementwise pass runs serially or in parallel, and
/// into how many chunks a parallel pass is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelPolicy {
    /// Minimum element count for the parallel path.
    pub threshold: usize,
    /// Number of chunks (one task each) for the parallel path.
    pub num_chunks: usize,
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            threshold: PARALLEL_THRESHOLD,
            num_chunks: available_parallelism(),
        }
    }
}

impl ParallelPolicy {
    /// A policy that never takes the parallel path.
    pub fn serial() -> Self {
        Self {
            threshold: usize::MAX,
            num_chunks: 1,
        }
    }

    /// Default policy with the threshold read from [`THRESHOLD_ENV`].
    ///
    /// Unset or unparsable values fall back to [`PARALLEL_THRESHOLD`].
    pub fn from_env() -> Self {
        let policy = Self::default();
        match std::env::var(THRESHOLD_ENV) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(threshold) => policy.with_threshold(threshold),
                Err(_) => {
                    log::warn!("ignoring {THRESHOLD_ENV}={value:?}: not an element count");
                    policy
                }
            },
            Err(_) => policy,
        }
    }

    pub fn with_threshold(self, threshold: usize) -> Self {
        Self { threshold, ..self }
    }

    /// Set the chunk count; zero is treated as one.
    pub fn with_chunks(self, num_chunks: usize) -> Self {
        Self {
            num_chunks: num_chunks.max(1),
            ..self
        }
    }

    /// Whether a pass over `total` elements should run in parallel.
    pub fn should_parallelize(&self, total: usize) -> bool {
        cfg!(feature = "parallel") && self.num_chunks > 1 && total >= self.threshold
    }
}

/// Number of worker threads available for a parallel pass.
pub fn available_parallelism() -> usize {
    #[cfg(feature = "parallel")]
    let nthreads = rayon::current_num_threads();
    #[cfg(not(feature = "parallel"))]
    let nthreads = 1;
    nthreads
}

/// Split `[0, total)` into at most `num_chunks` contiguous, disjoint ranges
/// of `ceil(total / num_chunks)` elements (the last one may be shorter).
///
/// The ranges cover `[0, total)` exactly and in order. Empty ranges are never
/// produced.
pub fn chunk_ranges(total: usize, num_chunks: usize) -> Vec<Range<usize>> {
    if total == 0 {
        return vec![];
    }
    let num_chunks = num_chunks.clamp(1, total);
    let chunk_size = total.div_ceil(num_chunks);
    (0..total)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(total))
        .collect()
}

/// Run `f` once per range, each call receiving the range and the matching
/// slice of `out`, in parallel, and wait for all of them.
///
/// `ranges` must be contiguous, in order and cover `out` exactly, as produced
/// by [`chunk_ranges`].
pub fn for_each_chunk<F>(out: &mut [f32], ranges: &[Range<usize>], f: &F)
where
    F: Fn(Range<usize>, &mut [f32]) + Sync,
{
    debug_assert_eq!(ranges.iter().map(|r| r.len()).sum::<usize>(), out.len());

    #[cfg(feature = "parallel")]
    rayon::scope(|s| {
        let mut rest = out;
        for range in ranges {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            let range = range.clone();
            s.spawn(move |_| {
                log::trace!("chunk {:?} on {:?}", range, rayon::current_thread_index());
                f(range, head)
            });
        }
    });

    #[cfg(not(feature = "parallel"))]
    {
        let mut rest = out;
        for range in ranges {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            f(range.clone(), head);
        }
    }
}
