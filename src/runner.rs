use std::{num::NonZeroUsize, sync::Arc, thread::available_parallelism};

use crate::{
    TaskResult,
    fault::{FaultReporter, PanicReport},
    internal::dispatch,
};

type NoProgress = fn(usize, usize);

/// Runs closures, or maps a function over a sequence, on a bounded number of
/// worker threads.
///
/// Every operation blocks until all started items have finished and returns
/// one [`TaskResult`] per item in input order. Workers are started per call
/// and joined before the call returns. Items, tasks and processors may borrow
/// from the caller.
#[derive(Debug, Clone)]
pub struct BoundedRunner {
    limit: NonZeroUsize,
    faults: FaultReporter,
}

impl Default for BoundedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundedRunner {
    /// Create a runner that uses one worker per available logical core.
    pub fn new() -> Self {
        Self {
            limit: default_limit(),
            faults: FaultReporter::default(),
        }
    }

    /// Create a runner with at most `limit` concurrent workers.
    /// A limit of `0` falls back to the number of available logical cores.
    pub fn with_limit(limit: usize) -> Self {
        let limit = NonZeroUsize::new(limit).unwrap_or_else(|| {
            let fallback = default_limit();
            log::debug!("concurrency limit 0 replaced by available parallelism ({fallback})");
            fallback
        });
        Self {
            limit,
            faults: FaultReporter::default(),
        }
    }

    /// Report every recovered panic to `hook` instead of the `log` facade.
    ///
    /// The hook runs on the worker thread that caught the panic, after the item's
    /// result has been stored. A panic inside the hook is caught and logged.
    pub fn on_panic<H>(mut self, hook: H) -> Self
    where
        H: Fn(&PanicReport<'_>) + Send + Sync + 'static,
    {
        self.faults = FaultReporter::Hook(Arc::new(hook));
        self
    }

    /// The maximum number of items processed at the same time.
    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Run every task and return their results in the order of `tasks`.
    ///
    /// ```rust
    /// use bounded_runner::prelude::*;
    ///
    /// let tasks: Vec<Box<dyn FnOnce() -> Result<u32, String> + Send>> = vec![
    ///     Box::new(|| Ok(1)),
    ///     Box::new(|| Err("no".to_string())),
    /// ];
    /// let results = BoundedRunner::with_limit(2).run_all(tasks);
    ///
    /// assert_eq!(results[0].value(), Some(&1));
    /// assert!(results[1].is_failure());
    /// ```
    pub fn run_all<F, R, E>(&self, tasks: impl IntoIterator<Item = F>) -> Vec<TaskResult<R, E>>
    where
        F: FnOnce() -> Result<R, E> + Send,
        R: Send,
        E: Send,
    {
        self.map_all(tasks, |task: F| task())
    }

    /// Apply `processor` to every item and return the results in the order of `items`.
    pub fn map_all<T, R, E, P>(
        &self,
        items: impl IntoIterator<Item = T>,
        processor: P,
    ) -> Vec<TaskResult<R, E>>
    where
        T: Send,
        R: Send,
        E: Send,
        P: Fn(T) -> Result<R, E> + Sync,
    {
        dispatch(self.limit, items, &processor, &self.faults, None::<NoProgress>)
    }

    /// Like [`Self::map_all`], but calls `on_progress(batch_index, completed)`
    /// each time the number of finished items reaches a multiple of the limit,
    /// and once more at the end for a trailing partial batch.
    ///
    /// Items count as finished in completion order, failures included. The callback
    /// runs on its own observer thread and sees strictly increasing counts.
    ///
    /// ```rust
    /// use bounded_runner::prelude::*;
    ///
    /// let mut seen = Vec::new();
    /// BoundedRunner::with_limit(2).map_all_with_progress(
    ///     1..=5,
    ///     |n: u32| Ok::<_, ()>(n),
    ///     |batch, completed| seen.push((batch, completed)),
    /// );
    /// assert_eq!(seen, vec![(0, 2), (1, 4), (2, 5)]);
    /// ```
    pub fn map_all_with_progress<T, R, E, P, C>(
        &self,
        items: impl IntoIterator<Item = T>,
        processor: P,
        on_progress: C,
    ) -> Vec<TaskResult<R, E>>
    where
        T: Send,
        R: Send,
        E: Send,
        P: Fn(T) -> Result<R, E> + Sync,
        C: FnMut(usize, usize) + Send,
    {
        dispatch(self.limit, items, &processor, &self.faults, Some(on_progress))
    }

    /// Process `items` in consecutive batches of at most `limit` items.
    ///
    /// Each batch is run to completion before `on_batch(batch_results, batch_index, total_batches)`
    /// is called on the calling thread. If it returns `true`, no further batch is
    /// started and the returned vector only holds the results of processed items.
    ///
    /// ```rust
    /// use bounded_runner::prelude::*;
    ///
    /// let results = BoundedRunner::with_limit(2).map_all_in_batches(
    ///     vec![1, 2, 3, 4],
    ///     |n: i32| Ok::<_, ()>(n * 2),
    ///     |_batch, batch_index, _total| batch_index == 0,
    /// );
    /// assert_eq!(results.len(), 2);
    /// ```
    pub fn map_all_in_batches<T, R, E, P, B>(
        &self,
        items: impl IntoIterator<Item = T>,
        processor: P,
        mut on_batch: B,
    ) -> Vec<TaskResult<R, E>>
    where
        T: Send,
        R: Send,
        E: Send,
        P: Fn(T) -> Result<R, E> + Sync,
        B: FnMut(&[TaskResult<R, E>], usize, usize) -> bool,
    {
        let items = items.into_iter().collect::<Vec<_>>();
        let total_batches = items.len().div_ceil(self.limit.get());

        let mut results = Vec::with_capacity(items.len());
        let mut items = items.into_iter().peekable();
        let mut batch_index = 0;
        while items.peek().is_some() {
            let batch = items.by_ref().take(self.limit.get()).collect::<Vec<_>>();
            let start = results.len();
            results.extend(dispatch(
                self.limit,
                batch,
                &processor,
                &self.faults,
                None::<NoProgress>,
            ));

            if on_batch(&results[start..], batch_index, total_batches) {
                log::debug!(
                    "stopped after batch {batch_index}, {} items processed",
                    results.len()
                );
                break;
            }
            batch_index += 1;
        }
        results
    }
}

/// Run every task with at most `limit` concurrent workers (`0` means one per logical core).
pub fn run_all<F, R, E>(limit: usize, tasks: impl IntoIterator<Item = F>) -> Vec<TaskResult<R, E>>
where
    F: FnOnce() -> Result<R, E> + Send,
    R: Send,
    E: Send,
{
    BoundedRunner::with_limit(limit).run_all(tasks)
}

/// Apply `processor` to every item with at most `limit` concurrent workers
/// (`0` means one per logical core).
pub fn map_all<T, R, E, P>(
    limit: usize,
    items: impl IntoIterator<Item = T>,
    processor: P,
) -> Vec<TaskResult<R, E>>
where
    T: Send,
    R: Send,
    E: Send,
    P: Fn(T) -> Result<R, E> + Sync,
{
    BoundedRunner::with_limit(limit).map_all(items, processor)
}

fn default_limit() -> NonZeroUsize {
    available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_uses_available_parallelism() {
        assert_eq!(BoundedRunner::with_limit(0).limit(), default_limit().get());
        assert_eq!(BoundedRunner::new().limit(), default_limit().get());
        assert_eq!(BoundedRunner::with_limit(3).limit(), 3);
    }

    #[test]
    fn test_total_batches_reported() {
        let mut calls = Vec::new();
        let results = BoundedRunner::with_limit(2).map_all_in_batches(
            1..=5,
            |n: u32| Ok::<_, ()>(n),
            |batch, index, total| {
                calls.push((batch.len(), index, total));
                false
            },
        );
        assert_eq!(results.len(), 5);
        assert_eq!(calls, vec![(2, 0, 3), (2, 1, 3), (1, 2, 3)]);
    }
}
