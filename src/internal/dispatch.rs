use std::{
    num::NonZeroUsize,
    sync::mpsc::{Sender, channel},
    thread,
};

use super::{ProgressObserver, ResultSlots, TaskQueue, Work, catch_task};
use crate::{
    TaskError, TaskResult,
    fault::{FaultReporter, PanicReport},
};

/// Run `processor` over `items` on at most `limit` scoped worker threads and
/// return one result per item, in input order.
///
/// With `on_progress`, a separate observer thread is started that reports every
/// `limit` completions. The call returns once every worker has been joined.
pub(crate) fn dispatch<T, R, E, P, C>(
    limit: NonZeroUsize,
    items: impl IntoIterator<Item = T>,
    processor: &P,
    faults: &FaultReporter,
    on_progress: Option<C>,
) -> Vec<TaskResult<R, E>>
where
    T: Send,
    R: Send,
    E: Send,
    P: Fn(T) -> Result<R, E> + Sync,
    C: FnMut(usize, usize) + Send,
{
    let items = items.into_iter();
    let queue = TaskQueue::with_capacity(items.size_hint().0);
    let total = queue.extend(items.enumerate());
    if total == 0 {
        return Vec::new();
    }

    let num_workers = limit.get().min(total);
    queue.close(num_workers);
    let slots = ResultSlots::new(total);
    log::debug!("dispatching {total} items to {num_workers} workers");

    thread::scope(|scope| {
        let completions = on_progress.map(|on_progress| {
            let (sender, receiver) = channel();
            scope.spawn(move || ProgressObserver::new(limit, on_progress).run(receiver));
            sender
        });

        for _ in 0..num_workers {
            let (queue, slots, completions) = (&queue, &slots, completions.clone());
            scope.spawn(move || work(queue, slots, processor, faults, completions));
        }
    });

    debug_assert_eq!(slots.filled(), slots.len());
    log::debug!("all {total} items finished");
    slots.into_vec()
}

fn work<T, R, E, P>(
    queue: &TaskQueue<(usize, T)>,
    slots: &ResultSlots<TaskResult<R, E>>,
    processor: &P,
    faults: &FaultReporter,
    completions: Option<Sender<usize>>,
) where
    P: Fn(T) -> Result<R, E>,
{
    while let Work::Task((index, item)) = queue.wait_for_work() {
        let result = catch_task(|| processor(item));
        let panic = match &result {
            TaskResult::Failure(TaskError::PanicRecovered { payload, stack }) => {
                Some((payload.clone(), stack.clone()))
            }
            _ => None,
        };
        slots.insert(index, result);

        if let Some(completions) = &completions {
            // The observer only goes away early if the progress callback panicked.
            let _ = completions.send(index);
        }

        if let Some((payload, stack)) = panic {
            faults.report(&PanicReport {
                index,
                payload: &payload,
                backtrace: &stack,
            });
        }
    }
}
