use std::{num::NonZeroUsize, sync::mpsc::Receiver};

/// Counts finished items and reports every `batch_size` completions,
/// plus once more for a trailing partial batch.
pub(crate) struct ProgressObserver<C>
where
    C: FnMut(usize, usize),
{
    batch_size: NonZeroUsize,
    completed: usize,
    batch_index: usize,
    on_progress: C,
}

impl<C> ProgressObserver<C>
where
    C: FnMut(usize, usize),
{
    pub fn new(batch_size: NonZeroUsize, on_progress: C) -> Self {
        Self {
            batch_size,
            completed: 0,
            batch_index: 0,
            on_progress,
        }
    }

    /// Consume completion notices until every sender is gone, then flush.
    pub fn run(mut self, completions: Receiver<usize>) {
        for _index in completions {
            self.record_completion();
        }
        self.finish();
    }

    fn record_completion(&mut self) {
        self.completed += 1;
        if self.completed % self.batch_size == 0 {
            self.report();
        }
    }

    fn finish(mut self) {
        if self.completed % self.batch_size != 0 {
            self.report();
        }
    }

    fn report(&mut self) {
        log::trace!("batch {} reached, {} items completed", self.batch_index, self.completed);
        (self.on_progress)(self.batch_index, self.completed);
        self.batch_index += 1;
    }
}
