use std::{
    collections::VecDeque,
    sync::{Condvar, Mutex},
};

/// An entry of the [`TaskQueue`]. Every worker consumes exactly one
/// [`Work::Terminate`] and exits.
pub(crate) enum Work<T> {
    Task(T),
    Terminate,
}

/// Shared FIFO queue the dispatcher fills and the workers drain.
/// Each entry is handed to exactly one caller of [`TaskQueue::wait_for_work`].
pub(crate) struct TaskQueue<T> {
    tasks: Mutex<VecDeque<Work<T>>>,
    condvar: Condvar,
}

impl<T> TaskQueue<T> {
    pub fn with_capacity(capacity: usize) -> TaskQueue<T> {
        TaskQueue {
            tasks: Mutex::new(VecDeque::with_capacity(capacity)),
            condvar: Condvar::new(),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    /// Append tasks in order and return how many were added.
    pub fn extend(&self, new_tasks: impl IntoIterator<Item = T>) -> usize {
        self.push_all(new_tasks.into_iter().map(Work::Task))
    }

    /// Append one terminate marker per worker.
    pub fn close(&self, num_workers: usize) {
        self.push_all((0..num_workers).map(|_| Work::Terminate));
    }

    fn push_all(&self, work: impl Iterator<Item = Work<T>>) -> usize {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.extend(work);
        let added = tasks.len() - before;
        drop(tasks);

        if added > 1 {
            self.condvar.notify_all();
        } else if added == 1 {
            self.condvar.notify_one();
        }
        added
    }

    /// Block until an entry is available and take it.
    pub fn wait_for_work(&self) -> Work<T> {
        let tasks = self.tasks.lock().unwrap();
        let mut tasks = self
            .condvar
            .wait_while(tasks, |tasks| tasks.is_empty())
            .unwrap();
        match tasks.pop_front() {
            Some(work) => work,
            None => unreachable!("woken with an empty queue"),
        }
    }
}
