//! Per-item failures.

use std::{any::Any, backtrace::Backtrace};

use thiserror::Error;

/// Why a single task or processed item failed.
///
/// The runner never fails as a whole; each failed item carries one of these
/// in its [`crate::TaskResult`].
#[derive(Debug, Error)]
pub enum TaskError<E> {
    /// The task returned `Err`. The error is kept as is.
    #[error("{0}")]
    Task(E),

    /// The task panicked. The panic was caught at the item boundary.
    ///
    /// `stack` is captured after unwinding, so it shows the worker's frames
    /// rather than the frame that panicked.
    #[error("panic recovered: {payload}\n{stack}")]
    PanicRecovered { payload: String, stack: String },
}

impl<E> TaskError<E> {
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        TaskError::PanicRecovered {
            payload: panic_message(payload.as_ref()),
            stack: Backtrace::force_capture().to_string(),
        }
    }

    pub fn is_panic(&self) -> bool {
        matches!(self, TaskError::PanicRecovered { .. })
    }

    /// The error returned by the task, if it did not panic.
    pub fn task_error(&self) -> Option<&E> {
        match self {
            TaskError::Task(err) => Some(err),
            TaskError::PanicRecovered { .. } => None,
        }
    }

    pub fn into_task_error(self) -> Option<E> {
        match self {
            TaskError::Task(err) => Some(err),
            TaskError::PanicRecovered { .. } => None,
        }
    }

    /// The panic message, if the task panicked.
    pub fn panic_payload(&self) -> Option<&str> {
        match self {
            TaskError::Task(_) => None,
            TaskError::PanicRecovered { payload, .. } => Some(payload),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
