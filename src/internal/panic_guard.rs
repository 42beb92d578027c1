use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::{TaskError, TaskResult};

/// Run one item and turn whatever happens into a [`TaskResult`].
///
/// Unwinding stops here, so a panicking item never takes its worker down.
/// Builds with `panic = "abort"` cannot recover and terminate the process.
pub(crate) fn catch_task<R, E>(task: impl FnOnce() -> Result<R, E>) -> TaskResult<R, E> {
    match catch_unwind(AssertUnwindSafe(task)) {
        Ok(result) => result.into(),
        Err(payload) => TaskResult::Failure(TaskError::from_panic(payload)),
    }
}
