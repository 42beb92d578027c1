use crate::TaskError;

/// Outcome of one task or processed item.
///
/// A failed item has no value. Returned collections are indexed like the input,
/// so position `i` always describes task `i`.
#[derive(Debug)]
pub enum TaskResult<R, E> {
    Success(R),
    Failure(TaskError<E>),
}

impl<R, E> TaskResult<R, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&R> {
        match self {
            TaskResult::Success(value) => Some(value),
            TaskResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&TaskError<E>> {
        match self {
            TaskResult::Success(_) => None,
            TaskResult::Failure(err) => Some(err),
        }
    }

    pub fn into_value(self) -> Option<R> {
        match self {
            TaskResult::Success(value) => Some(value),
            TaskResult::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<R, TaskError<E>> {
        self.into()
    }
}

impl<R, E> From<Result<R, E>> for TaskResult<R, E> {
    fn from(result: Result<R, E>) -> Self {
        match result {
            Ok(value) => TaskResult::Success(value),
            Err(err) => TaskResult::Failure(TaskError::Task(err)),
        }
    }
}

impl<R, E> From<TaskResult<R, E>> for Result<R, TaskError<E>> {
    fn from(result: TaskResult<R, E>) -> Self {
        match result {
            TaskResult::Success(value) => Ok(value),
            TaskResult::Failure(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let result: TaskResult<u32, String> = Ok(4).into();
        assert!(result.is_success());
        assert_eq!(result.value(), Some(&4));
        assert!(result.error().is_none());
        assert_eq!(result.into_result().ok(), Some(4));
    }

    #[test]
    fn test_failure_has_no_value() {
        let result: TaskResult<u32, &str> = Err("bad input").into();
        assert!(result.is_failure());
        assert_eq!(result.value(), None);
        assert_eq!(result.error().map(|e| e.to_string()), Some("bad input".into()));
        assert_eq!(result.into_value(), None);
    }
}
