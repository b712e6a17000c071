use super::Error;

/// A task submitted to the worker pool panicked or was aborted.
#[derive(Debug)]
pub(super) struct TaskFailed {
    message: Box<str>,
    cancelled: bool,
}

impl std::error::Error for TaskFailed {}

impl core::fmt::Display for TaskFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.cancelled {
            write!(f, "task cancelled: {}", self.message)
        } else {
            write!(f, "task failed: {}", self.message)
        }
    }
}

impl Error {
    /// Creates an error for a worker task that did not run to completion.
    pub fn task_failed(message: impl Into<String>, cancelled: bool) -> Error {
        Error::from(super::ErrorKind::TaskFailed(TaskFailed {
            message: message.into().into(),
            cancelled,
        }))
    }

    /// Returns `true` if this error is a failed or cancelled worker task.
    pub fn is_task_failed(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::TaskFailed(_)))
    }

    /// Returns `true` if this error is a worker task that was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::TaskFailed(TaskFailed { cancelled: true, .. })))
    }
}
