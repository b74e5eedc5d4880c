//! Error types used by the toastvisor runtime.
//!
//! The queue operations themselves are total: `add` and the control calls never
//! fail, and overflow is reported as an event rather than an error. [`QueueError`]
//! only covers the edges of the runtime: rejecting an unusable configuration and
//! reporting a crashed actor on shutdown.

use thiserror::Error;

/// # Errors produced by the toastvisor runtime.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// A configuration field holds a value the queue cannot run with.
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending [`QueueConfig`](crate::QueueConfig) field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// The queue actor terminated abnormally (panicked or was aborted).
    #[error("queue actor failed: {reason}")]
    ActorFailed {
        /// Panic payload or join error description.
        reason: String,
    },
}

impl QueueError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use toastvisor::QueueError;
    ///
    /// let err = QueueError::InvalidConfig { field: "capacity", reason: "must be at least 1" };
    /// assert_eq!(err.as_label(), "queue_invalid_config");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            QueueError::InvalidConfig { .. } => "queue_invalid_config",
            QueueError::ActorFailed { .. } => "queue_actor_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            QueueError::InvalidConfig { field, reason } => format!("{field}: {reason}"),
            QueueError::ActorFailed { reason } => format!("actor: {reason}"),
        }
    }
}
