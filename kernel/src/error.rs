use std::fmt::{Display, Formatter};

use error_stack::{Context, Report};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    Validation,
    Unauthenticated,
    Forbidden,
    NotFound,
    Conflict,
    Concurrency,
    Timeout,
    Internal,
}

impl KernelError {
    /// Builds a report whose message is safe to show to the caller.
    pub fn with_message(self, message: impl Into<String>) -> Report<KernelError> {
        Report::new(self).attach_printable(ErrorMessage::new(message))
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Invalid input"),
            KernelError::Unauthenticated => write!(f, "Authentication required"),
            KernelError::Forbidden => write!(f, "Access denied"),
            KernelError::NotFound => write!(f, "Resource not found"),
            KernelError::Conflict => write!(f, "Conflicting state"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage(String);

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl AsRef<str> for ErrorMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Message attached to the report, if any.
pub fn error_message(report: &Report<KernelError>) -> Option<&str> {
    report.downcast_ref::<ErrorMessage>().map(AsRef::as_ref)
}
