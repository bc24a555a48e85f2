use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use serde::Serialize;

use kernel::KernelError;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(pub(crate) Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn status_of(error: &KernelError) -> StatusCode {
    match error {
        KernelError::Validation => StatusCode::BAD_REQUEST,
        KernelError::Unauthenticated => StatusCode::UNAUTHORIZED,
        KernelError::Forbidden => StatusCode::FORBIDDEN,
        KernelError::NotFound => StatusCode::NOT_FOUND,
        KernelError::Conflict | KernelError::Concurrency => StatusCode::CONFLICT,
        KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
        KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ErrorStatus {
    /// Server-side failures are logged and answered with a generic message.
    fn present(&self) -> (StatusCode, ErrorBody) {
        let context = self.0.current_context();
        let status = status_of(context);
        let message = if status.is_server_error() {
            tracing::error!("{:?}", self.0);
            INTERNAL_MESSAGE.to_string()
        } else {
            kernel::error_message(&self.0)
                .map(ToString::to_string)
                .unwrap_or_else(|| context.to_string())
        };
        (status, ErrorBody::new(message))
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let (status, body) = self.present();
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;

    use kernel::KernelError;

    use super::{ErrorBody, ErrorStatus};

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (KernelError::Validation, StatusCode::BAD_REQUEST),
            (KernelError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (KernelError::Forbidden, StatusCode::FORBIDDEN),
            (KernelError::NotFound, StatusCode::NOT_FOUND),
            (KernelError::Conflict, StatusCode::CONFLICT),
            (KernelError::Concurrency, StatusCode::CONFLICT),
            (KernelError::Timeout, StatusCode::REQUEST_TIMEOUT),
            (KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            let response = ErrorStatus::from(Report::new(error)).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn message_reaches_client() {
        let report = KernelError::Conflict.with_message("This room type is sold out");
        let (status, body) = ErrorStatus::from(report).present();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, ErrorBody::new("This room type is sold out"));

        let (_, body) = ErrorStatus::from(Report::new(KernelError::NotFound)).present();
        assert_eq!(body, ErrorBody::new("Resource not found"));
    }

    #[test]
    fn internal_details_stay_hidden() {
        let report = KernelError::Internal.with_message("connection refused on 10.0.0.3");
        let (status, body) = ErrorStatus::from(report).present();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, ErrorBody::new("Internal server error"));
    }
}
