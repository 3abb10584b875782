use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use sea_orm::DbErr;
use serde::Serialize;

/// Failures of the course operations.
#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    /// A required file part was not submitted.
    #[error("{0} file is required")]
    MissingRequiredFile(&'static str),
    /// The request body could not be decoded as multipart/form-data.
    #[error("invalid multipart body: {0}")]
    Multipart(String),
    /// No course has the requested identifier.
    #[error("course not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Persistence(#[from] DbErr),
}

/// Error body returned by all endpoints on failure.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable error description.
    #[schema(example = "Error creating course")]
    pub message: String,
    /// Underlying error detail, present on internal failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "image file is required")]
    pub error: Option<String>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    /// An operation failed; `message` names the operation, `detail` the cause.
    Failed {
        message: &'static str,
        detail: String,
        expose_detail: bool,
    },
}

impl AppError {
    /// Convert a course failure, keeping `NotFound` distinct from the generic failure.
    pub fn from_course(err: CourseError, message: &'static str, expose_detail: bool) -> Self {
        match err {
            CourseError::NotFound => AppError::NotFound("Course not found".into()),
            other => AppError::Failed {
                message,
                detail: other.to_string(),
                expose_detail,
            },
        }
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: msg,
                    error: None,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message: msg,
                    error: None,
                },
            ),
            AppError::Failed {
                message,
                detail,
                expose_detail,
            } => {
                tracing::error!("{message}: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: message.into(),
                        error: expose_detail.then_some(detail),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}
