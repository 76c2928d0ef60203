use std::num::ParseIntError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use derive_new::new;
use serde::Serialize;
use snafu::{Location, Snafu};

use crate::model::ModelError;
use crate::store::StoreError;
use crate::Located;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum ApiError {
    #[snafu(display("path argument `{input}` must be an integer"))]
    InvalidIndex {
        input: String,
        source: ParseIntError,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("invalid request body: {message}"))]
    InvalidBody {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("{kind} with index {index} not found"))]
    NotFound {
        kind: &'static str,
        index: i64,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("{source}"))]
    Model { source: ModelError },

    #[snafu(display("{source}"))]
    Store { source: StoreError },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidIndex { .. } | ApiError::InvalidBody { .. } | ApiError::Model { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound { .. }
            | ApiError::Store {
                source: StoreError::NotFound { .. },
                ..
            } => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable name of the condition, sent alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidIndex { .. } => "InvalidIndex",
            ApiError::InvalidBody { .. } => "InvalidBody",
            ApiError::NotFound { .. }
            | ApiError::Store {
                source: StoreError::NotFound { .. },
                ..
            } => "NotFound",
            ApiError::Model { source, .. } => match source {
                ModelError::StandardMismatch { .. } => "StandardMismatch",
                ModelError::DefinitionMismatch { .. } => "DefinitionMismatch",
                ModelError::EmptyReel { .. } => "EmptyReel",
                ModelError::MalformedTimecode { .. } => "MalformedTimecode",
                ModelError::TimecodeOverflow { .. } => "TimecodeOverflow",
                ModelError::UnknownEnumValue { .. } => "UnknownEnumValue",
            },
            ApiError::Store { .. } => "Storage",
        }
    }
}

/// Points at where the underlying condition was raised, not where it was wrapped.
impl Located for ApiError {
    fn location(&self) -> Location {
        match self {
            ApiError::Model { source, .. } => source.location(),
            ApiError::Store { source, .. } => source.location(),
            ApiError::InvalidIndex { location, .. }
            | ApiError::InvalidBody { location, .. }
            | ApiError::NotFound { location, .. } => *location,
        }
    }
}

#[derive(Debug, Serialize, new)]
struct ErrorResponse {
    message: String,
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(location = %self.location(), error = ?self, "{}", self);
        } else {
            tracing::info!(location = %self.location(), "rejected request: {}", self);
        }

        let content = ErrorResponse::new(self.to_string(), self.kind());
        (status, Json(content)).into_response()
    }
}
