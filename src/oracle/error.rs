use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::types::ErrorBody;
use crate::llm::LlmError;
use crate::metadata::MetadataError;

/// Handler error, rendered as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("OpenAI API key is missing. The Oracle's powers are failing! 👻")]
    OracleUnavailable,
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::OracleUnavailable | ApiError::Llm(_) | ApiError::Metadata(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
