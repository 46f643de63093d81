use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::export::ExportError;

/// Errors surfaced at the API boundary. Fetch/parse detail is logged at the
/// handler and never leaks into the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("could not extract content from the url")]
    Unreachable,

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("internal error")]
    Internal(String),
}

impl ApiError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            Self::Unreachable | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::UnsupportedFormat(tag) => Self::UnsupportedFormat(tag),
            ExportError::MissingContent => {
                Self::InvalidInput("the 'content' parameter is empty".into())
            }
            ExportError::Serialize(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            ApiError::invalid("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnsupportedFormat("xml".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unreachable.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unreachable_message_is_generic() {
        assert_eq!(
            ApiError::Unreachable.to_string(),
            "could not extract content from the url"
        );
    }

    #[test]
    fn export_errors_map_to_api_errors() {
        let api: ApiError = ExportError::UnsupportedFormat("xml".into()).into();
        assert!(matches!(api, ApiError::UnsupportedFormat(_)));
        let api: ApiError = ExportError::MissingContent.into();
        assert!(matches!(api, ApiError::InvalidInput(_)));
    }
}
