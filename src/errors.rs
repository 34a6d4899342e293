use crate::relay::RelayError;
use axum::{Json, http::StatusCode};
use serde::Serialize;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        Self {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorBody {
            error: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lastfm::UpstreamError;

    #[test]
    fn missing_params_map_to_bad_request() {
        let err = AppError::from(RelayError::MissingParam("Tag name is required"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Tag name is required");
    }

    #[test]
    fn upstream_failures_collapse_to_internal() {
        let err = AppError::from(RelayError::Upstream(UpstreamError::Api(
            "Invalid API key".to_string(),
        )));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Invalid API key");
    }
}
