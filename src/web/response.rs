// [library] Axum response building blocks
use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::validation::FieldError;

// [business] Envelope for every non-read response: {"result":"ok"} or {"result":"failed","message":...}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub result: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn ok() -> Self {
        Self {
            result: "ok",
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            result: "failed",
            message: Some(message.into()),
        }
    }
}

// [business] 422 body - the complete list so the caller can fix every field at once
#[derive(Debug, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

// [rust] Every way a request can fail; IntoResponse maps each to one envelope and status
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    MalformedBody(String),

    #[error("{0}")]
    PayloadTooLarge(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    // Extractor rejections keep axum's text but not its plain-text body
    fn from_rejection(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(message)
        } else {
            ApiError::MalformedBody(message)
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}

// [business] Keep only the driver's message - no SQLSTATE prefixes or internals
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        let message = match &err {
            sqlx::Error::Database(db_err) => db_err.message().to_string(),
            other => other.to_string(),
        };
        ApiError::Database(message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(errors) => {
                (status, Json(ValidationErrors { errors })).into_response()
            }
            ApiError::NotFound(message) => (status, Json(Envelope::failed(message))).into_response(),
            ApiError::Database(message)
            | ApiError::MalformedBody(message)
            | ApiError::PayloadTooLarge(message) => {
                (status, Json(Envelope::failed(message))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Location;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_envelope_serialization() {
        assert_eq!(serde_json::to_value(Envelope::ok()).unwrap(), json!({"result": "ok"}));
        assert_eq!(
            serde_json::to_value(Envelope::failed("boom")).unwrap(),
            json!({"result": "failed", "message": "boom"})
        );
    }

    #[tokio::test]
    async fn test_validation_maps_to_422_with_errors_only() {
        let error = ApiError::from(vec![FieldError {
            field: "workArea".to_string(),
            message: "workArea is missing".to_string(),
            location: Location::Body,
            value: None,
        }]);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            json!({"errors": [{"field": "workArea", "message": "workArea is missing", "location": "body"}]})
        );
    }

    #[tokio::test]
    async fn test_not_found_and_database_errors() {
        let response = ApiError::NotFound("Agent not found in the database").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"result": "failed", "message": "Agent not found in the database"})
        );

        let response = ApiError::from(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["result"], "failed");
        assert!(body["message"].is_string());
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_400() {
        let response = ApiError::MalformedBody("bad json".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::PayloadTooLarge("too big".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(response).await,
            json!({"result": "failed", "message": "too big"})
        );
    }
}
