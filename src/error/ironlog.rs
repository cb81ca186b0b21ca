use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use ironlog_schema::UnknownVariant;
use serde::Serialize;
use thiserror::Error as ThisError;

use super::IsRetryable;
use super::oauth::OauthError;

#[derive(Debug, ThisError)]
pub enum IronlogError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("External sync is not connected")]
    SyncNotConnected,

    #[error("External sync is not configured")]
    SyncNotConfigured,

    /// The stored token was rejected and a refresh did not help; the user must reconnect.
    #[error("External sync authorization expired: {0}")]
    SyncReauthRequired(String),

    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error(transparent)]
    Oauth(#[from] OauthError),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl IronlogError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        IronlogError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<UnknownVariant> for IronlogError {
    fn from(e: UnknownVariant) -> Self {
        IronlogError::UnexpectedError(format!("corrupt row: {e}"))
    }
}

impl From<JsonRejection> for IronlogError {
    fn from(rejection: JsonRejection) -> Self {
        IronlogError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for IronlogError {
    fn from(rejection: QueryRejection) -> Self {
        IronlogError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for IronlogError {
    fn from(rejection: PathRejection) -> Self {
        IronlogError::Validation(rejection.body_text())
    }
}

impl IntoResponse for IronlogError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            IronlogError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                ApiErrorObject::new("NOT_FOUND", format!("{entity} not found: {id}")),
            ),

            IronlogError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ApiErrorObject::new("INVALID_REQUEST", message),
            ),

            IronlogError::Forbidden(message) => {
                (StatusCode::FORBIDDEN, ApiErrorObject::new("FORBIDDEN", message))
            }

            IronlogError::Conflict(message) => {
                (StatusCode::CONFLICT, ApiErrorObject::new("CONFLICT", message))
            }

            IronlogError::SyncNotConnected => (
                StatusCode::UNAUTHORIZED,
                ApiErrorObject::new("SYNC_NOT_CONNECTED", "External sync is not connected."),
            ),

            IronlogError::SyncReauthRequired(_) => (
                StatusCode::UNAUTHORIZED,
                ApiErrorObject::new(
                    "SYNC_REAUTH_REQUIRED",
                    "Token expired, please reconnect.",
                ),
            ),

            IronlogError::SyncNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiErrorObject::new(
                    "SYNC_NOT_CONFIGURED",
                    "External sync credentials are not configured.",
                ),
            ),

            IronlogError::DatabaseError(_)
            | IronlogError::RactorError(_)
            | IronlogError::UnexpectedError(_)
            | IronlogError::Oauth(OauthError::Other { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorObject::new("INTERNAL_ERROR", "An internal server error occurred."),
            ),

            IronlogError::JsonError(_) | IronlogError::Oauth(OauthError::Parse { .. }) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorObject::new("BAD_UPSTREAM_PAYLOAD", "Failed to parse upstream response."),
            ),

            IronlogError::Oauth(OauthError::Request(_))
            | IronlogError::Oauth(OauthError::ServerResponse { .. })
            | IronlogError::ReqwestError(_)
            | IronlogError::UrlError(_) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorObject::new("UPSTREAM_ERROR", "Upstream service error."),
            ),

            IronlogError::UpstreamStatus(code) => {
                let msg = match code {
                    StatusCode::TOO_MANY_REQUESTS => "Upstream rate limit exceeded.",
                    StatusCode::FORBIDDEN => "Upstream permission denied.",
                    StatusCode::NOT_FOUND => "Upstream resource not found.",
                    _ => "An upstream error occurred.",
                };
                (
                    StatusCode::BAD_GATEWAY,
                    ApiErrorObject::new("UPSTREAM_ERROR", msg),
                )
            }
        };

        if status.is_server_error() {
            tracing::error!(status = %status, code = %error_body.code, "request failed");
        }

        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Debug, Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
}

impl ApiErrorObject {
    fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}

impl IsRetryable for IronlogError {
    fn is_retryable(&self) -> bool {
        match self {
            IronlogError::ReqwestError(e) => e.is_timeout() || e.is_connect(),
            IronlogError::UpstreamStatus(status) => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            IronlogError::Oauth(e) => e.is_retryable(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: IronlogError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        (
            status,
            serde_json::from_slice(&body).expect("error body must be JSON"),
        )
    }

    #[tokio::test]
    async fn taxonomy_maps_to_status_codes() {
        let (status, body) = render(IronlogError::not_found("workout", 7)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "workout not found: 7");

        let (status, _) = render(IronlogError::Validation("bad date".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = render(IronlogError::Forbidden("built-in".into())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = render(IronlogError::Conflict("dup".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = render(IronlogError::SyncReauthRequired("refresh failed".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "SYNC_REAUTH_REQUIRED");

        let (status, _) = render(IronlogError::UpstreamStatus(StatusCode::SERVICE_UNAVAILABLE)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let rejected = OauthError::ServerResponse {
            error: "invalid_grant".into(),
        };
        let (status, body) = render(IronlogError::Oauth(rejected)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");

        let (status, body) = render(IronlogError::UnexpectedError("boom".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "An internal server error occurred.");
    }

    #[test]
    fn only_transient_upstream_failures_are_retryable() {
        assert!(IronlogError::UpstreamStatus(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(IronlogError::UpstreamStatus(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(!IronlogError::UpstreamStatus(StatusCode::UNAUTHORIZED).is_retryable());
        assert!(!IronlogError::SyncNotConnected.is_retryable());
    }
}
