//! API error types with HTTP response mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

const UNEXPECTED_MESSAGE: &str = "There was some problem with application";

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A domain operation failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The request body could not be parsed.
    #[error("{0}")]
    InvalidBody(String),

    /// A path segment or a query value could not be parsed.
    #[error("{0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Label used for the `domain_errors_total` metric.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Domain(err) => err.kind().as_str(),
            ApiError::InvalidBody(_) | ApiError::InvalidInput(_) => "invalid_input",
        }
    }
}

/// Error body returned for every failed request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerError {
    pub message: String,
    pub error_details: Vec<ErrorDetails>,
}

/// One entry of [`ServerError::error_details`].
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub message: String,
}

impl ServerError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_details: Vec::new(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        metrics::counter!("domain_errors_total", "kind" => self.kind()).increment(1);

        let (status, body) = match self {
            ApiError::Domain(err) => domain_error_to_response(err),
            ApiError::InvalidBody(reason) => {
                tracing::warn!(%reason, "malformed request body");
                (
                    StatusCode::BAD_REQUEST,
                    ServerError::new(format!(
                        "{reason}. Please check if your request body is correct"
                    )),
                )
            }
            ApiError::InvalidInput(reason) => {
                tracing::warn!(%reason, "malformed request");
                (
                    StatusCode::BAD_REQUEST,
                    ServerError::new(format!("{reason}. Please check if your request is correct")),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, ServerError) {
    if !err.kind().is_client_error() {
        tracing::error!(error = %err, "unexpected failure");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::new(UNEXPECTED_MESSAGE),
        );
    }

    let body = ServerError {
        message: err.to_string(),
        error_details: err
            .details()
            .iter()
            .map(|message| ErrorDetails {
                message: message.clone(),
            })
            .collect(),
    };
    (StatusCode::BAD_REQUEST, body)
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use common::ProjectId;
    use store::StoreError;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn not_found_is_bad_request() {
        let response = ApiError::from(DomainError::ProjectNotFound(ProjectId::new(1))).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Project with given id was not found");
        assert_eq!(json["errorDetails"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn field_validation_lists_details() {
        let err = DomainError::FieldValidation(vec![
            "Name cannot be blank or null".to_string(),
            "Name cannot be longer than 200 characters".to_string(),
        ]);

        let response = ApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Request validation failed");
        assert_eq!(
            json["errorDetails"][0]["message"],
            "Name cannot be blank or null"
        );
        assert_eq!(json["errorDetails"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn store_failure_is_hidden_behind_generic_message() {
        let err = DomainError::Store(StoreError::RecordNotFound {
            table: "project",
            id: 7,
        });

        let response = ApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["message"], UNEXPECTED_MESSAGE);
    }

    #[tokio::test]
    async fn invalid_body_points_at_the_body() {
        let response = ApiError::InvalidBody("Invalid date".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["message"],
            "Invalid date. Please check if your request body is correct"
        );
    }

    #[tokio::test]
    async fn invalid_input_appends_hint() {
        let response = ApiError::InvalidInput("Invalid page".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["message"],
            "Invalid page. Please check if your request is correct"
        );
    }

    #[test]
    fn kind_labels() {
        assert_eq!(ApiError::from(DomainError::MissingParam("page")).kind(), "missing_param");
        assert_eq!(ApiError::InvalidInput(String::new()).kind(), "invalid_input");
        assert_eq!(ApiError::InvalidBody(String::new()).kind(), "invalid_input");
    }
}
