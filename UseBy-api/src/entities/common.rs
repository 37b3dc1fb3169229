use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use use_by_domain::entities::ValidationError;

/// Error response format for API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a not found error response
    pub fn not_found(resource: &str) -> Self {
        Self {
            error: "not_found".to_string(),
            message: format!("The requested {} could not be found", resource),
            details: None,
        }
    }

    /// Create a validation error response listing every violated invariant
    pub fn validation_error(errors: &[ValidationError]) -> Self {
        let details: Vec<ValidationErrorDetail> = errors.iter().map(ValidationErrorDetail::from).collect();
        Self {
            error: "validation_error".to_string(),
            message: "The schedule is not valid".to_string(),
            details: serde_json::to_value(details).ok(),
        }
    }

    /// Create an invalid operation response carrying the unchanged draft
    pub fn invalid_operation(message: &str, draft: serde_json::Value) -> Self {
        Self {
            error: "invalid_operation".to_string(),
            message: message.to_string(),
            details: Some(serde_json::json!({ "draft": draft })),
        }
    }

    /// Create a bad request error response
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create a service unavailable response
    pub fn service_unavailable(message: &str) -> Self {
        Self {
            error: "service_unavailable".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
            details: None,
        }
    }

    fn status(&self) -> StatusCode {
        match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::UNPROCESSABLE_ENTITY,
            "bad_request" | "invalid_operation" => StatusCode::BAD_REQUEST,
            "service_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// One violated schedule invariant, as shown next to the offending field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorDetail {
    /// Schedule field the error belongs to
    pub field: String,

    /// Machine-readable code, e.g. "missing_name"
    pub code: String,

    /// Human-readable message
    pub message: String,
}

impl From<&ValidationError> for ValidationErrorDetail {
    fn from(error: &ValidationError) -> Self {
        Self {
            field: error.field().to_string(),
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorResponse::not_found("schedule").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorResponse::validation_error(&[ValidationError::MissingName]).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorResponse::invalid_operation("nope", serde_json::Value::Null).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorResponse::service_unavailable("scanner").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(ErrorResponse::internal_error().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_details() {
        let response = ErrorResponse::validation_error(&[
            ValidationError::MissingDosage,
            ValidationError::EndBeforeStart,
        ]);
        let details = response.details.unwrap();
        assert_eq!(details[0]["field"], "dosage");
        assert_eq!(details[0]["code"], "missing_dosage");
        assert_eq!(details[1]["field"], "end_date");
        assert_eq!(details[1]["message"], "End date must not be before the start date");
    }
}
