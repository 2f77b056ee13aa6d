use actix_web::{HttpResponse, http::StatusCode};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// Reason the browser failed to produce a position fix. Reported by the
/// client alongside a check-in/out attempt; each maps to its own message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LocationFailure {
    #[display(fmt = "Location access denied by user")]
    PermissionDenied,
    #[display(fmt = "Location information unavailable")]
    PositionUnavailable,
    #[display(fmt = "Location request timed out")]
    Timeout,
}

#[derive(Debug, Display)]
pub enum ServiceError {
    #[display(fmt = "{} not found", entity)]
    NotFound { entity: &'static str },
    #[display(fmt = "Already checked in today")]
    AlreadyCheckedIn,
    #[display(fmt = "No active check-in found for today")]
    NoActiveCheckIn,
    #[display(fmt = "{}", _0)]
    Validation(String),
    #[display(fmt = "{}", _0)]
    LocationUnavailable(LocationFailure),
    #[display(fmt = "{}", _0)]
    BackendUnavailable(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str) -> Self {
        ServiceError::NotFound { entity }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }
}

impl std::error::Error for ServiceError {}

impl actix_web::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::AlreadyCheckedIn
            | ServiceError::NoActiveCheckIn
            | ServiceError::Validation(_)
            | ServiceError::LocationUnavailable(_) => StatusCode::BAD_REQUEST,
            ServiceError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn not_found_message_names_the_entity() {
        let err = ServiceError::not_found("Employee");
        assert_eq!(err.to_string(), "Employee not found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn location_failures_have_distinct_messages() {
        let msgs: Vec<String> = [
            LocationFailure::PermissionDenied,
            LocationFailure::PositionUnavailable,
            LocationFailure::Timeout,
        ]
        .iter()
        .map(|f| ServiceError::LocationUnavailable(*f).to_string())
        .collect();
        assert_eq!(msgs[0], "Location access denied by user");
        assert_eq!(msgs[1], "Location information unavailable");
        assert_eq!(msgs[2], "Location request timed out");
    }

    #[test]
    fn state_violations_map_to_bad_request() {
        assert_eq!(
            ServiceError::AlreadyCheckedIn.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::NoActiveCheckIn.status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
