pub mod change_password;
pub mod signin;
pub mod signout;
pub mod signup;
pub mod validate_token;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AuthError;

/// A wrapper for successful responses, pairing a status code with a JSON
/// body in the shared envelope shape.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// The failure half of the HTTP surface. Every variant carries the message
/// the client will see; internal detail is logged, not returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::AuthenticationFailed | AuthError::Token(_) => {
                Self::Unauthorized(e.to_string())
            }
            AuthError::DuplicateAccount => Self::Conflict(e.to_string()),
            AuthError::AccountNotFound | AuthError::InvalidCredential => {
                Self::BadRequest(e.to_string())
            }
            AuthError::InvalidEmail(_) | AuthError::InvalidNickname(_) => {
                Self::UnprocessableEntity(e.to_string())
            }
            // A role name only comes from the store, so a bad one is data
            // corruption, not client input
            AuthError::InvalidRoleName(_)
            | AuthError::Password(_)
            | AuthError::Configuration(_)
            | AuthError::Database(_) => Self::InternalServerError(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use ApiError::*;

        match self {
            InternalServerError(e) => {
                tracing::error!("{}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponseBody::new_error(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )),
                )
                    .into_response()
            }
            UnprocessableEntity(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponseBody::new_error(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    message,
                )),
            )
                .into_response(),
            BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponseBody::new_error(StatusCode::BAD_REQUEST, message)),
            )
                .into_response(),
            Conflict(message) => (
                StatusCode::CONFLICT,
                Json(ApiResponseBody::new_error(StatusCode::CONFLICT, message)),
            )
                .into_response(),
            Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponseBody::new_error(StatusCode::UNAUTHORIZED, message)),
            )
                .into_response(),
        }
    }
}

/// The envelope every response is wrapped in.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_account_maps_to_conflict() {
        let api_error = ApiError::from(AuthError::DuplicateAccount);
        assert_eq!(
            api_error,
            ApiError::Conflict("Email already used".to_string())
        );
    }

    #[test]
    fn test_authentication_failure_maps_to_unauthorized() {
        let api_error = ApiError::from(AuthError::AuthenticationFailed);
        assert_eq!(
            api_error,
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
    }

    #[test]
    fn test_account_not_found_maps_to_bad_request() {
        let api_error = ApiError::from(AuthError::AccountNotFound);
        assert_eq!(
            api_error,
            ApiError::BadRequest("Account not found".to_string())
        );
    }

    #[test]
    fn test_wrong_old_password_maps_to_bad_request() {
        let api_error = ApiError::from(AuthError::InvalidCredential);
        assert_eq!(
            api_error,
            ApiError::BadRequest("Old password is incorrect".to_string())
        );
    }

    #[test]
    fn test_database_errors_are_not_echoed_to_clients() {
        let response = ApiError::InternalServerError(
            "connection to database lost at 10.0.0.3:5432".to_string(),
        )
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
