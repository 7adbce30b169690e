use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::EmailAddressError;
use crate::domain::account::models::ChangePasswordCommand;
use crate::domain::account::models::EmailAddress;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangePasswordHttpRequestBody {
    email: String,
    old_password: String,
    new_password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseChangePasswordHttpRequestError {
    #[error(transparent)]
    Email(#[from] EmailAddressError),
    #[error("New password cannot be empty")]
    EmptyNewPassword,
}

impl From<ParseChangePasswordHttpRequestError> for ApiError {
    fn from(e: ParseChangePasswordHttpRequestError) -> Self {
        ApiError::UnprocessableEntity(e.to_string())
    }
}

impl ChangePasswordHttpRequestBody {
    fn try_into_domain(self) -> Result<ChangePasswordCommand, ParseChangePasswordHttpRequestError> {
        if self.new_password.is_empty() {
            return Err(ParseChangePasswordHttpRequestError::EmptyNewPassword);
        }

        let email = EmailAddress::new(&self.email)?;

        Ok(ChangePasswordCommand::new(
            email,
            self.old_password,
            self.new_password,
        ))
    }
}

/// POST /auth/change-password.
pub async fn change_password(
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordHttpRequestBody>,
) -> Result<ApiSuccess<ChangePasswordResponseData>, ApiError> {
    let command = body.try_into_domain()?;

    state
        .auth
        .change_password(command)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ChangePasswordResponseData {
            message: "Password changed successfully".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePasswordResponseData {
    pub message: String,
}
