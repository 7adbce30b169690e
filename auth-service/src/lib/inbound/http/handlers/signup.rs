use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::EmailAddressError;
use crate::account::errors::NicknameError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Nickname;
use crate::domain::account::models::RegisterAccountCommand;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupHttpRequestBody {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupHttpRequestError {
    #[error(transparent)]
    Email(#[from] EmailAddressError),
    #[error(transparent)]
    Nickname(#[from] NicknameError),
    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl From<ParseSignupHttpRequestError> for ApiError {
    fn from(e: ParseSignupHttpRequestError) -> Self {
        ApiError::UnprocessableEntity(e.to_string())
    }
}

impl SignupHttpRequestBody {
    fn try_into_domain(self) -> Result<RegisterAccountCommand, ParseSignupHttpRequestError> {
        if self.password.is_empty() {
            return Err(ParseSignupHttpRequestError::EmptyPassword);
        }

        let nickname = Nickname::new(&self.name)?;
        let email = EmailAddress::new(&self.email)?;

        Ok(RegisterAccountCommand::new(nickname, email, self.password))
    }
}

/// POST /auth/signup.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupHttpRequestBody>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    let command = body.try_into_domain()?;

    state
        .auth
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    email: String,
    nickname: String,
    roles: Vec<String>,
}

impl From<&Account> for SignupResponseData {
    fn from(account: &Account) -> Self {
        let mut roles: Vec<String> = account.role_names().into_iter().collect();
        roles.sort();
        Self {
            email: account.email.as_str().to_string(),
            nickname: account.nickname.as_str().to_string(),
            roles,
        }
    }
}
