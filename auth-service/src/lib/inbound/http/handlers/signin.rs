use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AuthError;
use crate::domain::account::models::AuthenticatedSession;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::EmailAddress;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigninHttpRequestBody {
    email: String,
    password: String,
}

impl SigninHttpRequestBody {
    /// A malformed email cannot belong to any account, so it fails exactly
    /// like a wrong password would.
    fn try_into_domain(self) -> Result<Credentials, AuthError> {
        let email =
            EmailAddress::new(&self.email).map_err(|_| AuthError::AuthenticationFailed)?;
        Ok(Credentials::new(email, self.password))
    }
}

/// POST /auth/signin.
///
/// Every failure leaves through the same 401 with the same body. Which
/// check tripped, including infrastructure trouble, is visible in the logs
/// only.
pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninHttpRequestBody>,
) -> Result<ApiSuccess<SigninResponseData>, ApiError> {
    let credentials = body.try_into_domain().map_err(|_| unauthorized())?;
    let email = credentials.email.clone();

    let session = state.auth.login(credentials).await.map_err(|e| {
        match e {
            AuthError::AuthenticationFailed => {
                tracing::warn!(email = %email, "Sign-in rejected")
            }
            other => {
                tracing::error!(email = %email, error = %other, "Sign-in failed internally")
            }
        }
        unauthorized()
    })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SigninResponseData::from(&session),
    ))
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized("Invalid credentials".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigninResponseData {
    token: String,
    email: String,
    nickname: String,
    roles: Vec<String>,
}

impl From<&AuthenticatedSession> for SigninResponseData {
    fn from(session: &AuthenticatedSession) -> Self {
        let mut roles: Vec<String> = session.roles.iter().cloned().collect();
        roles.sort();
        Self {
            token: session.token.clone(),
            email: session.email.clone(),
            nickname: session.nickname.clone(),
            roles,
        }
    }
}
