use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

/// POST /auth/signout.
///
/// Tokens are stateless and carry their own expiry, so there is nothing to
/// revoke here. The endpoint exists so clients have a uniform call to make
/// when discarding a session; forgetting the token is the actual sign-out.
pub async fn signout() -> ApiSuccess<SignoutResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        SignoutResponseData {
            message: "You've been signed out!".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignoutResponseData {
    pub message: String,
}
