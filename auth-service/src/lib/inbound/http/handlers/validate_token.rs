use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// GET /auth/validate.
///
/// Checks the bearer token presented in the Authorization header and, when
/// it verifies, answers with the subject it was issued to. No account
/// lookup happens here; the signature and expiry are the whole check.
pub async fn validate_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<ValidateTokenResponseData>, ApiError> {
    let token = extract_bearer_token(&headers)?;

    let claims = state.tokens.validate(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ValidateTokenResponseData {
            email: claims.subject().to_string(),
        },
    ))
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let header_value = header_value
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    if !header_value.starts_with("Bearer ") {
        return Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        ));
    }

    Ok(header_value.trim_start_matches("Bearer "))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateTokenResponseData {
    pub email: String,
}
