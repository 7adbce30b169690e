use std::collections::HashSet;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::errors::TokenError;

/// Codec for the signed, self-contained session tokens.
///
/// Uses HS256 (HMAC with SHA-256) over a process-wide secret supplied as a
/// base64 string at construction. The key material is read-only after
/// construction, and validation returns a fresh [`AccessClaims`] per call, so
/// one codec instance can serve all concurrent requests.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from the base64-encoded signing secret and the token
    /// TTL in minutes.
    ///
    /// # Errors
    /// * `InvalidSecret` - secret is not decodable base64 or decodes empty
    /// * `InvalidTtl` - TTL is zero or negative
    ///
    /// Both are configuration faults; the caller is expected to treat them as
    /// fatal at startup rather than serve without a working codec.
    pub fn new(base64_secret: &str, ttl_minutes: i64) -> Result<Self, TokenError> {
        if ttl_minutes <= 0 {
            return Err(TokenError::InvalidTtl(ttl_minutes));
        }

        let secret = STANDARD
            .decode(base64_secret.trim())
            .map_err(|e| TokenError::InvalidSecret(e.to_string()))?;
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret(
                "decoded secret is empty".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            algorithm: Algorithm::HS256,
            ttl: Duration::minutes(ttl_minutes),
        })
    }

    /// Issue a signed token for `subject` carrying the given role names.
    ///
    /// The claim set is `{sub, roles, iat = now, exp = now + TTL}`; the
    /// output is a compact JWT, safe to transport in an HTTP header.
    ///
    /// # Errors
    /// * `EncodingFailed` - serialization or signing failed
    pub fn issue(
        &self,
        subject: &str,
        roles: &HashSet<String>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = AccessClaims::new(subject, roles, now, self.ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return its claims.
    ///
    /// The signature is re-derived over the payload and checked first; expiry
    /// is then enforced independently with zero clock leeway, rejecting at
    /// the expiry instant itself. The three failure kinds stay distinct so
    /// callers can tell garbage input from a forged signature from a token
    /// that simply aged out.
    ///
    /// # Errors
    /// * `Malformed` - input is not a structurally valid token
    /// * `BadSignature` - signature does not verify against the secret
    /// * `Expired` - `exp <= now`
    pub fn validate(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(map_decode_error)?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        ErrorKind::InvalidToken => TokenError::Malformed("wrong token structure".to_string()),
        ErrorKind::InvalidAlgorithm => {
            TokenError::Malformed("unexpected signing algorithm".to_string())
        }
        ErrorKind::Base64(e) => TokenError::Malformed(format!("invalid base64 segment: {}", e)),
        ErrorKind::Json(e) => TokenError::Malformed(format!("invalid claim payload: {}", e)),
        ErrorKind::Utf8(e) => TokenError::Malformed(format!("invalid utf-8 payload: {}", e)),
        ErrorKind::MissingRequiredClaim(claim) => {
            TokenError::Malformed(format!("missing required claim: {}", claim))
        }
        _ => TokenError::Malformed(err.to_string()),
    }
}
