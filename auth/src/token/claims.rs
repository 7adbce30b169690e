use std::collections::HashSet;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by a session token.
///
/// Subject is the account email; `roles` is the flat set of role names the
/// account held at issuance. `iat`/`exp` are Unix timestamps with
/// `exp = iat + TTL`. A value of this type is only obtained from
/// [`TokenCodec::validate`](crate::TokenCodec::validate) (or built internally
/// at issuance), and each validation call returns its own instance — there is
/// no shared "last validated" state anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (account email)
    pub sub: String,

    /// Role names assigned to the subject
    pub roles: HashSet<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Build the claim set for a token issued at `now` with the given TTL.
    pub(crate) fn new(
        subject: &str,
        roles: &HashSet<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            roles: roles.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Subject these claims were issued for.
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Role names embedded in the token.
    pub fn roles(&self) -> &HashSet<String> {
        &self.roles
    }

    /// Whether the claims are expired at `now`.
    ///
    /// The expiry instant itself counts as expired: a token is valid strictly
    /// before `exp`, never at it.
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp <= now
    }
}
