use std::collections::HashSet;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::EmailAddressError;
use crate::account::errors::NicknameError;
use crate::account::errors::RoleNameError;

/// A registered account together with the roles granted to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub nickname: Nickname,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// The names of the granted roles, deduplicated.
    pub fn role_names(&self) -> HashSet<String> {
        self.roles
            .iter()
            .map(|role| role.name.to_string())
            .collect()
    }
}

/// A unique identifier for an [Account].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated email address, stored trimmed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new [EmailAddress] from `raw`, rejecting strings that are
    /// not well-formed addresses.
    pub fn new(raw: &str) -> Result<Self, EmailAddressError> {
        let trimmed = raw.trim();
        if email_address::EmailAddress::is_valid(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(EmailAddressError::Invalid {
                invalid_email: raw.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EmailAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A display name chosen at registration. Opaque apart from being
/// non-empty and bounded in length.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    const MAX_LENGTH: usize = 64;

    pub fn new(raw: &str) -> Result<Self, NicknameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(NicknameError::Empty)
        } else if trimmed.chars().count() > Self::MAX_LENGTH {
            Err(NicknameError::TooLong {
                max_length: Self::MAX_LENGTH,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Nickname {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A grantable role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
}

/// A unique identifier for a [Role].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoleId(pub Uuid);

impl RoleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RoleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of role names the service grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoleName {
    User,
    Admin,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::User => "USER",
            RoleName::Admin => "ADMIN",
        }
    }
}

impl Display for RoleName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = RoleNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(RoleName::User),
            "ADMIN" => Ok(RoleName::Admin),
            other => Err(RoleNameError::Unknown {
                unknown_name: other.to_string(),
            }),
        }
    }
}

/// The email/password pair presented at sign-in.
///
/// The password is kept out of [Debug] output so request logging can never
/// capture it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: String,
}

impl Credentials {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// The fields required to register a new account.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterAccountCommand {
    pub nickname: Nickname,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterAccountCommand {
    pub fn new(nickname: Nickname, email: EmailAddress, password: String) -> Self {
        Self {
            nickname,
            email,
            password,
        }
    }
}

impl fmt::Debug for RegisterAccountCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterAccountCommand")
            .field("nickname", &self.nickname)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// The fields required to rotate an account password.
#[derive(Clone, PartialEq, Eq)]
pub struct ChangePasswordCommand {
    pub email: EmailAddress,
    pub old_password: String,
    pub new_password: String,
}

impl ChangePasswordCommand {
    pub fn new(email: EmailAddress, old_password: String, new_password: String) -> Self {
        Self {
            email,
            old_password,
            new_password,
        }
    }
}

impl fmt::Debug for ChangePasswordCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordCommand")
            .field("email", &self.email)
            .field("old_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

/// What a successful sign-in hands back to the caller.
///
/// [Debug] output redacts the token for the same reason [Credentials]
/// redacts the password.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub email: String,
    pub nickname: String,
    pub roles: HashSet<String>,
    pub token: String,
}

impl fmt::Debug for AuthenticatedSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedSession")
            .field("email", &self.email)
            .field("nickname", &self.nickname)
            .field("roles", &self.roles)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_address_accepts_valid_address() {
        let email = EmailAddress::new("alice@example.com").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_email_address_trims_whitespace() {
        let email = EmailAddress::new("  alice@example.com  ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_email_address_rejects_invalid_address() {
        for raw in ["", "not-an-email", "alice@", "@example.com", "a b@c.d"] {
            assert!(EmailAddress::new(raw).is_err(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_nickname_rejects_empty_and_blank() {
        assert!(matches!(Nickname::new(""), Err(NicknameError::Empty)));
        assert!(matches!(Nickname::new("   "), Err(NicknameError::Empty)));
    }

    #[test]
    fn test_nickname_rejects_over_long_names() {
        let raw = "x".repeat(65);
        assert!(matches!(
            Nickname::new(&raw),
            Err(NicknameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_role_name_round_trips_through_str() {
        for name in [RoleName::User, RoleName::Admin] {
            assert_eq!(name.as_str().parse::<RoleName>().unwrap(), name);
        }
        assert!("SUPERVISOR".parse::<RoleName>().is_err());
    }

    #[test]
    fn test_role_names_deduplicates() {
        let role = Role {
            id: RoleId::new(),
            name: RoleName::User,
        };
        let duplicate = Role {
            id: RoleId::new(),
            name: RoleName::User,
        };
        let account = Account {
            id: AccountId::new(),
            email: EmailAddress::new("alice@example.com").unwrap(),
            nickname: Nickname::new("Alice").unwrap(),
            password_hash: "hash".to_string(),
            roles: vec![role, duplicate],
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(account.role_names(), HashSet::from(["USER".to_string()]));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new(
            EmailAddress::new("alice@example.com").unwrap(),
            "hunter2".to_string(),
        );
        let rendered = format!("{:?}", credentials);

        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_change_password_command_debug_redacts_both_passwords() {
        let command = ChangePasswordCommand::new(
            EmailAddress::new("alice@example.com").unwrap(),
            "old-secret".to_string(),
            "new-secret".to_string(),
        );
        let rendered = format!("{:?}", command);

        assert!(!rendered.contains("old-secret"));
        assert!(!rendered.contains("new-secret"));
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = AuthenticatedSession {
            email: "alice@example.com".to_string(),
            nickname: "Alice".to_string(),
            roles: HashSet::from(["USER".to_string()]),
            token: "header.payload.signature".to_string(),
        };
        let rendered = format!("{:?}", session);

        assert!(!rendered.contains("header.payload.signature"));
    }
}
