//! Authentication primitives library
//!
//! Provides the cryptographic building blocks for the authentication service:
//! - Password hashing and verification (Argon2id, salted, one-way)
//! - Signed session tokens carrying subject and role claims (HS256)
//!
//! The service crate owns accounts, roles, and orchestration; this crate only
//! knows how to hash secrets and how to mint and check tokens. Both types hold
//! no per-call mutable state and are safe to share across concurrent requests.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use std::collections::HashSet;
//!
//! use auth::TokenCodec;
//! use base64::engine::general_purpose::STANDARD;
//! use base64::Engine as _;
//! use chrono::Utc;
//!
//! let secret = STANDARD.encode(b"an-hmac-secret-of-at-least-32-bytes!");
//! let codec = TokenCodec::new(&secret, 60).unwrap();
//!
//! let roles: HashSet<String> = ["USER".to_string()].into();
//! let token = codec.issue("alice@example.com", &roles, Utc::now()).unwrap();
//!
//! let claims = codec.validate(&token).unwrap();
//! assert_eq!(claims.subject(), "alice@example.com");
//! assert!(claims.roles().contains("USER"));
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessClaims;
pub use token::TokenCodec;
pub use token::TokenError;
