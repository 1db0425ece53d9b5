//! Authentication utilities library
//!
//! Provides the reusable authentication core for the flag service:
//! - Password hashing (Argon2id)
//! - Signed, stateless session tokens (HMAC-SHA256)
//! - Authentication coordination
//!
//! Services define their own credential storage traits and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenCodec;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = codec.issue(42, 1_700_000_000).unwrap();
//! let claims = codec.validate(&token, 1_700_000_060).unwrap();
//! assert_eq!(claims.user_id, 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate(1, "password123", &hash, 1_700_000_000).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token, 1_700_000_000).unwrap();
//! assert_eq!(claims.user_id, 1);
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::DEFAULT_TTL_SECONDS;
