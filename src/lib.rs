//! Tokenizer library.
//!
//! Issues and verifies compact `header.payload.signature` tokens signed with
//! HMAC-SHA256. Every token carries the required claims `iat`, `zoneinfo`,
//! `iss`, `sub` and `aud` plus any custom claims supplied by the caller.
//!
//! ```
//! use tokenizer::{ClaimsBuilder, Config, Tokenizer};
//!
//! let config = Config::new()
//!     .with_hash_hmac_key("some-uber-secret-key")
//!     .with_issuer("Giftuals")
//!     .with_subject("Example token")
//!     .with_audience("https://backend.giftuals.com");
//! let tokenizer = Tokenizer::new(config)?;
//!
//! let claims = ClaimsBuilder::new().claim("my_own_claim", "some random value").build();
//! let token = tokenizer.create_token(&claims)?;
//!
//! assert!(tokenizer.is_valid_token(&token)?);
//! assert_eq!(tokenizer.get_token_payload(&token, false)?, claims);
//! # Ok::<(), tokenizer::TokenError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod jwt;
pub mod telemetry;

// Re-exports for convenience
pub use config::Config;
pub use error::{InvalidTokenKind, TokenError};
pub use jwt::{ClaimsBuilder, CustomClaims, Tokenizer};
