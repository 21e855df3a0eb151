//! Token codec: claims, segment encoding, signing and the [`Tokenizer`].

pub mod builder;
pub mod claims;
pub mod encoding;
pub mod signer;
pub mod tokenizer;

pub use builder::ClaimsBuilder;
pub use claims::{CustomClaims, Header, RequiredClaims, REQUIRED_CLAIMS};
pub use signer::{HmacSigner, TokenSigner};
pub use tokenizer::Tokenizer;
