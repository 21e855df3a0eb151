//! Issuing and verifying tokens.

use crate::config::{keys, Config};
use crate::error::{InvalidTokenKind, TokenError};
use crate::jwt::claims::{self, CustomClaims, Header, RequiredClaims};
use crate::jwt::encoding::{base64url_decode, encode_segment};
use crate::jwt::signer::{HmacSigner, TokenSigner};

/// Segments of a token whose signature has been checked.
struct VerifiedToken<'a> {
    payload_b64: &'a str,
}

/// Issues `header.payload.signature` tokens signed with HMAC-SHA256 and
/// verifies them again.
///
/// A `Tokenizer` is immutable once built and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: Config,
    signer: HmacSigner,
}

impl Tokenizer {
    /// Create a tokenizer after checking that every required setting is present.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Configuration`] naming the first missing setting
    /// out of `hash_hmac_key`, `iss`, `sub`, `aud`.
    pub fn new(config: Config) -> Result<Self, TokenError> {
        config.validate()?;
        let signer = HmacSigner::new(config.require(keys::HASH_HMAC_KEY)?.as_bytes());
        Ok(Self { config, signer })
    }

    /// Settings this tokenizer was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create a signed token carrying the required claims plus `claims`.
    ///
    /// Values in `claims` override required claims with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Configuration`] if `iss`, `sub` or `aud` is
    /// missing, or [`TokenError::Serialization`] if the payload cannot be
    /// encoded.
    pub fn create_token(&self, claims: &CustomClaims) -> Result<String, TokenError> {
        let header_b64 = encode_segment(&Header::new(self.signer.algorithm()))?;

        let payload = RequiredClaims::resolve(&self.config)?.merge(claims);
        let payload_b64 = encode_segment(&payload)?;

        let signature_b64 = self.signer.signature(&header_b64, &payload_b64);

        tracing::debug!(
            claims = payload.len(),
            header_len = header_b64.len(),
            payload_len = payload_b64.len(),
            "Created token"
        );

        Ok(format!("{header_b64}.{payload_b64}.{signature_b64}"))
    }

    /// Check that `token` is well-formed and signed with the configured key.
    ///
    /// Returns `Ok(true)` for a valid token; every failure is an error.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidToken`] with
    /// [`InvalidTokenKind::Malformed`] unless the token has exactly three
    /// segments, or [`InvalidTokenKind::SignatureMismatch`] if the signature
    /// does not match.
    pub fn is_valid_token(&self, token: &str) -> Result<bool, TokenError> {
        self.verify(token).map(|_| true)
    }

    /// Verify `token` and return its payload.
    ///
    /// Unless `include_required_claims` is set, the claims `iss`, `sub`,
    /// `aud`, `iat` and `zoneinfo` are removed first.
    ///
    /// # Errors
    ///
    /// Propagates [`Tokenizer::is_valid_token`] failures, and returns
    /// [`InvalidTokenKind::MalformedPayload`] if the payload segment is not a
    /// base64url-encoded JSON object.
    pub fn get_token_payload(
        &self,
        token: &str,
        include_required_claims: bool,
    ) -> Result<CustomClaims, TokenError> {
        let verified = self.verify(token)?;

        let mut payload = decode_payload(verified.payload_b64)?;
        if !include_required_claims {
            claims::strip_required(&mut payload);
        }

        Ok(payload)
    }

    fn verify<'a>(&self, token: &'a str) -> Result<VerifiedToken<'a>, TokenError> {
        let parts: Vec<&str> = token.split('.').collect();
        let [header_b64, payload_b64, signature_b64] = parts[..] else {
            tracing::warn!(
                segments = parts.len(),
                "Rejected token with wrong number of segments"
            );
            return Err(InvalidTokenKind::Malformed.into());
        };

        if !self.signer.verify(header_b64, payload_b64, signature_b64) {
            tracing::warn!(token_len = token.len(), "Rejected token with signature mismatch");
            return Err(InvalidTokenKind::SignatureMismatch.into());
        }

        tracing::debug!(token_len = token.len(), "Token signature verified");
        Ok(VerifiedToken { payload_b64 })
    }
}

fn decode_payload(payload_b64: &str) -> Result<CustomClaims, TokenError> {
    let bytes = base64url_decode(payload_b64).map_err(|e| {
        tracing::warn!(error = %e, "Token payload is not valid base64url");
        InvalidTokenKind::MalformedPayload
    })?;

    serde_json::from_slice::<CustomClaims>(&bytes).map_err(|e| {
        tracing::warn!(error = %e, "Token payload is not a JSON object");
        InvalidTokenKind::MalformedPayload.into()
    })
}
