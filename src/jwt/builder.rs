//! Builder for the caller-supplied part of a token payload.

use crate::jwt::claims::{CustomClaims, SUB_ID, WEBSITE};
use serde_json::Value;

/// Fluent builder for the custom claims of a token.
#[derive(Debug, Clone, Default)]
pub struct ClaimsBuilder {
    claims: CustomClaims,
}

impl ClaimsBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a claim, replacing an earlier value for the same key.
    pub fn claim(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.insert(key.into(), value.into());
        self
    }

    /// Add every claim from `claims`.
    pub fn claims(mut self, claims: CustomClaims) -> Self {
        self.claims.extend(claims);
        self
    }

    /// Set the `website` claim.
    pub fn website(self, website: impl Into<String>) -> Self {
        self.claim(WEBSITE, website.into())
    }

    /// Set the `sub_id` claim.
    pub fn sub_id(self, sub_id: impl Into<Value>) -> Self {
        self.claim(SUB_ID, sub_id)
    }

    /// Finish and return the claims.
    pub fn build(self) -> CustomClaims {
        self.claims
    }
}
