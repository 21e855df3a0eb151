//! Settings used to issue and verify tokens.
//!
//! A [`Config`] is built from key/value pairs (or loaded from the environment
//! with [`Config::from_env`]) and handed to a [`Tokenizer`](crate::Tokenizer),
//! which validates it. Construction itself never fails.

use crate::error::TokenError;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use zeroize::Zeroizing;

/// Setting names understood by [`Config`].
pub mod keys {
    /// Secret key for HMAC-SHA256 signatures.
    pub const HASH_HMAC_KEY: &str = "hash_hmac_key";
    /// Issuer claim value.
    pub const ISSUER: &str = "iss";
    /// Subject claim value.
    pub const SUBJECT: &str = "sub";
    /// Audience claim value.
    pub const AUDIENCE: &str = "aud";
    /// Fixed issued-at timestamp (`dd-mm-yyyy HH:MM:SS`).
    pub const ISSUED_AT: &str = "iat";
    /// Fixed timezone name.
    pub const ZONEINFO: &str = "zoneinfo";

    /// Settings every tokenizer needs, in validation order.
    pub const REQUIRED: [&str; 4] = [HASH_HMAC_KEY, ISSUER, SUBJECT, AUDIENCE];
}

/// Default prefix for environment variables read by [`Config::from_env`].
pub const ENV_PREFIX: &str = "TOKENIZER_";

/// Tokenizer settings.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    hash_hmac_key: Option<Zeroizing<String>>,
    issuer: Option<String>,
    subject: Option<String>,
    audience: Option<String>,
    issued_at: Option<String>,
    zoneinfo: Option<String>,
    extra: BTreeMap<String, String>,
}

impl Config {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from `TOKENIZER_*` environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    /// Unset variables leave the setting absent.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Load settings from environment variables named `<prefix><KEY>`,
    /// where `KEY` is the upper-cased setting name.
    #[must_use]
    pub fn from_env_with_prefix(prefix: &str) -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::new();
        for key in [
            keys::HASH_HMAC_KEY,
            keys::ISSUER,
            keys::SUBJECT,
            keys::AUDIENCE,
            keys::ISSUED_AT,
            keys::ZONEINFO,
        ] {
            let name = format!("{}{}", prefix, key.to_uppercase());
            if let Ok(value) = env::var(&name) {
                config.set(key, value);
            }
        }

        tracing::debug!(
            prefix,
            settings = config.len(),
            "Loaded tokenizer settings from environment"
        );

        config
    }

    /// Store a setting, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            keys::HASH_HMAC_KEY => self.hash_hmac_key = Some(Zeroizing::new(value)),
            keys::ISSUER => self.issuer = Some(value),
            keys::SUBJECT => self.subject = Some(value),
            keys::AUDIENCE => self.audience = Some(value),
            keys::ISSUED_AT => self.issued_at = Some(value),
            keys::ZONEINFO => self.zoneinfo = Some(value),
            _ => {
                self.extra.insert(key, value);
            }
        }
    }

    /// Store a setting and return the configuration.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set the HMAC secret key.
    #[must_use]
    pub fn with_hash_hmac_key(self, key: impl Into<String>) -> Self {
        self.with(keys::HASH_HMAC_KEY, key)
    }

    /// Set the issuer.
    #[must_use]
    pub fn with_issuer(self, issuer: impl Into<String>) -> Self {
        self.with(keys::ISSUER, issuer)
    }

    /// Set the subject.
    #[must_use]
    pub fn with_subject(self, subject: impl Into<String>) -> Self {
        self.with(keys::SUBJECT, subject)
    }

    /// Set the audience.
    #[must_use]
    pub fn with_audience(self, audience: impl Into<String>) -> Self {
        self.with(keys::AUDIENCE, audience)
    }

    /// Fix the issued-at timestamp instead of using the current time.
    #[must_use]
    pub fn with_issued_at(self, issued_at: impl Into<String>) -> Self {
        self.with(keys::ISSUED_AT, issued_at)
    }

    /// Fix the timezone name instead of using the local timezone.
    #[must_use]
    pub fn with_zoneinfo(self, zoneinfo: impl Into<String>) -> Self {
        self.with(keys::ZONEINFO, zoneinfo)
    }

    /// Look up a setting by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            keys::HASH_HMAC_KEY => self.hash_hmac_key.as_ref().map(|k| k.as_str()),
            keys::ISSUER => self.issuer.as_deref(),
            keys::SUBJECT => self.subject.as_deref(),
            keys::AUDIENCE => self.audience.as_deref(),
            keys::ISSUED_AT => self.issued_at.as_deref(),
            keys::ZONEINFO => self.zoneinfo.as_deref(),
            _ => self.extra.get(key).map(String::as_str),
        }
    }

    /// Whether a setting is present.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Look up a setting that must be present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Configuration`] naming `key` otherwise.
    pub fn require(&self, key: &str) -> Result<&str, TokenError> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(TokenError::config(key)),
        }
    }

    /// Check that every required setting is present.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Configuration`] naming the first missing setting.
    pub fn validate(&self) -> Result<(), TokenError> {
        for key in keys::REQUIRED {
            self.require(key)?;
        }
        Ok(())
    }

    /// HMAC secret key.
    #[must_use]
    pub fn hash_hmac_key(&self) -> Option<&str> {
        self.get(keys::HASH_HMAC_KEY)
    }

    /// Issuer.
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// Subject.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Audience.
    #[must_use]
    pub fn audience(&self) -> Option<&str> {
        self.audience.as_deref()
    }

    /// Fixed issued-at timestamp, if any.
    #[must_use]
    pub fn issued_at(&self) -> Option<&str> {
        self.issued_at.as_deref()
    }

    /// Fixed timezone name, if any.
    #[must_use]
    pub fn zoneinfo(&self) -> Option<&str> {
        self.zoneinfo.as_deref()
    }

    /// Number of settings present.
    #[must_use]
    pub fn len(&self) -> usize {
        [
            self.hash_hmac_key.is_some(),
            self.issuer.is_some(),
            self.subject.is_some(),
            self.audience.is_some(),
            self.issued_at.is_some(),
            self.zoneinfo.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
            + self.extra.len()
    }

    /// Whether no settings are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> FromIterator<(K, V)> for Config
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (key, value) in iter {
            config.set(key, value);
        }
        config
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "hash_hmac_key",
                &self.hash_hmac_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("issuer", &self.issuer)
            .field("subject", &self.subject)
            .field("audience", &self.audience)
            .field("issued_at", &self.issued_at)
            .field("zoneinfo", &self.zoneinfo)
            .field("extra", &self.extra)
            .finish()
    }
}
