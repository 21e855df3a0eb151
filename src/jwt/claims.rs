//! Claim names, the token header and the claims injected into every token.

use crate::config::Config;
use crate::config::keys;
use crate::error::TokenError;
use serde::Serialize;
use std::env;
use std::path::{Component, Path, PathBuf};

/// Claims supplied by the caller on top of the required claims.
pub type CustomClaims = serde_json::Map<String, serde_json::Value>;

/// Header algorithm claim.
pub const ALGORITHM: &str = "alg";
/// Header type claim.
pub const TYPE: &str = "typ";
/// Issuer claim.
pub const ISSUER: &str = "iss";
/// Subject claim.
pub const SUBJECT: &str = "sub";
/// Audience claim.
pub const AUDIENCE: &str = "aud";
/// Issued-at claim.
pub const ISSUED_AT: &str = "iat";
/// Timezone claim.
pub const TIMEZONE: &str = "zoneinfo";
/// Website the token was issued for.
pub const WEBSITE: &str = "website";
/// Secondary subject identifier.
pub const SUB_ID: &str = "sub_id";

/// Claims injected into every token, stripped again on read by default.
pub const REQUIRED_CLAIMS: [&str; 5] = [ISSUER, SUBJECT, AUDIENCE, ISSUED_AT, TIMEZONE];

/// Format of the `iat` claim.
pub const ISSUED_AT_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Value of the header `typ` claim.
pub const TOKEN_TYPE: &str = "jwt";

const FALLBACK_TIMEZONE: &str = "UTC";
const DEFAULT_ZONEINFO_DIR: &str = "/usr/share/zoneinfo";

/// Token header. Serializes as `{"alg":..,"typ":"jwt"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header<'a> {
    /// Signing algorithm name
    pub alg: &'a str,
    /// Token type, always [`TOKEN_TYPE`]
    pub typ: &'a str,
}

impl<'a> Header<'a> {
    /// Header for tokens signed with `alg`.
    #[must_use]
    pub const fn new(alg: &'a str) -> Self {
        Header {
            alg,
            typ: TOKEN_TYPE,
        }
    }
}

/// Claims derived from configuration and the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredClaims {
    /// Issued-at timestamp in [`ISSUED_AT_FORMAT`]
    pub iat: String,
    /// IANA timezone name of `iat`
    pub zoneinfo: String,
    /// Issuer
    pub iss: String,
    /// Subject
    pub sub: String,
    /// Audience
    pub aud: String,
}

impl RequiredClaims {
    /// Resolve required claims, preferring fixed values from `config`.
    pub fn resolve(config: &Config) -> Result<Self, TokenError> {
        let iat = match config.issued_at() {
            Some(iat) => iat.to_string(),
            None => current_issued_at(),
        };
        let zoneinfo = match config.zoneinfo() {
            Some(zone) => zone.to_string(),
            None => local_timezone_name(),
        };

        Ok(RequiredClaims {
            iat,
            zoneinfo,
            iss: config.require(keys::ISSUER)?.to_string(),
            sub: config.require(keys::SUBJECT)?.to_string(),
            aud: config.require(keys::AUDIENCE)?.to_string(),
        })
    }

    /// Merge caller claims on top; caller values win on collision.
    ///
    /// Required claims come first, in the order `iat`, `zoneinfo`, `iss`,
    /// `sub`, `aud`.
    pub fn merge(self, custom: &CustomClaims) -> CustomClaims {
        let mut payload = CustomClaims::new();
        payload.insert(ISSUED_AT.to_string(), self.iat.into());
        payload.insert(TIMEZONE.to_string(), self.zoneinfo.into());
        payload.insert(ISSUER.to_string(), self.iss.into());
        payload.insert(SUBJECT.to_string(), self.sub.into());
        payload.insert(AUDIENCE.to_string(), self.aud.into());

        for (key, value) in custom {
            payload.insert(key.clone(), value.clone());
        }
        payload
    }
}

/// Remove the required claims from a decoded payload.
pub fn strip_required(payload: &mut CustomClaims) {
    payload.retain(|key, _| !REQUIRED_CLAIMS.contains(&key.as_str()));
}

/// Current local time in [`ISSUED_AT_FORMAT`].
pub fn current_issued_at() -> String {
    chrono::Local::now().format(ISSUED_AT_FORMAT).to_string()
}

/// IANA name of the timezone `chrono::Local` uses.
///
/// A `TZ` that names a zone in the zone database (or points at a zone file)
/// wins, since chrono honors it. POSIX rule strings are not zone names and
/// fall through to the system zone from `iana_time_zone`.
pub fn local_timezone_name() -> String {
    if let Some(zone) = env::var("TZ").ok().as_deref().and_then(zone_from_tz_var) {
        return zone;
    }

    match iana_time_zone::get_timezone() {
        Ok(zone) => zone,
        Err(e) => {
            tracing::debug!(error = %e, "Could not determine local timezone, using {}", FALLBACK_TIMEZONE);
            FALLBACK_TIMEZONE.to_string()
        }
    }
}

fn zone_from_tz_var(tz: &str) -> Option<String> {
    let tz = tz.strip_prefix(':').unwrap_or(tz).trim();
    if tz.is_empty() {
        return None;
    }

    if let Some((_, zone)) = tz.rsplit_once("zoneinfo/") {
        return is_zone_name(zone).then(|| zone.to_string());
    }

    if tz.starts_with('/') || !is_zone_name(tz) {
        return None;
    }
    zoneinfo_dir().join(tz).is_file().then(|| tz.to_string())
}

/// Relative path of plain components, e.g. `Europe/Amsterdam`.
fn is_zone_name(zone: &str) -> bool {
    !zone.is_empty()
        && !zone.contains(',')
        && Path::new(zone)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

fn zoneinfo_dir() -> PathBuf {
    env::var_os("TZDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ZONEINFO_DIR))
}
