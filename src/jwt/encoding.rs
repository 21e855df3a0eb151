//! Segment encoding: base64url without padding, and JSON with escaped slashes.
//!
//! Slashes are written as `\/` so that payloads stay byte-identical to tokens
//! issued by the legacy PHP issuer (`"Europe\/Amsterdam"`). Both forms decode
//! to the same JSON value.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// RFC 4648 §5 alphabet. Encodes without padding, decodes with or without it.
const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as base64url without `=` padding.
pub fn base64url_encode(input: impl AsRef<[u8]>) -> String {
    BASE64URL.encode(input)
}

/// Decode base64url, accepting stripped or present padding.
pub fn base64url_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64URL.decode(input)
}

/// Compact JSON formatter that escapes `/`.
struct SlashEscapingFormatter;

impl Formatter for SlashEscapingFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for (i, part) in fragment.split('/').enumerate() {
            if i > 0 {
                writer.write_all(b"\\/")?;
            }
            writer.write_all(part.as_bytes())?;
        }
        Ok(())
    }
}

/// Serialize a value as compact JSON with escaped slashes.
pub fn to_json<T>(value: &T) -> Result<Vec<u8>, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SlashEscapingFormatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Serialize a value as JSON and base64url-encode it.
pub fn encode_segment<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    Ok(base64url_encode(to_json(value)?))
}
