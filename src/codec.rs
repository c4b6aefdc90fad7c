//! Wire and storage codecs: JSON bodies, path identifiers, and the UUID <-> 16-byte binary transform.
//!
//! UUIDs are stored as the binary form of their 32-digit hex string (hyphens removed). Reading
//! reverses it: hex-encode, re-insert hyphens at the 8-4-4-4-12 offsets, lower-case.

use crate::error::CodecError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Hyphen positions in the canonical 36-character form, as offsets into the 32-digit hex string.
const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

/// Parse a request body. Unknown fields are ignored; field presence is checked by the payload.
pub fn decode_body<P: DeserializeOwned>(bytes: &[u8]) -> Result<P, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| CodecError::Json(e.to_string()))
}

/// Identifier types accepted in `/{resource}/{id}` paths.
pub trait ResourceId: Copy + Send + Sync + std::fmt::Display + 'static {
    fn parse(raw: &str) -> Result<Self, CodecError>;
}

impl ResourceId for i32 {
    fn parse(raw: &str) -> Result<Self, CodecError> {
        match raw.parse::<i32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(CodecError::InvalidId(raw.to_string())),
        }
    }
}

impl ResourceId for Uuid {
    fn parse(raw: &str) -> Result<Self, CodecError> {
        Uuid::parse_str(raw).map_err(|_| CodecError::InvalidId(raw.to_string()))
    }
}

/// 32 hex digits, no hyphens.
pub fn storage_hex(id: &Uuid) -> String {
    id.to_string().replace('-', "")
}

/// Canonical UUID string -> 16 bytes for the `id` column.
pub fn to_storage_binary(canonical: &str) -> Result<[u8; 16], CodecError> {
    let id = <Uuid as ResourceId>::parse(canonical)?;
    let mut out = [0u8; 16];
    hex::decode_to_slice(storage_hex(&id), &mut out)
        .map_err(|e| CodecError::InvalidId(format!("{}: {}", canonical, e)))?;
    Ok(out)
}

/// 16 bytes from the `id` column -> lower-case canonical UUID string.
pub fn to_canonical(bytes: &[u8]) -> Result<String, CodecError> {
    if bytes.len() != 16 {
        return Err(CodecError::Storage(format!(
            "id must be 16 bytes, got {}",
            bytes.len()
        )));
    }
    let digits = hex::encode_upper(bytes);
    let mut out = String::with_capacity(36);
    let mut start = 0;
    for (i, len) in GROUPS.iter().enumerate() {
        if i > 0 {
            out.push('-');
        }
        out.push_str(&digits[start..start + len]);
        start += len;
    }
    Ok(out.to_lowercase())
}

/// Accepts `12.5` or `"12.5"`. Web forms post input values as strings.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Option::<Amount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Amount::Number(n)) => Ok(Some(n)),
        Some(Amount::Text(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("amount must be numeric, got {:?}", s))),
    }
}

/// Unwrap a field that must be present, keeping "omitted" apart from an explicit zero.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, CodecError> {
    value.ok_or(CodecError::MissingField(field))
}
