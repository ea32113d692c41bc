//! Grid system persistence in a URL query string.
//!
//! The snapshot JSON (ids stripped) is stored under one key using
//! `application/x-www-form-urlencoded` escaping. A system equal to the
//! default is never written: its key is removed instead, so default
//! sessions keep a clean URL.

use gridsys_core::{GridSystem, GridSystemSnapshot};

use crate::error::Result;

/// Form-encode one key or value. Space becomes `+`.
#[must_use]
pub fn encode_component(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_' => {
                encoded.push(byte as char);
            }
            b' ' => encoded.push('+'),
            _ => {
                use std::fmt::Write;
                let _ = write!(encoded, "%{byte:02X}");
            }
        }
    }
    encoded
}

/// Form-decode one key or value. `+` becomes a space; malformed escapes are
/// kept literally and invalid UTF-8 is replaced.
#[must_use]
pub fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' => {
                let escape = bytes
                    .get(i + 1..i + 3)
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match escape {
                    Some(byte) => {
                        decoded.push(byte);
                        i += 2;
                    }
                    None => decoded.push(b'%'),
                }
            }
            byte => decoded.push(byte),
        }
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Split a query string (leading `?` optional) into decoded pairs.
#[must_use]
pub fn parse_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode_component(key), decode_component(value)),
            None => (decode_component(pair), String::new()),
        })
        .collect()
}

fn serialize_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Read the grid system stored under `key`.
///
/// Only the first occurrence of `key` counts. `Ok(None)` when it is absent
/// or empty. Ids are freshly minted.
pub fn decode_query(query: &str, key: &str) -> Result<Option<GridSystem>> {
    let Some((_, raw)) = parse_pairs(query).into_iter().find(|(name, _)| name == key) else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }

    let snapshot = GridSystemSnapshot::from_json_str(&raw)?;
    let system = GridSystem::from_snapshot(&snapshot)?;
    tracing::debug!(key, entries = system.len(), "grid system decoded from query");
    Ok(Some(system))
}

/// Write `system` under `key`, preserving every other parameter.
///
/// Returns the new query string without a leading `?`; empty when no
/// parameters remain.
pub fn encode_query(query: &str, key: &str, system: &GridSystem) -> Result<String> {
    let mut pairs = parse_pairs(query);
    let snapshot = system.to_snapshot();

    if snapshot.is_default() {
        pairs.retain(|(name, _)| name != key);
        tracing::debug!(key, "default grid system; query key removed");
    } else {
        let json = snapshot.to_json_string()?;
        match pairs.iter().position(|(name, _)| name == key) {
            Some(first) => {
                pairs[first].1 = json;
                let mut index = 0;
                pairs.retain(|(name, _)| {
                    let keep = index <= first || name != key;
                    index += 1;
                    keep
                });
            }
            None => pairs.push((key.to_string(), json)),
        }
    }
    Ok(serialize_pairs(&pairs))
}
