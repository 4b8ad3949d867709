// ABOUTME: Versioned envelope wrapping every stored value as {version, data}
// ABOUTME: Detects bare legacy values and rejects versions this build cannot read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::schema::{CURRENT_VERSION, LEGACY_VERSION};
use crate::errors::{AppError, AppResult};

/// Wire shape of a stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Schema version of `data`
    pub version: u32,
    /// The entity itself
    pub data: T,
}

/// A stored value after envelope inspection
#[derive(Debug, Clone, PartialEq)]
pub struct Opened {
    /// Version the value was written with
    pub version: u32,
    /// Inner payload
    pub data: Value,
}

impl Opened {
    /// Whether the value should be rewritten in the current format
    #[must_use]
    pub const fn needs_migration(&self) -> bool {
        self.version < CURRENT_VERSION
    }
}

/// Wrap an entity in a current-version envelope
///
/// # Errors
///
/// Returns a serialization error if the entity cannot be encoded
pub fn seal<T: Serialize + ?Sized>(data: &T) -> AppResult<Value> {
    Ok(serde_json::to_value(Envelope {
        version: CURRENT_VERSION,
        data,
    })?)
}

/// Strip the envelope from a raw stored value
///
/// A JSON object with exactly the `version` and `data` members is an
/// envelope; anything else is a bare value from before envelopes existed
/// and reads as version 0.
///
/// # Errors
///
/// Returns an `UnsupportedSchemaVersion` error for versions newer than this build
pub fn open(key: &str, raw: Value) -> AppResult<Opened> {
    let Value::Object(mut map) = raw else {
        return Ok(Opened {
            version: LEGACY_VERSION,
            data: raw,
        });
    };
    let is_envelope = map.len() == 2 && map.contains_key("data") && map.contains_key("version");
    if !is_envelope {
        return Ok(Opened {
            version: LEGACY_VERSION,
            data: Value::Object(map),
        });
    }

    let Some(version) = map.get("version").and_then(Value::as_u64) else {
        return Err(AppError::parse(format!(
            "Stored value '{key}' has a non-numeric envelope version"
        )));
    };
    let version = u32::try_from(version)
        .ok()
        .filter(|v| *v <= CURRENT_VERSION)
        .ok_or_else(|| AppError::unsupported_version(key, version))?;
    let data = map.remove("data").unwrap_or(Value::Null);
    Ok(Opened { version, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_value_reads_as_legacy() {
        let opened = open("todayLog", json!({"date": "2025-01-01", "meals": []})).unwrap();
        assert_eq!(opened.version, LEGACY_VERSION);
        assert!(opened.needs_migration());
    }

    #[test]
    fn test_current_envelope_round_trips() {
        let sealed = seal(&json!([1, 2, 3])).unwrap();
        let opened = open("workoutHistory", sealed).unwrap();
        assert_eq!(opened.version, CURRENT_VERSION);
        assert_eq!(opened.data, json!([1, 2, 3]));
        assert!(!opened.needs_migration());
    }

    #[test]
    fn test_future_version_is_rejected() {
        let err = open("userProfile", json!({"version": 99, "data": {}})).unwrap_err();
        assert_eq!(
            err.code,
            crate::errors::ErrorCode::UnsupportedSchemaVersion
        );
    }
}
