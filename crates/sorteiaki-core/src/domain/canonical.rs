// SPDX-License-Identifier: Apache-2.0

//! Audit digests: SHA-256 over a canonical JSON rendering of a record.
//!
//! Canonical means object keys sorted at every depth and no whitespace, so
//! two records that are equal as data always produce the same digest no
//! matter which process serialized them.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::errors::Result;

pub const DIGEST_HEX_LEN: usize = 64;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest([u8; 32]);

impl Sha256Digest {
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        let mut out = [0_u8; 32];
        out.copy_from_slice(&Sha256::digest(bytes));
        Self(out)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.iter().fold(String::with_capacity(DIGEST_HEX_LEN), |mut out, b| {
            use std::fmt::Write as _;
            let _ = write!(out, "{b:02x}");
            out
        })
    }
}

impl fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256Digest({})", self.to_hex())
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[must_use]
pub fn sha256(bytes: &[u8]) -> Sha256Digest {
    Sha256Digest::of(bytes)
}

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256Digest::of(bytes).to_hex()
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        scalar => scalar,
    }
}

/// Compact JSON of `value` with keys sorted recursively. Arrays keep order.
pub fn canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let tree = sort_keys(serde_json::to_value(value)?);
    Ok(serde_json::to_vec(&tree)?)
}

pub fn canonical_digest<T: Serialize>(value: &T) -> Result<Sha256Digest> {
    Ok(Sha256Digest::of(&canonical_json_bytes(value)?))
}

/// Lowercase hex of [`canonical_digest`].
pub fn canonical_digest_hex<T: Serialize>(value: &T) -> Result<String> {
    Ok(canonical_digest(value)?.to_hex())
}

#[cfg(test)]
mod tests {
    use super::{canonical_digest_hex, canonical_json_bytes};
    use serde_json::json;

    #[test]
    fn nested_keys_are_sorted() {
        let record = json!({
            "winners": [{"username": "b", "id": "2"}],
            "id": "res-1",
            "settings": {"winners_count": 1, "allow_duplicates": false},
        });
        let text = String::from_utf8(canonical_json_bytes(&record).expect("bytes")).expect("utf8");
        assert_eq!(
            text,
            r#"{"id":"res-1","settings":{"allow_duplicates":false,"winners_count":1},"winners":[{"id":"2","username":"b"}]}"#
        );
    }

    #[test]
    fn winner_order_changes_the_digest() {
        let a = canonical_digest_hex(&json!({"winners": ["x", "y"]})).expect("a");
        let b = canonical_digest_hex(&json!({"winners": ["y", "x"]})).expect("b");
        assert_ne!(a, b);
    }
}
