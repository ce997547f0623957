// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jws-encoder project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Claim structures and the custom-claims merge
//!
//! A token payload is built from two parts:
//! - the standard claims (`jti`, `iss`, `sub`, `iat`, `exp`) computed for
//!   every invocation
//! - the custom claims read from a JSON document supplied by the caller
//!
//! Custom claims are applied on top of the standard ones. When a key exists
//! in both, the custom value wins. Callers rely on this to override any
//! standard claim, so the merge order must not change.

use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::error::JwsError;

/// Keys of the claims computed by the encoder
pub const STANDARD_CLAIM_KEYS: [&str; 5] = ["jti", "iss", "sub", "iat", "exp"];

/// Custom claims loaded from the caller's JSON document
pub type CustomClaims = Map<String, Value>;

/// Claims computed for every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardClaims {
    /// JWT ID, a random UUID unique per invocation
    pub jti: String,

    /// Issuer
    pub iss: String,

    /// Subject
    pub sub: String,

    /// Issued at, Unix seconds
    pub iat: i64,

    /// Expiration, Unix seconds; always greater than `iat`
    pub exp: i64,
}

impl StandardClaims {
    pub fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("jti".to_string(), Value::String(self.jti));
        map.insert("iss".to_string(), Value::String(self.iss));
        map.insert("sub".to_string(), Value::String(self.sub));
        map.insert("iat".to_string(), Value::from(self.iat));
        map.insert("exp".to_string(), Value::from(self.exp));
        map
    }
}

/// Source of unique token identifiers
pub trait IdGenerator {
    fn generate(&self) -> Uuid;
}

/// Random version 4 UUIDs backed by the operating system RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Always yields the same identifier; meant for tests only
#[derive(Debug, Clone, Copy)]
pub struct FixedIdGenerator(pub Uuid);

impl IdGenerator for FixedIdGenerator {
    fn generate(&self) -> Uuid {
        self.0
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn generate(&self) -> Uuid {
        (**self).generate()
    }
}

/// Load the custom claims document
///
/// The file is read fully before parsing. A missing or unreadable file is a
/// `FileAccess` error; invalid UTF-8, invalid JSON or a root that is not an
/// object is a `Parse` error.
pub fn load_custom_claims<P: AsRef<Path>>(path: P) -> Result<CustomClaims, JwsError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| JwsError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes of custom claims from {:?}", bytes.len(), path);

    parse_custom_claims(&bytes).map_err(|reason| JwsError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}

fn parse_custom_claims(bytes: &[u8]) -> Result<CustomClaims, String> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(format!(
            "top-level value must be an object, found {}",
            json_kind(&other)
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Apply custom claims on top of the standard claims
///
/// Keys only in the standard claims are kept, keys only in the custom claims
/// are added and colliding keys take the custom value.
pub fn merge_claims(standard: StandardClaims, custom: CustomClaims) -> Map<String, Value> {
    let mut merged = standard.into_map();
    for (key, value) in custom {
        if STANDARD_CLAIM_KEYS.contains(&key.as_str()) {
            warn!("Custom claim '{}' overrides the standard claim", key);
        }
        merged.insert(key, value);
    }
    merged
}
