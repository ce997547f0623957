// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jws-encoder project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Segment encoding
//!
//! A segment is a JSON document serialized to compact text and encoded with
//! the standard base64 alphabet (`+`, `/`, `=` padding, no line wrapping).
//! Object keys of a `serde_json::Map` are kept sorted, so the same claims
//! always produce the same bytes.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::error::JwsError;

/// Separator placed between the segments of a token
pub const SEGMENT_SEPARATOR: char = '.';

/// Serialize `value` to compact JSON and base64-encode it
pub fn encode_json<T: Serialize + ?Sized>(
    value: &T,
    what: &'static str,
) -> Result<String, JwsError> {
    let json = serde_json::to_vec(value).map_err(|e| JwsError::Serialization {
        what,
        reason: e.to_string(),
    })?;
    Ok(encode_bytes(&json))
}

/// Base64-encode raw bytes with the standard alphabet
pub fn encode_bytes(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}
