// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jws-encoder project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JOSE header
//!
//! The header is fixed: only HMAC-SHA256 is supported and the token type is
//! always `JOSE`.

use serde::Serialize;

use crate::error::JwsError;
use crate::segment;

/// Signing algorithm advertised in the header
pub const ALGORITHM: &str = "HS256";

/// Token type advertised in the header
pub const TOKEN_TYPE: &str = "JOSE";

/// Header of an issued token
///
/// Field order is the serialization order, which keeps the encoded header
/// byte-identical across invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoseHeader {
    /// Algorithm identifier
    pub alg: String,
    /// Type identifier
    pub typ: String,
}

impl JoseHeader {
    pub fn hs256() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }

    /// Encode the header as a token segment
    pub fn encode(&self) -> Result<String, JwsError> {
        segment::encode_json(self, "header")
    }
}

impl Default for JoseHeader {
    fn default() -> Self {
        Self::hs256()
    }
}

/// Build and encode the fixed HS256 header
pub fn create_header() -> Result<String, JwsError> {
    JoseHeader::hs256().encode()
}
