// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jws-encoder project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! HS256 signature over the encoded header and payload

use hmac::{Hmac, Mac};
use log::debug;
use sha2::Sha256;

use crate::error::JwsError;
use crate::segment::{self, SEGMENT_SEPARATOR};

type HmacSha256 = Hmac<Sha256>;

/// Message covered by the signature: `header.payload`
pub fn signing_input(encoded_header: &str, encoded_payload: &str) -> String {
    format!("{encoded_header}{SEGMENT_SEPARATOR}{encoded_payload}")
}

/// Reject keys that would produce a degenerate signature
pub fn validate_secret(secret: &str) -> Result<(), JwsError> {
    if secret.is_empty() {
        return Err(JwsError::signing("secret key must not be empty"));
    }
    Ok(())
}

/// Raw HMAC-SHA256 of `message` keyed with the UTF-8 bytes of `secret`
pub fn hmac_sha256(message: &[u8], secret: &str) -> Result<[u8; 32], JwsError> {
    validate_secret(secret)?;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| JwsError::signing(format!("invalid HMAC key: {e}")))?;
    mac.update(message);

    let mut digest = [0u8; 32];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    Ok(digest)
}

/// Sign the encoded header and payload, returning the encoded signature
pub fn sign(encoded_header: &str, encoded_payload: &str, secret: &str) -> Result<String, JwsError> {
    let message = signing_input(encoded_header, encoded_payload);
    let digest = hmac_sha256(message.as_bytes(), secret)?;
    debug!("Signed {} bytes with HS256", message.len());
    Ok(segment::encode_bytes(&digest))
}
