// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jws-encoder project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Token assembly and the issuing pipeline
//!
//! The pipeline runs header and payload construction independently, signs
//! their encoded forms and joins the three segments:
//!
//! ```text
//! header  ──┐
//!           ├─► sign(header.payload, key) ─► header.payload.signature
//! payload ──┘
//! ```
//!
//! # Example
//!
//! ```
//! use jws_encoder::claims::{CustomClaims, RandomIdGenerator};
//! use jws_encoder::clock::SystemClock;
//! use jws_encoder::token::{ClaimsSource, TokenEncoder, TokenRequest};
//!
//! let mut custom = CustomClaims::new();
//! custom.insert("role".to_string(), "admin".into());
//!
//! let request = TokenRequest {
//!     claims: ClaimsSource::Inline(custom),
//!     issuer: "acme".to_string(),
//!     subject: "svc".to_string(),
//!     expiry_period_hours: 1,
//!     secret: "secret".to_string(),
//! };
//!
//! let encoder = TokenEncoder::new(SystemClock::default(), RandomIdGenerator);
//! let issued = encoder.encode(&request).unwrap();
//! assert_eq!(issued.token.segments().len(), 3);
//! assert_eq!(issued.exp - issued.iat, 3600);
//! ```

use log::{debug, info};
use std::fmt;
use std::path::PathBuf;

use crate::claims::{CustomClaims, IdGenerator};
use crate::clock::Clock;
use crate::error::JwsError;
use crate::header;
use crate::payload::PayloadBuilder;
use crate::segment::SEGMENT_SEPARATOR;
use crate::signer;

/// Join the three encoded segments with `.`
pub fn assemble(encoded_header: &str, encoded_payload: &str, encoded_signature: &str) -> String {
    format!(
        "{encoded_header}{SEGMENT_SEPARATOR}{encoded_payload}{SEGMENT_SEPARATOR}{encoded_signature}"
    )
}

/// A signed token string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwsToken(String);

impl JwsToken {
    pub fn from_segments(header: &str, payload: &str, signature: &str) -> Self {
        Self(assemble(header, payload, signature))
    }

    /// The header, payload and signature segments, in that order
    pub fn segments(&self) -> Vec<&str> {
        self.0.split(SEGMENT_SEPARATOR).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for JwsToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JwsToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the custom claims come from
#[derive(Debug, Clone)]
pub enum ClaimsSource {
    /// JSON document on disk
    File(PathBuf),
    /// Claims already parsed by the caller
    Inline(CustomClaims),
}

/// Everything needed to issue one token
#[derive(Debug, Clone)]
pub struct TokenRequest {
    pub claims: ClaimsSource,
    pub issuer: String,
    pub subject: String,
    pub expiry_period_hours: i64,
    pub secret: String,
}

/// Result of a successful issue
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: JwsToken,
    /// Standard `jti` as generated
    pub jti: String,
    /// Standard `iat` as computed
    pub iat: i64,
    /// Standard `exp` as computed
    pub exp: i64,
}

/// Issues HS256 tokens with an explicit clock and id generator
pub struct TokenEncoder<C, G> {
    clock: C,
    ids: G,
}

impl<C: Clock, G: IdGenerator> TokenEncoder<C, G> {
    pub fn new(clock: C, ids: G) -> Self {
        Self { clock, ids }
    }

    /// Run the whole pipeline for one request
    ///
    /// Inputs are validated before the clock is read or the claims file is
    /// opened, and the key is checked before anything is signed.
    pub fn encode(&self, request: &TokenRequest) -> Result<IssuedToken, JwsError> {
        signer::validate_secret(&request.secret)?;

        let builder = PayloadBuilder::new(
            request.issuer.as_str(),
            request.subject.as_str(),
            request.expiry_period_hours,
            &self.clock,
            &self.ids,
        )?;

        let encoded_header = header::create_header()?;
        debug!("Encoded header: {}", encoded_header);

        let payload = match &request.claims {
            ClaimsSource::File(path) => builder.build(path)?,
            ClaimsSource::Inline(custom) => builder.build_from_map(custom.clone())?,
        };
        debug!("Encoded payload with {} claims", payload.claims.len());

        let signature = signer::sign(&encoded_header, &payload.encoded, &request.secret)?;
        let token = JwsToken::from_segments(&encoded_header, &payload.encoded, &signature);

        info!(
            "Issued token {} for subject '{}' valid from {} to {}",
            payload.standard.jti, payload.standard.sub, payload.standard.iat, payload.standard.exp
        );

        Ok(IssuedToken {
            token,
            jti: payload.standard.jti,
            iat: payload.standard.iat,
            exp: payload.standard.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::{FixedIdGenerator, RandomIdGenerator};
    use crate::clock::{offset_from_hours, FixedClock};
    use chrono::TimeZone;
    use serde_json::json;
    use uuid::Uuid;

    fn request(custom: serde_json::Value, period: i64, secret: &str) -> TokenRequest {
        TokenRequest {
            claims: ClaimsSource::Inline(custom.as_object().cloned().unwrap_or_default()),
            issuer: "acme".to_string(),
            subject: "svc".to_string(),
            expiry_period_hours: period,
            secret: secret.to_string(),
        }
    }

    fn fixed_clock() -> FixedClock {
        FixedClock(
            offset_from_hours(9)
                .unwrap()
                .with_ymd_and_hms(2024, 4, 1, 9, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_assemble_three_segments() {
        assert_eq!(assemble("h", "p", "s"), "h.p.s");
        let token = JwsToken::from_segments("h", "p", "s");
        assert_eq!(token.segments(), vec!["h", "p", "s"]);
        assert_eq!(token.to_string(), "h.p.s");
    }

    #[test]
    fn test_encode_with_fixed_sources_is_reproducible() {
        let ids =
            FixedIdGenerator(Uuid::parse_str("5b0f4c1a-8e2d-4f3b-9c6a-1d2e3f405162").unwrap());
        let encoder = TokenEncoder::new(fixed_clock(), ids);
        let req = request(json!({"role": "admin"}), 1, "secret");

        let first = encoder.encode(&req).unwrap();
        let second = encoder.encode(&req).unwrap();
        assert_eq!(first.token, second.token);
        assert_eq!(first.exp - first.iat, 3600);
    }

    #[test]
    fn test_same_instant_gives_distinct_jti() {
        let encoder = TokenEncoder::new(fixed_clock(), RandomIdGenerator);
        let req = request(json!({}), 1, "secret");

        let first = encoder.encode(&req).unwrap();
        let second = encoder.encode(&req).unwrap();
        assert_eq!(first.iat, second.iat);
        assert_ne!(first.jti, second.jti);
        assert_ne!(first.token, second.token);
    }

    #[test]
    fn test_empty_key_rejected() {
        let encoder = TokenEncoder::new(fixed_clock(), RandomIdGenerator);
        let err = encoder.encode(&request(json!({}), 1, "")).unwrap_err();
        assert!(matches!(err, JwsError::Signing { .. }));
    }

    #[test]
    fn test_missing_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = TokenEncoder::new(fixed_clock(), RandomIdGenerator);
        let mut req = request(json!({}), 1, "secret");
        req.claims = ClaimsSource::File(dir.path().join("absent.json"));

        let err = encoder.encode(&req).unwrap_err();
        assert!(matches!(err, JwsError::FileAccess { .. }));
    }
}
