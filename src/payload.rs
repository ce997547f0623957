// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jws-encoder project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Payload construction
//!
//! `PayloadBuilder` computes the standard claims from the clock and the id
//! generator it is given, merges the custom claims over them and encodes the
//! result as a token segment.

use log::debug;
use serde_json::{Map, Value};
use std::path::Path;

use crate::claims::{self, CustomClaims, IdGenerator, StandardClaims};
use crate::clock::Clock;
use crate::error::JwsError;
use crate::segment;

/// Seconds in one hour of expiry period
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Encoded payload together with the claims it was built from
#[derive(Debug, Clone)]
pub struct EncodedPayload {
    /// Base64 segment
    pub encoded: String,
    /// Merged claims, before encoding
    pub claims: Map<String, Value>,
    /// Standard claims as computed, before any custom override
    pub standard: StandardClaims,
}

/// Builds the payload segment of a token
pub struct PayloadBuilder<C, G> {
    issuer: String,
    subject: String,
    expiry_period_hours: i64,
    clock: C,
    ids: G,
}

impl<C: Clock, G: IdGenerator> PayloadBuilder<C, G> {
    /// Create a builder, rejecting empty names and non-positive periods
    ///
    /// Validation happens here so that no timestamp is ever computed for an
    /// invalid period.
    pub fn new(
        issuer: impl Into<String>,
        subject: impl Into<String>,
        expiry_period_hours: i64,
        clock: C,
        ids: G,
    ) -> Result<Self, JwsError> {
        let issuer = issuer.into();
        let subject = subject.into();

        if issuer.is_empty() {
            return Err(JwsError::input("issuer must not be empty"));
        }
        if subject.is_empty() {
            return Err(JwsError::input("subject must not be empty"));
        }
        if expiry_period_hours <= 0 {
            return Err(JwsError::input(format!(
                "expiry period must be a positive number of hours, got {expiry_period_hours}"
            )));
        }

        Ok(Self {
            issuer,
            subject,
            expiry_period_hours,
            clock,
            ids,
        })
    }

    /// Compute the standard claims for this instant
    pub fn standard_claims(&self) -> Result<StandardClaims, JwsError> {
        let now = self.clock.now();
        let iat = now.timestamp();
        let exp = self
            .expiry_period_hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(|seconds| iat.checked_add(seconds))
            .ok_or_else(|| {
                JwsError::input(format!(
                    "expiry period of {} hours overflows the expiry timestamp",
                    self.expiry_period_hours
                ))
            })?;

        debug!(
            "Issued at {} ({}), expires at {}",
            iat,
            now.to_rfc3339(),
            exp
        );

        Ok(StandardClaims {
            jti: self.ids.generate().hyphenated().to_string(),
            iss: self.issuer.clone(),
            sub: self.subject.clone(),
            iat,
            exp,
        })
    }

    /// Build the payload from custom claims already in memory
    pub fn build_from_map(&self, custom: CustomClaims) -> Result<EncodedPayload, JwsError> {
        let standard = self.standard_claims()?;
        let merged = claims::merge_claims(standard.clone(), custom);
        let encoded = segment::encode_json(&merged, "payload")?;
        Ok(EncodedPayload {
            encoded,
            claims: merged,
            standard,
        })
    }

    /// Build the payload from a custom claims file
    pub fn build<P: AsRef<Path>>(&self, claims_path: P) -> Result<EncodedPayload, JwsError> {
        let custom = claims::load_custom_claims(claims_path)?;
        self.build_from_map(custom)
    }
}

/// Build and encode a payload in one call
pub fn build_payload<P, C, G>(
    claims_path: P,
    issuer: &str,
    subject: &str,
    expiry_period_hours: i64,
    clock: C,
    ids: G,
) -> Result<String, JwsError>
where
    P: AsRef<Path>,
    C: Clock,
    G: IdGenerator,
{
    let builder = PayloadBuilder::new(issuer, subject, expiry_period_hours, clock, ids)?;
    Ok(builder.build(claims_path)?.encoded)
}
