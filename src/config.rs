// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jws-encoder project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Encoder Configuration
//!
//! Settings that shape the issued token when they are not given on the
//! command line. Values are resolved in this order:
//!
//! 1. command line options
//! 2. an optional YAML file passed with `--config`
//! 3. built-in defaults
//!
//! ## Example file
//!
//! ```yaml
//! issuer: "acme"
//! subject: "batch-jobs"
//! expiry_period: 12
//! version: "1.0"
//! utc_offset_hours: 9
//! ```
//!
//! Every key is optional; missing keys keep their default value.
//!
//! ## Usage
//!
//! ```no_run
//! use jws_encoder::config::EncoderConfig;
//!
//! let mut config = EncoderConfig::from_file("encoder.yaml").unwrap();
//! config.apply_args(Some("acme".to_string()), None, Some(1), None, None);
//! config.validate().unwrap();
//! ```

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::clock::{DEFAULT_UTC_OFFSET_HOURS, MAX_UTC_OFFSET_HOURS};
use crate::error::JwsError;

/// Default `iss` claim
pub const DEFAULT_ISSUER: &str = "hoge";

/// Default `sub` claim
pub const DEFAULT_SUBJECT: &str = "jwt-encode-example";

/// Default validity, in hours
pub const DEFAULT_EXPIRY_PERIOD: i64 = 24;

/// Default data version
pub const DEFAULT_VERSION: &str = "1.0";

/// Resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    /// Issuer written to the `iss` claim.
    pub issuer: String,

    /// Subject written to the `sub` claim.
    pub subject: String,

    /// Token validity in hours. Must be positive.
    pub expiry_period: i64,

    /// Version of the claims data.
    ///
    /// Accepted for compatibility with existing invocations. It is logged but
    /// not written into the token.
    pub version: String,

    /// Offset from UTC, in whole hours, of the clock used for `iat` and `exp`.
    pub utc_offset_hours: i32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            expiry_period: DEFAULT_EXPIRY_PERIOD,
            version: DEFAULT_VERSION.to_string(),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

impl EncoderConfig {
    /// Load settings from a YAML file
    ///
    /// Unlike the claims document, a missing configuration file is an error:
    /// it is only read when explicitly requested.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        let config: EncoderConfig = serde_yml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML configuration from {:?}", path))?;

        debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Override file or default values with command line options
    pub fn apply_args(
        &mut self,
        issuer: Option<String>,
        subject: Option<String>,
        expiry_period: Option<i64>,
        version: Option<String>,
        utc_offset_hours: Option<i32>,
    ) {
        if let Some(issuer) = issuer {
            self.issuer = issuer;
        }
        if let Some(subject) = subject {
            self.subject = subject;
        }
        if let Some(expiry_period) = expiry_period {
            self.expiry_period = expiry_period;
        }
        if let Some(version) = version {
            self.version = version;
        }
        if let Some(utc_offset_hours) = utc_offset_hours {
            self.utc_offset_hours = utc_offset_hours;
        }
    }

    /// Check the resolved settings before any token work starts
    pub fn validate(&self) -> Result<(), JwsError> {
        if self.issuer.is_empty() {
            return Err(JwsError::input("issuer must not be empty"));
        }
        if self.subject.is_empty() {
            return Err(JwsError::input("subject must not be empty"));
        }
        if self.version.is_empty() {
            return Err(JwsError::input("version must not be empty"));
        }
        if self.expiry_period <= 0 {
            return Err(JwsError::input(format!(
                "expiry period must be a positive number of hours, got {}",
                self.expiry_period
            )));
        }
        if self.utc_offset_hours.abs() > MAX_UTC_OFFSET_HOURS {
            return Err(JwsError::input(format!(
                "UTC offset must be within -{MAX_UTC_OFFSET_HOURS}..={MAX_UTC_OFFSET_HOURS} hours, got {}",
                self.utc_offset_hours
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let config = EncoderConfig::default();
        assert_eq!(config.issuer, "hoge");
        assert_eq!(config.subject, "jwt-encode-example");
        assert_eq!(config.expiry_period, 24);
        assert_eq!(config.version, "1.0");
        assert_eq!(config.utc_offset_hours, 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("encoder.yaml");
        fs::write(&path, "issuer: \"acme\"\nexpiry_period: 2\n").unwrap();

        let config = EncoderConfig::from_file(&path).unwrap();
        assert_eq!(config.issuer, "acme");
        assert_eq!(config.expiry_period, 2);
        assert_eq!(config.subject, DEFAULT_SUBJECT);
        assert_eq!(config.utc_offset_hours, DEFAULT_UTC_OFFSET_HOURS);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("encoder.yaml");
        fs::write(&path, "issuer: \"acme\"\nexpiry: 2\n").unwrap();

        assert!(EncoderConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        assert!(EncoderConfig::from_file(dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config = EncoderConfig {
            issuer: "from-file".to_string(),
            ..EncoderConfig::default()
        };
        config.apply_args(Some("from-cli".to_string()), None, Some(6), None, Some(0));

        assert_eq!(config.issuer, "from-cli");
        assert_eq!(config.subject, DEFAULT_SUBJECT);
        assert_eq!(config.expiry_period, 6);
        assert_eq!(config.utc_offset_hours, 0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            EncoderConfig {
                expiry_period: 0,
                ..EncoderConfig::default()
            },
            EncoderConfig {
                expiry_period: -3,
                ..EncoderConfig::default()
            },
            EncoderConfig {
                issuer: String::new(),
                ..EncoderConfig::default()
            },
            EncoderConfig {
                subject: String::new(),
                ..EncoderConfig::default()
            },
            EncoderConfig {
                version: String::new(),
                ..EncoderConfig::default()
            },
            EncoderConfig {
                utc_offset_hours: 24,
                ..EncoderConfig::default()
            },
        ];

        for config in bad {
            assert!(matches!(
                config.validate(),
                Err(JwsError::InputValidation { .. })
            ));
        }
    }
}
