// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jws-encoder project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Command line surface of the `jws-encoder` binary
//!
//! Existing invocations rely on these argument names and defaults:
//! two positionals (`jsonfile`, `privatekey`) and the `-v`, `-i`, `-s`, `-e`
//! options. `-v/--version` is the version of the claims data, not the
//! version of this program.

use clap::Parser;
use log::info;
use std::path::PathBuf;

use crate::claims::RandomIdGenerator;
use crate::clock::SystemClock;
use crate::config::EncoderConfig;
use crate::error::JwsError;
use crate::token::{ClaimsSource, IssuedToken, TokenEncoder, TokenRequest};

/// Issue an HS256-signed JOSE token from a JSON claims document
#[derive(Parser, Debug, Clone)]
#[command(author, long_about = None, disable_version_flag = true)]
pub struct CliArgs {
    /// JSON document whose top-level object is merged into the payload
    pub jsonfile: PathBuf,

    /// Secret used as the HMAC-SHA256 key
    pub privatekey: String,

    /// Version of the claims data [default: 1.0]
    #[arg(short = 'v', long = "version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Issuer of the token (`iss`) [default: hoge]
    #[arg(short = 'i', long = "issuer")]
    pub issuer: Option<String>,

    /// Subject of the token (`sub`) [default: jwt-encode-example]
    #[arg(short = 's', long = "subject")]
    pub subject: Option<String>,

    /// Validity period in hours [default: 24]
    #[arg(
        short = 'e',
        long = "expiryperiod",
        value_name = "HOURS",
        allow_negative_numbers = true
    )]
    pub expiryperiod: Option<i64>,

    /// Offset from UTC, in hours, used for `iat` and `exp` [default: 9]
    #[arg(long = "utc-offset", value_name = "HOURS", allow_negative_numbers = true)]
    pub utc_offset: Option<i32>,

    /// YAML file providing defaults for the options above
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Disable all logging output
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CliArgs {
    /// Level requested with `--verbose` or `-q`, if any
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        if self.quiet {
            Some(log::LevelFilter::Off)
        } else if self.verbose {
            Some(log::LevelFilter::Debug)
        } else {
            None
        }
    }

    /// Logger writing to standard error
    ///
    /// Levels are layered: `warn` by default, then the `RUST_LOG` filters,
    /// then `--verbose` or `-q`.
    pub fn logger_builder(&self, env_filters: Option<&str>) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        builder
            .target(env_logger::Target::Stderr)
            .filter_level(log::LevelFilter::Warn);
        if let Some(filters) = env_filters {
            builder.parse_filters(filters);
        }
        if let Some(level) = self.log_level() {
            builder.filter_level(level);
        }
        builder
    }

    /// Merge the command line with the optional configuration file
    pub fn resolve_config(&self) -> Result<EncoderConfig, JwsError> {
        let mut config = match &self.config {
            Some(path) => EncoderConfig::from_file(path)?,
            None => EncoderConfig::default(),
        };
        config.apply_args(
            self.issuer.clone(),
            self.subject.clone(),
            self.expiryperiod,
            self.version.clone(),
            self.utc_offset,
        );
        config.validate()?;
        Ok(config)
    }
}

/// Issue a token for parsed command line arguments
pub fn run(args: &CliArgs) -> Result<IssuedToken, JwsError> {
    let config = args.resolve_config()?;
    info!(
        "Encoding {:?} (data version {}) for issuer '{}'",
        args.jsonfile, config.version, config.issuer
    );

    let clock = SystemClock::with_offset_hours(config.utc_offset_hours)?;
    let encoder = TokenEncoder::new(clock, RandomIdGenerator);

    encoder.encode(&TokenRequest {
        claims: ClaimsSource::File(args.jsonfile.clone()),
        issuer: config.issuer,
        subject: config.subject,
        expiry_period_hours: config.expiry_period,
        secret: args.privatekey.clone(),
    })
}
