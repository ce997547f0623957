// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jws-encoder project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while issuing a token
///
/// Every variant corresponds to one stage of the pipeline, so the binary can
/// tell the user where the invocation failed and exit with a distinct code.
#[derive(Error, Debug)]
pub enum JwsError {
    #[error("Invalid input: {reason}")]
    InputValidation { reason: String },

    #[error("Cannot read claims file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse claims file {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Signing failed: {reason}")]
    Signing { reason: String },

    #[error("Configuration loading failed: {source}")]
    Config {
        #[from]
        source: anyhow::Error,
    },

    #[error("Failed to serialize {what}: {reason}")]
    Serialization { what: &'static str, reason: String },
}

impl JwsError {
    pub fn input(reason: impl Into<String>) -> Self {
        JwsError::InputValidation {
            reason: reason.into(),
        }
    }

    pub fn signing(reason: impl Into<String>) -> Self {
        JwsError::Signing {
            reason: reason.into(),
        }
    }

    /// Name of the pipeline stage that produced the error
    pub fn stage(&self) -> &'static str {
        match self {
            JwsError::InputValidation { .. } => "argument validation",
            JwsError::FileAccess { .. } => "file load",
            JwsError::Parse { .. } => "JSON parse",
            JwsError::Signing { .. } => "signing",
            JwsError::Config { .. } => "configuration",
            JwsError::Serialization { .. } => "encoding",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            JwsError::InputValidation { .. } => 2,
            JwsError::FileAccess { .. } => 3,
            JwsError::Parse { .. } => 4,
            JwsError::Signing { .. } => 5,
            JwsError::Config { .. } => 6,
            JwsError::Serialization { .. } => 7,
        }
    }
}
