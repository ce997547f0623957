// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jws-encoder project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JWS encoder library
//!
//! Builds compact HS256 tokens of the form `header.payload.signature`, where
//! every segment is standard base64 and the payload carries the standard
//! claims (`jti`, `iss`, `sub`, `iat`, `exp`) merged with caller-supplied
//! custom claims.

pub mod claims;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod header;
pub mod payload;
pub mod segment;
pub mod signer;
pub mod token;

pub use error::JwsError;
pub use token::{ClaimsSource, IssuedToken, JwsToken, TokenEncoder, TokenRequest};
