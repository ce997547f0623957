// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jws-encoder project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # JWS Encoder
//!
//! Issues an HS256-signed token from a JSON claims document and prints it on
//! standard output.
//!
//! ## Usage
//!
//! ```text
//! jws-encoder [OPTIONS] <JSONFILE> <PRIVATEKEY>
//! ```
//!
//! ## Examples
//!
//! Issue a one hour token for the `svc` subject:
//! ```text
//! jws-encoder claims.json secret -i acme -s svc -e 1
//! ```
//!
//! Diagnostics go to standard error, so the token can be captured directly:
//! ```text
//! TOKEN=$(jws-encoder claims.json "$SECRET")
//! ```

use clap::Parser;
use jws_encoder::cli::{self, CliArgs};
use std::env;
use std::process;

fn main() {
    let args = CliArgs::parse();

    let env_filters = env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    args.logger_builder(env_filters.as_deref()).init();

    match cli::run(&args) {
        Ok(issued) => println!("{}", issued.token),
        Err(e) => {
            eprintln!("Error during {}: {}", e.stage(), e);
            process::exit(e.exit_code());
        }
    }
}
