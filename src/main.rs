//! buildparams - CLI tools for CI build-server settings documents
//!
//! Works on YAML or JSON documents holding build features, project features
//! and triggers, resolved against the typed schema catalog.
//!
//! ## Commands
//!
//! - `buildparams check` - Decode values and validate mandatory properties
//! - `buildparams lint` - Report suspicious parameters and ids
//! - `buildparams doc` - Generate a reference of the known entity kinds
//! - `buildparams export` - Write a normalized YAML or JSON document
//! - `buildparams completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Validate a settings document
//! buildparams check settings.yaml
//!
//! # Validate against an older API generation
//! buildparams --api-version 2018.2 check settings.yaml
//!
//! # Generate the parameter reference
//! buildparams doc -o PARAMETERS.md
//!
//! # Generate shell completions
//! buildparams completions bash > /etc/bash_completion.d/buildparams
//! ```
//!
//! ## Configuration
//!
//! `buildparams.yaml` in the working directory sets the default API version,
//! the log level and whether lint warnings fail `check`.
//! `BUILDPARAMS_VERSION` and `BUILDPARAMS_LOG_LEVEL` override the file.

use buildparams::infrastructure::{Config, init_logging};
use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if std::env::var("BUILDPARAMS_DEBUG").is_ok() {
        init_logging("debug");
    } else {
        init_logging(&config.log_level);
    }

    match cli::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if std::env::var("BUILDPARAMS_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
