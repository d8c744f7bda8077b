// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weliive configuration: the [`WeliiveConfig`] model, its layered loading
//! ([`loader`]), range checks ([`validation`]) and miette reports for
//! anything that fails ([`diagnostic`]).
//!
//! Binaries call [`load_and_validate`] once at startup and hand the result
//! to `LiveSession::new`. A failure is a list of [`ConfigError`]s meant for
//! [`render_errors`].
//!
//! ```no_run
//! let config = match weliive_config::load_and_validate() {
//!     Ok(config) => config,
//!     Err(errors) => {
//!         weliive_config::render_errors(&errors);
//!         std::process::exit(1);
//!     }
//! };
//! assert!(config.simulation.interval_ms > 0);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{config_paths, load_config, load_config_from_path, load_config_from_str};
pub use model::WeliiveConfig;

/// Load the file layers and `WELIIVE_*` overrides, then validate.
/// Parse errors point into whichever layer file caused them.
pub fn load_and_validate() -> Result<WeliiveConfig, Vec<ConfigError>> {
    checked(loader::load_config(), loader::read_config_sources)
}

/// Parse `toml_content` over the defaults, then validate. No files or
/// environment are consulted.
pub fn load_and_validate_str(toml_content: &str) -> Result<WeliiveConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Sources are only read when extraction failed.
fn checked(
    loaded: Result<WeliiveConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<WeliiveConfig, Vec<ConfigError>> {
    let config = loaded.map_err(|err| diagnostic::figment_to_config_errors(err, &sources()))?;
    validation::validate_config(&config)?;
    Ok(config)
}
