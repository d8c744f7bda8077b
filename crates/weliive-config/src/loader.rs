// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! The file layers come from [`config_paths`]: `/etc/weliive/weliive.toml`,
//! then `~/.config/weliive/weliive.toml`, then `./weliive.toml`, with
//! `WELIIVE_*` environment variables on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::WeliiveConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/weliive/weliive.toml`
/// 3. `~/.config/weliive/weliive.toml`
/// 4. `./weliive.toml`
/// 5. `WELIIVE_*` environment variables
pub fn load_config() -> Result<WeliiveConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<WeliiveConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WeliiveConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<WeliiveConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WeliiveConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// File name looked up in every layer.
pub const CONFIG_FILE: &str = "weliive.toml";

/// TOML layers merged by [`load_config`], lowest precedence first. The user
/// layer is skipped when the platform has no config directory.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![Path::new("/etc/weliive").join(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("weliive").join(CONFIG_FILE));
    }
    paths.push(PathBuf::from(CONFIG_FILE));
    paths
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    let defaults = Figment::new().merge(Serialized::defaults(WeliiveConfig::default()));
    config_paths()
        .into_iter()
        .fold(defaults, |figment, path| figment.merge(Toml::file(path)))
        .merge(env_provider())
}

/// Contents of the layer files that exist, keyed by the path figment reports
/// in its errors. Relative layers resolve against the working directory.
pub fn read_config_sources() -> Vec<(String, String)> {
    config_paths()
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            let path = if path.is_relative() {
                std::env::current_dir()
                    .map(|cwd| cwd.join(&path))
                    .unwrap_or(path)
            } else {
                path
            };
            Some((path.display().to_string(), content))
        })
        .collect()
}

/// Environment variable provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `WELIIVE_SIMULATION_STARTUP_DELAY_MS` must map to
/// `simulation.startup_delay_ms`, not `simulation.startup.delay.ms`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("WELIIVE_").map(|key| {
        let key_str = key.as_str();
        for section in SECTIONS {
            if let Some(field) = key_str
                .strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
            {
                return format!("{section}.{field}").into();
            }
        }
        key_str.to_string().into()
    })
}

/// Top-level config sections addressable from the environment.
const SECTIONS: &[&str] = &["app", "simulation", "chat", "lead", "qa"];
