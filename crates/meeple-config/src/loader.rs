// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./meeple.toml` > `~/.config/meeple/meeple.toml` > `/etc/meeple/meeple.toml`,
//! with environment variable overrides via the `MEEPLE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MeepleConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/meeple/meeple.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "meeple.toml";

/// Per-user config file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("meeple").join("meeple.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/meeple/meeple.toml`
/// 3. `~/.config/meeple/meeple.toml`
/// 4. `./meeple.toml`
/// 5. `MEEPLE_*` environment variables
pub fn load_config() -> Result<MeepleConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from an inline TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<MeepleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MeepleConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MeepleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MeepleConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for the default hierarchy, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MeepleConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider mapping `MEEPLE_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `MEEPLE_GEMINI_API_KEY` must become `gemini.api_key`.
fn env_provider() -> Env {
    Env::prefixed("MEEPLE_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to its dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in ["app", "server", "gemini", "storage"] {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
