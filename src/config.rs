// src/config.rs

//! Launch configuration for a DataX engine run.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::Result;

/// Launch parameters for a single engine invocation.
///
/// Field names match the wire names used by existing deployment configs
/// (`datax_home`, `config_file`, ...), so the same keys keep working when a
/// config file is deserialized. Every field is optional in the file; missing
/// strings default to empty and are filled in (or rejected) when the
/// argument list is built.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Log the fully resolved command line before starting the engine.
    #[serde(default)]
    pub debug: bool,

    /// Initial JVM heap size, e.g. `"1g"` or `"512m"`.
    #[serde(default)]
    pub xms: String,

    /// Maximum JVM heap size.
    #[serde(default)]
    pub xmx: String,

    /// Engine log level. Empty means `"info"`.
    #[serde(default)]
    pub loglevel: String,

    /// DataX installation root. May be relative; resolved at launch.
    #[serde(default)]
    pub datax_home: String,

    /// Engine run mode. Empty means `"standalone"`.
    #[serde(default)]
    pub mode: String,

    /// Job identifier, also used for the engine's log file name.
    #[serde(default)]
    pub jobid: String,

    /// Path to the job description file handed to the engine. May be
    /// relative; resolved at launch.
    #[serde(default)]
    pub config_file: String,
}

/// Load a [`Config`] from a TOML file.
///
/// This only deserializes. Path resolution happens when the argument list
/// is built, so a config may reference paths that do not exist yet.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}
