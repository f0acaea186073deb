// src/args.rs

//! JVM argument construction for the DataX engine.

use std::path::{self, Path};

use crate::config::Config;
use crate::errors::{DataxError, Result};

/// Engine log level used when the config leaves `loglevel` empty.
const DEFAULT_LOGLEVEL: &str = "info";
/// Run mode used when the config leaves `mode` empty.
const DEFAULT_MODE: &str = "standalone";

/// Build the JVM argument list for one engine run.
///
/// The switches and their order are compatibility-critical: the engine's
/// launcher scripts and its logback setup expect exactly this sequence.
/// `datax_home` and `config_file` are resolved to absolute paths, and that
/// resolution is the only failure mode. The function reads nothing but the
/// config and the working directory, so the same input always yields the
/// same list.
pub fn build_args(cfg: &Config) -> Result<Vec<String>> {
    let loglevel = if cfg.loglevel.is_empty() {
        DEFAULT_LOGLEVEL
    } else {
        &cfg.loglevel
    };
    let mode = if cfg.mode.is_empty() {
        DEFAULT_MODE
    } else {
        &cfg.mode
    };

    let datax_home = absolutize(&cfg.datax_home)?;
    let job = absolutize(&cfg.config_file)?;

    Ok(vec![
        "-server".to_string(),
        format!("-Xms{}", cfg.xms),
        format!("-Xmx{}", cfg.xmx),
        "-XX:+HeapDumpOnOutOfMemoryError".to_string(),
        format!("-XX:HeapDumpPath={datax_home}/log"),
        format!("-Dloglevel={loglevel}"),
        "-Dfile.encoding=UTF-8".to_string(),
        "-Dlogback.statusListenerClass=ch.qos.logback.core.status.NopStatusListener".to_string(),
        "-Djava.security.egd=file:///dev/urandom".to_string(),
        format!("-Ddatax.home={datax_home}"),
        format!("-Dlogback.configurationFile={datax_home}/conf/logback.xml"),
        "-classpath".to_string(),
        format!("{datax_home}/lib/*:."),
        format!("-Dlog.file.name=dlog_{}", cfg.jobid),
        "com.alibaba.datax.core.Engine".to_string(),
        "-mode".to_string(),
        mode.to_string(),
        "-jobid".to_string(),
        cfg.jobid.clone(),
        "-job".to_string(),
        job,
    ])
}

/// Resolve a config path to an absolute string. The resolution is lexical
/// against the working directory; the path itself does not have to exist.
fn absolutize(raw: &str) -> Result<String> {
    let abs = path::absolute(Path::new(raw)).map_err(|source| DataxError::BadPath {
        path: raw.to_string(),
        source,
    })?;
    Ok(abs.to_string_lossy().into_owned())
}
