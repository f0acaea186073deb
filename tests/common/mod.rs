// tests/common/mod.rs

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

use datax_runner::{Config, LogSink};
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing for tests. Safe to call from every test; only the
/// first call installs the subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// A config whose paths never get touched by the tests; the stand-in
/// scripts ignore the JVM-style argv entirely.
pub fn sample_config() -> Config {
    Config {
        debug: false,
        xms: "64m".to_string(),
        xmx: "64m".to_string(),
        loglevel: "ERROR".to_string(),
        datax_home: "/tmp/datax".to_string(),
        mode: String::new(),
        jobid: "77".to_string(),
        config_file: "/tmp/datax_job.json".to_string(),
    }
}

/// Write a small executable shell script standing in for the engine
/// launcher. A `#!/bin/sh` line is prepended to `body`.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let script = format!("#!/bin/sh\n{body}\n");
    fs::write(&path, script).expect("write script");
    let mut perms = fs::metadata(&path).expect("script metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod script");
    path
}

/// Collects every relayed line for later assertions.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl LogSink for MemorySink {
    fn write(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}
