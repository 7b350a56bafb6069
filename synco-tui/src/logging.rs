use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SYNCO_LOG";
const LOG_FILE: &str = "synco.log";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Send tracing output to `<dir>/synco.log`. The terminal belongs to the UI,
/// so nothing is written to stdout or stderr.
pub fn init(dir: &Path, default_level: &str) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    // A subscriber may already be installed (tests); keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("synco");

        init(&nested, "debug").unwrap();
        assert!(nested.join(LOG_FILE).exists());

        // A second call is harmless.
        init(&nested, "debug").unwrap();
    }

    #[test]
    fn bad_default_level_falls_back() {
        let filter = env_filter("not a [valid filter");
        assert!(!filter.to_string().is_empty());
    }
}
