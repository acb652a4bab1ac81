//! Configuration lookup
//!
//! An explicit `--config` path wins; otherwise `<config dir>/xlclog/config.json`
//! is used when present, else built-in defaults.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use xlclog_core::config::XlcConfig;

/// Per-user configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("xlclog").join("config.json"))
}

/// Load the effective configuration
pub fn load(explicit: Option<&Path>) -> Result<XlcConfig> {
    if let Some(path) = explicit {
        return XlcConfig::from_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()));
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading user config");
            XlcConfig::from_file(&path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))
        }
        _ => Ok(XlcConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use xlclog_core::frame::NumericPolicy;

    #[test]
    fn test_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "parser": {{ "numeric": "zero_fill" }} }}"#).unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.parser.numeric, NumericPolicy::ZeroFill);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("missing.json"))).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
