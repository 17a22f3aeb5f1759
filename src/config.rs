//! Probe configuration
//!
//! Read from the process environment first, then from `KEY=VALUE` lines
//! in `.env.local` in the current directory. Nothing set means the plain
//! text report for ordinal 0 with no smoke check.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ProbeError, ProbeResult};

pub const FORMAT_KEY: &str = "DEVPROBE_FORMAT";
pub const ORDINAL_KEY: &str = "DEVPROBE_DEVICE_ORDINAL";
pub const SMOKE_KEY: &str = "DEVPROBE_SMOKE";

const DOTENV_FILE: &str = ".env.local";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeConfig {
    pub format: OutputFormat,
    /// Device index used when opening an accelerator
    pub ordinal: usize,
    /// Open the selected device after choosing it
    pub smoke: bool,
}

impl ProbeConfig {
    /// Load from the environment with `.env.local` as fallback
    pub fn load() -> ProbeResult<Self> {
        let dotenv = match std::env::current_dir() {
            Ok(dir) => read_dotenv(&dir.join(DOTENV_FILE)),
            Err(_) => HashMap::new(),
        };
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| dotenv.get(key).cloned()))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ProbeResult<Self> {
        let mut config = ProbeConfig::default();

        if let Some(raw) = lookup(FORMAT_KEY) {
            config.format = match raw.trim().to_lowercase().as_str() {
                "text" | "" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                other => {
                    return Err(ProbeError::config(format!(
                        "{}: expected 'text' or 'json', got '{}'",
                        FORMAT_KEY, other
                    )))
                }
            };
        }

        if let Some(raw) = lookup(ORDINAL_KEY) {
            config.ordinal = raw.trim().parse().map_err(|_| {
                ProbeError::config(format!(
                    "{}: expected a device index, got '{}'",
                    ORDINAL_KEY,
                    raw.trim()
                ))
            })?;
        }

        if let Some(raw) = lookup(SMOKE_KEY) {
            config.smoke = parse_flag(SMOKE_KEY, &raw)?;
        }

        tracing::debug!(?config, "Config loaded");
        Ok(config)
    }
}

fn parse_flag(key: &str, raw: &str) -> ProbeResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ProbeError::config(format!(
            "{}: expected a boolean, got '{}'",
            key, other
        ))),
    }
}

/// Parse a dotenv file; a missing or unreadable file yields no entries
pub fn read_dotenv(path: &Path) -> HashMap<String, String> {
    if !path.exists() {
        return HashMap::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), "Ignoring unreadable dotenv file: {}", e);
            return HashMap::new();
        }
    };
    let entries: HashMap<String, String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().trim_matches('"').to_string()))
        .collect();

    tracing::debug!(path = %path.display(), entries = entries.len(), "Read dotenv file");
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = ProbeConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ProbeConfig::default());
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.ordinal, 0);
        assert!(!config.smoke);
    }

    #[test]
    fn test_all_keys_parsed() {
        let config = ProbeConfig::from_lookup(lookup_from(&[
            (FORMAT_KEY, "JSON"),
            (ORDINAL_KEY, " 2 "),
            (SMOKE_KEY, "yes"),
        ]))
        .unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.ordinal, 2);
        assert!(config.smoke);
    }

    #[test]
    fn test_bad_values_are_config_errors() {
        for pairs in [
            [(FORMAT_KEY, "yaml")],
            [(ORDINAL_KEY, "-1")],
            [(SMOKE_KEY, "maybe")],
        ] {
            let err = ProbeConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(matches!(err, ProbeError::Config(_)), "{:?}", pairs);
        }
    }

    #[test]
    fn test_read_dotenv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DOTENV_FILE);
        std::fs::write(
            &path,
            "# local overrides\nDEVPROBE_FORMAT=json\n\n\
             DEVPROBE_DEVICE_ORDINAL = \"1\"\nnot a pair\n",
        )
        .unwrap();

        let entries = read_dotenv(&path);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[FORMAT_KEY], "json");
        assert_eq!(entries[ORDINAL_KEY], "1");
    }

    #[test]
    fn test_missing_dotenv_is_empty() {
        let dir = tempdir().unwrap();
        assert!(read_dotenv(&dir.path().join(DOTENV_FILE)).is_empty());
    }

    #[test]
    fn test_unreadable_dotenv_is_ignored() {
        let dir = tempdir().unwrap();

        // A directory in place of the file
        let as_dir = dir.path().join(DOTENV_FILE);
        std::fs::create_dir(&as_dir).unwrap();
        assert!(read_dotenv(&as_dir).is_empty());

        // Not valid UTF-8
        let binary = dir.path().join("binary.env");
        std::fs::write(&binary, [0xff, 0xfe, b'\n']).unwrap();
        assert!(read_dotenv(&binary).is_empty());
    }

    #[test]
    fn test_env_beats_dotenv() {
        let dotenv = lookup_from(&[(FORMAT_KEY, "json"), (ORDINAL_KEY, "3")]);
        let env = lookup_from(&[(FORMAT_KEY, "text")]);
        let config = ProbeConfig::from_lookup(|key| env(key).or_else(|| dotenv(key))).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.ordinal, 3);
    }
}
