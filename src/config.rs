use std::path::PathBuf;

use crate::storage::NOTES_FILE;

/// Runtime configuration for the notebox front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backing JSON file holding every note and folder
    pub notes_file: PathBuf,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_file: PathBuf::from(NOTES_FILE),
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Build a config from command line overrides.
    ///
    /// Each `verbose` step raises the log level: warn, info, debug, trace.
    pub fn from_args(notes_file: Option<PathBuf>, verbose: u8) -> Self {
        let mut config = Self::default();
        if let Some(path) = notes_file {
            config.notes_file = path;
        }
        config.log_filter = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
        .to_string();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.notes_file, PathBuf::from("notes.json"));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_from_args_overrides() {
        let config = Config::from_args(Some(PathBuf::from("/tmp/other.json")), 2);
        assert_eq!(config.notes_file, PathBuf::from("/tmp/other.json"));
        assert_eq!(config.log_filter, "debug");

        assert_eq!(Config::from_args(None, 9).log_filter, "trace");
        assert_eq!(Config::from_args(None, 0), Config::default());
    }
}
