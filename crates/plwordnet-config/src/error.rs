//! Errors raised while locating, reading and writing wordnet config files.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A config layer could not be read
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config layer is not valid TOML for `WordnetConfig`
    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot render config as TOML: {0}")]
    Render(#[from] toml::ser::Error),

    /// `config init` failed to create the directory or the file
    #[error("cannot write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no home directory for the global config")]
    NoHomeDir,

    #[error("invalid '{key}': {message}")]
    Invalid { key: &'static str, message: String },

    #[error("no wordnet source configured (set source.path or pass --source)")]
    NoSource,
}

impl ConfigError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(path: &Path, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_names_key() {
        let err = ConfigError::invalid("logging.level", "unknown level 'loud'");
        assert_eq!(err.to_string(), "invalid 'logging.level': unknown level 'loud'");
    }

    #[test]
    fn test_io_errors_carry_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ConfigError::read(Path::new("/etc/plwn.toml"), io);
        assert!(err.to_string().starts_with("cannot read config /etc/plwn.toml"));
    }

    #[test]
    fn test_no_source_mentions_flag() {
        assert!(ConfigError::NoSource.to_string().contains("--source"));
    }
}
