use std::fmt;
use std::path::PathBuf;

/// Error types for urlsieve operations
#[derive(Debug)]
pub enum SieveError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// A configuration file that is not valid TOML for [`crate::config::Config`]
    TomlParsing {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A duration string that could not be parsed
    InvalidDuration(String),
}

impl fmt::Display for SieveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SieveError::Io(err) => write!(f, "IO error: {err}"),
            SieveError::Config(msg) => write!(f, "Configuration error: {msg}"),
            SieveError::Http(err) => write!(f, "HTTP error: {err}"),
            SieveError::TomlParsing { path, source } => {
                write!(f, "Invalid TOML in config file '{}': {source}", path.display())
            }
            SieveError::InvalidDuration(msg) => write!(f, "Invalid duration: {msg}"),
        }
    }
}

impl std::error::Error for SieveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SieveError::Io(err) => Some(err),
            SieveError::Http(err) => Some(err),
            SieveError::TomlParsing { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SieveError {
    fn from(err: std::io::Error) -> Self {
        SieveError::Io(err)
    }
}

impl From<reqwest::Error> for SieveError {
    fn from(err: reqwest::Error) -> Self {
        SieveError::Http(err)
    }
}

/// Type alias for Results using SieveError
pub type Result<T> = std::result::Result<T, SieveError>;
