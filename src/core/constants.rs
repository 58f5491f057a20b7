//! Application-wide constants to avoid magic values throughout the codebase.
//!
//! Every tunable of the extraction pipeline lives here so tests and
//! configuration can refer to the same named defaults.

/// HTTP status window used to accept a probed URL
pub mod http_status {
    /// Lowest accepted status code (inclusive)
    pub const ACCEPT_MIN: u16 = 200;
    /// Upper bound of accepted status codes (exclusive), so redirects pass
    pub const ACCEPT_MAX_EXCLUSIVE: u16 = 400;
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
    /// Maximum accepted timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;
}

/// Concurrency gate constants
pub mod gate {
    /// Default number of validation calls allowed in flight process-wide
    pub const DEFAULT_CAPACITY: usize = 100;
    /// Largest capacity a configuration may ask for
    pub const MAX_CAPACITY: usize = 10_000;
}

/// File processing constants
pub mod files {
    /// Files strictly smaller than this many bytes are read into memory
    pub const DEFAULT_MEMORY_THRESHOLD: u64 = 1024 * 1024 * 1024;
    /// Delimiter separating candidates inside a line
    pub const TOKEN_DELIMITER: u8 = b',';
    /// Line break, also ends a candidate
    pub const LINE_DELIMITER: u8 = b'\n';
    /// Longest raw segment between delimiters; a file holding a longer one is abandoned
    pub const MAX_TOKEN_BYTES: usize = 64 * 1024;
    /// Files held open at the same time across the run, well under common fd limits
    pub const MAX_OPEN_FILES: usize = 256;
}

/// Content-type handling
pub mod content_types {
    /// Responses whose Content-Type starts with this prefix are rejected
    pub const IMAGE_PREFIX: &str = "image/";
}

/// HTTP client constants
pub mod http {
    /// Maximum redirects followed before the final status is judged
    pub const MAX_REDIRECTS: usize = 10;
    /// Default User-Agent header
    pub const DEFAULT_USER_AGENT: &str =
        concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
}

/// Configuration file discovery
pub mod config_files {
    /// Name of the configuration file looked up in the working directory
    pub const FILE_NAME: &str = ".urlsieve.toml";
    /// How many parent directories are searched for the configuration file
    pub const PARENT_SEARCH_DEPTH: usize = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_window() {
        assert_eq!(http_status::ACCEPT_MIN, 200);
        assert_eq!(http_status::ACCEPT_MAX_EXCLUSIVE, 400);
    }

    #[test]
    fn test_pipeline_defaults() {
        assert_eq!(timeouts::DEFAULT_TIMEOUT_SECONDS, 10);
        assert_eq!(gate::DEFAULT_CAPACITY, 100);
        assert_eq!(files::DEFAULT_MEMORY_THRESHOLD, 1 << 30);
        assert_eq!(files::TOKEN_DELIMITER, b',');
        assert_eq!(files::MAX_TOKEN_BYTES, 65_536);
    }

    #[test]
    fn test_default_user_agent() {
        assert!(http::DEFAULT_USER_AGENT.starts_with("urlsieve/"));
    }
}
