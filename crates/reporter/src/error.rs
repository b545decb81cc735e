use std::path::PathBuf;

/// Reasons a domain event could not be reported.
///
/// No event is sent to the client for a request that fails with one of these.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Internal positions are 1-based, so a zero line or column cannot be mapped.
    #[error("invalid position {line}:{column}, positions are 1-based")]
    InvalidPosition { line: u32, column: u32 },

    #[error("script source has neither a script id nor a url")]
    UnaddressableSource,

    /// Every handle the registry may issue is taken.
    #[error("no {kind} handles left to issue")]
    HandlesExhausted { kind: &'static str },

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("inspecting source {}", path.display())]
    Inspect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading configuration file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing configuration")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be between 0 and {max}, got {value}")]
    HandleBaseOutOfRange {
        field: &'static str,
        value: i64,
        max: i64,
    },
}
