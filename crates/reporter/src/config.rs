//! Per-session configuration.
//!
//! [`ClientCapabilities`] deserializes straight from the arguments of the
//! client's `initialize` request; [`ReporterConfig`] wraps it with adapter
//! settings and can be loaded from TOML.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ReportError, Result};
use crate::handles::MAX_HANDLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathFormat {
    #[default]
    Path,
    Uri,
}

/// How the client wants positions and paths expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientCapabilities {
    #[serde(rename = "linesStartAt1")]
    pub lines_start_at_1: bool,
    #[serde(rename = "columnsStartAt1")]
    pub columns_start_at_1: bool,
    #[serde(rename = "pathFormat")]
    pub path_format: PathFormat,
}

impl Default for ClientCapabilities {
    fn default() -> Self {
        Self {
            lines_start_at_1: true,
            columns_start_at_1: true,
            path_format: PathFormat::Path,
        }
    }
}

impl ClientCapabilities {
    /// Convert a 1-based internal position to the client's convention.
    pub fn to_client_position(&self, line: u32, column: u32) -> Result<(i64, i64)> {
        if line == 0 || column == 0 {
            return Err(ReportError::InvalidPosition { line, column });
        }

        let line = i64::from(line) - i64::from(!self.lines_start_at_1);
        let column = i64::from(column) - i64::from(!self.columns_start_at_1);
        Ok((line, column))
    }

    /// Render a filesystem path for the client.
    ///
    /// Relative paths cannot be expressed as `file://` URIs and are passed
    /// through unchanged.
    pub fn render_path(&self, path: &Path) -> String {
        match self.path_format {
            PathFormat::Path => path.display().to_string(),
            PathFormat::Uri => url::Url::from_file_path(path)
                .map(|url| url.to_string())
                .unwrap_or_else(|()| {
                    tracing::debug!(path = %path.display(), "cannot render relative path as uri");
                    path.display().to_string()
                }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    pub client: ClientCapabilities,
    /// Offset for `sourceReference` handles.
    pub source_handle_base: i64,
    /// Offset for client breakpoint ids.
    pub breakpoint_id_base: i64,
}

impl ReporterConfig {
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that both handle bases leave room for handles in `1..=MAX_HANDLE`.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (field, value) in [
            ("source_handle_base", self.source_handle_base),
            ("breakpoint_id_base", self.breakpoint_id_base),
        ] {
            if !(0..MAX_HANDLE).contains(&value) {
                return Err(ConfigError::HandleBaseOutOfRange {
                    field,
                    value,
                    max: MAX_HANDLE - 1,
                });
            }
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded reporter configuration");
        Self::from_toml_str(&contents)
    }
}
