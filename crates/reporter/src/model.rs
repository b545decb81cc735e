//! Debugger-side entities, as the engine describes them.
//!
//! None of these are sent to the client directly; the converters project
//! them onto the protocol types in [`dap_types`].
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// What makes two loaded sources "the same source".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SourceIdentity {
    /// A file the engine loaded from a filesystem path.
    #[serde(rename_all = "camelCase")]
    Path { path: PathBuf },
    /// A script that only exists inside the runtime (eval'd code, generated
    /// code, a page script served over the network).
    #[serde(rename_all = "camelCase")]
    Script {
        script_id: String,
        #[serde(default)]
        url: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedSource {
    pub identity: SourceIdentity,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
}

impl LoadedSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            identity: SourceIdentity::Path { path: path.into() },
            name: None,
            origin: None,
        }
    }

    pub fn script(script_id: impl Into<String>, url: Option<String>) -> Self {
        Self {
            identity: SourceIdentity::Script {
                script_id: script_id.into(),
                url,
            },
            name: None,
            origin: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.identity {
            SourceIdentity::Path { path } => Some(path),
            SourceIdentity::Script { .. } => None,
        }
    }

    /// The name shown to the user.
    ///
    /// Falls back to the file name, then the last segment of the script url,
    /// then `VM<script id>`.
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = &self.name {
            return Some(name.clone());
        }

        match &self.identity {
            SourceIdentity::Path { path } => path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|s| s.to_string()),
            SourceIdentity::Script { script_id, url } => url
                .as_deref()
                .and_then(|url| url.trim_end_matches('/').rsplit('/').next())
                .filter(|segment| !segment.is_empty())
                .map(|s| s.to_string())
                .or_else(|| (!script_id.is_empty()).then(|| format!("VM{script_id}"))),
        }
    }
}

/// A position in a loaded source. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub source: LoadedSource,
    pub line: u32,
    #[serde(default = "first_column")]
    pub column: u32,
}

fn first_column() -> u32 {
    1
}

impl Location {
    pub fn new(source: LoadedSource, line: u32, column: u32) -> Self {
        Self {
            source,
            line,
            column,
        }
    }
}

/// Engine-side identity of a breakpoint the client asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointRecipeId(pub u64);

/// Outcome of trying to set a breakpoint recipe in the debuggee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointRecipeStatus {
    pub recipe: BreakpointRecipeId,
    pub verified: bool,
    #[serde(default)]
    pub resolved_location: Option<Location>,
    #[serde(default)]
    pub message: Option<String>,
}

impl BreakpointRecipeStatus {
    pub fn verified_at(recipe: BreakpointRecipeId, location: Location) -> Self {
        Self {
            recipe,
            verified: true,
            resolved_location: Some(location),
            message: None,
        }
    }

    pub fn unverified(recipe: BreakpointRecipeId, message: impl Into<String>) -> Self {
        Self {
            recipe,
            verified: false,
            resolved_location: None,
            message: Some(message.into()),
        }
    }
}

/// One already formatted line of an exception's stack trace,
/// e.g. `at foo (a.js:1:1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackTraceLine {
    pub text: String,
}

impl From<&str> for StackTraceLine {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

/// The thrown value as the runtime reports it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeException {
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl RuntimeException {
    /// Single line summary: the first line of the description, or the class name.
    pub fn summary(&self) -> Option<&str> {
        self.description
            .as_deref()
            .and_then(|d| d.lines().next())
            .filter(|line| !line.is_empty())
            .or(self.class_name.as_deref())
    }
}
