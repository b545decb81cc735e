//! General types shared by the event bodies in [`crate::events`].
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub type ThreadId = i64;
pub type BreakpointId = i64;
pub type VariablesReference = i64;
pub type SourceReference = i64;

/// A source as the client sees it.
///
/// Either `path` is set and the client reads the file itself, or
/// `source_reference` is a positive handle and the client asks the adapter
/// for the contents.
#[derive(Default, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<SourceReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl Source {
    /// A source the client can open from disk.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|s| s.to_string()),
            path: Some(path.display().to_string()),
            ..Default::default()
        }
    }
}

/// Information about a breakpoint created in `setBreakpoints` and friends.
#[derive(Default, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BreakpointId>,
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<i64>,
}

/// The output category of an `output` event.
///
/// Unknown categories are carried through as [`OutputCategory::Other`] so that
/// engines can use adapter specific categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputCategory {
    Console,
    Important,
    Stdout,
    Stderr,
    Telemetry,
    Other(String),
}

impl OutputCategory {
    pub fn as_str(&self) -> &str {
        match self {
            OutputCategory::Console => "console",
            OutputCategory::Important => "important",
            OutputCategory::Stdout => "stdout",
            OutputCategory::Stderr => "stderr",
            OutputCategory::Telemetry => "telemetry",
            OutputCategory::Other(other) => other,
        }
    }
}

impl From<String> for OutputCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "console" => OutputCategory::Console,
            "important" => OutputCategory::Important,
            "stdout" => OutputCategory::Stdout,
            "stderr" => OutputCategory::Stderr,
            "telemetry" => OutputCategory::Telemetry,
            _ => OutputCategory::Other(value),
        }
    }
}

impl From<&str> for OutputCategory {
    fn from(value: &str) -> Self {
        OutputCategory::from(value.to_string())
    }
}

impl From<OutputCategory> for String {
    fn from(value: OutputCategory) -> Self {
        match value {
            OutputCategory::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for OutputCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_round_trip_through_strings() {
        for name in ["console", "important", "stdout", "stderr", "telemetry"] {
            let category = OutputCategory::from(name);
            assert!(!matches!(category, OutputCategory::Other(_)), "{name}");
            assert_eq!(String::from(category), name);
        }
    }

    #[test]
    fn custom_category_is_preserved() {
        let category: OutputCategory = serde_json::from_str(r#""debugConsole""#).unwrap();
        assert_eq!(category, OutputCategory::Other("debugConsole".to_string()));
        assert_eq!(
            serde_json::to_string(&category).unwrap(),
            r#""debugConsole""#
        );
    }

    #[test]
    fn source_omits_missing_fields() {
        let source = Source::from_path("/tmp/project/app.js");
        let json = serde_json::to_value(&source).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"name": "app.js", "path": "/tmp/project/app.js"})
        );
    }

    #[test]
    fn breakpoint_uses_camel_case() {
        let breakpoint = Breakpoint {
            id: Some(1),
            verified: true,
            end_line: Some(4),
            ..Default::default()
        };
        let json = serde_json::to_value(&breakpoint).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": 1, "verified": true, "endLine": 4})
        );
    }
}
