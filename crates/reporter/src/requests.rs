//! The five domain events the engine can ask the reporter to report.
use dap_types::{
    BreakpointEventReason, LoadedSourceReason, OutputCategory, StoppedReason,
    types::VariablesReference,
};
use serde::{Deserialize, Serialize};

use crate::model::{BreakpointRecipeStatus, LoadedSource, Location, RuntimeException, StackTraceLine};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRequest {
    pub text: String,
    pub category: OutputCategory,
    /// Handle of inspectable variables, minted by whoever produced the output.
    /// `0` means none.
    #[serde(default)]
    pub variables_reference: Option<VariablesReference>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl OutputRequest {
    pub fn new(text: impl Into<String>, category: impl Into<OutputCategory>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            variables_reference: None,
            location: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_variables_reference(mut self, variables_reference: VariablesReference) -> Self {
        self.variables_reference = Some(variables_reference);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLoadedRequest {
    pub reason: LoadedSourceReason,
    pub source: LoadedSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakpointStatusRequest {
    pub reason: BreakpointEventReason,
    pub status: BreakpointRecipeStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionThrownRequest {
    #[serde(default)]
    pub stack_trace: Vec<StackTraceLine>,
    pub category: OutputCategory,
    #[serde(default)]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebuggeeStoppedRequest {
    pub reason: StoppedReason,
    #[serde(default)]
    pub exception: Option<RuntimeException>,
}

impl DebuggeeStoppedRequest {
    pub fn new(reason: impl Into<StoppedReason>) -> Self {
        Self {
            reason: reason.into(),
            exception: None,
        }
    }
}

/// Any of the requests, tagged by `kind` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DomainEvent {
    Output(OutputRequest),
    SourceLoaded(SourceLoadedRequest),
    BreakpointStatus(BreakpointStatusRequest),
    ExceptionThrown(ExceptionThrownRequest),
    DebuggeeStopped(DebuggeeStoppedRequest),
}

impl DomainEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            DomainEvent::Output(_) => "output",
            DomainEvent::SourceLoaded(_) => "sourceLoaded",
            DomainEvent::BreakpointStatus(_) => "breakpointStatus",
            DomainEvent::ExceptionThrown(_) => "exceptionThrown",
            DomainEvent::DebuggeeStopped(_) => "debuggeeStopped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BreakpointRecipeId, SourceIdentity};

    #[test]
    fn parse_output_event_line() {
        let event: DomainEvent = serde_json::from_str(
            r#"{"kind": "output", "text": "hi\n", "category": "stdout",
                "location": {"source": {"identity": {"kind": "path", "path": "/a.js"}}, "line": 3}}"#,
        )
        .unwrap();

        let DomainEvent::Output(request) = event else {
            panic!("expected output");
        };
        let location = request.location.unwrap();
        assert_eq!((location.line, location.column), (3, 1));
        assert_eq!(
            location.source.identity,
            SourceIdentity::Path {
                path: "/a.js".into()
            }
        );
    }

    #[test]
    fn parse_breakpoint_status_line() {
        let event: DomainEvent = serde_json::from_str(
            r#"{"kind": "breakpointStatus", "reason": "changed",
                "status": {"recipe": 4, "verified": false, "message": "pending"}}"#,
        )
        .unwrap();

        let DomainEvent::BreakpointStatus(request) = event else {
            panic!("expected breakpoint status");
        };
        assert_eq!(request.reason, BreakpointEventReason::Changed);
        assert_eq!(request.status.recipe, BreakpointRecipeId(4));
        assert_eq!(request.status.resolved_location, None);
    }

    #[test]
    fn parse_exception_line_with_plain_string_frames() {
        let event: DomainEvent = serde_json::from_str(
            r#"{"kind": "exceptionThrown", "category": "stderr",
                "stackTrace": ["Error: boom", "    at foo (a.js:1:1)"]}"#,
        )
        .unwrap();

        assert_eq!(event.kind(), "exceptionThrown");
        let DomainEvent::ExceptionThrown(request) = event else {
            panic!("expected exception");
        };
        assert_eq!(request.stack_trace.len(), 2);
        assert_eq!(request.category, OutputCategory::Stderr);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = serde_json::from_str::<DomainEvent>(r#"{"kind": "threadStarted"}"#);
        assert!(result.is_err());
    }
}
