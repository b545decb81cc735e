//! Events sent by the adapter to the client
use serde::{Deserialize, Serialize};

use crate::types::{Breakpoint, BreakpointId, OutputCategory, Source, ThreadId, VariablesReference};

/// The events this adapter reports to the client.
///
/// Serializes to the `event`/`body` pair of a DAP event message; the
/// envelope (`seq`, `type`) is added by the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "body", rename_all = "camelCase")]
pub enum ProtocolEvent {
    Output(OutputEventBody),
    LoadedSource(LoadedSourceEventBody),
    Breakpoint(BreakpointEventBody),
    Stopped(StoppedEventBody),
}

impl ProtocolEvent {
    /// The wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            ProtocolEvent::Output(_) => "output",
            ProtocolEvent::LoadedSource(_) => "loadedSource",
            ProtocolEvent::Breakpoint(_) => "breakpoint",
            ProtocolEvent::Stopped(_) => "stopped",
        }
    }

    /// Split the event into its wire name and JSON body.
    pub fn into_parts(self) -> serde_json::Result<(&'static str, serde_json::Value)> {
        let name = self.name();
        let body = match self {
            ProtocolEvent::Output(body) => serde_json::to_value(body)?,
            ProtocolEvent::LoadedSource(body) => serde_json::to_value(body)?,
            ProtocolEvent::Breakpoint(body) => serde_json::to_value(body)?,
            ProtocolEvent::Stopped(body) => serde_json::to_value(body)?,
        };
        Ok((name, body))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputEventBody {
    pub category: OutputCategory,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables_reference: Option<VariablesReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<i64>,
}

impl OutputEventBody {
    pub fn new(output: impl Into<String>, category: OutputCategory) -> Self {
        Self {
            category,
            output: output.into(),
            variables_reference: None,
            source: None,
            line: None,
            column: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadedSourceReason {
    New,
    Changed,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedSourceEventBody {
    pub reason: LoadedSourceReason,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BreakpointEventReason {
    Changed,
    New,
    Removed,
    Other(String),
}

impl BreakpointEventReason {
    pub fn as_str(&self) -> &str {
        match self {
            BreakpointEventReason::Changed => "changed",
            BreakpointEventReason::New => "new",
            BreakpointEventReason::Removed => "removed",
            BreakpointEventReason::Other(other) => other,
        }
    }
}

impl From<String> for BreakpointEventReason {
    fn from(value: String) -> Self {
        match value.as_str() {
            "changed" => BreakpointEventReason::Changed,
            "new" => BreakpointEventReason::New,
            "removed" => BreakpointEventReason::Removed,
            _ => BreakpointEventReason::Other(value),
        }
    }
}

impl From<BreakpointEventReason> for String {
    fn from(value: BreakpointEventReason) -> Self {
        match value {
            BreakpointEventReason::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointEventBody {
    pub reason: BreakpointEventReason,
    pub breakpoint: Breakpoint,
}

/// Why the debuggee stopped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StoppedReason {
    Step,
    Breakpoint,
    Exception,
    Pause,
    Entry,
    Goto,
    FunctionBreakpoint,
    DataBreakpoint,
    InstructionBreakpoint,
    DebuggerStatement,
    PromiseRejection,
    Other(String),
}

impl StoppedReason {
    pub fn as_str(&self) -> &str {
        match self {
            StoppedReason::Step => "step",
            StoppedReason::Breakpoint => "breakpoint",
            StoppedReason::Exception => "exception",
            StoppedReason::Pause => "pause",
            StoppedReason::Entry => "entry",
            StoppedReason::Goto => "goto",
            StoppedReason::FunctionBreakpoint => "function breakpoint",
            StoppedReason::DataBreakpoint => "data breakpoint",
            StoppedReason::InstructionBreakpoint => "instruction breakpoint",
            StoppedReason::DebuggerStatement => "debugger_statement",
            StoppedReason::PromiseRejection => "promise_rejection",
            StoppedReason::Other(other) => other,
        }
    }
}

impl From<String> for StoppedReason {
    fn from(value: String) -> Self {
        match value.as_str() {
            "step" => StoppedReason::Step,
            "breakpoint" => StoppedReason::Breakpoint,
            "exception" => StoppedReason::Exception,
            "pause" => StoppedReason::Pause,
            "entry" => StoppedReason::Entry,
            "goto" => StoppedReason::Goto,
            "function breakpoint" => StoppedReason::FunctionBreakpoint,
            "data breakpoint" => StoppedReason::DataBreakpoint,
            "instruction breakpoint" => StoppedReason::InstructionBreakpoint,
            "debugger_statement" => StoppedReason::DebuggerStatement,
            "promise_rejection" => StoppedReason::PromiseRejection,
            _ => StoppedReason::Other(value),
        }
    }
}

impl From<&str> for StoppedReason {
    fn from(value: &str) -> Self {
        StoppedReason::from(value.to_string())
    }
}

impl From<StoppedReason> for String {
    fn from(value: StoppedReason) -> Self {
        match value {
            StoppedReason::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoppedEventBody {
    pub reason: StoppedReason,
    pub thread_id: ThreadId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_breakpoint_ids: Option<Vec<BreakpointId>>,
}
