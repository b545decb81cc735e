//! DAP message envelopes.
//!
//! The same three envelopes travel in both directions: the client sends
//! requests, the adapter answers with responses and pushes events. The
//! adapter in this workspace only ever writes events, but it reads the
//! same [`Message`] type back in tests and when acting as a client.

use serde::{Deserialize, Serialize};

/// Sequence number type for message ordering and request-response correlation.
pub type Seq = i64;

/// A DAP protocol message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    /// A request, normally sent by the client.
    Request(Request),
    /// A response to a request.
    Response(Response),
    /// An asynchronous notification from the adapter.
    Event(Event),
}

impl Message {
    /// Sequence number of the message.
    pub fn seq(&self) -> Seq {
        match self {
            Message::Request(r) => r.seq,
            Message::Response(r) => r.seq,
            Message::Event(e) => e.seq,
        }
    }
}

/// An event notification pushed to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub seq: Seq,
    /// The event type, e.g. `output` or `stopped`.
    pub event: String,
    /// Event body (event-specific).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

/// A request message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub seq: Seq,
    /// The command to execute.
    pub command: String,
    /// Command arguments (command-specific).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}

/// A response message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub seq: Seq,
    /// Sequence number of the request this response is for.
    pub request_seq: Seq,
    pub success: bool,
    /// The command that was requested.
    pub command: String,
    /// Error message if success is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response body (command-specific).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}
