//! Helpers for tests that drive an adapter over an in-memory connection.

mod memory;

pub use memory::MemoryTransport;

use futures::StreamExt;
use serde::Serialize;
use tokio::io::AsyncRead;

use crate::error::CodecError;
use crate::message::{Event, Message};
use crate::reader::DapReader;

/// Frame a JSON-serializable message the way it appears on the wire.
pub fn frame_message(msg: &impl Serialize) -> Vec<u8> {
    let json = serde_json::to_string(msg).expect("failed to serialize message");
    format!("Content-Length: {}\r\n\r\n{}", json.len(), json).into_bytes()
}

/// Read every event until the other side closes the connection.
///
/// Non-event messages are skipped.
pub async fn collect_events<R>(reader: &mut DapReader<R>) -> Result<Vec<Event>, CodecError>
where
    R: AsyncRead + Unpin,
{
    let mut events = Vec::new();
    while let Some(msg) = reader.next().await {
        if let Message::Event(event) = msg? {
            events.push(event);
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn test_frame_message() {
        let bytes = frame_message(&json!({"seq": 1, "type": "event", "event": "test"}));
        let s = String::from_utf8(bytes).unwrap();

        assert!(s.starts_with("Content-Length: "));
        assert!(s.contains("\r\n\r\n"));
        assert!(s.contains(r#""event":"test""#));
    }

    #[tokio::test]
    async fn collect_events_skips_other_messages() {
        let mut bytes = frame_message(&json!({"seq": 1, "type": "request", "command": "threads"}));
        bytes.extend(frame_message(&json!({"seq": 2, "type": "event", "event": "stopped"})));

        let mut reader = DapReader::new(Cursor::new(bytes));
        let events = collect_events(&mut reader).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "stopped");
    }
}
