//! Content-Length framing for DAP messages.

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::CodecError;
use crate::message::Message;

const DEFAULT_MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Clients send one or two short header lines.
const MAX_HEADER_SIZE: usize = 4096;

const HEADER_SEPARATOR: &[u8] = b"\r\n\r\n";

/// Codec for encoding and decoding DAP messages.
///
/// ```text
/// Content-Length: <length>\r\n
/// \r\n
/// <JSON body>
/// ```
///
/// The size limit applies to both directions: an oversized outgoing event
/// is rejected before any bytes are written, so a single runaway `output`
/// event cannot wedge the client.
#[derive(Debug, Clone)]
pub struct DapCodec {
    max_message_size: usize,
}

impl DapCodec {
    pub fn new() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }

    /// Messages larger than `max_message_size` are rejected with [`CodecError::MessageTooLarge`].
    pub fn with_max_size(max_message_size: usize) -> Self {
        Self { max_message_size }
    }

    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }
}

impl Default for DapCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for DapCodec {
    type Item = Message;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(header_end) = find_header_end(src) else {
            if src.len() > MAX_HEADER_SIZE {
                return Err(CodecError::HeaderTooLarge {
                    max: MAX_HEADER_SIZE,
                });
            }
            return Ok(None);
        };

        let content_length = parse_content_length(&src[..header_end])?;
        if content_length > self.max_message_size {
            return Err(CodecError::MessageTooLarge {
                size: content_length,
                max: self.max_message_size,
            });
        }

        let body_start = header_end + HEADER_SEPARATOR.len();
        let total_length = body_start + content_length;
        if src.len() < total_length {
            src.reserve(total_length - src.len());
            return Ok(None);
        }

        let message: Message = serde_json::from_slice(&src[body_start..total_length])
            .map_err(CodecError::JsonDeserialize)?;
        src.advance(total_length);

        Ok(Some(message))
    }
}

impl Encoder<Message> for DapCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let json = serde_json::to_vec(&item).map_err(CodecError::JsonSerialize)?;
        if json.len() > self.max_message_size {
            return Err(CodecError::MessageTooLarge {
                size: json.len(),
                max: self.max_message_size,
            });
        }

        let header = format!("Content-Length: {}\r\n\r\n", json.len());
        dst.reserve(header.len() + json.len());
        dst.put_slice(header.as_bytes());
        dst.put_slice(&json);

        Ok(())
    }
}

/// Index of the first `\r` of the header/body separator.
fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_SEPARATOR.len())
        .position(|w| w == HEADER_SEPARATOR)
}

fn parse_content_length(header: &[u8]) -> Result<usize, CodecError> {
    let mut content_length = None;
    for line in header.split(|b| *b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let invalid = || CodecError::InvalidHeader {
            line: String::from_utf8_lossy(line).into_owned(),
        };

        let line = std::str::from_utf8(line).map_err(|_| invalid())?;
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("content-length") {
            content_length = Some(value.trim().parse().map_err(|_| invalid())?);
        }
    }

    content_length.ok_or(CodecError::MissingContentLength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Event;

    fn make_frame(json: &str) -> BytesMut {
        let mut buf = BytesMut::new();
        buf.put_slice(format!("Content-Length: {}\r\n\r\n{}", json.len(), json).as_bytes());
        buf
    }

    fn output_event(seq: i64, text: &str) -> Message {
        Message::Event(Event {
            seq,
            event: "output".to_string(),
            body: Some(serde_json::json!({"category": "stdout", "output": text})),
        })
    }

    #[test]
    fn decode_complete_message() {
        let mut codec = DapCodec::new();
        let mut buf = make_frame(r#"{"seq":1,"type":"event","event":"initialized"}"#);

        let result = codec.decode(&mut buf).unwrap();
        assert!(matches!(result, Some(Message::Event(e)) if e.event == "initialized"));
        assert!(buf.is_empty());
    }

    #[test]
    fn decode_waits_for_full_body() {
        let mut codec = DapCodec::new();
        let mut buf = BytesMut::from("Content-Length: 100\r\n\r\n{\"partial\":");

        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert!(!buf.is_empty());
    }

    #[test]
    fn decode_ignores_other_headers() {
        let mut codec = DapCodec::new();
        let json = r#"{"seq":1,"type":"request","command":"threads"}"#;
        let mut buf = BytesMut::from(
            format!(
                "Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                json.len(),
                json
            )
            .as_str(),
        );

        let msg = codec.decode(&mut buf).unwrap().unwrap();
        assert!(matches!(msg, Message::Request(r) if r.command == "threads"));
    }

    #[test]
    fn decode_missing_content_length() {
        let mut codec = DapCodec::new();
        let mut buf = BytesMut::from("Content-Type: json\r\n\r\n{}");

        let result = codec.decode(&mut buf);
        assert!(matches!(result, Err(CodecError::MissingContentLength)));
    }

    #[test]
    fn decode_rejects_non_numeric_length() {
        let mut codec = DapCodec::new();
        let mut buf = BytesMut::from("Content-Length: ten\r\n\r\n{}");

        let result = codec.decode(&mut buf);
        assert!(
            matches!(result, Err(CodecError::InvalidHeader { line }) if line == "Content-Length: ten")
        );
    }

    #[test]
    fn decode_rejects_unterminated_header() {
        let mut codec = DapCodec::new();
        let mut buf = BytesMut::from("X-Padding: ".repeat(MAX_HEADER_SIZE).as_str());

        let result = codec.decode(&mut buf);
        assert!(matches!(result, Err(CodecError::HeaderTooLarge { .. })));
    }

    #[test]
    fn encode_event_then_decode() {
        let mut codec = DapCodec::new();
        let mut buf = BytesMut::new();
        codec.encode(output_event(1, "a\n"), &mut buf).unwrap();
        codec.encode(output_event(2, "b\n"), &mut buf).unwrap();

        let s = std::str::from_utf8(&buf).unwrap().to_string();
        assert_eq!(s.matches("Content-Length: ").count(), 2);

        let first = codec.decode(&mut buf).unwrap().unwrap();
        let second = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(first.seq(), 1);
        assert_eq!(second.seq(), 2);
        assert!(buf.is_empty());
    }

    #[test]
    fn encode_rejects_oversized_event() {
        let mut codec = DapCodec::with_max_size(32);
        let mut buf = BytesMut::new();

        let result = codec.encode(output_event(1, &"x".repeat(64)), &mut buf);
        assert!(matches!(result, Err(CodecError::MessageTooLarge { max: 32, .. })));
        assert!(buf.is_empty());
    }
}
