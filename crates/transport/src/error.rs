use std::io;

/// Framing failures on the client connection.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A header line that is not UTF-8 or whose `Content-Length` is not a number.
    #[error("invalid header line {line:?}")]
    InvalidHeader { line: String },

    #[error("missing Content-Length header")]
    MissingContentLength,

    /// No header terminator within the first `max` bytes.
    #[error("header section longer than {max} bytes")]
    HeaderTooLarge { max: usize },

    /// The message body exceeds the configured maximum size, in either direction.
    #[error("message size {size} exceeds maximum allowed {max}")]
    MessageTooLarge { size: usize, max: usize },

    #[error("could not decode message body: {0}")]
    JsonDeserialize(#[source] serde_json::Error),

    #[error("could not encode message: {0}")]
    JsonSerialize(#[source] serde_json::Error),
}
