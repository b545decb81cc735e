//! In-memory transport for testing.

use tokio::io::{DuplexStream, duplex};

use crate::connection::DapTransport;

/// One end of an in-memory bidirectional connection.
///
/// Bytes written on one end of a [`MemoryTransport::pair`] are read from
/// the other end.
pub struct MemoryTransport {
    read: DuplexStream,
    write: DuplexStream,
}

impl MemoryTransport {
    /// A connected pair with a 64KB buffer in each direction.
    pub fn pair() -> (Self, Self) {
        Self::pair_with_buffer_size(64 * 1024)
    }

    /// Smaller buffers are useful for exercising backpressure on the writer task.
    pub fn pair_with_buffer_size(buffer_size: usize) -> (Self, Self) {
        let (a_to_b_write, a_to_b_read) = duplex(buffer_size);
        let (b_to_a_write, b_to_a_read) = duplex(buffer_size);

        (
            MemoryTransport {
                read: b_to_a_read,
                write: a_to_b_write,
            },
            MemoryTransport {
                read: a_to_b_read,
                write: b_to_a_write,
            },
        )
    }
}

impl DapTransport for MemoryTransport {
    type Read = DuplexStream;
    type Write = DuplexStream;

    fn into_split(self) -> (Self::Read, Self::Write) {
        (self.read, self.write)
    }
}
