//! Client connections.
use std::io;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};

use crate::reader::DapReader;
use crate::writer::DapWriter;

/// A duplex byte stream to a DAP client.
///
/// Implemented for TCP and the in-memory
/// [`MemoryTransport`](crate::testing::MemoryTransport).
pub trait DapTransport: Send + 'static {
    type Read: AsyncRead + Unpin + Send + 'static;
    type Write: AsyncWrite + Unpin + Send + 'static;

    fn into_split(self) -> (Self::Read, Self::Write);
}

impl DapTransport for TcpStream {
    type Read = OwnedReadHalf;
    type Write = OwnedWriteHalf;

    fn into_split(self) -> (Self::Read, Self::Write) {
        TcpStream::into_split(self)
    }
}

pub type TcpConnection = (DapReader<OwnedReadHalf>, DapWriter<OwnedWriteHalf>);

pub fn split<T: DapTransport>(transport: T) -> (DapReader<T::Read>, DapWriter<T::Write>) {
    let (read, write) = transport.into_split();
    (DapReader::new(read), DapWriter::new(write))
}

/// Connect to a client that is listening for its adapter.
pub async fn connect(addr: impl ToSocketAddrs) -> io::Result<TcpConnection> {
    let stream = TcpStream::connect(addr).await?;
    tracing::debug!(peer = ?stream.peer_addr().ok(), "connected to client");
    Ok(split(stream))
}

/// Wait for the next client to connect to `listener`.
pub async fn accept(listener: &TcpListener) -> io::Result<TcpConnection> {
    let (stream, peer) = listener.accept().await?;
    tracing::debug!(%peer, "client connected");
    Ok(split(stream))
}
