//! Framed DAP message writer.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Sink;
use pin_project_lite::pin_project;
use tokio::io::AsyncWrite;
use tokio_util::codec::FramedWrite;

use crate::codec::DapCodec;
use crate::error::CodecError;
use crate::message::Message;

pin_project! {
    /// A [`Sink`] that frames DAP messages onto an [`AsyncWrite`] destination.
    pub struct DapWriter<W> {
        #[pin]
        inner: FramedWrite<W, DapCodec>,
    }
}

impl<W> DapWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(writer: W) -> Self {
        Self::with_codec(writer, DapCodec::new())
    }

    pub fn with_codec(writer: W, codec: DapCodec) -> Self {
        Self {
            inner: FramedWrite::new(writer, codec),
        }
    }

    /// Write one message and flush it.
    pub async fn send(&mut self, msg: Message) -> Result<(), CodecError> {
        use futures::SinkExt;
        SinkExt::send(&mut self.inner, msg).await
    }

    /// Flush and shut down the underlying writer.
    pub async fn close(&mut self) -> Result<(), CodecError> {
        use futures::SinkExt;
        SinkExt::close(&mut self.inner).await
    }

    /// Consume the writer and return the underlying destination.
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

impl<W> Sink<Message> for DapWriter<W>
where
    W: AsyncWrite + Unpin,
{
    type Error = CodecError;

    fn poll_ready(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.project().inner.poll_ready(cx)
    }

    fn start_send(self: Pin<&mut Self>, item: Message) -> Result<(), Self::Error> {
        self.project().inner.start_send(item)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.project().inner.poll_flush(cx)
    }

    fn poll_close(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.project().inner.poll_close(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Event;
    use std::io::Cursor;

    #[tokio::test]
    async fn write_events_in_order() {
        let mut writer = DapWriter::new(Cursor::new(Vec::new()));

        for (seq, name) in [(1, "loadedSource"), (2, "breakpoint"), (3, "stopped")] {
            writer
                .send(Message::Event(Event {
                    seq,
                    event: name.to_string(),
                    body: None,
                }))
                .await
                .unwrap();
        }

        let output = String::from_utf8(writer.into_inner().into_inner()).unwrap();

        let loaded = output.find(r#""event":"loadedSource""#).unwrap();
        let breakpoint = output.find(r#""event":"breakpoint""#).unwrap();
        let stopped = output.find(r#""event":"stopped""#).unwrap();
        assert!(loaded < breakpoint && breakpoint < stopped);
        assert!(output.starts_with("Content-Length: "));
    }
}
