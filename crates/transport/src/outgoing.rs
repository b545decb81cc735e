//! Outgoing event queue.
//!
//! Events are produced synchronously by the adapter and written by a
//! background task, so that producing an event never waits on the client
//! socket. Sequence numbers are assigned at enqueue time, which means the
//! order of `seq` on the wire is the order in which events were produced.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::message::{Event, Message, Seq};
use crate::writer::DapWriter;

/// Cloneable handle for queueing events to the client.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<Message>,
    sequence_number: Arc<AtomicI64>,
}

impl EventSender {
    /// Queue an event. Never blocks.
    ///
    /// Returns the sequence number given to the event. If the writer task has
    /// already stopped the event is dropped and logged.
    pub fn send_event(&self, event: impl Into<String>, body: Option<serde_json::Value>) -> Seq {
        let seq = self.sequence_number.fetch_add(1, Ordering::SeqCst);
        let event = event.into();

        tracing::trace!(seq, %event, "queueing event");
        if self
            .tx
            .send(Message::Event(Event {
                seq,
                event: event.clone(),
                body,
            }))
            .is_err()
        {
            tracing::warn!(seq, %event, "writer task has stopped, dropping event");
        }
        seq
    }

    /// Whether the writer task is still accepting messages
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Owner of the background writer task.
pub struct WriterHandle {
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

impl WriterHandle {
    /// Wait for the writer to drain the queue and close the connection.
    ///
    /// The queue only drains once every [`EventSender`] clone is dropped.
    pub async fn finish(self) {
        if let Err(e) = self.handle.await {
            tracing::error!(error = %e, "writer task panicked");
        }
    }

    /// Stop writing immediately, discarding anything still queued.
    pub async fn shutdown(self) {
        self.cancel_token.cancel();
        self.finish().await;
    }
}

/// Spawn a task that writes queued events with `writer`.
///
/// Must be called from within a tokio runtime.
pub fn spawn_writer<W>(writer: DapWriter<W>) -> (EventSender, WriterHandle)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let cancel_token = CancellationToken::new();
    let handle = tokio::spawn(write_loop(writer, rx, cancel_token.clone()));

    (
        EventSender {
            tx,
            sequence_number: Arc::new(AtomicI64::new(1)),
        },
        WriterHandle {
            cancel_token,
            handle,
        },
    )
}

async fn write_loop<W>(
    mut writer: DapWriter<W>,
    mut rx: mpsc::UnboundedReceiver<Message>,
    cancel_token: CancellationToken,
) where
    W: AsyncWrite + Unpin,
{
    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                tracing::debug!("writer task cancelled");
                break;
            }
            msg = rx.recv() => {
                let Some(msg) = msg else {
                    tracing::debug!("all event senders dropped, closing writer");
                    break;
                };
                let seq = msg.seq();
                match writer.send(msg).await {
                    Ok(()) => {}
                    Err(crate::CodecError::MessageTooLarge { size, max }) => {
                        // only this message is lost, the stream is still framed correctly
                        tracing::error!(seq, size, max, "dropping oversized message");
                    }
                    Err(e) => {
                        tracing::error!(seq, error = %e, "failed to write message, stopping writer");
                        rx.close();
                        break;
                    }
                }
            }
        }
    }

    if let Err(e) = writer.close().await {
        tracing::debug!(error = %e, "error closing writer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryTransport;
    use crate::connection::{DapTransport, split};
    use futures::StreamExt;
    use serde_json::json;

    #[tokio::test]
    async fn events_arrive_in_sequence_order() {
        let (adapter, client) = MemoryTransport::pair();
        let (_adapter_reader, adapter_writer) = split(adapter);
        let (mut client_reader, _client_writer) = split(client);

        let (sender, writer) = spawn_writer(adapter_writer);
        let first = sender.send_event("output", Some(json!({"category": "stdout", "output": "a"})));
        let second = sender.send_event("stopped", Some(json!({"reason": "pause", "threadId": 1})));
        assert_eq!((first, second), (1, 2));

        drop(sender);
        writer.finish().await;

        let mut received = Vec::new();
        while let Some(msg) = client_reader.next().await {
            received.push(msg.unwrap());
        }

        assert_eq!(received.len(), 2);
        assert!(matches!(&received[0], Message::Event(e) if e.seq == 1 && e.event == "output"));
        assert!(matches!(&received[1], Message::Event(e) if e.seq == 2 && e.event == "stopped"));
    }

    #[tokio::test]
    async fn clones_share_sequence_numbers() {
        let (adapter, _client) = MemoryTransport::pair();
        let (_reader, adapter_writer) = split(adapter);

        let (sender, writer) = spawn_writer(adapter_writer);
        let other = sender.clone();

        assert_eq!(sender.send_event("output", None), 1);
        assert_eq!(other.send_event("output", None), 2);
        assert_eq!(sender.send_event("output", None), 3);

        writer.shutdown().await;
    }

    #[tokio::test]
    async fn send_after_shutdown_is_dropped() {
        let (adapter, _client) = MemoryTransport::pair();
        let (_reader, adapter_writer) = split(adapter);

        let (sender, writer) = spawn_writer(adapter_writer);
        writer.shutdown().await;

        assert!(!sender.is_open());
        // does not panic or block
        sender.send_event("output", None);
    }

    #[tokio::test]
    async fn oversized_event_does_not_stop_writer() {
        let (adapter, client) = MemoryTransport::pair();
        let (_adapter_read, adapter_write) = adapter.into_split();
        let writer = DapWriter::with_codec(adapter_write, crate::DapCodec::with_max_size(128));
        let (mut client_reader, _client_writer) = split(client);

        let (sender, handle) = spawn_writer(writer);
        sender.send_event("output", Some(json!({"output": "x".repeat(512)})));
        sender.send_event("output", Some(json!({"output": "small"})));
        drop(sender);
        handle.finish().await;

        let msg = client_reader.next().await.unwrap().unwrap();
        assert_eq!(msg.seq(), 2);
        assert!(client_reader.next().await.is_none());
    }
}
