//! Delivery of finished protocol events.
use std::sync::Arc;

use dap_types::ProtocolEvent;

/// Sink for protocol events.
///
/// Dispatch is fire-and-forget: a session that cannot deliver an event deals
/// with it (logs, drops) itself.
pub trait Session {
    fn send_event(&self, event: ProtocolEvent);
}

impl<S: Session + ?Sized> Session for &S {
    fn send_event(&self, event: ProtocolEvent) {
        (**self).send_event(event)
    }
}

impl<S: Session + ?Sized> Session for Arc<S> {
    fn send_event(&self, event: ProtocolEvent) {
        (**self).send_event(event)
    }
}

impl Session for transport::EventSender {
    fn send_event(&self, event: ProtocolEvent) {
        match event.into_parts() {
            Ok((name, body)) => {
                transport::EventSender::send_event(self, name, Some(body));
            }
            Err(e) => tracing::error!(error = %e, "failed to encode event body, dropping event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dap_types::{OutputCategory, OutputEventBody};
    use futures::StreamExt;
    use transport::testing::MemoryTransport;
    use transport::{Message, spawn_writer, split};

    #[tokio::test]
    async fn event_sender_writes_protocol_events() {
        let (adapter, client) = MemoryTransport::pair();
        let (_adapter_reader, adapter_writer) = split(adapter);
        let (mut client_reader, _client_writer) = split(client);
        let (sender, writer) = spawn_writer(adapter_writer);

        Session::send_event(
            &sender,
            ProtocolEvent::Output(OutputEventBody::new("ready\n", OutputCategory::Console)),
        );
        drop(sender);
        writer.finish().await;

        let Some(Ok(Message::Event(event))) = client_reader.next().await else {
            panic!("expected an event");
        };
        assert_eq!(event.seq, 1);
        assert_eq!(event.event, "output");
        assert_eq!(
            event.body,
            Some(serde_json::json!({"category": "console", "output": "ready\n"}))
        );
    }
}
