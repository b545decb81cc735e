//! Events queued through an `EventSender` reach a client connected over TCP.

use serde_json::json;
use tokio::net::TcpListener;
use transport::{spawn_writer, testing::collect_events};

#[tokio::test]
async fn queued_events_reach_tcp_client() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let client = tokio::spawn(async move {
        let (mut reader, _writer) = transport::accept(&listener).await?;
        let events = collect_events(&mut reader).await?;
        Ok::<_, Box<dyn std::error::Error + Send + Sync>>(events)
    });

    let (_reader, writer) = transport::connect(addr).await?;
    let (sender, handle) = spawn_writer(writer);
    sender.send_event(
        "output",
        Some(json!({"category": "console", "output": "attached\n"})),
    );
    sender.send_event("stopped", Some(json!({"reason": "entry", "threadId": 1})));
    drop(sender);
    handle.finish().await;

    let events = client.await?.map_err(|e| e.to_string())?;
    let names: Vec<_> = events.iter().map(|e| e.event.as_str()).collect();
    assert_eq!(names, ["output", "stopped"]);
    assert_eq!(events[1].body.as_ref().unwrap()["threadId"], 1);

    Ok(())
}
