//! Fakes for driving [`EventsToClientReporter`](crate::EventsToClientReporter)
//! without a client or a real debuggee.
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use dap_types::{Breakpoint, OutputEventBody, ProtocolEvent, Source};

use crate::converters::{
    BreakpointStatusConverter, ClientLocation, LocationConverter, SourceConverter,
};
use crate::error::{ReportError, Result};
use crate::model::{BreakpointRecipeStatus, LoadedSource, Location, SourceIdentity};
use crate::session::Session;

/// Keeps every event it is sent, in order. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSession {
    events: Arc<Mutex<Vec<ProtocolEvent>>>,
}

impl RecordingSession {
    pub fn events(&self) -> Vec<ProtocolEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn output_bodies(&self) -> Vec<OutputEventBody> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProtocolEvent::Output(body) => Some(body),
                _ => None,
            })
            .collect()
    }
}

impl Session for RecordingSession {
    fn send_event(&self, event: ProtocolEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Puts every location at the same place in a source called `fixed.js`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocationConverter;

impl FixedLocationConverter {
    pub const LINE: i64 = 10;
    pub const COLUMN: i64 = 4;
}

impl LocationConverter for FixedLocationConverter {
    fn apply<T: ClientLocation>(&self, _location: &Location, target: &mut T) -> Result<()> {
        target.set_source(Source {
            name: Some("fixed.js".to_string()),
            path: Some("/fixed.js".to_string()),
            ..Default::default()
        });
        target.set_position(Self::LINE, Self::COLUMN);
        Ok(())
    }
}

/// Rejects every location.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingLocationConverter;

impl LocationConverter for FailingLocationConverter {
    fn apply<T: ClientLocation>(&self, location: &Location, _target: &mut T) -> Result<()> {
        Err(ReportError::InvalidPosition {
            line: location.line,
            column: location.column,
        })
    }
}

/// Hands out `sourceReference`s 1, 2, 3... in order of first sight, one per
/// identity, without touching the disk.
#[derive(Debug, Default)]
pub struct CannedSourceConverter {
    issued: Mutex<HashMap<SourceIdentity, i64>>,
}

impl SourceConverter for CannedSourceConverter {
    async fn to_client(&self, source: &LoadedSource) -> Result<Source> {
        let reference = {
            let mut issued = self.issued.lock().unwrap_or_else(PoisonError::into_inner);
            let next = issued.len() as i64 + 1;
            *issued.entry(source.identity.clone()).or_insert(next)
        };

        Ok(Source {
            name: source.display_name(),
            source_reference: Some(reference),
            ..Default::default()
        })
    }
}

/// Uses the recipe id as the client id and ignores locations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedBreakpointConverter;

impl BreakpointStatusConverter for CannedBreakpointConverter {
    async fn to_client(&self, status: &BreakpointRecipeStatus) -> Result<Breakpoint> {
        Ok(Breakpoint {
            id: Some(status.recipe.0 as i64),
            verified: status.verified,
            message: status.message.clone(),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn canned_sources_are_stable_per_identity() {
        let converter = CannedSourceConverter::default();
        let a = LoadedSource::script("1", None);
        let b = LoadedSource::from_path("/b.js");

        let first = converter.to_client(&a).await.unwrap();
        let second = converter.to_client(&b).await.unwrap();
        let again = converter.to_client(&a).await.unwrap();

        assert_eq!(first.source_reference, Some(1));
        assert_eq!(second.source_reference, Some(2));
        assert_eq!(again.source_reference, Some(1));
    }

    #[test]
    fn recording_session_clones_share_log() {
        let session = RecordingSession::default();
        let clone = session.clone();

        clone.send_event(ProtocolEvent::Output(OutputEventBody::new(
            "x",
            dap_types::OutputCategory::Console,
        )));

        assert_eq!(session.events().len(), 1);
    }
}
