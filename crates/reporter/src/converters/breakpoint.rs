use std::sync::Arc;

use dap_types::Breakpoint;

use super::{BreakpointStatusConverter, ClientLocationConverter, LocationConverter};
use crate::error::{ReportError, Result};
use crate::handles::HandleRegistry;
use crate::model::{BreakpointRecipeId, BreakpointRecipeStatus};

/// Default [`BreakpointStatusConverter`].
///
/// Each recipe gets one client breakpoint id for the whole session, so a
/// `changed` event always updates the breakpoint the client already shows.
#[derive(Debug, Clone)]
pub struct ClientBreakpointConverter<L = ClientLocationConverter> {
    locations: L,
    ids: Arc<HandleRegistry<BreakpointRecipeId>>,
}

impl<L> ClientBreakpointConverter<L> {
    pub fn new(locations: L, ids: Arc<HandleRegistry<BreakpointRecipeId>>) -> Self {
        Self { locations, ids }
    }
}

impl<L> BreakpointStatusConverter for ClientBreakpointConverter<L>
where
    L: LocationConverter + Sync,
{
    async fn to_client(&self, status: &BreakpointRecipeStatus) -> Result<Breakpoint> {
        let id = self
            .ids
            .register(&status.recipe)
            .ok_or(ReportError::HandlesExhausted { kind: "breakpoint" })?;
        let mut breakpoint = Breakpoint {
            id: Some(id.get()),
            verified: status.verified,
            message: status.message.clone(),
            ..Default::default()
        };

        if let Some(location) = &status.resolved_location {
            self.locations.apply(location, &mut breakpoint)?;
        }

        Ok(breakpoint)
    }
}
