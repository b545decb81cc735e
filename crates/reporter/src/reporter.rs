//! The events-to-client reporter.
//!
//! One method per domain event. Each builds exactly one protocol event and
//! hands it to the [`Session`]; if any conversion fails, the error is
//! returned and nothing is sent.
use std::sync::Arc;

use dap_types::{
    BreakpointEventBody, LoadedSourceEventBody, OutputCategory, OutputEventBody, ProtocolEvent,
    StoppedEventBody, StoppedReason, ThreadId,
};

use crate::config::ReporterConfig;
use crate::converters::{
    BreakpointStatusConverter, ClientBreakpointConverter, ClientLocationConverter,
    ClientSourceConverter, LocationConverter, SourceConverter, SourceShaper,
};
use crate::error::{ReportError, Result};
use crate::formatter::{PlainStackTraceFormatter, StackTraceFormatter};
use crate::handles::{Handle, HandleRegistry};
use crate::model::{BreakpointRecipeId, LoadedSource, SourceIdentity};
use crate::requests::{
    BreakpointStatusRequest, DebuggeeStoppedRequest, DomainEvent, ExceptionThrownRequest,
    OutputRequest, SourceLoadedRequest,
};
use crate::session::Session;

/// The debuggee is modelled as a single logical thread.
pub const THREAD_ID: ThreadId = 1;

/// Handle registries that live as long as the debugging session.
#[derive(Debug, Clone)]
pub struct SessionHandles {
    pub sources: Arc<HandleRegistry<SourceIdentity>>,
    pub breakpoints: Arc<HandleRegistry<BreakpointRecipeId>>,
}

impl SessionHandles {
    pub fn new(config: &ReporterConfig) -> Self {
        Self {
            sources: Arc::new(HandleRegistry::with_base(config.source_handle_base)),
            breakpoints: Arc::new(HandleRegistry::with_base(config.breakpoint_id_base)),
        }
    }

    pub fn clear(&self) {
        self.sources.clear();
        self.breakpoints.clear();
    }
}

impl Default for SessionHandles {
    fn default() -> Self {
        Self::new(&ReporterConfig::default())
    }
}

/// Everything the reporter needs, handed over once at session start.
pub struct Collaborators<
    S,
    L = ClientLocationConverter,
    C = ClientSourceConverter,
    B = ClientBreakpointConverter,
    F = PlainStackTraceFormatter,
> {
    pub session: S,
    pub locations: L,
    pub sources: C,
    pub breakpoints: B,
    pub formatter: F,
}

impl<S> Collaborators<S> {
    /// The default converters, all sharing `handles`.
    pub fn with_defaults(session: S, handles: &SessionHandles, config: &ReporterConfig) -> Self {
        let shaper = SourceShaper::new(handles.sources.clone(), config.client);
        let locations = ClientLocationConverter::new(shaper.clone());

        Self {
            session,
            breakpoints: ClientBreakpointConverter::new(
                locations.clone(),
                handles.breakpoints.clone(),
            ),
            locations,
            sources: ClientSourceConverter::new(shaper),
            formatter: PlainStackTraceFormatter,
        }
    }
}

pub struct EventsToClientReporter<
    S,
    L = ClientLocationConverter,
    C = ClientSourceConverter,
    B = ClientBreakpointConverter,
    F = PlainStackTraceFormatter,
> {
    collaborators: Collaborators<S, L, C, B, F>,
    handles: SessionHandles,
}

impl<S: Session> EventsToClientReporter<S> {
    /// A reporter with the default converters for a new session.
    pub fn for_session(session: S, config: &ReporterConfig) -> Self {
        let handles = SessionHandles::new(config);
        let collaborators = Collaborators::with_defaults(session, &handles, config);
        Self::new(collaborators, handles)
    }
}

impl<S, L, C, B, F> EventsToClientReporter<S, L, C, B, F>
where
    S: Session,
    L: LocationConverter,
    C: SourceConverter,
    B: BreakpointStatusConverter,
    F: StackTraceFormatter,
{
    pub fn new(collaborators: Collaborators<S, L, C, B, F>, handles: SessionHandles) -> Self {
        Self {
            collaborators,
            handles,
        }
    }

    pub fn report_output(&self, request: OutputRequest) -> Result<()> {
        if let OutputCategory::Other(category) = &request.category {
            if category.is_empty() {
                return Err(ReportError::MalformedRequest(
                    "output category must not be empty".to_string(),
                ));
            }
        }

        let mut body = OutputEventBody::new(request.text, request.category);
        if let Some(reference) = request.variables_reference.filter(|r| *r != 0) {
            body.variables_reference = Some(reference);
        }
        if let Some(location) = &request.location {
            self.collaborators
                .locations
                .apply(location, &mut body)
                .inspect_err(|e| tracing::warn!(error = %e, "could not attach output location"))?;
        }

        self.dispatch(ProtocolEvent::Output(body));
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(reason = ?request.reason))]
    pub async fn report_source_loaded(&self, request: SourceLoadedRequest) -> Result<()> {
        let source = self
            .collaborators
            .sources
            .to_client(&request.source)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "could not convert loaded source"))?;

        self.dispatch(ProtocolEvent::LoadedSource(LoadedSourceEventBody {
            reason: request.reason,
            source,
        }));
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(reason = request.reason.as_str(), recipe = request.status.recipe.0))]
    pub async fn report_breakpoint_status_changed(
        &self,
        request: BreakpointStatusRequest,
    ) -> Result<()> {
        let breakpoint = self
            .collaborators
            .breakpoints
            .to_client(&request.status)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "could not convert breakpoint status"))?;

        self.dispatch(ProtocolEvent::Breakpoint(BreakpointEventBody {
            reason: request.reason,
            breakpoint,
        }));
        Ok(())
    }

    /// Reported as plain output, with the same location and category
    /// handling as [`Self::report_output`].
    #[tracing::instrument(skip_all, fields(frames = request.stack_trace.len()))]
    pub async fn report_exception_thrown(&self, request: ExceptionThrownRequest) -> Result<()> {
        let text = self.collaborators.formatter.format(&request.stack_trace);

        self.report_output(OutputRequest {
            text,
            category: request.category,
            variables_reference: None,
            location: request.location,
        })
    }

    pub fn report_debuggee_stopped(&self, request: DebuggeeStoppedRequest) -> Result<()> {
        if let StoppedReason::Other(reason) = &request.reason {
            if reason.is_empty() {
                return Err(ReportError::MalformedRequest(
                    "stop reason must not be empty".to_string(),
                ));
            }
        }

        let text = request
            .exception
            .as_ref()
            .and_then(|exception| exception.summary())
            .map(|summary| summary.to_string());

        self.dispatch(ProtocolEvent::Stopped(StoppedEventBody {
            description: Some(stopped_description(&request.reason).to_string()),
            reason: request.reason,
            thread_id: THREAD_ID,
            text,
            hit_breakpoint_ids: None,
        }));
        Ok(())
    }

    /// Report any domain event.
    pub async fn report(&self, event: DomainEvent) -> Result<()> {
        match event {
            DomainEvent::Output(request) => self.report_output(request),
            DomainEvent::SourceLoaded(request) => self.report_source_loaded(request).await,
            DomainEvent::BreakpointStatus(request) => {
                self.report_breakpoint_status_changed(request).await
            }
            DomainEvent::ExceptionThrown(request) => self.report_exception_thrown(request).await,
            DomainEvent::DebuggeeStopped(request) => self.report_debuggee_stopped(request),
        }
    }

    /// Dereference a `sourceReference` the client sent back.
    ///
    /// Only the identity is kept per handle, so the returned source has no
    /// `name` or `origin`; [`LoadedSource::display_name`] still derives a name
    /// from the path, url or script id.
    pub fn resolve_source(&self, handle: Handle) -> Option<LoadedSource> {
        self.handles.sources.resolve(handle).map(|identity| LoadedSource {
            identity,
            name: None,
            origin: None,
        })
    }

    /// Drop every handle issued during the session.
    pub fn end_session(&self) {
        tracing::debug!(
            sources = self.handles.sources.len(),
            breakpoints = self.handles.breakpoints.len(),
            "ending session, clearing handles"
        );
        self.handles.clear();
    }

    pub fn session(&self) -> &S {
        &self.collaborators.session
    }

    pub fn handles(&self) -> &SessionHandles {
        &self.handles
    }

    fn dispatch(&self, event: ProtocolEvent) {
        tracing::debug!(event = event.name(), "sending event to client");
        self.collaborators.session.send_event(event);
    }
}

fn stopped_description(reason: &StoppedReason) -> &'static str {
    match reason {
        StoppedReason::Breakpoint => "Paused on breakpoint",
        StoppedReason::Step => "Paused on step",
        StoppedReason::Exception => "Paused on exception",
        StoppedReason::PromiseRejection => "Paused on promise rejection",
        StoppedReason::Entry => "Paused on entry",
        StoppedReason::DebuggerStatement => "Paused on debugger statement",
        StoppedReason::FunctionBreakpoint => "Paused on function breakpoint",
        StoppedReason::DataBreakpoint => "Paused on data breakpoint",
        StoppedReason::InstructionBreakpoint => "Paused on instruction breakpoint",
        StoppedReason::Goto => "Paused on goto",
        StoppedReason::Pause | StoppedReason::Other(_) => "Paused",
    }
}
