//! Reports debugger domain events to the DAP client.
//!
//! The engine tells an [`EventsToClientReporter`] what happened (output was
//! produced, a source was loaded, a breakpoint resolved, an exception was
//! thrown, the debuggee stopped). The reporter converts the debugger-side
//! entities into client shapes and sends exactly one protocol event through
//! the [`Session`] for each, or returns an error and sends nothing.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use reporter::{EventsToClientReporter, OutputRequest, ReporterConfig};
//!
//! let (_reader, writer) = transport::connect("127.0.0.1:4711").await?;
//! let (sender, writer) = transport::spawn_writer(writer);
//!
//! let reporter = EventsToClientReporter::for_session(sender, &ReporterConfig::default());
//! reporter.report_output(OutputRequest::new("hello\n", "stdout"))?;
//!
//! drop(reporter);
//! writer.finish().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod converters;
mod error;
pub mod formatter;
pub mod handles;
pub mod model;
mod reporter;
pub mod requests;
mod session;
pub mod testing;

pub use config::{ClientCapabilities, PathFormat, ReporterConfig};
pub use error::{ConfigError, ReportError, Result};
pub use formatter::{PlainStackTraceFormatter, StackTraceFormatter};
pub use handles::{Handle, HandleRegistry};
pub use model::{
    BreakpointRecipeId, BreakpointRecipeStatus, LoadedSource, Location, RuntimeException,
    SourceIdentity, StackTraceLine,
};
pub use reporter::{Collaborators, EventsToClientReporter, SessionHandles, THREAD_ID};
pub use requests::{
    BreakpointStatusRequest, DebuggeeStoppedRequest, DomainEvent, ExceptionThrownRequest,
    OutputRequest, SourceLoadedRequest,
};
pub use session::Session;
