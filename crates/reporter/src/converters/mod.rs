//! Projections of debugger entities onto client protocol shapes.
//!
//! Each converter is a trait so the reporter can be driven with canned
//! conversions in tests. The default implementations share one
//! [`SourceShaper`], which is what keeps the `sourceReference` of a source
//! identical whether the source arrives in a `loadedSource` event, on an
//! `output` line or on a breakpoint.

mod breakpoint;
mod location;
mod source;

pub use breakpoint::ClientBreakpointConverter;
pub use location::ClientLocationConverter;
pub use source::{ClientSourceConverter, FsSourceInspector, SourceInspector, SourceShaper};

use std::future::Future;

use dap_types::{Breakpoint, OutputEventBody, Source};

use crate::error::Result;
use crate::model::{BreakpointRecipeStatus, LoadedSource, Location};

/// A protocol body that can carry a source position.
pub trait ClientLocation {
    fn set_source(&mut self, source: Source);
    fn set_position(&mut self, line: i64, column: i64);
}

impl ClientLocation for OutputEventBody {
    fn set_source(&mut self, source: Source) {
        self.source = Some(source);
    }

    fn set_position(&mut self, line: i64, column: i64) {
        self.line = Some(line);
        self.column = Some(column);
    }
}

impl ClientLocation for Breakpoint {
    fn set_source(&mut self, source: Source) {
        self.source = Some(source);
    }

    fn set_position(&mut self, line: i64, column: i64) {
        self.line = Some(line);
        self.column = Some(column);
    }
}

/// Attaches a resolved location to a protocol body, in place.
///
/// Never suspends: it is used on the synchronous output path.
pub trait LocationConverter {
    fn apply<T: ClientLocation>(&self, location: &Location, target: &mut T) -> Result<()>;
}

pub trait SourceConverter {
    fn to_client(&self, source: &LoadedSource) -> impl Future<Output = Result<Source>> + Send;
}

pub trait BreakpointStatusConverter {
    fn to_client(
        &self,
        status: &BreakpointRecipeStatus,
    ) -> impl Future<Output = Result<Breakpoint>> + Send;
}
