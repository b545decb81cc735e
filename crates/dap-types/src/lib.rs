//! Client-facing Debug Adapter Protocol types
//!
//! Only the parts of the protocol that the adapter reports to the client are
//! modelled here: the event bodies and the source/breakpoint shapes they carry.
pub mod events;
pub mod types;

pub use events::{
    BreakpointEventBody, BreakpointEventReason, LoadedSourceEventBody, LoadedSourceReason,
    OutputEventBody, ProtocolEvent, StoppedEventBody, StoppedReason,
};
pub use types::{Breakpoint, OutputCategory, Source, ThreadId};
