//! Async DAP transport for the adapter side of a client connection.
//!
//! - [`DapCodec`] frames [`Message`]s with the `Content-Length` header protocol
//! - [`DapReader`] and [`DapWriter`] wrap byte streams as a `Stream` / `Sink`
//! - [`spawn_writer`] moves writing onto a background task and hands out
//!   [`EventSender`]s that queue events without waiting on the socket
//!
//! Nothing here knows what an event means; building event bodies is the
//! reporter's job.

mod codec;
mod connection;
mod error;
mod message;
mod outgoing;
mod reader;
mod writer;

pub mod testing;

pub use codec::DapCodec;
pub use connection::{DapTransport, TcpConnection, accept, connect, split};
pub use error::CodecError;
pub use message::{Event, Message, Request, Response, Seq};
pub use outgoing::{EventSender, WriterHandle, spawn_writer};
pub use reader::DapReader;
pub use writer::DapWriter;
