//! sfs-client
//!
//! Client side of the SmartFoxServer binding: sends validated requests
//! through a pluggable transport and turns server payloads into events.

pub mod config;
pub mod error;
pub mod types;
pub mod transport;
pub mod event;
pub mod client;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError, TransportError};
pub use event::ClientEvent;
pub use transport::{ChannelTransport, Transport};
