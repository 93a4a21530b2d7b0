//! Error types for the client crate.

use sfs_core::ValidationError;
use sfs_protocol::ProtocolError;
use thiserror::Error;

/// The transport could not take a frame.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport closed")]
    Closed,
}

/// Why `Client::send` or `Client::handle_inbound` failed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request did not pass validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("event channel closed")]
    EventChannelClosed,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value for {key}: {reason}")]
    InvalidEnv { key: &'static str, reason: String },
}
