//! Shared types for the client crate.
//!
//! This module defines:
//! - channel aliases between the client and the transport owner
//! - channel aliases between the client and the event consumer

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::event::ClientEvent;

/// Encoded payloads on their way to the socket owner.
pub type FrameTx = mpsc::UnboundedSender<Bytes>;
pub type FrameRx = mpsc::UnboundedReceiver<Bytes>;

/// Decoded server events on their way to the application.
pub type EventTx = mpsc::UnboundedSender<ClientEvent>;
pub type EventRx = mpsc::UnboundedReceiver<ClientEvent>;
