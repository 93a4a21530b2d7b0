//! Where encoded requests go.
//!
//! The client only produces payloads; packet headers, compression and the
//! socket itself belong to whoever implements [`Transport`].

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::error::TransportError;
use crate::types::{FrameRx, FrameTx};

/// Sink for encoded payloads.
pub trait Transport: Send + Sync {
    /// Hand over one payload. Must not block.
    fn transmit(&self, frame: Bytes) -> Result<(), TransportError>;
}

/// Forwards payloads over an unbounded channel to the task that owns the
/// connection.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: FrameTx,
}

impl ChannelTransport {
    pub fn new(tx: FrameTx) -> Self {
        ChannelTransport { tx }
    }

    /// Transport plus the receiving end for the connection task.
    pub fn pair() -> (Self, FrameRx) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelTransport::new(tx), rx)
    }
}

impl Transport for ChannelTransport {
    fn transmit(&self, frame: Bytes) -> Result<(), TransportError> {
        self.tx.send(frame).map_err(|_| TransportError::Closed)
    }
}
