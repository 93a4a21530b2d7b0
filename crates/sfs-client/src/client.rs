// crates/sfs-client/src/client.rs

//! The send path and the inbound dispatch loop.
//!
//! Outbound: `send` = validate → execute → encode → transmit. A request
//! that fails validation is returned to the caller before anything is
//! handed to the transport, and is never retried.
//!
//! Inbound: payloads read by the connection owner are decoded into
//! [`ClientEvent`]s and pushed to the application's event channel.

use bytes::Bytes;
use sfs_core::Request;
use sfs_protocol::{decode_message, encode_request};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::event::ClientEvent;
use crate::transport::Transport;
use crate::types::{EventRx, EventTx, FrameRx};

pub struct Client<T: Transport> {
    transport: T,
    events: EventTx,
    config: ClientConfig,
}

impl<T: Transport> Client<T> {
    /// Create a client and the receiver its events are delivered to.
    pub fn new(transport: T, config: ClientConfig) -> (Self, EventRx) {
        let (events, event_rx) = mpsc::unbounded_channel();
        let client = Client {
            transport,
            events,
            config,
        };
        (client, event_rx)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate, encode and hand a request to the transport.
    pub fn send<R: Request + ?Sized>(&self, request: &R) -> Result<(), ClientError> {
        let msg = match request.build() {
            Ok(msg) => msg,
            Err(e) => {
                warn!(zone = %self.config.zone, request = ?request.request_type(), "{}", e);
                return Err(e.into());
            }
        };

        let mut payload = Vec::with_capacity(128);
        encode_request(&msg, &mut payload)?;
        let len = payload.len();

        self.transport.transmit(Bytes::from(payload))?;

        debug!(
            zone = %self.config.zone,
            request = ?msg.request_type,
            bytes = len,
            "request sent"
        );
        Ok(())
    }

    /// Decode one payload from the server and publish it as an event.
    pub fn handle_inbound(&self, buf: &[u8]) -> Result<(), ClientError> {
        let msg = decode_message(buf)?;
        debug!(controller = msg.controller, action = msg.action, "message received");

        let event = ClientEvent::from_message(msg);
        self.events
            .send(event)
            .map_err(|_| ClientError::EventChannelClosed)
    }

    /// Dispatch inbound payloads until the connection side closes or the
    /// application drops its event receiver.
    ///
    /// Undecodable payloads are logged and skipped.
    pub async fn run_inbound(&self, mut inbound: FrameRx) {
        while let Some(frame) = inbound.recv().await {
            match self.handle_inbound(&frame) {
                Ok(()) => {}
                Err(ClientError::EventChannelClosed) => {
                    info!("Event receiver dropped, stopping inbound dispatch");
                    return;
                }
                Err(e) => warn!(bytes = frame.len(), "Dropping inbound payload: {}", e),
            }
        }

        info!("Inbound channel closed");
    }
}
