//! Events delivered to the application after decoding server messages.

use sfs_core::find_users::KEY_FILTERED_USERS;
use sfs_core::{InboundMessage, RequestType, SfsArray};

/// A decoded server message.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Answer to a `FindUsers` request.
    ///
    /// Each entry is the server's user descriptor, left undecoded. The
    /// answer carries no request id: it pairs with requests by order.
    UsersFound { users: SfsArray },

    /// Anything this crate has no typed event for.
    Unhandled(InboundMessage),
}

impl ClientEvent {
    pub fn from_message(msg: InboundMessage) -> Self {
        match msg.request_type() {
            Some(RequestType::FindUsers) => match msg.params.get_array(KEY_FILTERED_USERS) {
                Some(users) => ClientEvent::UsersFound {
                    users: users.clone(),
                },
                None => ClientEvent::Unhandled(msg),
            },
            None => ClientEvent::Unhandled(msg),
        }
    }
}
