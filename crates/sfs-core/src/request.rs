//! The request abstraction shared by every outbound call.
//!
//! A request is validated, then executed into a params object, then
//! wrapped into an envelope:
//!
//! ```text
//! { "c": controller (byte), "a": request id (short), "p": params (object) }
//! ```
//!
//! Turning the envelope into bytes is the job of `sfs-protocol`.

use crate::error::ValidationError;
use crate::object::SfsObject;

/// Envelope key for the controller id.
pub const KEY_CONTROLLER: &str = "c";
/// Envelope key for the request (action) id.
pub const KEY_ACTION: &str = "a";
/// Envelope key for the request parameters.
pub const KEY_PARAMS: &str = "p";

/// Server-side controller a request is addressed to.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Controller {
    /// Built-in system requests.
    System = 0,

    /// Server-side extensions.
    Extension = 1,
}

impl Controller {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Controller::System),
            1 => Some(Controller::Extension),
            _ => None,
        }
    }
}

/// Request discriminator sent in the envelope's `a` key.
#[repr(i16)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RequestType {
    FindUsers = 28,
}

impl RequestType {
    pub fn id(self) -> i16 {
        self as i16
    }

    pub fn from_id(v: i16) -> Option<Self> {
        match v {
            28 => Some(RequestType::FindUsers),
            _ => None,
        }
    }
}

/// A validated, executed request ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMessage {
    pub controller: Controller,
    pub request_type: RequestType,
    pub params: SfsObject,
}

impl RequestMessage {
    pub fn system(request_type: RequestType, params: SfsObject) -> Self {
        RequestMessage {
            controller: Controller::System,
            request_type,
            params,
        }
    }

    /// Wrap the params into the `c` / `a` / `p` envelope object.
    pub fn to_sfs_object(&self) -> SfsObject {
        let mut envelope = SfsObject::new();
        envelope.put_byte(KEY_CONTROLLER, self.controller as u8 as i8);
        envelope.put_short(KEY_ACTION, self.request_type.id());
        envelope.put_object(KEY_PARAMS, self.params.clone());
        envelope
    }
}

/// A message received from the server, unpacked from the same envelope.
///
/// `controller` and `action` are kept raw: the server may send ids this
/// crate has no type for.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub controller: u8,
    pub action: i16,
    pub params: SfsObject,
}

impl InboundMessage {
    pub fn request_type(&self) -> Option<RequestType> {
        RequestType::from_id(self.action)
    }
}

/// An outbound request.
pub trait Request {
    fn request_type(&self) -> RequestType;

    /// Check preconditions. Pure: no I/O, no logging.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Emit the request parameters. Only meaningful after `validate`
    /// succeeded.
    fn execute(&self) -> SfsObject;

    /// Validate, then execute and wrap into an envelope.
    fn build(&self) -> Result<RequestMessage, ValidationError> {
        self.validate()?;
        Ok(RequestMessage::system(self.request_type(), self.execute()))
    }
}
