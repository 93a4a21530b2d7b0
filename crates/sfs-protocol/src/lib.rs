//! sfs-protocol
//!
//! Wire-level encoding/decoding for the SmartFoxServer client binding.
//!
//! This crate turns the logical model from `sfs-core` (typed objects,
//! arrays and request envelopes) into bytes and back again.
//!
//! - [`binary_codec`] : binary payload format
//! - [`text_dump`]    : readable dumps for tools / logs

pub mod wire_types;
pub mod binary_codec;
pub mod text_dump;

pub use binary_codec::{
    ProtocolError,
    decode_array,
    decode_message,
    decode_object,
    encode_array,
    encode_object,
    encode_request,
};
