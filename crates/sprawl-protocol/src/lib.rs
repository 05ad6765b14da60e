//! Flooding message protocol and wire codec for Sprawl layout.
//!
//! A [`LayoutMessage`] says "vertex X was at position P with degree D,
//! and may travel N more hops". Vertices flood these outward; every hop
//! produces a successor via [`LayoutMessage::propagate`] until the hop
//! budget is spent or the message is marked terminal.
//!
//! # Format
//!
//! All integers and floats are big-endian, matching the byte order of
//! existing implementations of the same protocol.
//!
//! ```text
//! payload (20 bytes): [origin i64] [x f32] [y f32] [degree i32]
//! frame   (25 bytes): [ttl i32] [flags u8] [payload]
//! ```
//!
//! The payload is the interoperable part. A bare payload decodes as a
//! zero-hop message; the frame adds the propagation metadata used when
//! a message crosses a worker boundary mid-flood.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod message;

pub use codec::{
    decode_frame, decode_frames, decode_payload, encode_frame, encode_payload, read_frame,
    write_frame, FRAME_LEN, PAYLOAD_LEN,
};
pub use message::LayoutMessage;
