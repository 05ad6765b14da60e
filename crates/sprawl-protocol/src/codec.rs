//! Binary encode/decode for [`LayoutMessage`].
//!
//! Field order and widths are fixed: origin `i64`, x `f32`, y `f32`,
//! degree `i32`, all big-endian. Encoding never fails; decoding rejects
//! anything that is not exactly one well-formed payload or frame.

use std::io::{self, Read, Write};

use sprawl_core::{DecodeError, VertexId};

use crate::message::LayoutMessage;

/// Encoded size of the interoperable payload.
pub const PAYLOAD_LEN: usize = 8 + 4 + 4 + 4;

/// Encoded size of a frame: propagation header plus payload.
pub const FRAME_LEN: usize = 4 + 1 + PAYLOAD_LEN;

const FLAG_ZOMBIE: u8 = 0b0000_0001;
const KNOWN_FLAGS: u8 = FLAG_ZOMBIE;

// ── Encode ──────────────────────────────────────────────────────

/// Append the 20-byte payload of `msg` to `buf`.
///
/// A degree above `i32::MAX` saturates.
pub fn encode_payload(msg: &LayoutMessage, buf: &mut Vec<u8>) {
    let degree = i32::try_from(msg.degree()).unwrap_or(i32::MAX);
    buf.extend_from_slice(&msg.origin().0.to_be_bytes());
    buf.extend_from_slice(&msg.position()[0].to_be_bytes());
    buf.extend_from_slice(&msg.position()[1].to_be_bytes());
    buf.extend_from_slice(&degree.to_be_bytes());
}

/// Append a full 25-byte frame (ttl, flags, payload) to `buf`.
pub fn encode_frame(msg: &LayoutMessage, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&msg.ttl().to_be_bytes());
    buf.push(if msg.is_marked_zombie() { FLAG_ZOMBIE } else { 0 });
    encode_payload(msg, buf);
}

/// Write one frame to a stream.
pub fn write_frame(w: &mut dyn Write, msg: &LayoutMessage) -> io::Result<()> {
    let mut buf = Vec::with_capacity(FRAME_LEN);
    encode_frame(msg, &mut buf);
    w.write_all(&buf)
}

// ── Decode ──────────────────────────────────────────────────────

fn be_i32(bytes: &[u8]) -> i32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&bytes[..4]);
    i32::from_be_bytes(b)
}

fn be_f32(bytes: &[u8]) -> f32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&bytes[..4]);
    f32::from_be_bytes(b)
}

fn be_i64(bytes: &[u8]) -> i64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&bytes[..8]);
    i64::from_be_bytes(b)
}

fn check_len(bytes: &[u8], expected: usize) -> Result<(), DecodeError> {
    if bytes.len() < expected {
        return Err(DecodeError::Truncated {
            expected,
            found: bytes.len(),
        });
    }
    if bytes.len() > expected {
        return Err(DecodeError::TrailingBytes {
            count: bytes.len() - expected,
        });
    }
    Ok(())
}

fn decode_body(bytes: &[u8], ttl: i32, zombie: bool) -> Result<LayoutMessage, DecodeError> {
    let origin = VertexId(be_i64(&bytes[0..8]));
    let x = be_f32(&bytes[8..12]);
    let y = be_f32(&bytes[12..16]);
    let raw_degree = be_i32(&bytes[16..20]);
    let degree =
        u32::try_from(raw_degree).map_err(|_| DecodeError::NegativeDegree { degree: raw_degree })?;
    Ok(LayoutMessage::from_parts(origin, [x, y], degree, ttl, zombie))
}

/// Decode exactly one payload.
///
/// The result is a zero-hop message: `ttl == 0`, not marked zombie.
pub fn decode_payload(bytes: &[u8]) -> Result<LayoutMessage, DecodeError> {
    check_len(bytes, PAYLOAD_LEN)?;
    decode_body(bytes, 0, false)
}

/// Decode exactly one frame.
pub fn decode_frame(bytes: &[u8]) -> Result<LayoutMessage, DecodeError> {
    check_len(bytes, FRAME_LEN)?;
    let ttl = be_i32(&bytes[0..4]);
    let flags = bytes[4];
    if flags & !KNOWN_FLAGS != 0 {
        return Err(DecodeError::InvalidFlags { flags });
    }
    decode_body(&bytes[5..], ttl, flags & FLAG_ZOMBIE != 0)
}

/// Decode a buffer of back-to-back frames.
///
/// Fails on the first malformed frame, or if the buffer length is not a
/// multiple of [`FRAME_LEN`].
pub fn decode_frames(bytes: &[u8]) -> Result<Vec<LayoutMessage>, DecodeError> {
    let remainder = bytes.len() % FRAME_LEN;
    if remainder != 0 {
        return Err(DecodeError::Truncated {
            expected: FRAME_LEN,
            found: remainder,
        });
    }
    bytes.chunks_exact(FRAME_LEN).map(decode_frame).collect()
}

/// Read one frame from a stream.
pub fn read_frame(r: &mut dyn Read) -> Result<LayoutMessage, DecodeError> {
    let mut buf = [0u8; FRAME_LEN];
    r.read_exact(&mut buf)?;
    decode_frame(&buf)
}
