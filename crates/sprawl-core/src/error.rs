//! Error types shared across the Sprawl workspace.
//!
//! Organized by subsystem boundary: wire decoding (protocol) and run
//! configuration (propagator and engine). Recoverable local conditions
//! such as coincident vertices or an unknown force-law name are not
//! errors and never reach these types.

use std::io;

use thiserror::Error;

/// A structurally invalid message frame.
///
/// Fatal for the frame it was raised on. The substrate decides whether
/// to drop the frame or abort the run; the core never attempts partial
/// recovery of a corrupt message.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The underlying reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Fewer bytes than the fixed frame layout requires.
    #[error("truncated frame: expected {expected} bytes, found {found}")]
    Truncated {
        /// Bytes required by the layout.
        expected: usize,
        /// Bytes actually available.
        found: usize,
    },
    /// The degree field decoded to a negative value.
    #[error("negative degree {degree}")]
    NegativeDegree {
        /// The decoded value.
        degree: i32,
    },
    /// The propagation flags byte has bits outside the known set.
    #[error("invalid propagation flags {flags:#04x}")]
    InvalidFlags {
        /// The decoded flags byte.
        flags: u8,
    },
    /// Bytes left over after a complete frame.
    #[error("{count} trailing bytes after frame")]
    TrailingBytes {
        /// Number of unread bytes.
        count: usize,
    },
}

/// Invalid run configuration, detected before any superstep executes.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// `queueFlushRatio` outside `(0, 1]`.
    #[error("queue_flush_ratio must be in (0, 1], got {value}")]
    InvalidFlushRatio {
        /// The rejected value.
        value: f32,
    },
    /// `k` is NaN, infinite, zero, or negative.
    #[error("k must be finite and positive, got {value}")]
    InvalidIdealLength {
        /// The rejected value.
        value: f32,
    },
    /// `walshawConstant` is NaN, infinite, or negative.
    #[error("walshaw_constant must be finite and >= 0, got {value}")]
    InvalidWalshawConstant {
        /// The rejected value.
        value: f32,
    },
    /// The hop budget of fresh broadcasts is negative.
    #[error("ttl must be >= 0, got {value}")]
    NegativeTtl {
        /// The rejected value.
        value: i32,
    },
    /// A count that must be at least one was zero.
    #[error("{name} must be at least 1")]
    ZeroCount {
        /// Name of the offending setting.
        name: &'static str,
    },
    /// A floating-point setting outside its valid range.
    #[error("{name} out of range: {reason}")]
    OutOfRange {
        /// Name of the offending setting.
        name: &'static str,
        /// What the valid range is.
        reason: String,
    },
    /// The configuration document could not be parsed.
    #[error("config parse error: {reason}")]
    Parse {
        /// Parser diagnostic.
        reason: String,
    },
}
