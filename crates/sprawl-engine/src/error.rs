//! Errors surfaced by a layout run.

use sprawl_core::{ConfigError, DecodeError, VertexId, WorkerId};
use thiserror::Error;

/// Failure of a layout run.
///
/// Configuration problems are caught in [`LayoutEngine::new`](crate::LayoutEngine::new)
/// before any superstep executes. The remaining variants abort a run in
/// progress; vertex state is left as of the last completed barrier.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A frame crossing a worker boundary could not be decoded.
    #[error("malformed message frame: {0}")]
    Decode(#[from] DecodeError),
    /// A message was addressed to a vertex that is not in the graph.
    #[error("message addressed to unknown vertex {id}")]
    UnknownVertex {
        /// The missing vertex.
        id: VertexId,
    },
    /// A worker thread panicked.
    #[error("worker {worker} failed")]
    WorkerFailed {
        /// The worker that did not report back.
        worker: WorkerId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert() {
        let e: EngineError = ConfigError::NegativeTtl { value: -1 }.into();
        assert!(matches!(e, EngineError::Config(ConfigError::NegativeTtl { value: -1 })));
        assert_eq!(e.to_string(), "invalid configuration: ttl must be >= 0, got -1");
    }

    #[test]
    fn decode_errors_convert() {
        let e: EngineError = DecodeError::TrailingBytes { count: 3 }.into();
        assert!(matches!(e, EngineError::Decode(_)));
    }

    #[test]
    fn display_names_the_subject() {
        let e = EngineError::UnknownVertex { id: VertexId(42) };
        assert!(e.to_string().contains("42"));
        let e = EngineError::WorkerFailed { worker: WorkerId(3) };
        assert!(e.to_string().contains('3'));
    }
}
