//! Error type used by the crate.

use geozero::error::GeozeroError;
use thiserror::Error;

use crate::geometry_type::GeometryKind;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The operation needs coordinate data but the geometry has none.
    #[error("operation requires a non-empty geometry")]
    EmptyGeometry,
    /// Point, ring, ordinate or sub-geometry index is not valid.
    #[error("index {index} is out of range (length {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of addressable elements.
        len: usize,
    },
    /// A geometry kind tag that the model has no variant for.
    #[error("unsupported geometry kind '{0}'")]
    UnsupportedGeometryKind(String),
    /// Mutation or query that the given variant does not support.
    #[error("operation '{operation}' is not supported by {kind}")]
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Kind of the geometry the operation was called on.
        kind: GeometryKind,
    },
    /// Ring has too few points or is not closed.
    #[error("malformed ring: {0}")]
    MalformedRing(String),
    /// Builder events arrived in an order that does not describe a geometry.
    #[error("invalid builder event sequence: {0}")]
    BuilderProtocol(String),
    /// Text reader or writer failure.
    #[error("wkt error: {0}")]
    Wkt(String),
    /// Failure reported by a spatial engine.
    #[error("spatial engine error: {0}")]
    Engine(String),
}

impl GeometryError {
    pub(crate) fn unsupported(operation: &'static str, kind: GeometryKind) -> Self {
        Self::UnsupportedOperation { operation, kind }
    }

    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

impl From<GeozeroError> for GeometryError {
    fn from(value: GeozeroError) -> Self {
        Self::Wkt(value.to_string())
    }
}

/// Result alias with [`GeometryError`].
pub type Result<T> = std::result::Result<T, GeometryError>;
