//! Error types for geometry packing.

use thiserror::Error;

use crate::mesh::{AttributeChannels, VertexAttributeSemantic};

/// Errors returned when a batch cannot be packed.
///
/// Every error is raised before the builder is touched, so a failed
/// `pack` leaves the staged arrays and finished chunks exactly as they were.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackError {
    /// The batch alone does not fit in a single chunk.
    #[error("batch of {vertex_count} vertices does not fit in one chunk (limit {limit})")]
    InvalidBatch {
        /// Number of vertices in the rejected batch.
        vertex_count: usize,
        /// Vertex limit of the builder.
        limit: usize,
    },
    /// An optional attribute array does not have one entry per vertex.
    #[error("{semantic:?} has {found} entries but the batch has {expected} vertices")]
    AttributeLengthMismatch {
        /// Attribute with the wrong length.
        semantic: VertexAttributeSemantic,
        /// Vertex count of the batch.
        expected: usize,
        /// Length of the attribute array.
        found: usize,
    },
    /// The batch carries a different channel set than the staged geometry.
    #[error("batch channels {incoming:?} do not match staged channels {staged:?}")]
    ChannelMismatch {
        /// Channels already present in the in-progress chunk.
        staged: AttributeChannels,
        /// Channels carried by the rejected batch.
        incoming: AttributeChannels,
    },
    /// An index points past the end of its batch.
    #[error("index {index} out of range for batch of {vertex_count} vertices")]
    IndexOutOfRange {
        /// The offending batch-local index.
        index: u32,
        /// Vertex count of the batch.
        vertex_count: usize,
    },
    /// The index list is not a whole number of triangles.
    #[error("index count {index_count} is not a multiple of 3")]
    IncompleteTriangle {
        /// Number of indices in the batch.
        index_count: usize,
    },
}

/// Result alias for packing operations.
pub type PackResult<T> = Result<T, PackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PackError::InvalidBatch {
            vertex_count: 70000,
            limit: 65534,
        };
        assert_eq!(
            err.to_string(),
            "batch of 70000 vertices does not fit in one chunk (limit 65534)"
        );

        let err = PackError::IncompleteTriangle { index_count: 4 };
        assert_eq!(err.to_string(), "index count 4 is not a multiple of 3");

        let err = PackError::AttributeLengthMismatch {
            semantic: VertexAttributeSemantic::Normal,
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Normal has 2 entries but the batch has 3 vertices"
        );
    }
}
