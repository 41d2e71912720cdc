//! Geometry packing.
//!
//! This module turns streams of procedurally generated geometry into
//! capacity-bounded chunks:
//!
//! - [`GeometryBatch`] / [`GeometryStreams`] - Input attribute arrays
//! - [`GeometryBuilder`] - Packs batches, splitting at the vertex limit
//! - [`GeometryChunk`] - One finished chunk (at most [`CHUNK_VERTEX_CAPACITY`] vertices)
//! - [`CpuMesh`] / [`VertexLayout`] - Interleaved upload data for a chunk
//! - Generators for common shapes (sphere, quad, plane)

mod attributes;
mod builder;
mod chunk;
mod data;
pub mod generators;
mod layout;
mod staging;

pub use attributes::{AttributeChannels, GeometryBatch, GeometryStreams};
pub use builder::{GeometryBuilder, MIN_VERTEX_LIMIT};
pub use chunk::{CHUNK_VERTEX_CAPACITY, GeometryChunk};
pub use data::{CpuMesh, IndexFormat};
pub use layout::{VertexAttribute, VertexAttributeFormat, VertexAttributeSemantic, VertexLayout};
