//! Immutable packed geometry chunks.

use crate::math::{Vec2, Vec3, Vec4, write_components};

use super::attributes::{AttributeChannels, GeometryBatch, GeometryStreams};
use super::data::CpuMesh;
use super::layout::VertexLayout;

/// Largest vertex count a single chunk may hold.
///
/// Bounded by the 16-bit index format, with `0xFFFF` reserved as the
/// primitive-restart sentinel.
pub const CHUNK_VERTEX_CAPACITY: usize = 65534;

/// One finished, capacity-bounded bundle of vertex attributes and
/// triangle indices.
///
/// Chunks are only created by [`GeometryBuilder`](super::GeometryBuilder)
/// and never change afterwards. Every chunk satisfies:
///
/// - `0 < vertex_count() <= CHUNK_VERTEX_CAPACITY`
/// - every index is `< vertex_count()`, index count is a multiple of 3
/// - each optional channel is empty or has `vertex_count()` entries
#[derive(Debug, Clone)]
pub struct GeometryChunk {
    streams: GeometryStreams,
    label: Option<String>,
}

impl GeometryChunk {
    pub(crate) fn from_streams(streams: GeometryStreams, label: Option<String>) -> Self {
        debug_assert!(!streams.is_empty());
        debug_assert!(streams.vertex_count() <= CHUNK_VERTEX_CAPACITY);
        Self { streams, label }
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.streams.positions
    }

    /// Triangle list indices into [`positions`](Self::positions).
    pub fn indices(&self) -> &[u32] {
        &self.streams.indices
    }

    /// Normals, empty if the chunk has none.
    pub fn normals(&self) -> &[Vec3] {
        &self.streams.normals
    }

    /// RGBA colors, empty if the chunk has none.
    pub fn colors(&self) -> &[Vec4] {
        &self.streams.colors
    }

    /// Tangents, empty if the chunk has none.
    pub fn tangents(&self) -> &[Vec4] {
        &self.streams.tangents
    }

    /// Texture coordinates, empty if the chunk has none.
    pub fn uvs(&self) -> &[Vec2] {
        &self.streams.uvs
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.streams.vertex_count()
    }

    /// Number of indices.
    pub fn index_count(&self) -> usize {
        self.streams.index_count()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.streams.triangle_count()
    }

    /// Optional channels present in this chunk.
    pub fn channels(&self) -> AttributeChannels {
        self.streams.channels()
    }

    /// Debug label, set when the producing builder had one.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Borrow the chunk as a batch, e.g. to pack it into another builder.
    pub fn as_batch(&self) -> GeometryBatch<'_> {
        self.streams.as_batch()
    }

    /// Indices narrowed to 16 bits.
    pub fn indices_u16(&self) -> Vec<u16> {
        // Lossless: every index is below CHUNK_VERTEX_CAPACITY.
        self.streams.indices.iter().map(|&i| i as u16).collect()
    }

    /// Interleave the chunk into an uploadable mesh with 16-bit indices.
    ///
    /// Only channels present in the chunk appear in the layout.
    pub fn to_cpu_mesh(&self) -> CpuMesh {
        let layout = VertexLayout::for_channels(self.channels());
        let s = &self.streams;

        let mut vertex_data = Vec::with_capacity(s.vertex_count() * layout.stride as usize);
        for i in 0..s.vertex_count() {
            write_components(&mut vertex_data, &s.positions[i]);
            if let Some(n) = s.normals.get(i) {
                write_components(&mut vertex_data, n);
            }
            if let Some(t) = s.tangents.get(i) {
                write_components(&mut vertex_data, t);
            }
            if let Some(uv) = s.uvs.get(i) {
                write_components(&mut vertex_data, uv);
            }
            if let Some(c) = s.colors.get(i) {
                write_components(&mut vertex_data, c);
            }
        }

        let mut mesh = CpuMesh::new(layout)
            .with_vertex_data(vertex_data)
            .with_indices_u16(&self.indices_u16());
        if let Some(label) = &self.label {
            mesh = mesh.with_label(label.clone());
        }
        mesh
    }

    /// Consume the chunk and return its arrays.
    pub fn into_streams(self) -> GeometryStreams {
        self.streams
    }
}
