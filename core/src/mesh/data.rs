//! CPU-side upload data.
//!
//! This module provides:
//! - [`IndexFormat`] - Index data format
//! - [`CpuMesh`] - Interleaved vertex bytes and index bytes, ready for a
//!   rendering layer to upload

use std::sync::Arc;

use super::layout::VertexLayout;

/// Index format for indexed drawing.
///
/// Chunks never exceed the 16-bit vertex capacity, so packed meshes are
/// always indexed with `u16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned integers (max 65535 vertices).
    #[default]
    Uint16,
}

impl IndexFormat {
    /// Get the size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
        }
    }
}

/// A CPU-side triangle-list mesh holding raw vertex and index bytes.
///
/// Vertex data is one interleaved buffer described by [`VertexLayout`];
/// the vertex count is inferred from the data length and the layout stride.
#[derive(Clone)]
pub struct CpuMesh {
    layout: Arc<VertexLayout>,
    vertex_data: Vec<u8>,
    vertex_count: u32,
    index_data: Vec<u8>,
    index_format: IndexFormat,
    index_count: u32,
    label: Option<String>,
}

impl CpuMesh {
    /// Create a new empty mesh with the given layout.
    pub fn new(layout: Arc<VertexLayout>) -> Self {
        Self {
            layout,
            vertex_data: Vec::new(),
            vertex_count: 0,
            index_data: Vec::new(),
            index_format: IndexFormat::Uint16,
            index_count: 0,
            label: None,
        }
    }

    /// Set raw interleaved vertex data.
    pub fn with_vertex_data(mut self, data: Vec<u8>) -> Self {
        let stride = self.layout.stride as usize;
        if stride > 0 {
            self.vertex_count = (data.len() / stride) as u32;
        }
        self.vertex_data = data;
        self
    }

    /// Set index data as u16 indices.
    pub fn with_indices_u16(mut self, indices: &[u16]) -> Self {
        self.index_data = bytemuck::cast_slice(indices).to_vec();
        self.index_format = IndexFormat::Uint16;
        self.index_count = indices.len() as u32;
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the vertex layout.
    pub fn layout(&self) -> &Arc<VertexLayout> {
        &self.layout
    }

    /// Get the raw interleaved vertex data.
    pub fn vertex_data(&self) -> &[u8] {
        &self.vertex_data
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Get the raw index data.
    pub fn index_data(&self) -> &[u8] {
        &self.index_data
    }

    /// Get the index format.
    pub fn index_format(&self) -> IndexFormat {
        self.index_format
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> u32 {
        self.index_count / 3
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl std::fmt::Debug for CpuMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuMesh")
            .field("label", &self.label)
            .field("vertex_count", &self.vertex_count)
            .field("vertex_bytes", &self.vertex_data.len())
            .field("index_count", &self.index_count)
            .field("index_format", &self.index_format)
            .field("layout", &self.layout.label)
            .finish()
    }
}
