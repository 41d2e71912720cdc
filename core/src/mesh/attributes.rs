//! Vertex attribute streams.
//!
//! - [`AttributeChannels`] - Which optional per-vertex arrays are present
//! - [`GeometryBatch`] - Borrowed input handed to the builder
//! - [`GeometryStreams`] - Owned parallel arrays (generator output, staged data)
//!
//! Positions and indices are always present. Normals, colors, tangents and
//! texture coordinates are optional channels: a channel is either absent
//! or has exactly one entry per vertex.

use bitflags::bitflags;

use crate::error::{PackError, PackResult};
use crate::math::{Vec2, Vec3, Vec4};

use super::layout::VertexAttributeSemantic;

bitflags! {
    /// Optional per-vertex channels carried alongside positions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttributeChannels: u8 {
        /// Per-vertex normals (float3).
        const NORMALS = 1 << 0;
        /// Per-vertex RGBA colors (float4).
        const COLORS = 1 << 1;
        /// Per-vertex tangents (float4).
        const TANGENTS = 1 << 2;
        /// Per-vertex texture coordinates (float2).
        const UVS = 1 << 3;
    }
}

/// A borrowed batch of geometry to pack.
///
/// Indices are relative to `positions` of this batch (0-based), not to
/// anything already accumulated by a builder.
///
/// # Example
///
/// ```
/// use tessera_core::math::Vec3;
/// use tessera_core::mesh::{AttributeChannels, GeometryBatch};
///
/// let positions = [Vec3::zeros(), Vec3::x(), Vec3::y()];
/// let normals = [Vec3::z(); 3];
/// let batch = GeometryBatch::new(&positions, &[0, 1, 2]).with_normals(&normals);
///
/// assert_eq!(batch.channels(), AttributeChannels::NORMALS);
/// assert!(batch.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GeometryBatch<'a> {
    /// Vertex positions.
    pub positions: &'a [Vec3],
    /// Triangle list indices, batch-local.
    pub indices: &'a [u32],
    /// Optional normals.
    pub normals: Option<&'a [Vec3]>,
    /// Optional RGBA colors.
    pub colors: Option<&'a [Vec4]>,
    /// Optional tangents.
    pub tangents: Option<&'a [Vec4]>,
    /// Optional texture coordinates.
    pub uvs: Option<&'a [Vec2]>,
}

impl<'a> GeometryBatch<'a> {
    /// Create a batch with positions and indices only.
    pub fn new(positions: &'a [Vec3], indices: &'a [u32]) -> Self {
        Self {
            positions,
            indices,
            normals: None,
            colors: None,
            tangents: None,
            uvs: None,
        }
    }

    /// Attach normals.
    pub fn with_normals(mut self, normals: &'a [Vec3]) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Attach RGBA colors.
    pub fn with_colors(mut self, colors: &'a [Vec4]) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Attach tangents.
    pub fn with_tangents(mut self, tangents: &'a [Vec4]) -> Self {
        self.tangents = Some(tangents);
        self
    }

    /// Attach texture coordinates.
    pub fn with_uvs(mut self, uvs: &'a [Vec2]) -> Self {
        self.uvs = Some(uvs);
        self
    }

    /// Number of vertices in the batch.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of indices in the batch.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Whether the batch carries no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Channels supplied with this batch.
    pub fn channels(&self) -> AttributeChannels {
        let mut channels = AttributeChannels::empty();
        channels.set(AttributeChannels::NORMALS, self.normals.is_some());
        channels.set(AttributeChannels::COLORS, self.colors.is_some());
        channels.set(AttributeChannels::TANGENTS, self.tangents.is_some());
        channels.set(AttributeChannels::UVS, self.uvs.is_some());
        channels
    }

    /// Check the batch on its own: channel lengths, whole triangles, and
    /// indices inside the batch.
    pub fn validate(&self) -> PackResult<()> {
        let vertex_count = self.vertex_count();

        let lengths = [
            (VertexAttributeSemantic::Normal, self.normals.map(<[_]>::len)),
            (VertexAttributeSemantic::Color, self.colors.map(<[_]>::len)),
            (VertexAttributeSemantic::Tangent, self.tangents.map(<[_]>::len)),
            (VertexAttributeSemantic::TexCoord0, self.uvs.map(<[_]>::len)),
        ];
        for (semantic, len) in lengths {
            match len {
                Some(found) if found != vertex_count => {
                    return Err(PackError::AttributeLengthMismatch {
                        semantic,
                        expected: vertex_count,
                        found,
                    });
                }
                _ => {}
            }
        }

        if self.indices.len() % 3 != 0 {
            return Err(PackError::IncompleteTriangle {
                index_count: self.indices.len(),
            });
        }

        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&index| index as usize >= vertex_count)
        {
            return Err(PackError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        Ok(())
    }
}

/// Owned parallel attribute arrays.
///
/// Generators return this type, and builders stage geometry in it. Fields
/// are public for direct construction; use [`GeometryStreams::as_batch`]
/// to hand the data to a builder, which validates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryStreams {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Triangle list indices into `positions`.
    pub indices: Vec<u32>,
    /// Normals, empty or one per vertex.
    pub normals: Vec<Vec3>,
    /// RGBA colors, empty or one per vertex.
    pub colors: Vec<Vec4>,
    /// Tangents, empty or one per vertex.
    pub tangents: Vec<Vec4>,
    /// Texture coordinates, empty or one per vertex.
    pub uvs: Vec<Vec2>,
}

impl GeometryStreams {
    /// Create empty streams.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Channels with at least one entry.
    pub fn channels(&self) -> AttributeChannels {
        let mut channels = AttributeChannels::empty();
        channels.set(AttributeChannels::NORMALS, !self.normals.is_empty());
        channels.set(AttributeChannels::COLORS, !self.colors.is_empty());
        channels.set(AttributeChannels::TANGENTS, !self.tangents.is_empty());
        channels.set(AttributeChannels::UVS, !self.uvs.is_empty());
        channels
    }

    /// Borrow as a batch. Empty channels are reported as absent.
    pub fn as_batch(&self) -> GeometryBatch<'_> {
        fn present<T>(values: &[T]) -> Option<&[T]> {
            (!values.is_empty()).then_some(values)
        }

        GeometryBatch {
            positions: &self.positions,
            indices: &self.indices,
            normals: present(&self.normals),
            colors: present(&self.colors),
            tangents: present(&self.tangents),
            uvs: present(&self.uvs),
        }
    }

    /// Append a validated batch, rebasing its indices past the current
    /// vertices. Returns the offset that was added to every index.
    pub(crate) fn append_rebased(&mut self, batch: &GeometryBatch<'_>) -> u32 {
        let index_start = self.positions.len() as u32;

        self.indices
            .extend(batch.indices.iter().map(|&index| index_start + index));
        self.positions.extend_from_slice(batch.positions);

        if let Some(normals) = batch.normals {
            self.normals.extend_from_slice(normals);
        }
        if let Some(colors) = batch.colors {
            self.colors.extend_from_slice(colors);
        }
        if let Some(tangents) = batch.tangents {
            self.tangents.extend_from_slice(tangents);
        }
        if let Some(uvs) = batch.uvs {
            self.uvs.extend_from_slice(uvs);
        }

        index_start
    }

    /// Empty every array, keeping allocations.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.indices.clear();
        self.normals.clear();
        self.colors.clear();
        self.tangents.clear();
        self.uvs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Vec3> {
        vec![Vec3::zeros(), Vec3::x(), Vec3::y()]
    }

    #[test]
    fn test_batch_channels() {
        let positions = triangle();
        let uvs = [Vec2::zeros(); 3];
        let colors = [Vec4::repeat(1.0); 3];
        let batch = GeometryBatch::new(&positions, &[0, 1, 2])
            .with_uvs(&uvs)
            .with_colors(&colors);

        assert_eq!(
            batch.channels(),
            AttributeChannels::UVS | AttributeChannels::COLORS
        );
        assert_eq!(batch.vertex_count(), 3);
        assert_eq!(batch.index_count(), 3);
    }

    #[test]
    fn test_validate_attribute_length() {
        let positions = triangle();
        let normals = [Vec3::z(); 2];
        let batch = GeometryBatch::new(&positions, &[0, 1, 2]).with_normals(&normals);

        assert_eq!(
            batch.validate(),
            Err(PackError::AttributeLengthMismatch {
                semantic: VertexAttributeSemantic::Normal,
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn test_validate_incomplete_triangle() {
        let positions = triangle();
        let batch = GeometryBatch::new(&positions, &[0, 1]);
        assert_eq!(
            batch.validate(),
            Err(PackError::IncompleteTriangle { index_count: 2 })
        );
    }

    #[test]
    fn test_validate_index_out_of_range() {
        let positions = triangle();
        let batch = GeometryBatch::new(&positions, &[0, 1, 3]);
        assert_eq!(
            batch.validate(),
            Err(PackError::IndexOutOfRange {
                index: 3,
                vertex_count: 3,
            })
        );
    }

    #[test]
    fn test_streams_as_batch_hides_empty_channels() {
        let streams = GeometryStreams {
            positions: triangle(),
            indices: vec![0, 1, 2],
            normals: vec![Vec3::z(); 3],
            ..Default::default()
        };

        let batch = streams.as_batch();
        assert_eq!(batch.channels(), AttributeChannels::NORMALS);
        assert!(batch.colors.is_none());
        assert_eq!(streams.channels(), AttributeChannels::NORMALS);
    }

    #[test]
    fn test_append_rebases_indices() {
        let positions = triangle();
        let batch = GeometryBatch::new(&positions, &[0, 1, 2]);

        let mut streams = GeometryStreams::new();
        assert_eq!(streams.append_rebased(&batch), 0);
        assert_eq!(streams.append_rebased(&batch), 3);

        assert_eq!(streams.vertex_count(), 6);
        assert_eq!(streams.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(streams.triangle_count(), 2);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut streams = GeometryStreams {
            positions: triangle(),
            indices: vec![0, 1, 2],
            ..Default::default()
        };
        streams.clear();
        assert!(streams.is_empty());
        assert_eq!(streams.index_count(), 0);
        assert!(streams.positions.capacity() >= 3);
    }
}
