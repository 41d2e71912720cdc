//! Vertex layout definitions for packed chunks.
//!
//! A chunk is uploaded as a single interleaved vertex buffer. The layout
//! records which attributes are present, their formats and their byte
//! offsets inside one vertex. Attributes always appear in the same order
//! (position, normal, tangent, texcoord0, color), so two chunks with the
//! same channel set produce structurally equal layouts.

use std::sync::Arc;

use super::attributes::AttributeChannels;

/// Semantic meaning of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeSemantic {
    /// Vertex position (float3).
    Position,
    /// Vertex normal (float3).
    Normal,
    /// Vertex tangent (float4, w = handedness).
    Tangent,
    /// Texture coordinates set 0 (float2).
    TexCoord0,
    /// Vertex color (float4, RGBA).
    Color,
}

impl VertexAttributeSemantic {
    /// Format every packed attribute of this semantic is stored in.
    pub fn format(&self) -> VertexAttributeFormat {
        match self {
            Self::Position | Self::Normal => VertexAttributeFormat::Float3,
            Self::Tangent | Self::Color => VertexAttributeFormat::Float4,
            Self::TexCoord0 => VertexAttributeFormat::Float2,
        }
    }

    /// The optional channel backing this semantic, `None` for positions.
    pub fn channel(&self) -> Option<AttributeChannels> {
        match self {
            Self::Position => None,
            Self::Normal => Some(AttributeChannels::NORMALS),
            Self::Tangent => Some(AttributeChannels::TANGENTS),
            Self::TexCoord0 => Some(AttributeChannels::UVS),
            Self::Color => Some(AttributeChannels::COLORS),
        }
    }
}

/// Format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeFormat {
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
}

impl VertexAttributeFormat {
    /// Get the size in bytes of this format.
    pub fn size(&self) -> usize {
        match self {
            Self::Float2 => 8,
            Self::Float3 => 12,
            Self::Float4 => 16,
        }
    }
}

/// A single vertex attribute inside the interleaved buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Semantic meaning of this attribute.
    pub semantic: VertexAttributeSemantic,
    /// Data format of this attribute.
    pub format: VertexAttributeFormat,
    /// Byte offset within one vertex.
    pub offset: u32,
}

impl VertexAttribute {
    /// Create an attribute using the semantic's packed format.
    pub fn new(semantic: VertexAttributeSemantic, offset: u32) -> Self {
        Self {
            semantic,
            format: semantic.format(),
            offset,
        }
    }
}

/// Layout of one interleaved vertex buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VertexLayout {
    /// Stride in bytes between consecutive vertices.
    pub stride: u32,
    /// The vertex attributes in buffer order.
    pub attributes: Vec<VertexAttribute>,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl VertexLayout {
    /// Create a new empty vertex layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute at the current end of the vertex.
    pub fn with_attribute(mut self, semantic: VertexAttributeSemantic) -> Self {
        let attribute = VertexAttribute::new(semantic, self.stride);
        self.stride += attribute.format.size() as u32;
        self.attributes.push(attribute);
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Build the layout for a chunk carrying positions plus `channels`.
    ///
    /// The label names the channels, e.g. `position_normal_uv`.
    pub fn for_channels(channels: AttributeChannels) -> Arc<Self> {
        let mut layout = Self::new().with_attribute(VertexAttributeSemantic::Position);
        let mut label = String::from("position");

        for (semantic, name) in [
            (VertexAttributeSemantic::Normal, "normal"),
            (VertexAttributeSemantic::Tangent, "tangent"),
            (VertexAttributeSemantic::TexCoord0, "uv"),
            (VertexAttributeSemantic::Color, "color"),
        ] {
            if semantic.channel().is_some_and(|c| channels.contains(c)) {
                layout = layout.with_attribute(semantic);
                label.push('_');
                label.push_str(name);
            }
        }

        Arc::new(layout.with_label(label))
    }

    /// Check if this layout has a specific semantic.
    pub fn has_semantic(&self, semantic: VertexAttributeSemantic) -> bool {
        self.attributes.iter().any(|attr| attr.semantic == semantic)
    }

    /// Get an attribute by semantic.
    pub fn get_attribute(&self, semantic: VertexAttributeSemantic) -> Option<&VertexAttribute> {
        self.attributes
            .iter()
            .find(|attr| attr.semantic == semantic)
    }
}
