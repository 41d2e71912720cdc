//! Geometry builder: packs batches into capacity-bounded chunks.
//!
//! The builder stages incoming batches in one set of parallel arrays and
//! rebases their indices as it goes. Before a batch would push the staged
//! vertex count past the vertex limit, the staged arrays are flushed into a
//! new [`GeometryChunk`] and the batch starts the next one.
//!
//! # Example
//!
//! ```
//! use tessera_core::mesh::GeometryBuilder;
//! use tessera_core::mesh::generators::{generate_quad, generate_sphere};
//!
//! let sphere = generate_sphere(1.0, 16, 8);
//! let quad = generate_quad(0.5, 0.5);
//!
//! let mut builder = GeometryBuilder::new().with_label("props");
//! builder.pack(&sphere.as_batch()).unwrap();
//! builder.pack(&sphere.as_batch()).unwrap();
//! builder.pack(&quad.as_batch()).unwrap();
//!
//! let chunks = builder.build();
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].vertex_count(), 2 * 153 + 4);
//! ```

use crate::error::{PackError, PackResult};

use super::attributes::{AttributeChannels, GeometryBatch};
use super::chunk::{CHUNK_VERTEX_CAPACITY, GeometryChunk};
use super::data::CpuMesh;
use super::staging::Staging;

/// Smallest accepted vertex limit: the lowest that still admits a triangle.
pub const MIN_VERTEX_LIMIT: usize = 4;

/// Accumulates geometry batches and splits them into [`GeometryChunk`]s.
///
/// Not synchronized: all mutation goes through `&mut self`. Hand the
/// finished chunks to another thread after [`build`](Self::build).
#[derive(Debug)]
pub struct GeometryBuilder {
    staging: Staging,
    chunks: Vec<GeometryChunk>,
    vertex_limit: usize,
    label: Option<String>,
}

impl Default for GeometryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryBuilder {
    /// Create an empty builder with the full 16-bit chunk capacity.
    pub fn new() -> Self {
        Self {
            staging: Staging::default(),
            chunks: Vec::new(),
            vertex_limit: CHUNK_VERTEX_CAPACITY,
            label: None,
        }
    }

    /// Lower the per-chunk vertex limit.
    ///
    /// Clamped to `MIN_VERTEX_LIMIT..=CHUNK_VERTEX_CAPACITY`. A batch must
    /// have fewer vertices than the limit to be accepted. Staged geometry
    /// that no longer fits is flushed first, so no chunk exceeds the limit.
    pub fn with_vertex_limit(mut self, limit: usize) -> Self {
        let clamped = limit.clamp(MIN_VERTEX_LIMIT, CHUNK_VERTEX_CAPACITY);
        if clamped != limit {
            log::warn!(
                "GeometryBuilder: vertex limit {} clamped to {}",
                limit,
                clamped
            );
        }
        if self.staging.vertex_count() > clamped {
            log::debug!(
                "GeometryBuilder: flushing {} staged vertices above new limit {}",
                self.staging.vertex_count(),
                clamped
            );
            self.flush();
        }
        self.vertex_limit = clamped;
        self
    }

    /// Set a debug label. Chunks are labelled `"<label>[<ordinal>]"`.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Per-chunk vertex limit.
    pub fn vertex_limit(&self) -> usize {
        self.vertex_limit
    }

    /// Debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Pack a batch, rebasing its indices onto the staged geometry.
    ///
    /// If the batch would push the staged vertex count past the limit, the
    /// staged geometry is flushed into a chunk first and the batch starts a
    /// new one. A batch joining already staged geometry must carry the same
    /// channel set. Empty batches are ignored.
    ///
    /// On error nothing is modified.
    pub fn pack(&mut self, batch: &GeometryBatch<'_>) -> PackResult<()> {
        let incoming = batch.vertex_count();
        if incoming >= self.vertex_limit {
            return Err(PackError::InvalidBatch {
                vertex_count: incoming,
                limit: self.vertex_limit,
            });
        }
        batch.validate()?;

        if batch.is_empty() {
            return Ok(());
        }

        if self.would_overflow(incoming) {
            self.flush();
        } else if let Some(staged) = self.staging.channels() {
            let channels = batch.channels();
            if staged != channels {
                return Err(PackError::ChannelMismatch {
                    staged,
                    incoming: channels,
                });
            }
        }

        let index_start = self.staging.activate().append_rebased(batch);
        log::trace!(
            "GeometryBuilder: packed {} vertices, {} indices at offset {}",
            incoming,
            batch.index_count(),
            index_start
        );
        Ok(())
    }

    /// Pack a finished chunk, e.g. one produced by
    /// [`snapshot_chunk`](Self::snapshot_chunk) on another builder.
    pub fn pack_chunk(&mut self, chunk: &GeometryChunk) -> PackResult<()> {
        self.pack(&chunk.as_batch())
    }

    /// Whether `incoming` more vertices would exceed the limit.
    fn would_overflow(&self, incoming: usize) -> bool {
        self.staging.vertex_count() + incoming > self.vertex_limit
    }

    /// Move the staged geometry into a new chunk. No-op if nothing is staged.
    pub fn flush(&mut self) {
        let Some(streams) = self.staging.take() else {
            return;
        };

        let ordinal = self.chunks.len();
        log::debug!(
            "GeometryBuilder: chunk {} with {} vertices, {} triangles, channels {:?}",
            ordinal,
            streams.vertex_count(),
            streams.triangle_count(),
            streams.channels()
        );

        let label = self.chunk_label(ordinal);
        self.chunks.push(GeometryChunk::from_streams(streams, label));
    }

    /// Flush the remainder and return a copy of every chunk, in order.
    ///
    /// The builder keeps its chunks and stays usable.
    pub fn build(&mut self) -> Vec<GeometryChunk> {
        self.flush();
        self.chunks.clone()
    }

    /// Flush the remainder and take the chunks without copying.
    pub fn into_chunks(mut self) -> Vec<GeometryChunk> {
        self.flush();
        self.chunks
    }

    /// Flush the remainder and convert every chunk into an uploadable mesh.
    pub fn build_meshes(&mut self) -> Vec<CpuMesh> {
        self.flush();
        self.chunks.iter().map(GeometryChunk::to_cpu_mesh).collect()
    }

    /// Copy the staged geometry into a standalone chunk.
    ///
    /// Neither the staged arrays nor the finished chunks change. Returns
    /// `None` if nothing is staged.
    pub fn snapshot_chunk(&self) -> Option<GeometryChunk> {
        if !self.staging.is_accumulating() {
            return None;
        }
        let label = self.chunk_label(self.chunks.len());
        Some(GeometryChunk::from_streams(
            self.staging.streams().clone(),
            label,
        ))
    }

    /// Drop the staged geometry. Finished chunks are kept.
    pub fn clear(&mut self) {
        self.staging.release();
    }

    /// Finished chunks, in flush order.
    pub fn chunks(&self) -> &[GeometryChunk] {
        &self.chunks
    }

    /// Number of finished chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of staged vertices.
    pub fn staged_vertex_count(&self) -> usize {
        self.staging.vertex_count()
    }

    /// Number of staged indices.
    pub fn staged_index_count(&self) -> usize {
        self.staging.streams().index_count()
    }

    /// Channels of the staged geometry, `None` if nothing is staged.
    pub fn staged_channels(&self) -> Option<AttributeChannels> {
        self.staging.channels()
    }

    /// Whether geometry is staged for the next chunk.
    pub fn is_accumulating(&self) -> bool {
        self.staging.is_accumulating()
    }

    fn chunk_label(&self, ordinal: usize) -> Option<String> {
        self.label
            .as_ref()
            .map(|label| format!("{label}[{ordinal}]"))
    }
}
