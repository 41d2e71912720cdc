//! Two-state staging buffer for in-progress geometry.
//!
//! A builder is either between chunks (nothing staged) or accumulating
//! (at least one vertex staged). Both states own a [`GeometryStreams`];
//! the between-chunks one is empty but may keep allocations from an
//! earlier `clear`.

use std::mem;

use super::attributes::{AttributeChannels, GeometryStreams};

#[derive(Debug)]
pub(crate) enum Staging {
    /// No geometry staged.
    BetweenChunks(GeometryStreams),
    /// Geometry staged for the next chunk.
    Accumulating(GeometryStreams),
}

impl Default for Staging {
    fn default() -> Self {
        Self::BetweenChunks(GeometryStreams::new())
    }
}

impl Staging {
    pub(crate) fn is_accumulating(&self) -> bool {
        matches!(self, Self::Accumulating(_))
    }

    pub(crate) fn streams(&self) -> &GeometryStreams {
        match self {
            Self::BetweenChunks(s) | Self::Accumulating(s) => s,
        }
    }

    pub(crate) fn vertex_count(&self) -> usize {
        self.streams().vertex_count()
    }

    /// Channels of the staged geometry, `None` between chunks.
    pub(crate) fn channels(&self) -> Option<AttributeChannels> {
        match self {
            Self::Accumulating(s) => Some(s.channels()),
            Self::BetweenChunks(_) => None,
        }
    }

    /// Enter the accumulating state and return the streams to append to.
    pub(crate) fn activate(&mut self) -> &mut GeometryStreams {
        if let Self::BetweenChunks(s) = self {
            *self = Self::Accumulating(mem::take(s));
        }
        match self {
            Self::Accumulating(s) => s,
            Self::BetweenChunks(_) => unreachable!("staging was just activated"),
        }
    }

    /// Move the staged geometry out, leaving a fresh between-chunks state.
    ///
    /// Returns `None` if nothing is staged.
    pub(crate) fn take(&mut self) -> Option<GeometryStreams> {
        match mem::take(self) {
            Self::Accumulating(s) => Some(s),
            between @ Self::BetweenChunks(_) => {
                *self = between;
                None
            }
        }
    }

    /// Drop the staged geometry but keep its allocations.
    pub(crate) fn release(&mut self) {
        if let Self::Accumulating(s) = self {
            let mut s = mem::take(s);
            s.clear();
            *self = Self::BetweenChunks(s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::mesh::GeometryBatch;

    fn stage_triangle(staging: &mut Staging) {
        let positions = [Vec3::zeros(), Vec3::x(), Vec3::y()];
        staging
            .activate()
            .append_rebased(&GeometryBatch::new(&positions, &[0, 1, 2]));
    }

    #[test]
    fn test_default_is_between_chunks() {
        let staging = Staging::default();
        assert!(!staging.is_accumulating());
        assert_eq!(staging.vertex_count(), 0);
        assert!(staging.channels().is_none());
    }

    #[test]
    fn test_activate_enters_accumulating() {
        let mut staging = Staging::default();
        stage_triangle(&mut staging);
        assert!(staging.is_accumulating());
        assert_eq!(staging.vertex_count(), 3);
        assert_eq!(staging.channels(), Some(AttributeChannels::empty()));
    }

    #[test]
    fn test_take_moves_streams_out() {
        let mut staging = Staging::default();
        stage_triangle(&mut staging);

        let taken = staging.take().map(|s| s.vertex_count());
        assert_eq!(taken, Some(3));
        assert!(!staging.is_accumulating());
        assert_eq!(staging.vertex_count(), 0);
    }

    #[test]
    fn test_take_between_chunks_is_none() {
        let mut staging = Staging::default();
        assert!(staging.take().is_none());
        assert!(!staging.is_accumulating());
    }

    #[test]
    fn test_release_keeps_allocation() {
        let mut staging = Staging::default();
        stage_triangle(&mut staging);
        staging.release();

        assert!(!staging.is_accumulating());
        assert_eq!(staging.vertex_count(), 0);
        assert!(staging.streams().positions.capacity() >= 3);

        stage_triangle(&mut staging);
        assert_eq!(staging.vertex_count(), 3);
    }
}
