//! Generators for common shapes.
//!
//! These produce [`GeometryStreams`] with batch-local indices, ready to be
//! packed with [`GeometryStreams::as_batch`]. All of them fill normals,
//! tangents and texture coordinates, so their output can share a chunk.

use std::f32::consts::PI;

use crate::math::{Vec2, Vec3, Vec4, tangent_from_normal};

use super::attributes::GeometryStreams;

/// Generate a UV sphere centered at the origin.
///
/// Produces `(rings + 1) * (segments + 1)` vertices (the seam is
/// duplicated for texture coordinates) and `rings * segments * 6` indices.
///
/// # Arguments
///
/// * `radius` - Sphere radius
/// * `segments` - Number of longitudinal segments (around the equator)
/// * `rings` - Number of latitudinal rings (from pole to pole)
pub fn generate_sphere(radius: f32, segments: u32, rings: u32) -> GeometryStreams {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut streams = GeometryStreams::new();

    for ring in 0..=rings {
        let theta = ring as f32 * PI / rings as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for segment in 0..=segments {
            let phi = segment as f32 * 2.0 * PI / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);

            streams.positions.push(normal * radius);
            streams.normals.push(normal);
            // Along increasing phi.
            streams
                .tangents
                .push(Vec4::new(-sin_phi, 0.0, cos_phi, 1.0));
            streams.uvs.push(Vec2::new(
                segment as f32 / segments as f32,
                ring as f32 / rings as f32,
            ));
        }
    }

    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * (segments + 1) + segment;
            let next = current + segments + 1;

            streams
                .indices
                .extend_from_slice(&[current, next, current + 1]);
            streams
                .indices
                .extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    streams
}

/// Generate a quad on the XY plane, facing +Z.
///
/// UV coordinates go from (0,0) at top-left to (1,1) at bottom-right.
pub fn generate_quad(half_width: f32, half_height: f32) -> GeometryStreams {
    let normal = Vec3::z();
    GeometryStreams {
        positions: vec![
            Vec3::new(-half_width, -half_height, 0.0),
            Vec3::new(half_width, -half_height, 0.0),
            Vec3::new(half_width, half_height, 0.0),
            Vec3::new(-half_width, half_height, 0.0),
        ],
        indices: vec![0, 1, 2, 2, 3, 0],
        normals: vec![normal; 4],
        tangents: vec![tangent_from_normal(&normal); 4],
        uvs: vec![
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.0),
        ],
        colors: Vec::new(),
    }
}

/// Generate a subdivided plane on the XZ axis, facing +Y.
///
/// Produces `(subdivisions + 1)^2` vertices. Vertex colors run from black
/// at the -X/-Z corner to red/blue along X/Z, which makes chunk seams easy
/// to spot in a viewer.
pub fn generate_plane(width: f32, depth: f32, subdivisions: u32) -> GeometryStreams {
    let subdivisions = subdivisions.max(1);
    let half_width = width / 2.0;
    let half_depth = depth / 2.0;
    let step = 1.0 / subdivisions as f32;
    let normal = Vec3::y();
    let tangent = tangent_from_normal(&normal);

    let mut streams = GeometryStreams::new();
    for z in 0..=subdivisions {
        for x in 0..=subdivisions {
            let u = x as f32 * step;
            let v = z as f32 * step;
            streams.positions.push(Vec3::new(
                -half_width + u * width,
                0.0,
                -half_depth + v * depth,
            ));
            streams.normals.push(normal);
            streams.tangents.push(tangent);
            streams.uvs.push(Vec2::new(u, v));
            streams.colors.push(Vec4::new(u, 0.0, v, 1.0));
        }
    }

    let row = subdivisions + 1;
    for z in 0..subdivisions {
        for x in 0..subdivisions {
            let i = z * row + x;
            streams
                .indices
                .extend_from_slice(&[i, i + row, i + 1, i + 1, i + row, i + row + 1]);
        }
    }

    streams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::AttributeChannels;

    #[test]
    fn test_generate_sphere() {
        let sphere = generate_sphere(1.0, 8, 4);
        // (rings+1) * (segments+1) = 5 * 9 = 45 vertices
        assert_eq!(sphere.vertex_count(), 45);
        // rings * segments * 6 = 4 * 8 * 6 = 192 indices
        assert_eq!(sphere.index_count(), 192);
        assert!(sphere.as_batch().validate().is_ok());
    }

    #[test]
    fn test_sphere_radius_and_normals() {
        let sphere = generate_sphere(2.0, 8, 4);
        for (p, n) in sphere.positions.iter().zip(&sphere.normals) {
            assert!((p.norm() - 2.0).abs() < 1e-5);
            assert!((n.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_generate_quad() {
        let quad = generate_quad(0.5, 0.5);
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(quad.index_count(), 6);
        assert!(quad.as_batch().validate().is_ok());
    }

    #[test]
    fn test_sphere_and_quad_share_channels() {
        let expected =
            AttributeChannels::NORMALS | AttributeChannels::TANGENTS | AttributeChannels::UVS;
        assert_eq!(generate_sphere(1.0, 8, 4).channels(), expected);
        assert_eq!(generate_quad(1.0, 1.0).channels(), expected);
    }

    #[test]
    fn test_generate_plane() {
        let plane = generate_plane(10.0, 10.0, 4);
        assert_eq!(plane.vertex_count(), 25);
        assert_eq!(plane.index_count(), 4 * 4 * 6);
        assert_eq!(plane.channels(), AttributeChannels::all());
        assert!(plane.as_batch().validate().is_ok());

        let first = plane.positions[0];
        assert_eq!(first, Vec3::new(-5.0, 0.0, -5.0));
    }
}
