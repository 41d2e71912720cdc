//! Math type aliases and helper functions.
//!
//! All geometry is stored in f32, matching what a vertex buffer holds.

pub use nalgebra;

/// 2D vector (f32). Used for texture coordinates.
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32). Used for positions and normals.
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32). Used for tangents (w = handedness) and RGBA colors.
pub type Vec4 = nalgebra::Vector4<f32>;

/// Pick a tangent perpendicular to `normal`, with handedness `+1`.
///
/// Near-vertical normals use the X axis; everything else takes
/// `Y x normal`. Degenerate (zero) normals fall back to the X axis too.
pub fn tangent_from_normal(normal: &Vec3) -> Vec4 {
    if normal.y.abs() > 0.9 {
        return Vec4::new(1.0, 0.0, 0.0, 1.0);
    }
    let right = Vec3::y().cross(normal);
    match right.try_normalize(f32::EPSILON) {
        Some(right) => Vec4::new(right.x, right.y, right.z, 1.0),
        None => Vec4::new(1.0, 0.0, 0.0, 1.0),
    }
}

/// Append the raw components of a vector to a byte buffer (native endianness).
pub(crate) fn write_components<const N: usize>(
    out: &mut Vec<u8>,
    value: &nalgebra::SVector<f32, N>,
) {
    out.extend_from_slice(bytemuck::cast_slice(value.as_slice()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tangent_for_up_normal() {
        let t = tangent_from_normal(&Vec3::y());
        assert_eq!(t, Vec4::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_tangent_is_perpendicular() {
        let n = Vec3::new(0.0, 0.0, 1.0);
        let t = tangent_from_normal(&n);
        assert!(t.xyz().dot(&n).abs() < 1e-6);
        assert!((t.xyz().norm() - 1.0).abs() < 1e-6);
        assert_eq!(t.w, 1.0);
    }

    #[test]
    fn test_write_components() {
        let mut out = Vec::new();
        write_components(&mut out, &Vec2::new(1.0, 2.0));
        assert_eq!(out.len(), 8);
        assert_eq!(&out[0..4], &1.0f32.to_ne_bytes());
        assert_eq!(&out[4..8], &2.0f32.to_ne_bytes());
    }
}
