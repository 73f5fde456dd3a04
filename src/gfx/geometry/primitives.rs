//! # Primitive Shape Generation
//!
//! Generators for the shapes the solar system is assembled from: spheres
//! for sun and planets, flat rings for planet rings and the cursor glyph,
//! boxes for probe hulls. All shapes are generated with outward normals.

use super::GeometryData;
use std::f32::consts::{PI, TAU};

/// Generate a UV sphere of radius 1.0 centered at the origin.
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * TAU / long_segs as f32;
            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            data.vertices.push([x, y, z]);
            // Unit sphere: the position is its own normal.
            data.normals.push([x, y, z]);
        }
    }

    let stride = long_segs + 1;
    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let a = lat * stride + long;
            let b = a + stride;

            data.indices
                .extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }

    data
}

/// Generate a flat annulus in the XZ plane with its normal along +Y.
///
/// Used for planet rings and the hand-cursor glyph.
pub fn generate_ring(inner_radius: f32, outer_radius: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let segs = segments.max(3);

    for i in 0..=segs {
        let angle = i as f32 * TAU / segs as f32;
        let (sin, cos) = angle.sin_cos();

        data.vertices.push([cos * inner_radius, 0.0, sin * inner_radius]);
        data.vertices.push([cos * outer_radius, 0.0, sin * outer_radius]);
        data.normals.push([0.0, 1.0, 0.0]);
        data.normals.push([0.0, 1.0, 0.0]);
    }

    for i in 0..segs {
        let a = i * 2;
        data.indices
            .extend_from_slice(&[a, a + 1, a + 2, a + 2, a + 1, a + 3]);
    }

    data
}

/// Generate a box with the given extents, centered at the origin.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);

    // (normal, four corners) per face, counter-clockwise from outside.
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [[-hw, -hh, hd], [hw, -hh, hd], [hw, hh, hd], [-hw, hh, hd]],
        ),
        (
            [0.0, 0.0, -1.0],
            [[-hw, -hh, -hd], [-hw, hh, -hd], [hw, hh, -hd], [hw, -hh, -hd]],
        ),
        (
            [-1.0, 0.0, 0.0],
            [[-hw, -hh, -hd], [-hw, -hh, hd], [-hw, hh, hd], [-hw, hh, -hd]],
        ),
        (
            [1.0, 0.0, 0.0],
            [[hw, -hh, hd], [hw, -hh, -hd], [hw, hh, -hd], [hw, hh, hd]],
        ),
        (
            [0.0, 1.0, 0.0],
            [[-hw, hh, hd], [hw, hh, hd], [hw, hh, -hd], [-hw, hh, -hd]],
        ),
        (
            [0.0, -1.0, 0.0],
            [[-hw, -hh, -hd], [hw, -hh, -hd], [hw, -hh, hd], [-hw, -hh, hd]],
        ),
    ];

    for (normal, corners) in faces {
        let base = data.vertices.len() as u32;
        for corner in corners {
            data.vertices.push(corner);
            data.normals.push(normal);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_vertices_sit_on_the_unit_sphere() {
        let sphere = generate_sphere(16, 12);
        for v in &sphere.vertices {
            let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.indices.len() as u32, 16 * 12 * 6);
    }

    #[test]
    fn ring_radii_are_respected() {
        let ring = generate_ring(1.4, 2.2, 32);
        for (i, v) in ring.vertices.iter().enumerate() {
            let r = (v[0] * v[0] + v[2] * v[2]).sqrt();
            let expected = if i % 2 == 0 { 1.4 } else { 2.2 };
            assert!((r - expected).abs() < 1e-4);
            assert_eq!(v[1], 0.0);
        }
    }

    #[test]
    fn box_has_24_vertices_and_12_triangles() {
        let cube = generate_box(1.0, 1.0, 1.0);
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
    }
}
