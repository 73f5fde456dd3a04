//! # Cursor Picking
//!
//! Raycasting against the scene's sphere-bounded bodies. The hand cursor
//! and the mouse both reduce to a normalized-device-coordinate point that is
//! unprojected into a world-space ray; the nearest intersected body wins.

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::gfx::camera::orbit_camera::OrbitCamera;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Bounding sphere; every pickable body in this scene is sphere-like.
#[derive(Debug, Clone, Copy)]
pub struct SphereBound {
    pub center: Vector3<f32>,
    pub radius: f32,
}

impl SphereBound {
    pub fn new(center: Vector3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Returns the distance to the nearest intersection point in front of
    /// the ray origin, or None if the ray misses.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let to_center = self.center - ray.origin;
        let projected = to_center.dot(ray.direction);
        let closest_sq = to_center.magnitude2() - projected * projected;
        let radius_sq = self.radius * self.radius;
        if closest_sq > radius_sq {
            return None;
        }

        let half_chord = (radius_sq - closest_sq).sqrt();
        let t_near = projected - half_chord;
        let t_far = projected + half_chord;
        if t_far < 0.0 {
            None
        } else if t_near >= 0.0 {
            Some(t_near)
        } else {
            Some(t_far)
        }
    }
}

/// Result of a picking query
#[derive(Debug, Clone, Copy)]
pub struct PickHit {
    /// Index of the picked body in the scene
    pub body_index: usize,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// Unproject a normalized-device-coordinate point into a world-space ray
/// through the camera.
pub fn ray_through_ndc(ndc_x: f32, ndc_y: f32, camera: &OrbitCamera) -> Ray {
    let eye = cgmath::Point3::from_vec(camera.eye);
    let target = cgmath::Point3::from_vec(camera.target);
    let view_matrix = Matrix4::look_at_rh(eye, target, camera.up);
    let proj_matrix = cgmath::perspective(camera.fovy, camera.aspect, camera.znear, camera.zfar);

    let view_proj = proj_matrix * view_matrix;
    let inv_view_proj = view_proj.invert().unwrap_or_else(Matrix4::identity);

    // Near and far plane points in NDC, back to world space.
    let near_point = inv_view_proj * Vector4::new(ndc_x, ndc_y, -1.0, 1.0);
    let far_point = inv_view_proj * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);

    let near_3d = near_point.truncate() / near_point.w;
    let far_3d = far_point.truncate() / far_point.w;

    Ray::new(near_3d, far_3d - near_3d)
}

/// Pick the nearest sphere along the ray from an iterator of indexed bounds.
/// Callers filter to the set they care about (selectable planets, probes).
pub fn pick_nearest(
    ray: &Ray,
    bounds: impl Iterator<Item = (usize, SphereBound)>,
) -> Option<PickHit> {
    let mut closest: Option<PickHit> = None;

    for (body_index, bound) in bounds {
        if let Some(distance) = bound.intersect_ray(ray) {
            if closest.map_or(true, |hit| distance < hit.distance) {
                closest = Some(PickHit {
                    body_index,
                    distance,
                    point: ray.point_at(distance),
                });
            }
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Zero;

    #[test]
    fn test_ray_sphere_intersection() {
        let sphere = SphereBound::new(Vector3::new(0.0, 0.0, 10.0), 2.0);

        // Ray hitting the sphere head-on
        let ray = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));
        let t = sphere.intersect_ray(&ray).unwrap();
        assert!((t - 8.0).abs() < 1e-4);

        // Ray missing the sphere
        let ray_miss = Ray::new(Vector3::zero(), Vector3::new(0.0, 1.0, 0.0));
        assert!(sphere.intersect_ray(&ray_miss).is_none());

        // Sphere entirely behind the origin
        let behind = SphereBound::new(Vector3::new(0.0, 0.0, -10.0), 2.0);
        assert!(behind.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_ray_from_inside_sphere() {
        let sphere = SphereBound::new(Vector3::zero(), 5.0);
        let ray = Ray::new(Vector3::zero(), Vector3::new(1.0, 0.0, 0.0));
        let t = sphere.intersect_ray(&ray).unwrap();
        assert!((t - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_nearest_hit_wins() {
        let ray = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));
        let bounds = vec![
            (0, SphereBound::new(Vector3::new(0.0, 0.0, 30.0), 1.0)),
            (1, SphereBound::new(Vector3::new(0.0, 0.0, 10.0), 1.0)),
            (2, SphereBound::new(Vector3::new(0.0, 50.0, 10.0), 1.0)), // miss
        ];

        let hit = pick_nearest(&ray, bounds.into_iter()).unwrap();
        assert_eq!(hit.body_index, 1);
        assert!((hit.distance - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_center_ndc_ray_points_at_target() {
        let camera = OrbitCamera::new(
            50.0,
            0.4,
            1.2,
            Vector3::new(0.0, 0.0, 0.0),
            16.0 / 9.0,
        );
        let ray = ray_through_ndc(0.0, 0.0, &camera);

        let to_target = (camera.target - camera.eye).normalize();
        assert!(ray.direction.dot(to_target) > 0.999);
    }
}
