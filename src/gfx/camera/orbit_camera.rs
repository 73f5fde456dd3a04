use cgmath::*;

use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use crate::control::interaction::CameraRig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Y-up orbit camera addressed by azimuthal and polar angles around a
/// look-at target. Polar is measured from the +Y pole, so `PI / 2` puts the
/// eye on the target's horizontal plane.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub azimuth: f32,
    pub polar: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    /// Transient view-space jolt (probe-launch shake); added to both eye and
    /// target so the look direction is preserved.
    pub shake: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye + self.shake);
        let target = Point3::from_vec(self.target + self.shake);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, azimuth: f32, polar: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            azimuth,
            polar,
            eye: Vector3::zero(), // Recalculated in `update()`.
            target,
            up: Vector3::unit_y(),
            shake: Vector3::zero(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: cgmath::Rad(std::f32::consts::PI / 3.6),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_target(&mut self, target: Vector3<f32>) {
        self.target = target;
        self.update();
    }

    /// Updates the eye after changing `distance`, `azimuth` or `polar`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.azimuth, self.polar, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn update_view_proj(&mut self) {
        let eye = self.eye + self.shake;
        self.uniform.view_position = [eye.x, eye.y, eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

/// The interaction state machine's seam. Angles land unmodified; the caller
/// pre-clamps polar, and azimuth is unbounded.
impl CameraRig for OrbitCamera {
    fn azimuthal_angle(&self) -> f32 {
        self.azimuth
    }

    fn polar_angle(&self) -> f32 {
        self.polar
    }

    fn set_azimuthal_angle(&mut self, radians: f32) {
        self.azimuth = radians;
        self.update();
    }

    fn set_polar_angle(&mut self, radians: f32) {
        self.polar = radians;
        self.update();
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: Some(10.0),
            max_distance: Some(300.0),
        }
    }
}

fn calculate_cartesian_eye_position(
    azimuth: f32,
    polar: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * polar.sin() * azimuth.sin(),
        distance * polar.cos(),
        distance * polar.sin() * azimuth.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn polar_half_pi_sits_on_the_horizontal_plane() {
        let camera = OrbitCamera::new(50.0, 0.0, FRAC_PI_2, Vector3::zero(), 1.0);
        assert!(camera.eye.y.abs() < 1e-4);
        assert!((camera.eye.magnitude() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn rig_angles_round_trip() {
        let mut camera = OrbitCamera::new(50.0, 0.3, 1.1, Vector3::zero(), 1.0);
        let rig: &mut dyn CameraRig = &mut camera;
        rig.set_azimuthal_angle(2.0);
        rig.set_polar_angle(0.7);
        assert_eq!(rig.azimuthal_angle(), 2.0);
        assert_eq!(rig.polar_angle(), 0.7);
    }

    #[test]
    fn distance_respects_bounds() {
        let mut camera = OrbitCamera::new(50.0, 0.0, 1.0, Vector3::zero(), 1.0);
        camera.set_distance(1.0);
        assert_eq!(camera.distance, 10.0);
        camera.set_distance(1e6);
        assert_eq!(camera.distance, 300.0);
    }
}
