use cgmath::{InnerSpace, Matrix4, Rad, Vector3};
use rand::Rng;
use wgpu::Device;

use crate::content;
use crate::gfx::camera::camera_utils::CameraManager;
use crate::gfx::geometry::{generate_box, generate_ring, generate_sphere};
use crate::gfx::picking::SphereBound;
use crate::gfx::scene::body::{Body, BodyKind, Mesh};
use crate::motion::{BodyMotion, DriftPath, PlanetOrbit, ProbeOrbit};

/// Ring radii relative to the planet's size.
const RING_INNER: f32 = 1.4;
const RING_OUTER: f32 = 2.2;
/// Slight ring tilt so it catches the light.
const RING_TILT: f32 = 0.3;

/// Main scene: camera plus every body in the solar system, including the
/// hand-cursor glyph.
pub struct Scene {
    pub camera_manager: CameraManager,
    pub bodies: Vec<Body>,
    cursor_index: Option<usize>,
}

impl Scene {
    /// Creates an empty scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            bodies: Vec::new(),
            cursor_index: None,
        }
    }

    /// Build the solar system from the content data: sun, planets (plus
    /// rings), project probes, interstellar drifters, and the cursor glyph.
    pub fn populate(&mut self, rng: &mut impl Rng) {
        let sphere = generate_sphere(32, 24);

        let mut sun = Body::new("Sun", BodyKind::Sun, Mesh::from_geometry(&sphere));
        sun.transform = Matrix4::from_scale(5.0);
        sun.color = [1.0, 0.8, 0.3];
        sun.emissive = 1.0;
        sun.bounding_radius = 5.0;
        self.bodies.push(sun);

        for planet in content::planets() {
            let orbit = PlanetOrbit::new(planet.distance, planet.speed, rng);

            let mut body = Body::new(planet.name, BodyKind::Planet, Mesh::from_geometry(&sphere));
            body.color = planet.color;
            body.emissive = 0.2;
            body.bounding_radius = planet.size;
            body.motion = BodyMotion::Orbit(orbit);
            body.payload = Some(planet.clone());
            self.bodies.push(body);

            if planet.ring {
                let ring_geometry = generate_ring(
                    planet.size * RING_INNER,
                    planet.size * RING_OUTER,
                    48,
                );
                let mut ring = Body::new(
                    format!("{} ring", planet.name),
                    BodyKind::Ring,
                    Mesh::from_geometry(&ring_geometry),
                );
                ring.color = planet.color;
                ring.emissive = 0.3;
                // Same orbit parameters, so the ring tracks its planet.
                ring.motion = BodyMotion::Orbit(PlanetOrbit { spin_rate: 0.0, ..orbit });
                self.bodies.push(ring);
            }
        }

        let probe_geometry = generate_box(0.8, 0.3, 1.2);
        for probe in content::probes() {
            let mut body = Body::new(probe.name, BodyKind::Probe, Mesh::from_geometry(&probe_geometry));
            body.color = probe.color;
            body.emissive = 0.5;
            body.bounding_radius = 2.0;
            body.motion = BodyMotion::Probe(ProbeOrbit::new(
                probe.distance,
                probe.speed,
                rng.random_range(0.0..std::f32::consts::TAU),
            ));
            self.bodies.push(body);
        }

        for drifter in content::drifters() {
            let mut body = Body::new(drifter.name, BodyKind::Drifter, Mesh::from_geometry(&sphere));
            body.color = match drifter.kind {
                content::DrifterKind::Comet => [0.4, 0.6, 1.0],
                content::DrifterKind::Artifact => [0.95, 0.45, 0.7],
            };
            body.emissive = 0.8;
            body.transform = Matrix4::from_scale(0.6);
            body.bounding_radius = 0.6;
            body.motion = BodyMotion::Drift(DriftPath::new(drifter.trajectory));
            self.bodies.push(body);
        }

        let mut cursor = Body::new(
            "Hand cursor",
            BodyKind::Cursor,
            Mesh::from_geometry(&generate_ring(0.5, 0.6, 32)),
        );
        cursor.color = [1.0, 1.0, 1.0];
        cursor.emissive = 1.0;
        cursor.visible = false;
        self.cursor_index = Some(self.bodies.len());
        self.bodies.push(cursor);
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Advance every body's motion by `dt` seconds. `now` is the wall clock
    /// used by the probe launch timers; `time_speed` the shared dilation
    /// scalar.
    pub fn advance(&mut self, dt: f32, now: f32, time_speed: f32) {
        for body in &mut self.bodies {
            match &mut body.motion {
                BodyMotion::Fixed => {}
                BodyMotion::Orbit(orbit) => {
                    orbit.advance(dt, time_speed);
                    let scale = body.bounding_radius.max(f32::EPSILON);
                    body.transform = Matrix4::from_translation(orbit.position())
                        * Matrix4::from_angle_x(Rad(if body.kind == BodyKind::Ring {
                            RING_TILT
                        } else {
                            0.0
                        }))
                        * Matrix4::from_angle_y(Rad(orbit.spin))
                        * if body.kind == BodyKind::Ring {
                            Matrix4::from_scale(1.0)
                        } else {
                            Matrix4::from_scale(scale)
                        };
                }
                BodyMotion::Probe(probe) => {
                    probe.advance(dt, now, time_speed);
                    body.emissive = if probe.is_launching() { 1.2 } else { 0.5 };
                    body.transform = Matrix4::from_translation(probe.position())
                        * orientation_along(probe.heading_target() - probe.position());
                }
                BodyMotion::Drift(drift) => {
                    drift.advance(dt, time_speed);
                    body.transform = Matrix4::from_translation(drift.position())
                        * Matrix4::from_angle_x(Rad(drift.tumble.0))
                        * Matrix4::from_angle_y(Rad(drift.tumble.1))
                        * Matrix4::from_scale(0.6);
                }
            }
        }
    }

    /// Bounding spheres of the gesture-selectable bodies (tagged planets).
    pub fn selectable_bounds(&self) -> impl Iterator<Item = (usize, SphereBound)> + '_ {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| body.payload.is_some())
            .map(|(i, body)| (i, body.bound()))
    }

    /// Bounding spheres of the launchable probes (mouse-pick targets).
    pub fn probe_bounds(&self) -> impl Iterator<Item = (usize, SphereBound)> + '_ {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| body.kind == BodyKind::Probe)
            .map(|(i, body)| (i, body.bound()))
    }

    /// Begin a launch on the probe at `body_index`. Returns true when a new
    /// launch actually started.
    pub fn launch_probe(&mut self, body_index: usize, now: f32) -> bool {
        match self.bodies.get_mut(body_index) {
            Some(Body {
                motion: BodyMotion::Probe(probe),
                ..
            }) => probe.launch(now),
            _ => false,
        }
    }

    /// Highlight exactly the named body (hover feedback), clearing the rest.
    pub fn set_highlight(&mut self, name: Option<&str>) {
        for body in &mut self.bodies {
            body.highlight = name == Some(body.name.as_str());
        }
    }

    /// Move the cursor glyph, orienting its ring to face the camera.
    pub fn place_cursor(&mut self, position: Vector3<f32>, visible: bool) {
        let eye = self.camera_manager.camera.eye;
        let Some(index) = self.cursor_index else {
            return;
        };
        let cursor = &mut self.bodies[index];
        cursor.visible = visible;
        if visible {
            let to_eye = eye - position;
            cursor.transform = Matrix4::from_translation(position)
                * orientation_facing(to_eye)
                * Matrix4::from_scale(2.0);
        }
    }

    /// Whether the cursor glyph is currently pinch-colored.
    pub fn tint_cursor(&mut self, pinching: bool) {
        if let Some(index) = self.cursor_index {
            let cursor = &mut self.bodies[index];
            cursor.color = if pinching {
                [0.13, 0.83, 0.93]
            } else {
                [1.0, 1.0, 1.0]
            };
        }
    }

    /// World position of the body carrying the given planet payload.
    pub fn planet_position(&self, planet: &crate::content::PlanetData) -> Option<Vector3<f32>> {
        self.bodies
            .iter()
            .find(|body| {
                body.payload
                    .as_ref()
                    .map_or(false, |p| p.section == planet.section)
            })
            .map(|body| body.position())
    }

    pub fn init_gpu_resources(&mut self, device: &Device, layout: &wgpu::BindGroupLayout) {
        for body in &mut self.bodies {
            body.init_gpu_resources(device, layout);
        }
    }

    pub fn write_uniforms(&self, queue: &wgpu::Queue) {
        for body in &self.bodies {
            body.write_uniform(queue);
        }
    }
}

/// Rotation orienting a body's +Z axis along `direction` of travel.
fn orientation_along(direction: Vector3<f32>) -> Matrix4<f32> {
    basis_from_forward(direction)
}

/// Rotation orienting a flat ring's +Y normal toward `direction`.
fn orientation_facing(direction: Vector3<f32>) -> Matrix4<f32> {
    let normal = safe_normalize(direction, Vector3::unit_y());
    let reference = if normal.y.abs() > 0.99 {
        Vector3::unit_x()
    } else {
        Vector3::unit_y()
    };
    let tangent = normal.cross(reference).normalize();
    let bitangent = tangent.cross(normal);
    Matrix4::from_cols(
        tangent.extend(0.0),
        normal.extend(0.0),
        bitangent.extend(0.0),
        Vector3::new(0.0, 0.0, 0.0).extend(1.0),
    )
}

fn basis_from_forward(direction: Vector3<f32>) -> Matrix4<f32> {
    let forward = safe_normalize(direction, Vector3::unit_z());
    let reference = if forward.y.abs() > 0.99 {
        Vector3::unit_x()
    } else {
        Vector3::unit_y()
    };
    let right = reference.cross(forward).normalize();
    let up = forward.cross(right);
    Matrix4::from_cols(
        right.extend(0.0),
        up.extend(0.0),
        forward.extend(0.0),
        Vector3::new(0.0, 0.0, 0.0).extend(1.0),
    )
}

fn safe_normalize(v: Vector3<f32>, fallback: Vector3<f32>) -> Vector3<f32> {
    if v.magnitude2() > 1e-12 {
        v.normalize()
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, OrbitCamera};
    use crate::gfx::picking::{pick_nearest, Ray};
    use cgmath::Zero;
    use rand::SeedableRng;

    fn test_scene() -> Scene {
        let camera = OrbitCamera::new(90.0, 0.0, 1.1, Vector3::zero(), 1.5);
        let controller = CameraController::new(0.005, 0.1);
        let mut scene = Scene::new(CameraManager::new(camera, controller));
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        scene.populate(&mut rng);
        scene
    }

    #[test]
    fn populate_tags_exactly_the_planets() {
        let scene = test_scene();
        let tagged = scene.selectable_bounds().count();
        assert_eq!(tagged, crate::content::planets().len());

        // Sun, rings, probes, drifters and the cursor carry no payload.
        for body in &scene.bodies {
            if body.payload.is_some() {
                assert_eq!(body.kind, BodyKind::Planet);
            }
        }
    }

    #[test]
    fn advance_moves_planets_onto_their_orbits() {
        let mut scene = test_scene();
        scene.advance(0.5, 0.5, 1.0);

        for body in &scene.bodies {
            if let BodyMotion::Orbit(orbit) = &body.motion {
                if body.kind == BodyKind::Planet {
                    let p = body.position();
                    let r = (p.x * p.x + p.z * p.z).sqrt();
                    assert!((r - orbit.radius).abs() < 1e-3);
                }
            }
        }
    }

    #[test]
    fn ring_tracks_its_planet() {
        let mut scene = test_scene();
        scene.advance(1.0, 1.0, 1.0);

        let saturn = scene
            .bodies
            .iter()
            .find(|b| b.kind == BodyKind::Planet && b.payload.as_ref().map_or(false, |p| p.ring))
            .expect("a ringed planet exists");
        let ring = scene
            .bodies
            .iter()
            .find(|b| b.kind == BodyKind::Ring)
            .expect("its ring exists");

        assert!((saturn.position() - ring.position()).magnitude() < 1e-3);
    }

    #[test]
    fn raycast_through_a_planet_returns_its_payload() {
        let mut scene = test_scene();
        scene.advance(0.01, 0.01, 1.0);

        let target = scene
            .bodies
            .iter()
            .find(|b| b.kind == BodyKind::Planet)
            .unwrap();
        let position = target.position();
        let ray = Ray::new(position - Vector3::new(0.0, 0.0, 200.0), Vector3::unit_z());

        let hit = pick_nearest(&ray, scene.selectable_bounds()).expect("planet hit");
        assert!(scene.bodies[hit.body_index].payload.is_some());
    }

    #[test]
    fn launch_probe_only_affects_probes() {
        let mut scene = test_scene();
        let probe_index = scene.probe_bounds().next().unwrap().0;
        assert!(scene.launch_probe(probe_index, 0.0));
        assert!(!scene.launch_probe(probe_index, 0.5), "not re-entrant");
        assert!(!scene.launch_probe(0, 0.0), "the sun does not launch");
    }

    #[test]
    fn highlight_is_exclusive() {
        let mut scene = test_scene();
        let name = scene.bodies[1].name.clone();
        scene.set_highlight(Some(&name));
        let lit = scene.bodies.iter().filter(|b| b.highlight).count();
        assert_eq!(lit, 1);

        scene.set_highlight(None);
        assert!(scene.bodies.iter().all(|b| !b.highlight));
    }
}
