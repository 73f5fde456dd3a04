use std::sync::Arc;
use std::time::Instant;

use cgmath::{Vector3, Zero};
use rand::Rng;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::content::PlanetData;
use crate::control::{
    cursor::{CursorConfig, CursorPresenter},
    hand::{GestureClassifier, GestureConfig, HandStateSlot},
    interaction::{InteractionConfig, InteractionController},
};
use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager, orbit_camera::OrbitCamera,
    },
    picking::{pick_nearest, ray_through_ndc},
    render_engine::RenderEngine,
    scene::Scene,
};
use crate::ui::{draw_overlay, OverlayState, UiManager};

/// Time dilation applied while an info card is open.
const FOCUSED_TIME_SPEED: f32 = 0.1;
/// Idle camera azimuth drift in radians per second.
const AUTO_ROTATE_RATE: f32 = 0.063;
/// Camera target easing rate toward a selected planet (per second).
const TARGET_EASE_RATE: f32 = 5.0;
/// Camera shake decay rate; a launch jolt dies out in about half a second.
const SHAKE_DECAY: f32 = 2.0;
/// Pixel slop under which a mouse press-release counts as a click.
const CLICK_SLOP_PX: f64 = 5.0;

// Application callback types
pub type SelectCallback = Box<dyn Fn(&PlanetData)>;
pub type HoverCallback = Box<dyn Fn(Option<&str>)>;
pub type LaunchCallback = Box<dyn Fn()>;

pub struct OrreryApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct MouseState {
    position: (f64, f64),
    pressed_at: Option<(f64, f64)>,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    overlay: OverlayState,

    hand_slot: HandStateSlot,
    interaction: InteractionController<Arc<PlanetData>>,
    cursor: CursorPresenter,

    on_select: Option<SelectCallback>,
    on_hover_change: Option<HoverCallback>,
    on_launch: Option<LaunchCallback>,

    started: Instant,
    last_frame: Instant,
    shake: f32,
    mouse: MouseState,
}

impl OrreryApp {
    /// Create a new Orrery application with default settings
    pub async fn new() -> Self {
        env_logger::try_init().ok();

        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let camera = OrbitCamera::new(100.0, 0.0, 1.15, Vector3::zero(), 1.5);
        let controller = CameraController::new(0.005, 0.1);

        let camera_manager = CameraManager::new(camera, controller);
        let mut scene = Scene::new(camera_manager);
        scene.populate(&mut rand::rng());

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                overlay: OverlayState::new(),
                hand_slot: HandStateSlot::new(),
                interaction: InteractionController::new(InteractionConfig::default()),
                cursor: CursorPresenter::new(CursorConfig::default()),
                on_select: None,
                on_hover_change: None,
                on_launch: None,
                started: Instant::now(),
                last_frame: Instant::now(),
                shake: 0.0,
                mouse: MouseState {
                    position: (0.0, 0.0),
                    pressed_at: None,
                },
            },
        }
    }

    /// Handle for the external landmark detector. Clone it into the capture
    /// thread or callback; every frame result pushed through it updates the
    /// shared hand state the render loop reads.
    pub fn hand_input(&self) -> GestureClassifier {
        GestureClassifier::new(self.app_state.hand_slot.clone(), GestureConfig::default())
    }

    /// Same, with tuned gesture thresholds.
    pub fn hand_input_with_config(&self, config: GestureConfig) -> GestureClassifier {
        GestureClassifier::new(self.app_state.hand_slot.clone(), config)
    }

    /// Called once per confirmed planet selection.
    pub fn set_on_select<F>(&mut self, callback: F)
    where
        F: Fn(&PlanetData) + 'static,
    {
        self.app_state.on_select = Some(Box::new(callback));
    }

    /// Called on hover transitions (advisory, UI-only).
    pub fn set_on_hover_change<F>(&mut self, callback: F)
    where
        F: Fn(Option<&str>) + 'static,
    {
        self.app_state.on_hover_change = Some(Box::new(callback));
    }

    /// Called once per probe launch.
    pub fn set_on_launch<F>(&mut self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.app_state.on_launch = Some(Box::new(callback));
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl AppState {
    /// One render tick: read the hand snapshot once, raycast, step the
    /// interaction machine, advance motion, then draw.
    fn tick(&mut self) {
        let now = Instant::now();
        // Long stalls (window drags, debugger pauses) must not teleport orbits.
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;
        let elapsed = (now - self.started).as_secs_f32();

        let hand = self.hand_slot.snapshot();

        // Cursor glyph and the gesture raycast share one unprojection.
        let hit = match self.cursor.tick(&hand, &self.scene.camera_manager.camera) {
            Some(ray) => pick_nearest(&ray, self.scene.selectable_bounds())
                .map(|hit| &self.scene.bodies[hit.body_index])
                .and_then(|body| {
                    body.payload
                        .clone()
                        .map(|payload| (body.name.clone(), payload))
                }),
            None => None,
        };

        let hover_name = hit.as_ref().map(|(name, _)| name.clone());
        if self.cursor.set_hover(hover_name) {
            self.scene.set_highlight(self.cursor.hovered());
            self.overlay.hovered = self.cursor.hovered().map(str::to_owned);
            if let Some(callback) = &self.on_hover_change {
                callback(self.cursor.hovered());
            }
        }

        let hit_payload = hit.map(|(_, payload)| payload);
        let selection = self.interaction.tick(
            &hand,
            hit_payload.as_ref(),
            &mut self.scene.camera_manager.camera,
        );
        if let Some(planet) = selection {
            self.select_planet(planet);
        }

        // Idle drift, suppressed while a selection exists or any pinch or
        // mouse drag is steering the camera.
        let rig: &mut OrbitCamera = &mut self.scene.camera_manager.camera;
        if self.overlay.selected.is_none()
            && !self.interaction.is_engaged()
            && !self.scene.camera_manager.controller.is_rotating()
        {
            use crate::control::interaction::CameraRig;
            let azimuth = rig.azimuthal_angle() + AUTO_ROTATE_RATE * dt;
            rig.set_azimuthal_angle(azimuth);
        }

        self.scene.advance(dt, elapsed, self.overlay.time_speed);

        // Ease the camera target toward the selected planet while the card
        // is open; a free camera otherwise.
        if let Some(selected) = &self.overlay.selected {
            if let Some(position) = self.scene.planet_position(selected) {
                let camera = &mut self.scene.camera_manager.camera;
                let target = camera.target;
                let eased = target + (position - target) * (TARGET_EASE_RATE * dt).min(1.0);
                camera.set_target(eased);
            }
        }

        self.scene
            .place_cursor(self.cursor.position(), self.cursor.is_visible());
        self.scene.tint_cursor(hand.is_visible && hand.is_pinching);
        self.overlay.hand_visible = hand.is_visible;

        // Launch jolt: decaying random jitter on the camera.
        self.shake = (self.shake - SHAKE_DECAY * dt).max(0.0);
        self.scene.camera_manager.camera.shake = if self.shake > 0.0 {
            let mut rng = rand::rng();
            Vector3::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            ) * self.shake
                * 0.5
        } else {
            Vector3::zero()
        };
    }

    fn select_planet(&mut self, planet: Arc<PlanetData>) {
        log::info!("selected planet: {}", planet.name);
        if let Some(callback) = &self.on_select {
            callback(&planet);
        }
        self.overlay.selected = Some(planet);
        self.overlay.time_speed = FOCUSED_TIME_SPEED;
    }

    fn close_card(&mut self) {
        self.overlay.selected = None;
        self.overlay.time_speed = 1.0;
    }

    /// Mouse click fallback: select planets, launch probes.
    fn handle_click(&mut self, x: f64, y: f64) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }

        let ndc_x = (2.0 * x as f32) / size.width as f32 - 1.0;
        let ndc_y = 1.0 - (2.0 * y as f32) / size.height as f32;
        let ray = ray_through_ndc(ndc_x, ndc_y, &self.scene.camera_manager.camera);

        if let Some(hit) = pick_nearest(&ray, self.scene.selectable_bounds()) {
            if let Some(payload) = self.scene.bodies[hit.body_index].payload.clone() {
                self.select_planet(payload);
            }
            return;
        }

        if let Some(hit) = pick_nearest(&ray, self.scene.probe_bounds()) {
            let elapsed = (Instant::now() - self.started).as_secs_f32();
            if self.scene.launch_probe(hit.body_index, elapsed) {
                log::info!("probe launch: {}", self.scene.bodies[hit.body_index].name);
                self.shake = 1.0;
                if let Some(callback) = &self.on_launch {
                    callback();
                }
            }
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("Orrery")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();
            self.scene
                .camera_manager
                .camera
                .resize_projection(width, height);

            let window_clone = window_handle.clone();
            let renderer = match pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height).await
            }) {
                Ok(renderer) => renderer,
                Err(err) => {
                    log::error!("failed to initialize renderer: {err}");
                    event_loop.exit();
                    return;
                }
            };

            self.scene
                .init_gpu_resources(renderer.device(), renderer.body_layout());

            let mut ui_manager = UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            );
            ui_manager.update_display_size(width, height);

            self.ui_manager = Some(ui_manager);
            self.render_engine = Some(renderer);
            self.last_frame = Instant::now();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if self.render_engine.is_none() {
            return;
        }

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                // UI consumed the event - request redraw and return early
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match key_code {
                winit::keyboard::KeyCode::Escape => {
                    if self.overlay.selected.is_some() {
                        self.close_card();
                    } else {
                        event_loop.exit();
                    }
                }
                _ => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.position = (position.x, position.y);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    self.mouse.pressed_at = Some(self.mouse.position);
                }
                ElementState::Released => {
                    if let Some((px, py)) = self.mouse.pressed_at.take() {
                        let (x, y) = self.mouse.position;
                        let moved = ((x - px).powi(2) + (y - py).powi(2)).sqrt();
                        if moved < CLICK_SLOP_PX {
                            self.handle_click(x, y);
                        }
                    }
                }
            },
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.tick();

                self.scene.update();
                let camera_uniform = self.scene.camera_manager.camera.uniform;

                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.update(camera_uniform);
                    self.scene.write_uniforms(render_engine.queue());
                }

                if let (Some(render_engine), Some(ui_manager), Some(window)) = (
                    self.render_engine.as_ref(),
                    self.ui_manager.as_mut(),
                    self.window.as_ref(),
                ) {
                    let overlay = &mut self.overlay;
                    render_engine.render_frame_with_ui(
                        &self.scene,
                        |device, queue, encoder, color_attachment| {
                            ui_manager.draw(
                                device,
                                queue,
                                encoder,
                                window,
                                color_attachment,
                                |ui| draw_overlay(ui, overlay),
                            );
                        },
                    );
                }

                if self.overlay.close_requested {
                    self.overlay.close_requested = false;
                    self.close_card();
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Don't steer the camera from the mouse while the UI wants input or
        // a pinch cycle already drives it.
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            let io = ui_manager.context.io();
            if io.want_capture_mouse || io.want_capture_keyboard {
                return;
            }
        }
        if self.interaction.is_engaged() {
            return;
        }

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
