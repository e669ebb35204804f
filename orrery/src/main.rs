//! Orrery - animated solar system viewer
//!
//! Controls:
//! - Left drag: Orbit camera
//! - Right drag: Pan
//! - Scroll: Zoom

use common::{Camera3D, GraphicsContext};
use glam::Vec3;
use orrery::config::CameraConfig;
use orrery::renderer::Renderer;
use orrery::{OrreryError, SceneConfig, SolarSystem};
use winit::{
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Orbit,
    Pan,
}

struct App {
    ctx: GraphicsContext,
    renderer: Renderer,
    solar_system: SolarSystem,
    camera: Camera3D,
    controls: CameraConfig,

    // Input state
    drag: Option<Drag>,
    last_mouse_pos: Option<(f64, f64)>,
}

impl App {
    fn new(ctx: GraphicsContext, config: &SceneConfig) -> Self {
        let solar_system = SolarSystem::default();
        let renderer = Renderer::new(&ctx, &solar_system, config);

        let cam = &config.camera;
        let mut camera = Camera3D::new(ctx.aspect_ratio());
        camera.fov = cam.fov_degrees.to_radians();
        camera.near = cam.near;
        camera.far = cam.far;
        camera.target = Vec3::from(cam.target);
        let camera = camera
            .look_from(Vec3::from(cam.position))
            .with_distance_limits(cam.min_distance, cam.max_distance)
            .with_damping(cam.damping);

        Self {
            ctx,
            renderer,
            solar_system,
            camera,
            controls: cam.clone(),
            drag: None,
            last_mouse_pos: None,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        // Minimized: keep the surface and depth buffer at their last size
        if !self.ctx.resize(new_size) {
            return;
        }
        self.camera.update_aspect_ratio(self.ctx.aspect_ratio());
        let size = self.ctx.size;
        self.renderer.resize(&self.ctx.device, size.width, size.height);
    }

    /// One frame: advance the orbits by a tick, then settle the camera
    fn update(&mut self) {
        self.solar_system.tick();
        self.camera.update();
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .update(&self.ctx.queue, &self.camera, &self.solar_system);

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(&mut encoder, &view);

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let drag = match button {
            MouseButton::Left => Drag::Orbit,
            MouseButton::Right => Drag::Pan,
            _ => return,
        };

        if state == ElementState::Pressed {
            self.drag = Some(drag);
        } else if self.drag == Some(drag) {
            self.drag = None;
            self.last_mouse_pos = None;
        }
    }

    fn handle_mouse_move(&mut self, x: f64, y: f64) {
        let Some(drag) = self.drag else {
            return;
        };

        if let Some((last_x, last_y)) = self.last_mouse_pos {
            let dx = (x - last_x) as f32;
            let dy = (y - last_y) as f32;
            match drag {
                Drag::Orbit => {
                    let speed = self.controls.rotate_speed;
                    self.camera.orbit(-dx * speed, dy * speed);
                }
                Drag::Pan => {
                    let speed = self.controls.pan_speed;
                    self.camera.pan(dx * speed, dy * speed);
                }
            }
        }
        self.last_mouse_pos = Some((x, y));
    }

    fn handle_scroll(&mut self, delta: f32) {
        self.camera
            .zoom(delta * self.camera.distance * self.controls.zoom_speed);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), OrreryError> {
    let config = SceneConfig::from_env()?;

    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(
        &config.window.title,
        config.window.width,
        config.window.height,
    ))?;

    let mut app = App::new(ctx, &config);
    let mut frame_count = 0u32;
    let mut fps_timer = std::time::Instant::now();

    log::info!("Starting simulation");

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => app.resize(size),
                WindowEvent::MouseInput { state, button, .. } => {
                    app.handle_mouse_button(button, state);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    app.handle_mouse_move(position.x, position.y);
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                    };
                    app.handle_scroll(scroll);
                }
                WindowEvent::RedrawRequested => {
                    app.update();

                    match app.render() {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            app.resize(app.ctx.size)
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Out of GPU memory");
                            elwt.exit();
                        }
                        Err(e) => log::warn!("Render error: {e:?}"),
                    }

                    // FPS counter
                    frame_count += 1;
                    if fps_timer.elapsed().as_secs_f32() >= 2.0 {
                        let fps = frame_count as f32 / fps_timer.elapsed().as_secs_f32();
                        log::info!(
                            "FPS: {:.1} | Ticks: {} | Camera distance: {:.0}",
                            fps,
                            app.solar_system.ticks,
                            app.camera.distance
                        );
                        frame_count = 0;
                        fps_timer = std::time::Instant::now();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                app.ctx.window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
