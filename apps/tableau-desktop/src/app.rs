use crate::config::{AppConfig, WindowConfig};
use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;
use tableau_assets::{ImageCrateDecoder, ResourceRegistry};
use tableau_input::{InputSnapshot, InputSource};
use tableau_render::{DrawSubmitter, LightRig, SceneScript};
use tableau_render_wgpu::{FrameRecorder, TextureStore, WgpuRenderer};
use tableau_view::{FrameOutcome, ViewContext};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, DeviceId, ElementState, KeyEvent, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

/// Pixels of touchpad scroll treated as one wheel notch.
const PIXELS_PER_SCROLL_LINE: f64 = 40.0;

/// Unbounded pointer position built from raw mouse motion.
///
/// A grabbed cursor stops at the window edge (or, when locked, never moves),
/// so look input integrates relative motion instead of reading positions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct VirtualCursor {
    x: f64,
    y: f64,
}

impl VirtualCursor {
    fn advance(&mut self, dx: f64, dy: f64) -> (f64, f64) {
        self.x += dx;
        self.y += dy;
        (self.x, self.y)
    }
}

/// Window, device and everything that lives on it.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    textures: TextureStore,
    egui_ctx: egui::Context,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, window_config: &WindowConfig) -> anyhow::Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(event_loop.create_window(attrs).context("creating window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("creating surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no GPU adapter can present to this window")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("tableau_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("creating device")?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let textures = TextureStore::new(&device, &queue);
        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            &textures,
        );

        let egui_ctx = egui::Context::default();
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend, surface {surface_format:?}",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            textures,
            egui_ctx,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn grab_cursor(&self) {
        let window = &self.window;
        if let Err(e) = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        {
            tracing::warn!("cursor grab unavailable: {e}");
        }
        window.set_cursor_visible(false);
    }

    /// Draw the overlay on top of the already rendered scene.
    fn paint_overlay(
        &mut self,
        target: &wgpu::TextureView,
        hud: Option<&HudStats>,
        hide_cursor: bool,
    ) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if hide_cursor {
                ctx.set_cursor_icon(egui::CursorIcon::None);
            }
            if let Some(stats) = hud {
                draw_hud(ctx, stats);
            }
        });
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("overlay_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("overlay_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer.render(&mut pass, &paint_jobs, &screen);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

/// Numbers shown in the overlay, gathered before painting.
struct HudStats {
    position: glam::Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    projection: tableau_view::ProjectionMode,
    frame_ms: f32,
    textures: usize,
    materials: usize,
    draws: usize,
    lighting: bool,
}

fn draw_hud(ctx: &egui::Context, stats: &HudStats) {
    egui::Window::new("tableau")
        .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.label(format!(
                "Camera: ({:.2}, {:.2}, {:.2})",
                stats.position.x, stats.position.y, stats.position.z
            ));
            ui.label(format!(
                "Yaw {:.1}  Pitch {:.1}  Zoom {:.1}",
                stats.yaw, stats.pitch, stats.zoom
            ));
            ui.label(format!("Projection: {:?}", stats.projection));
            let fps = if stats.frame_ms > 0.0 {
                1000.0 / stats.frame_ms
            } else {
                0.0
            };
            ui.label(format!("{:.2} ms ({fps:.0} fps)", stats.frame_ms));
            ui.separator();
            ui.label(format!(
                "Textures {}  Materials {}  Draws {}",
                stats.textures, stats.materials, stats.draws
            ));
            ui.label(if stats.lighting { "Lighting on" } else { "Lighting off" });
            ui.separator();
            ui.small("WASD/QE: Move | Mouse: Look | Wheel: Zoom | P/O: Projection | F1: HUD");
        });
}

/// The desktop viewer: owns the view state, the resources and the scene, and
/// drives one frame per redraw.
pub struct App {
    config: AppConfig,
    view: ViewContext,
    input: InputSnapshot,
    registry: ResourceRegistry,
    lights: LightRig,
    scene: Box<dyn SceneScript>,
    recorder: FrameRecorder,
    started: Instant,
    show_hud: bool,
    focused: bool,
    cursor: VirtualCursor,
    gpu: Option<Gpu>,
}

impl App {
    pub fn new(config: AppConfig, scene: Box<dyn SceneScript>) -> Self {
        let lights = if config.lighting {
            LightRig::daylight()
        } else {
            LightRig::unlit()
        };
        Self {
            view: ViewContext::new(&config.view),
            input: InputSnapshot::new(config.window.width, config.window.height),
            registry: ResourceRegistry::new(),
            lights,
            scene,
            recorder: FrameRecorder::new(),
            started: Instant::now(),
            show_hud: true,
            focused: true,
            cursor: VirtualCursor::default(),
            gpu: None,
            config,
        }
    }

    /// Decode and upload the manifest, then bind every texture to its slot.
    fn load_resources(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let decoder = ImageCrateDecoder::default();
        let mut backend = gpu.textures.backend(&gpu.device, &gpu.queue);
        let report = self
            .registry
            .load_manifest(&self.config.manifest, &decoder, &mut backend);
        self.registry.bind_all(&mut backend);

        for (tag, error) in &report.failed {
            tracing::warn!("texture '{tag}' not loaded: {error}");
        }
        for tag in self.scene.required_tags() {
            if self.registry.find_slot(tag).is_none() {
                tracing::warn!("scene texture '{tag}' is missing, drawing its fallback color");
            }
        }
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let pressed = event.state == ElementState::Pressed;
        if code == KeyCode::F1 {
            if pressed && !event.repeat {
                self.show_hud = !self.show_hud;
            }
            return;
        }
        let Some(action) = self.config.bindings.action_for(&format!("{code:?}")) else {
            return;
        };
        if pressed {
            self.input.press(action);
        } else {
            self.input.release(action);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        self.input.time = self.started.elapsed().as_secs_f64();
        self.recorder.begin_frame();
        let input: &dyn InputSource = &self.input;
        if self.view.prepare_frame(Some(input), &mut self.recorder) == FrameOutcome::Quit {
            tracing::info!("quit requested");
            event_loop.exit();
            return;
        }
        self.lights.push(&mut self.recorder);
        self.scene
            .draw(&mut DrawSubmitter::new(&mut self.recorder, &self.registry));

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.renderer.render(
            &gpu.device,
            &gpu.queue,
            &target,
            &self.recorder,
            &gpu.textures,
        );

        let camera = self.view.camera();
        let stats = HudStats {
            position: camera.position,
            yaw: camera.yaw(),
            pitch: camera.pitch(),
            zoom: camera.zoom,
            projection: self.view.projection().mode(),
            frame_ms: self.view.timing().delta() * 1000.0,
            textures: self.registry.texture_count(),
            materials: self.registry.material_count(),
            draws: self.recorder.draws().len(),
            lighting: self.lights.lighting_enabled,
        };
        gpu.paint_overlay(
            &target,
            self.show_hud.then_some(&stats),
            self.config.window.grab_cursor,
        );

        output.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        let gpu = match Gpu::new(event_loop, &self.config.window) {
            Ok(gpu) => gpu,
            Err(e) => {
                tracing::error!("graphics initialization failed: {e:#}");
                event_loop.exit();
                return;
            }
        };
        if self.config.window.grab_cursor {
            gpu.grab_cursor();
        }
        self.input.window_size = (gpu.config.width, gpu.config.height);
        self.gpu = Some(gpu);
        self.load_resources();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = self.gpu.as_mut() {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size);
                    self.input.window_size = (gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Key releases are not delivered to unfocused windows.
                    self.input.release_all();
                } else if self.config.window.grab_cursor {
                    if let Some(gpu) = &self.gpu {
                        gpu.grab_cursor();
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(&event),
            WindowEvent::CursorMoved { position, .. } if !self.config.window.grab_cursor => {
                self.view.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_SCROLL_LINE) as f32,
                };
                self.view.on_scroll(lines);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if !self.config.window.grab_cursor || !self.focused {
            return;
        }
        if let DeviceEvent::MouseMotion { delta } = event {
            let (x, y) = self.cursor.advance(delta.0, delta.1);
            self.view.on_cursor_moved(x, y);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = self.gpu.as_mut() {
            let mut backend = gpu.textures.backend(&gpu.device, &gpu.queue);
            self.registry.release_all(&mut backend);
        }
        tracing::info!("released all textures");
    }
}
