mod keys;

use anyhow::{Context, Result};
use clap::Parser;
use deskscene_assets::{DecodedTexture, TextureManifest};
use deskscene_common::ViewMode;
use deskscene_input::{Action, InputState, describe_button};
use deskscene_render::{FlyCamera, Frame};
use deskscene_render_wgpu::{GpuContext, WgpuRenderer};
use deskscene_scene::Scene;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowId};

/// Frame time is clamped so a stall does not fling the camera.
const MAX_FRAME_SECONDS: f32 = 0.1;

/// Pitch limit applied by `--clamp-pitch`, in degrees.
const PITCH_LIMIT: f32 = 89.0;

#[derive(Parser)]
#[command(name = "deskscene-desktop", about = "Desk scene viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding the seven scene textures
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Window title
    #[arg(long, default_value = "Desk Scene")]
    title: String,

    /// Limit camera pitch to +/-89 degrees
    #[arg(long)]
    clamp_pitch: bool,
}

/// Per-session state shared by input and rendering.
struct AppContext {
    scene: Scene,
    camera: FlyCamera,
    input: InputState,
    view_mode: ViewMode,
    focused: bool,
    last_frame: Instant,
}

impl AppContext {
    fn new(clamp_pitch: bool) -> Self {
        let limit = clamp_pitch.then_some(PITCH_LIMIT);
        Self {
            scene: Scene::desk(),
            camera: FlyCamera::default().with_pitch_limit(limit),
            input: InputState::new(),
            view_mode: ViewMode::default(),
            focused: true,
            last_frame: Instant::now(),
        }
    }

    /// Apply held movement keys for `dt` seconds.
    fn update(&mut self, dt: f32) {
        for movement in self.input.movements() {
            self.camera.process_keyboard(movement, dt);
        }
    }

    /// Raw pointer motion. Ignored while the window is unfocused.
    fn look(&mut self, dx: f64, dy: f64) {
        if !self.focused {
            return;
        }
        if let Some((dx, dy)) = self.input.mouse_motion(dx, dy) {
            self.camera.process_mouse_movement(dx, dy);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.input.release_all();
            self.input.reset_motion();
        }
    }

    fn frame_delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_SECONDS);
        self.last_frame = now;
        dt
    }

    fn compose(&self, width: u32, height: u32) -> Frame {
        Frame::compose(&self.scene, &self.camera, self.view_mode, width, height)
    }

    fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::ToggleProjection => {
                self.view_mode = self.view_mode.toggled();
                tracing::info!("projection: {:?}", self.view_mode);
                false
            }
            Action::Quit => true,
        }
    }
}

/// GPU resources, created once the window exists.
struct GpuState {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: WgpuRenderer,
}

struct DeskApp {
    ctx: AppContext,
    gpu: Option<GpuState>,
    textures: Vec<DecodedTexture>,
    title: String,
    size: PhysicalSize<u32>,
    failure: Option<anyhow::Error>,
}

impl DeskApp {
    fn new(cli: &Cli, textures: Vec<DecodedTexture>) -> Self {
        Self {
            ctx: AppContext::new(cli.clamp_pitch),
            gpu: None,
            textures,
            title: cli.title.clone(),
            size: PhysicalSize::new(cli.width, cli.height),
            failure: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<GpuState> {
        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)?;
        let (width, height) = gpu.size();
        let renderer = WgpuRenderer::new(
            &gpu.device,
            &gpu.queue,
            gpu.format(),
            width,
            height,
            &self.textures,
        )?;
        // Decoded pixels are no longer needed once uploaded.
        self.textures = Vec::new();

        grab_cursor(&window);
        Ok(GpuState {
            window,
            gpu,
            renderer,
        })
    }

    fn redraw(&mut self) {
        let dt = self.ctx.frame_delta();
        self.ctx.update(dt);

        let Some(state) = &self.gpu else {
            return;
        };

        let output = match state.gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                state.gpu.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let (width, height) = state.gpu.size();
        let frame = self.ctx.compose(width, height);
        state
            .renderer
            .render(&state.gpu.device, &state.gpu.queue, &view, &frame);

        output.present();
    }
}

fn grab_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(e) = grabbed {
        tracing::warn!("cursor grab unavailable: {e}");
    }
    window.set_cursor_visible(false);
}

impl ApplicationHandler for DeskApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() || self.failure.is_some() {
            return;
        }

        match self.init_gpu(event_loop) {
            Ok(state) => self.gpu = Some(state),
            Err(e) => {
                tracing::error!("initialization failed: {e:#}");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(state) = &mut self.gpu {
                    state.gpu.resize(new_size.width, new_size.height);
                    let (width, height) = state.gpu.size();
                    state.renderer.resize(&state.gpu.device, width, height);
                    tracing::debug!("resized to {width}x{height}");
                }
            }
            WindowEvent::Focused(focused) => {
                self.ctx.set_focused(focused);
                if focused {
                    if let Some(state) = &self.gpu {
                        grab_cursor(&state.window);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;
                let action = self.ctx.input.key(keys::map_key(code), pressed, repeat);
                if let Some(action) = action {
                    if self.ctx.apply(action) {
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = keys::map_scroll(delta);
                self.ctx.camera.process_scroll(scroll.lines());
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed;
                tracing::info!("{}", describe_button(keys::map_button(button), pressed));
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(state) = &self.gpu {
                    state.window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.ctx.look(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.gpu {
            state.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("deskscene-desktop starting");

    let manifest = TextureManifest::new(&cli.assets);
    let textures = manifest.load_all().inspect_err(|e| {
        tracing::error!("texture loading failed: {e}");
    })?;
    tracing::info!(
        "loaded {} textures from {}",
        textures.len(),
        manifest.root().display()
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DeskApp::new(&cli, textures);
    event_loop.run_app(&mut app)?;

    if let Some(failure) = app.failure.take() {
        return Err(failure);
    }

    tracing::info!("deskscene-desktop exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskscene_common::CameraMovement;
    use deskscene_input::Key;
    use deskscene_render::aspect_ratio;

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["deskscene-desktop"]);
        assert_eq!((cli.width, cli.height), (800, 600));
        assert_eq!(cli.title, "Desk Scene");
        assert_eq!(cli.assets, PathBuf::from("assets"));
        assert!(!cli.clamp_pitch);
    }

    #[test]
    fn resize_changes_next_frame_aspect() {
        let ctx = AppContext::new(false);
        let before = ctx.compose(800, 600);
        let after = ctx.compose(1600, 900);
        assert!((before.projection.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((after.projection.aspect - 16.0 / 9.0).abs() < 1e-6);
        assert_eq!(after.projection.aspect, aspect_ratio(1600, 900));
    }

    #[test]
    fn toggle_and_quit_actions() {
        let mut ctx = AppContext::new(false);
        assert!(!ctx.apply(Action::ToggleProjection));
        assert_eq!(ctx.view_mode, ViewMode::Orthographic);
        assert!(!ctx.apply(Action::ToggleProjection));
        assert_eq!(ctx.view_mode, ViewMode::Perspective);
        assert!(ctx.apply(Action::Quit));
    }

    #[test]
    fn held_keys_move_the_camera() {
        let mut ctx = AppContext::new(false);
        let start = ctx.camera.position;
        ctx.input.key(Key::W, true, false);
        ctx.update(1.0);

        let mut expected = FlyCamera::default();
        expected.process_keyboard(CameraMovement::Forward, 1.0);
        assert!(ctx.camera.position.abs_diff_eq(expected.position, 1e-5));
        assert_ne!(ctx.camera.position, start);
    }

    #[test]
    fn raw_motion_turns_the_camera_without_bound() {
        let mut ctx = AppContext::new(false);
        let yaw = ctx.camera.yaw;
        // first delta only seeds
        ctx.look(300.0, 0.0);
        assert_eq!(ctx.camera.yaw, yaw);

        for _ in 0..10 {
            ctx.look(200.0, 0.0);
        }
        assert!((ctx.camera.yaw - (yaw + 200.0)).abs() < 1e-3);
    }

    #[test]
    fn motion_down_the_screen_pitches_down() {
        let mut ctx = AppContext::new(false);
        ctx.look(0.0, 0.0);
        ctx.look(0.0, 50.0);
        assert!((ctx.camera.pitch + 5.0).abs() < 1e-4);
    }

    #[test]
    fn unfocused_window_ignores_motion() {
        let mut ctx = AppContext::new(false);
        ctx.look(0.0, 0.0);
        ctx.input.key(Key::W, true, false);
        ctx.set_focused(false);
        let before = ctx.camera;
        ctx.look(100.0, 100.0);
        assert_eq!(ctx.camera.yaw, before.yaw);
        assert_eq!(ctx.input.movements().count(), 0);

        // regaining focus swallows the first delta again
        ctx.set_focused(true);
        ctx.look(100.0, 0.0);
        assert_eq!(ctx.camera.yaw, before.yaw);
        ctx.look(10.0, 0.0);
        assert!((ctx.camera.yaw - (before.yaw + 1.0)).abs() < 1e-4);
    }

    #[test]
    fn clamp_pitch_flag_sets_limit() {
        assert_eq!(AppContext::new(true).camera.pitch_limit, Some(PITCH_LIMIT));
        assert_eq!(AppContext::new(false).camera.pitch_limit, None);
    }
}
