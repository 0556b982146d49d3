// Window module - Hosts the frontend in a native window
//
// The window owns a pixels surface sized to the logical screen and scaled
// up by an integer factor. The OS cursor is hidden over the window since
// the frontend draws its own. Pointer positions are mapped from physical
// window coordinates to logical pixels before reaching the frontend.

use crate::frontend::{draw_test_pattern, Frontend, FrontendConfig};
use crate::input::{scale_to_logical, HotkeyAction, Hotkeys, InputEvent};
use pixels::{Pixels, SurfaceTexture};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Window configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Logical screen width
    pub width: u32,
    /// Logical screen height
    pub height: u32,
    /// Scale factor (1x, 2x, 3x, 4x, etc.)
    pub scale: u32,
    /// Target frame rate in Hz
    pub target_fps: u32,
    /// Whether to enable VSync
    pub vsync: bool,
}

impl WindowConfig {
    /// Create a new window configuration with default values
    ///
    /// Default: 320x200, 3x scale, 60 FPS, VSync enabled
    pub fn new() -> Self {
        Self {
            width: 320,
            height: 200,
            scale: 3,
            target_fps: 60,
            vsync: true,
        }
    }

    /// Set the logical screen size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 8);
        self
    }

    /// Set the target frame rate
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps.max(1);
        self
    }

    /// Set VSync enabled or disabled
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Get the window width in pixels
    pub fn window_width(&self) -> u32 {
        self.width * self.scale
    }

    /// Get the window height in pixels
    pub fn window_height(&self) -> u32 {
        self.height * self.scale
    }

    /// Get the frame duration for the target FPS
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.target_fps as u64)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&FrontendConfig> for WindowConfig {
    fn from(config: &FrontendConfig) -> Self {
        WindowConfig::new()
            .with_size(config.video.width, config.video.height)
            .with_scale(config.video.scale)
            .with_fps(config.video.fps)
            .with_vsync(config.video.vsync)
    }
}

/// Native window presenting a frontend
pub struct FrontendWindow {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    config: WindowConfig,
    frontend: Frontend,
    hotkeys: Hotkeys,
    screenshot_directory: PathBuf,
    last_frame_time: Instant,
    error: Option<Box<dyn Error>>,
}

impl FrontendWindow {
    /// Create a window for `frontend` (the OS window is created when the event loop starts)
    pub fn new(
        config: WindowConfig,
        frontend: Frontend,
        hotkeys: Hotkeys,
        screenshot_directory: PathBuf,
    ) -> Self {
        Self {
            window: None,
            pixels: None,
            config,
            frontend,
            hotkeys,
            screenshot_directory,
            last_frame_time: Instant::now(),
            error: None,
        }
    }

    /// The hosted frontend
    pub fn frontend(&self) -> &Frontend {
        &self.frontend
    }

    /// Mutable access to the hosted frontend
    pub fn frontend_mut(&mut self) -> &mut Frontend {
        &mut self.frontend
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn Error>> {
        let window_attributes = Window::default_attributes()
            .with_title(format!(
                "UFO Frontend - {}x{}",
                self.config.window_width(),
                self.config.window_height()
            ))
            .with_inner_size(LogicalSize::new(
                self.config.window_width(),
                self.config.window_height(),
            ))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        window.set_cursor_visible(false);

        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        let pixels = Pixels::new(self.config.width, self.config.height, surface_texture)?;

        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }

    /// Map a physical window position to logical screen pixels
    ///
    /// Positions outside the surface keep their out-of-range value so the
    /// cursor can be partly off screen.
    fn to_logical(&self, position: PhysicalPosition<f64>) -> (i32, i32) {
        match &self.pixels {
            Some(pixels) => {
                match pixels.window_pos_to_pixel((position.x as f32, position.y as f32)) {
                    Ok((x, y)) => (x as i32, y as i32),
                    Err((x, y)) => (x as i32, y as i32),
                }
            }
            None => scale_to_logical(position, self.config.scale as f64),
        }
    }

    fn handle_hotkey(&mut self, action: HotkeyAction, event_loop: &ActiveEventLoop) {
        match action {
            HotkeyAction::NextCursorMode => {
                self.frontend.cycle_cursor_mode();
            }
            HotkeyAction::ToggleEffects => {
                self.frontend.toggle_effects();
            }
            HotkeyAction::Screenshot => {
                match self.frontend.save_screenshot(&self.screenshot_directory) {
                    Ok(path) => log::info!("Screenshot saved to {}", path.display()),
                    Err(e) => log::error!("Screenshot failed: {}", e),
                }
            }
            HotkeyAction::Quit => {
                log::info!("Quit requested, exiting...");
                event_loop.exit();
            }
        }
    }

    /// Compose a frame and present it
    fn render(&mut self) -> Result<(), Box<dyn Error>> {
        let (width, height) = self.frontend.size();
        self.frontend
            .compose_frame(|renderer| draw_test_pattern(renderer, width, height))?;

        if let Some(pixels) = &mut self.pixels {
            self.frontend.present(pixels.frame_mut());
            pixels.render()?;
        }
        Ok(())
    }

    /// Check if enough time has passed for the next frame
    fn should_render_frame(&mut self) -> bool {
        let elapsed = self.last_frame_time.elapsed();
        if elapsed >= self.config.frame_duration() {
            self.last_frame_time = Instant::now();
            true
        } else {
            false
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Box<dyn Error>) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for FrontendWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_surface(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            log::info!("Close requested, exiting...");
            event_loop.exit();
            return;
        }

        if let WindowEvent::RedrawRequested = event {
            if self.should_render_frame() {
                if let Err(e) = self.render() {
                    self.fail(event_loop, e);
                    return;
                }
            }
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            return;
        }

        let Some(input) = InputEvent::from_window_event(&event, |p| self.to_logical(p)) else {
            return;
        };

        if let InputEvent::Key { key, pressed: true } = input {
            if let Some(action) = self.hotkeys.action_for(key) {
                self.handle_hotkey(action, event_loop);
                return;
            }
        }

        self.frontend.handle_event(&input);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Build the frontend from `config` and run it until the window closes
///
/// # Returns
/// Result indicating success or error
pub fn run_frontend(config: &FrontendConfig) -> Result<(), Box<dyn Error>> {
    let hotkeys = config
        .hotkeys
        .to_hotkeys()
        .map_err(|e| format!("Failed to apply hotkey configuration: {}", e))?;
    let frontend = Frontend::from_config(config)?;
    let window_config = WindowConfig::from(config);

    let event_loop = EventLoop::new()?;
    if window_config.vsync {
        event_loop.set_control_flow(ControlFlow::Wait);
    } else {
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    log::info!(
        "Starting frontend: {}x{} at {}x ({}x{} window), {} FPS, vsync {}",
        window_config.width,
        window_config.height,
        window_config.scale,
        window_config.window_width(),
        window_config.window_height(),
        window_config.target_fps,
        window_config.vsync
    );

    let mut window = FrontendWindow::new(
        window_config,
        frontend,
        hotkeys,
        config.screenshot_directory.clone(),
    );
    event_loop.run_app(&mut window)?;

    match window.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_config_defaults() {
        let config = WindowConfig::new();
        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.scale, 3);
        assert_eq!(config.target_fps, 60);
        assert!(config.vsync);
    }

    #[test]
    fn test_window_dimensions() {
        let config = WindowConfig::new().with_scale(2);
        assert_eq!(config.window_width(), 640);
        assert_eq!(config.window_height(), 400);
    }

    #[test]
    fn test_frame_duration() {
        let config = WindowConfig::new().with_fps(50);
        assert_eq!(config.frame_duration().as_micros(), 20000);
    }

    #[test]
    fn test_builder_clamps() {
        let config = WindowConfig::new().with_scale(100).with_fps(0).with_size(0, 0);
        assert_eq!(config.scale, 8);
        assert_eq!(config.target_fps, 1);
        assert_eq!((config.width, config.height), (1, 1));
    }

    #[test]
    fn test_from_frontend_config() {
        let mut frontend = FrontendConfig::default();
        frontend.video.width = 640;
        frontend.video.scale = 2;
        frontend.video.vsync = false;

        let config = WindowConfig::from(&frontend);
        assert_eq!(config.window_width(), 1280);
        assert_eq!(config.window_height(), 400);
        assert!(!config.vsync);
    }
}
