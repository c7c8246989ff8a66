//! Application state
//!
//! Ties the controller, the capture source and the software renderer
//! together, and carries out command effects that live outside the core
//! (saving frames). Window calls stay in `main`.

use crate::capture::{open_source, CaptureSource, NoSource};
use crate::config::Config;
use crate::controller::{Command, Controller, Effect};
use crate::error::Result;
use crate::export::save_frame;
use crate::rasterizer::{Renderer, SoftwareRenderer, MAX_FRAMEBUFFER_SIDE};

/// Transient message shown at the bottom of the window
#[derive(Debug, Default)]
pub struct StatusLine {
    message: Option<(String, f64)>,
}

impl StatusLine {
    pub fn set(&mut self, msg: &str, seconds: f64) {
        self.message = Some((msg.to_string(), seconds));
    }

    pub fn tick(&mut self, dt: f64) {
        if let Some((_, remaining)) = &mut self.message {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.message = None;
            }
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().map(|(msg, _)| msg.as_str())
    }
}

/// Main application state
pub struct AppState {
    pub config: Config,
    pub controller: Controller<SoftwareRenderer>,
    pub source: Box<dyn CaptureSource>,
    pub fullscreen: bool,
    pub status: StatusLine,
}

impl AppState {
    /// Build everything for a window of the given size. A capture source
    /// that fails to open is replaced by [`NoSource`].
    pub fn new(config: Config, screen_w: f32, screen_h: f32) -> Result<Self> {
        config.validate()?;
        let mut status = StatusLine::default();

        let source = match open_source(&config.source) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(error = %e, "capture source unavailable, continuing without one");
                status.set(&format!("No video: {}", e), 5.0);
                Box::new(NoSource)
            }
        };

        let (width, height) = framebuffer_size(config.render_height, screen_w, screen_h);
        let renderer = SoftwareRenderer::new(width, height);
        let aspect = renderer.aspect();
        let controller = Controller::new(config.controller_options(), aspect, renderer)?;

        Ok(Self {
            config,
            controller,
            source,
            fullscreen: false,
            status,
        })
    }

    /// Match the framebuffer to the window aspect; rebuilds the mesh when
    /// the aspect changed
    pub fn fit_to_window(&mut self, screen_w: f32, screen_h: f32) -> Result<()> {
        let (width, height) = framebuffer_size(self.config.render_height, screen_w, screen_h);
        let renderer = self.controller.renderer_mut();
        renderer.resize(width, height);
        let aspect = renderer.aspect();
        self.controller.set_aspect(aspect)
    }

    /// Apply one command. Returns the effects the window has to carry out
    /// (fullscreen); everything else is handled here.
    pub fn apply(&mut self, command: Command) -> Effect {
        match self.controller.dispatch(command) {
            Ok(Effect::SaveFrame) => {
                match save_frame(&self.controller.renderer().fb, &self.config.capture_dir) {
                    Ok(path) => self.status.set(&format!("Saved {}", path.display()), 3.0),
                    Err(e) => {
                        tracing::warn!(error = %e, "save frame failed");
                        self.status.set(&format!("Save failed: {}", e), 5.0);
                    }
                }
                Effect::None
            }
            Ok(Effect::ToggleFullscreen) => {
                self.fullscreen = !self.fullscreen;
                Effect::ToggleFullscreen
            }
            Ok(Effect::None) => {
                let selection = self.describe_selection();
                self.status.set(&selection, 2.0);
                Effect::None
            }
            Err(e) => {
                tracing::warn!(command = command.label(), error = %e, "command rejected");
                self.status.set(&format!("{}: {}", command.label(), e), 3.0);
                Effect::None
            }
        }
    }

    /// Advance the capture source and redraw if anything changed
    pub fn update(&mut self, dt: f32) {
        self.status.tick(dt as f64);

        match self.source.poll(dt) {
            Ok(true) => self.controller.renderer_mut().request_redraw(),
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, "capture poll failed"),
        }

        let frame = self.source.frame();
        self.controller.renderer_mut().render_frame(frame);
    }

    pub fn describe_selection(&self) -> String {
        format!(
            "{} tiles | tint {}",
            self.controller.tile_count(),
            self.controller.tint()
        )
    }
}

/// Framebuffer (width, height) with `render_height` rows and the window's
/// aspect, both sides clamped to `MAX_FRAMEBUFFER_SIDE`
pub fn framebuffer_size(render_height: usize, screen_w: f32, screen_h: f32) -> (usize, usize) {
    let height = render_height.clamp(1, MAX_FRAMEBUFFER_SIDE);
    let aspect = if screen_w > 0.0 && screen_h > 0.0 { screen_w / screen_h } else { 1.0 };
    let width = ((height as f32 * aspect).round() as usize).clamp(1, MAX_FRAMEBUFFER_SIDE);
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::SourceConfig;
    use crate::rasterizer::Color;
    use std::path::PathBuf;

    fn app() -> AppState {
        let config = Config {
            render_height: 40,
            source: SourceConfig::None,
            capture_dir: std::env::temp_dir().join(format!("trimosaic-app-{}", std::process::id())),
            ..Config::default()
        };
        AppState::new(config, 1280.0, 800.0).unwrap()
    }

    #[test]
    fn test_framebuffer_size() {
        assert_eq!(framebuffer_size(400, 1280.0, 800.0), (640, 400));
        assert_eq!(framebuffer_size(100, 0.0, 0.0), (100, 100));
        assert_eq!(framebuffer_size(10, 1.0, 1000.0), (1, 10));
        // Sides never exceed what a texture upload accepts
        assert_eq!(framebuffer_size(40000, 2000.0, 1000.0), (MAX_FRAMEBUFFER_SIDE, MAX_FRAMEBUFFER_SIDE));
        assert_eq!(framebuffer_size(400, 100_000.0, 1.0), (MAX_FRAMEBUFFER_SIDE, 400));
    }

    #[test]
    fn test_missing_image_falls_back() {
        let config = Config {
            render_height: 20,
            source: SourceConfig::Image(PathBuf::from("no/such/file.png")),
            ..Config::default()
        };
        let app = AppState::new(config, 100.0, 100.0).unwrap();
        assert!(app.source.frame().is_none());
        assert!(app.status.text().unwrap().starts_with("No video"));
    }

    #[test]
    fn test_update_renders_placeholder() {
        let mut app = app();
        app.update(0.016);
        let fb = &app.controller.renderer().fb;
        assert_eq!((fb.width, fb.height), (64, 40));
        assert_eq!(fb.get_pixel(10, 10), Color::PLACEHOLDER);
    }

    #[test]
    fn test_fit_to_window_changes_aspect() {
        let mut app = app();
        app.fit_to_window(800.0, 800.0).unwrap();
        assert_eq!(app.controller.aspect(), 1.0);
        assert_eq!(app.controller.renderer().fb.width, 40);
    }

    #[test]
    fn test_apply_effects() {
        let mut app = app();
        assert_eq!(app.apply(Command::ToggleFullscreen), Effect::ToggleFullscreen);
        assert!(app.fullscreen);

        assert_eq!(app.apply(Command::NextColor), Effect::None);
        assert_eq!(app.status.text(), Some("32 tiles | tint #1e90ff"));

        app.apply(Command::SetDensity(42));
        assert!(app.status.text().unwrap().contains("out of range"));
        assert_eq!(app.controller.tile_count(), 32);

        app.update(0.016);
        assert_eq!(app.apply(Command::SaveFrame), Effect::None);
        assert!(app.status.text().unwrap().starts_with("Saved"));
        let _ = std::fs::remove_dir_all(&app.config.capture_dir);
    }

    #[test]
    fn test_status_expires() {
        let mut status = StatusLine::default();
        status.set("hello", 1.0);
        status.tick(0.5);
        assert_eq!(status.text(), Some("hello"));
        status.tick(0.6);
        assert_eq!(status.text(), None);
    }
}
