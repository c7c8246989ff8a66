//! trimosaic binary: window, main loop and presentation

use macroquad::prelude::*;
use trimosaic::app::AppState;
use trimosaic::config::{Config, DEFAULT_CONFIG_PATH};
use trimosaic::controller::Effect;
use trimosaic::{input, VERSION};
use std::path::PathBuf;

/// Config path: first command-line argument, or the default file name
fn config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn window_conf() -> Conf {
    // Logging isn't up yet; main reloads and reports errors
    let config = Config::load(config_path()).unwrap_or_default();
    Conf {
        window_title: format!("trimosaic v{}", VERSION),
        window_width: config.window_width as i32,
        window_height: config.window_height as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();
    tracing::info!(version = VERSION, "starting trimosaic");

    let path = config_path();
    let (config, config_error) = match Config::load(&path) {
        Ok(config) => (config, None),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "config rejected, using defaults");
            (Config::default(), Some(e))
        }
    };

    let mut app = match AppState::new(config, screen_width(), screen_height()) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "failed to start");
            return;
        }
    };

    match config_error {
        Some(e) => app.status.set(&format!("Config ignored: {}", e), 6.0),
        None => app.status.set(input::HELP, 6.0),
    }

    let mut last_size = (screen_width(), screen_height());

    loop {
        for command in input::poll_commands() {
            if app.apply(command) == Effect::ToggleFullscreen {
                set_fullscreen(app.fullscreen);
            }
        }

        let size = (screen_width(), screen_height());
        if size != last_size {
            last_size = size;
            if let Err(e) = app.fit_to_window(size.0, size.1) {
                tracing::warn!(error = %e, "resize rejected");
            }
        }

        app.update(get_frame_time());

        clear_background(BLACK);
        present(&app);
        draw_status(&app);

        next_frame().await;
    }
}

/// Stretch the framebuffer over the whole window
fn present(app: &AppState) {
    let fb = &app.controller.renderer().fb;
    let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
    texture.set_filter(FilterMode::Nearest);

    draw_texture_ex(
        &texture,
        0.0,
        0.0,
        WHITE,
        DrawTextureParams {
            dest_size: Some(Vec2::new(screen_width(), screen_height())),
            ..Default::default()
        },
    );
}

fn draw_status(app: &AppState) {
    if let Some(text) = app.status.text() {
        let h = screen_height();
        draw_rectangle(0.0, h - 28.0, screen_width(), 28.0, Color::new(0.0, 0.0, 0.0, 0.6));
        draw_text(text, 10.0, h - 9.0, 18.0, WHITE);
    }
}
