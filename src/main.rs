//! Studio 3D: a small 3D scene editor
//!
//! Place primitives on a grid, assign each to a designer, and keep the
//! team's workload in view. Everything persists to a single JSON snapshot
//! (a file on desktop, localStorage in the browser).

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod api;
mod app;
mod config;
mod editor;
mod forms;
mod model;
mod pages;
mod query;
mod storage;
mod ui;

use macroquad::prelude::*;
use api::DataAccess;
use app::AppState;
use config::StudioConfig;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Studio 3D v{}", VERSION),
        window_width: 1600,
        window_height: 960,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Crash logging first, before anything can panic
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = StudioConfig::load();
    let api = DataAccess::new(storage::open_default(&config));
    let icon_font = ui::load_icon_font().await;

    let mut app = AppState::new(&config, api, icon_font);
    log::info!("Studio 3D v{} ready", VERSION);

    loop {
        app.frame();
        next_frame().await;
    }
}
