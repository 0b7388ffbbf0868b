use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;
use winit::{event_loop::EventLoop, window::WindowBuilder};

mod app;
mod core;
mod engine;
mod game;

use app::{App, WINDOW};
use engine::assets::{AssetLoader, AssetType};
use engine::renderer::{FontAtlas, Renderer, GLYPH_BASE_SIZE};

const HUD_FONT: &str = "hud.ttf";

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Tank Range...");

    let font = load_hud_font();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(WINDOW.width, WINDOW.height))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let renderer = pollster::block_on(Renderer::new(
        Arc::clone(&window),
        WINDOW.msaa_samples,
        font,
    ))
    .context("Failed to initialize the renderer")?;

    App::new(window, renderer)?.run(event_loop)
}

/// Rasterize the HUD font, or fall back to drawing no text at all
fn load_hud_font() -> FontAtlas {
    let font = AssetLoader::default()
        .load_bytes(AssetType::Font, HUD_FONT)
        .and_then(|bytes| FontAtlas::rasterize(bytes, GLYPH_BASE_SIZE));

    match font {
        Ok(font) => font,
        Err(e) => {
            warn!("HUD font unavailable, text will not be drawn: {}", e);
            FontAtlas::empty()
        }
    }
}
