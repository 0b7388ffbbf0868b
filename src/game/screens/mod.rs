// Per-mode screens
//
// A screen is built when its mode is entered and dropped when it is left,
// taking every asset and sound it loaded with it.

mod game;
mod menu;
mod viewer;

pub use game::GameScreen;
pub use menu::MenuScreen;
pub use viewer::ViewerScreen;

use super::modes::Mode;
use crate::engine::assets::AssetManager;
use crate::engine::input::InputManager;
use crate::engine::renderer::{Frame, GpuContext};
use anyhow::Result;

pub trait Screen {
    /// Advance one fixed tick
    fn update(&mut self, _input: &InputManager) {}

    /// Queue this screen's drawing
    fn draw(&self, frame: &mut Frame, fps: f32);

    /// Assets the frame's handles refer to
    fn assets(&self) -> Option<&AssetManager> {
        None
    }
}

/// Build the screen for `mode`
pub fn create(mode: Mode, gpu: &GpuContext) -> Result<Box<dyn Screen>> {
    let screen: Box<dyn Screen> = match mode {
        Mode::MainMenu => Box::new(MenuScreen::main_menu()),
        Mode::ViewerMenu => Box::new(MenuScreen::viewer_menu()),
        Mode::Credits => Box::new(MenuScreen::credits()),
        Mode::Game => Box::new(GameScreen::new(gpu)?),
        Mode::ViewerMode(model) => Box::new(ViewerScreen::new(gpu, model)?),
    };
    Ok(screen)
}
