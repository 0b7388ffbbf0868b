// Text-only screens: main menu, viewer menu and credits

use super::Screen;
use crate::engine::renderer::{Color, Frame};

const TEXT_X: f32 = 500.0;
const TEXT_SIZE: f32 = 30.0;

/// Lines of black text at fixed heights
#[derive(Debug)]
pub struct MenuScreen {
    lines: Vec<(&'static str, f32)>,
}

impl MenuScreen {
    pub fn main_menu() -> Self {
        Self {
            lines: vec![
                ("Choose [1] to start a game", 250.0),
                ("Choose [2] to start view mode", 320.0),
                ("Choose [3] to show credits", 390.0),
            ],
        }
    }

    pub fn viewer_menu() -> Self {
        Self {
            lines: vec![
                ("Choose [1] to view Tiger II", 250.0),
                ("Choose [2] to view Low-Polygon tank", 320.0),
                ("Choose [3] to view Tiger H1", 390.0),
            ],
        }
    }

    pub fn credits() -> Self {
        Self {
            lines: vec![
                ("Course work on computer graphics", 150.0),
                ("Done by Vasilev Vladimir, IDB-20-02", 200.0),
            ],
        }
    }
}

impl Screen for MenuScreen {
    fn draw(&self, frame: &mut Frame, _fps: f32) {
        for &(text, y) in &self.lines {
            frame.text(text, TEXT_X, y, TEXT_SIZE, Color::BLACK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_menu_layout() {
        let mut frame = Frame::new(Color::WHITE);
        MenuScreen::main_menu().draw(&mut frame, 60.0);

        let ys: Vec<f32> = frame.texts.iter().map(|t| t.position.y).collect();
        assert_eq!(ys, vec![250.0, 320.0, 390.0]);
        assert!(frame.texts.iter().all(|t| t.position.x == 500.0 && t.size == 30.0));
        assert!(!frame.has_3d());
    }

    #[test]
    fn test_credits_have_two_lines() {
        let mut frame = Frame::new(Color::WHITE);
        MenuScreen::credits().draw(&mut frame, 60.0);

        assert_eq!(frame.texts.len(), 2);
        assert_eq!(frame.texts[1].position.y, 200.0);
    }

    #[test]
    fn test_viewer_menu_lists_models() {
        let mut frame = Frame::new(Color::WHITE);
        MenuScreen::viewer_menu().draw(&mut frame, 60.0);

        assert!(frame.texts[1].text.contains("Low-Polygon"));
    }
}
