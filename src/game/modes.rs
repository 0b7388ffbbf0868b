// Top-level mode state machine
//
// Pure navigation: which screen is active and where Escape leads. Screens
// are built and torn down by the app whenever the mode changes.

use crate::engine::input::{Action, ActionState};
use glam::Vec3;

/// The three tanks the viewer can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerModel {
    TigerII,
    LowPoly,
    TigerH1,
}

impl ViewerModel {
    /// Model path under the models directory
    pub fn path(&self) -> &'static str {
        match self {
            Self::TigerII => TIGER_II_MODEL,
            Self::LowPoly => "Tank_LowP.obj",
            Self::TigerH1 => "tiger-tank-wot-obj/tiger-tank-wot.obj",
        }
    }

    /// Uniform scale that brings the model to a common size
    pub fn scale(&self) -> f32 {
        match self {
            Self::TigerII => 1.0,
            Self::LowPoly => 0.05,
            Self::TigerH1 => 100.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        match self {
            Self::LowPoly => Vec3::new(0.0, 1.2, 0.0),
            Self::TigerII | Self::TigerH1 => Vec3::ZERO,
        }
    }
}

/// Tiger II, also the tank driven (and shot at) in the game
pub const TIGER_II_MODEL: &str = "german-panzer-ww2-ausf-b-obj/german-panzer-ww2-ausf-b.obj";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    MainMenu,
    Game,
    ViewerMenu,
    ViewerMode(ViewerModel),
    Credits,
}

impl Mode {
    /// Text-only screens on a white background
    pub fn is_menu(&self) -> bool {
        matches!(self, Self::MainMenu | Self::ViewerMenu | Self::Credits)
    }

    /// Where Escape leads; `None` means quit
    pub fn parent(&self) -> Option<Mode> {
        match self {
            Self::MainMenu => None,
            Self::Game | Self::ViewerMenu | Self::Credits => Some(Self::MainMenu),
            Self::ViewerMode(_) => Some(Self::ViewerMenu),
        }
    }

    /// Mode chosen by a menu key, if this mode offers a menu
    fn choice(&self, option: usize) -> Option<Mode> {
        match (self, option) {
            (Self::MainMenu, 1) => Some(Self::Game),
            (Self::MainMenu, 2) => Some(Self::ViewerMenu),
            (Self::MainMenu, 3) => Some(Self::Credits),
            (Self::ViewerMenu, 1) => Some(Self::ViewerMode(ViewerModel::TigerII)),
            (Self::ViewerMenu, 2) => Some(Self::ViewerMode(ViewerModel::LowPoly)),
            (Self::ViewerMenu, 3) => Some(Self::ViewerMode(ViewerModel::TigerH1)),
            _ => None,
        }
    }
}

const MENU_OPTIONS: [(Action, usize); 3] = [
    (Action::MenuOption1, 1),
    (Action::MenuOption2, 2),
    (Action::MenuOption3, 3),
];

/// Tracks the active mode and whether the program should keep running
#[derive(Debug)]
pub struct ModeMachine {
    current: Mode,
    previous: Mode,
    running: bool,
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeMachine {
    pub fn new() -> Self {
        Self {
            current: Mode::MainMenu,
            previous: Mode::MainMenu,
            running: true,
        }
    }

    pub fn mode(&self) -> Mode {
        self.current
    }

    pub fn previous_mode(&self) -> Mode {
        self.previous
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Apply one tick of navigation input, returning the new mode on a change
    pub fn update(&mut self, input: &ActionState) -> Option<Mode> {
        if !self.running {
            return None;
        }

        if input.just_pressed(Action::Back) {
            match self.current.parent() {
                Some(parent) => return self.transition(parent),
                None => {
                    self.running = false;
                    return None;
                }
            }
        }

        let next = MENU_OPTIONS
            .iter()
            .filter(|(action, _)| input.just_pressed(*action))
            .find_map(|&(_, option)| self.current.choice(option))?;
        self.transition(next)
    }

    /// Stop from any mode (window closed)
    pub fn quit(&mut self) {
        self.running = false;
    }

    fn transition(&mut self, next: Mode) -> Option<Mode> {
        if self.current == next {
            return None;
        }
        self.previous = self.current;
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressing(action: Action) -> ActionState {
        let mut state = ActionState::new();
        state.press(action);
        state
    }

    #[test]
    fn test_starts_in_main_menu() {
        let machine = ModeMachine::new();
        assert_eq!(machine.mode(), Mode::MainMenu);
        assert!(machine.is_running());
    }

    #[test]
    fn test_main_menu_choices() {
        for (action, expected) in [
            (Action::MenuOption1, Mode::Game),
            (Action::MenuOption2, Mode::ViewerMenu),
            (Action::MenuOption3, Mode::Credits),
        ] {
            let mut machine = ModeMachine::new();
            assert_eq!(machine.update(&pressing(action)), Some(expected));
            assert_eq!(machine.mode(), expected);
            assert_eq!(machine.previous_mode(), Mode::MainMenu);
        }
    }

    #[test]
    fn test_viewer_menu_picks_model() {
        let mut machine = ModeMachine::new();
        machine.update(&pressing(Action::MenuOption2));

        let mode = machine.update(&pressing(Action::MenuOption2));
        assert_eq!(mode, Some(Mode::ViewerMode(ViewerModel::LowPoly)));
    }

    #[test]
    fn test_menu_keys_ignored_outside_menus() {
        let mut machine = ModeMachine::new();
        machine.update(&pressing(Action::MenuOption1));

        assert_eq!(machine.update(&pressing(Action::MenuOption2)), None);
        assert_eq!(machine.mode(), Mode::Game);

        let mut machine = ModeMachine::new();
        machine.update(&pressing(Action::MenuOption3));
        assert_eq!(machine.update(&pressing(Action::MenuOption1)), None);
        assert_eq!(machine.mode(), Mode::Credits);
    }

    #[test]
    fn test_escape_goes_back_one_level() {
        let mut machine = ModeMachine::new();
        machine.update(&pressing(Action::MenuOption2));
        machine.update(&pressing(Action::MenuOption3));
        assert_eq!(machine.mode(), Mode::ViewerMode(ViewerModel::TigerH1));

        assert_eq!(machine.update(&pressing(Action::Back)), Some(Mode::ViewerMenu));
        assert_eq!(machine.update(&pressing(Action::Back)), Some(Mode::MainMenu));
        assert!(machine.is_running());

        assert_eq!(machine.update(&pressing(Action::Back)), None);
        assert!(!machine.is_running());
    }

    #[test]
    fn test_game_and_credits_return_to_main_menu() {
        assert_eq!(Mode::Game.parent(), Some(Mode::MainMenu));
        assert_eq!(Mode::Credits.parent(), Some(Mode::MainMenu));
        assert_eq!(Mode::MainMenu.parent(), None);
    }

    #[test]
    fn test_quit_from_any_mode() {
        let mut machine = ModeMachine::new();
        machine.update(&pressing(Action::MenuOption1));
        machine.quit();
        assert!(!machine.is_running());
        assert_eq!(machine.update(&pressing(Action::Back)), None);
    }

    #[test]
    fn test_viewer_model_placement() {
        assert_eq!(ViewerModel::TigerII.scale(), 1.0);
        assert_eq!(ViewerModel::LowPoly.position(), Vec3::new(0.0, 1.2, 0.0));
        assert_eq!(ViewerModel::TigerH1.scale(), 100.0);
        assert_eq!(ViewerModel::TigerII.path(), TIGER_II_MODEL);
    }

    #[test]
    fn test_menu_classification() {
        assert!(Mode::MainMenu.is_menu());
        assert!(Mode::Credits.is_menu());
        assert!(!Mode::Game.is_menu());
        assert!(!Mode::ViewerMode(ViewerModel::TigerII).is_menu());
    }
}
