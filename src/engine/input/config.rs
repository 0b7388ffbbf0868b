// Input configuration and remapping system

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys/buttons) to game actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Create an empty input configuration
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::new();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Bind an input source to an action, replacing any previous binding of that source
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_bind_action() {
        let mut config = InputConfig::new();
        let source = InputSource::key(KeyCode::ArrowUp);
        config.bind(source, Action::MoveForward);

        assert_eq!(config.get_action(source), Some(Action::MoveForward));
    }

    #[test]
    fn test_rebind_source() {
        let mut config = InputConfig::new();
        let source = InputSource::key(KeyCode::KeyA);

        config.bind(source, Action::MoveLeft);
        config.bind(source, Action::MoveRight);

        assert_eq!(config.get_action(source), Some(Action::MoveRight));
    }

    #[test]
    fn test_two_sources_for_one_action() {
        let mut config = InputConfig::new();
        config.bind(InputSource::key(KeyCode::Space), Action::Fire);
        config.bind(InputSource::key(KeyCode::Enter), Action::Fire);

        assert_eq!(
            config.get_action(InputSource::key(KeyCode::Space)),
            Some(Action::Fire)
        );
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::Enter)),
            Some(Action::Fire)
        );
    }

    #[test]
    fn test_default_config_has_gameplay_keys() {
        let config = InputConfig::default();
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::Space)),
            Some(Action::Fire)
        );
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::Escape)),
            Some(Action::Back)
        );
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::KeyP)),
            Some(Action::ToggleLight(4))
        );
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyZ)), None);
    }
}
