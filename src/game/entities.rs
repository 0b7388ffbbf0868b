// Player, enemy and shell records

use crate::engine::assets::ModelHandle;
use glam::Vec3;

/// Number of enemy tanks on the range at any time
pub const ENEMY_COUNT: usize = 3;

/// The player-controlled tank
#[derive(Debug, Clone)]
pub struct Player {
    pub model: ModelHandle,
    pub position: Vec3,
    /// Uniform draw scale
    pub scale: f32,
    /// Enemies destroyed this session; never decreases
    pub kills: u32,
}

impl Player {
    pub fn new(model: ModelHandle) -> Self {
        Self {
            model,
            position: Vec3::ZERO,
            scale: 1.0,
            kills: 0,
        }
    }
}

/// An enemy tank. Destroyed enemies are hidden, never removed.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub model: ModelHandle,
    pub position: Vec3,
    pub visible: bool,
}

impl Enemy {
    pub fn new(model: ModelHandle, position: Vec3) -> Self {
        Self {
            model,
            position,
            visible: true,
        }
    }
}

/// The single shell slot
#[derive(Debug, Clone)]
pub struct Shell {
    pub model: ModelHandle,
    pub position: Vec3,
    pub visible: bool,
}

impl Shell {
    pub fn new(model: ModelHandle) -> Self {
        Self {
            model,
            position: Vec3::ZERO,
            visible: false,
        }
    }

    /// Place the shell at `origin` and put it in flight, replacing any shell
    /// already flying
    pub fn launch(&mut self, origin: Vec3) {
        self.position = origin;
        self.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::{AssetHandle, AssetId};

    fn handle(name: &str) -> ModelHandle {
        AssetHandle::new(AssetId::from_path(name))
    }

    #[test]
    fn test_new_entities() {
        let player = Player::new(handle("tank.obj"));
        assert_eq!(player.position, Vec3::ZERO);
        assert_eq!(player.kills, 0);

        let enemy = Enemy::new(handle("tank.obj"), Vec3::new(1.0, 0.0, 40.0));
        assert!(enemy.visible);

        let shell = Shell::new(handle("bullet.obj"));
        assert!(!shell.visible);
    }

    #[test]
    fn test_launch_overwrites_shell_in_flight() {
        let mut shell = Shell::new(handle("bullet.obj"));
        shell.launch(Vec3::new(0.0, 2.35, 6.4));
        shell.position.z += 10.0;

        shell.launch(Vec3::new(1.0, 2.35, 6.4));
        assert!(shell.visible);
        assert_eq!(shell.position, Vec3::new(1.0, 2.35, 6.4));
    }
}
