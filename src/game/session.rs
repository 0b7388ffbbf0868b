// One game on the range: movement, firing, combat and the draw list
//
// The session never touches the GPU or the audio device. It reports what
// happened during a tick as `GameEvent`s and the screen reacts to them.

use super::combat::{advance_shell, check_hit, respawn_wave, spawn_position, wave_complete};
use super::entities::{Enemy, Player, Shell, ENEMY_COUNT};
use super::scenery;
use super::tuning::Tuning;
use crate::engine::assets::{ModelHandle, TextureHandle};
use crate::engine::input::{Action, ActionState};
use crate::engine::renderer::{Camera, Color, Frame, LightError, LightRig, ModelDraw};
use glam::Vec3;
use log::debug;
use rand::rngs::StdRng;

pub const MOVE_HELP: &str = "Use [W][A][S][D] keys to move your tank";

/// Something the screen should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A shell left the barrel
    Fired,
    /// The shell destroyed the enemy at `index`
    EnemyDestroyed { index: usize, kills: u32 },
    /// All enemies were relocated and revealed
    WaveRespawned,
}

/// Loaded resources a session draws with
#[derive(Debug, Clone, Copy)]
pub struct SessionAssets {
    pub tank: ModelHandle,
    pub shell: ModelHandle,
    pub ground: ModelHandle,
    pub background: TextureHandle,
}

pub struct GameSession {
    tuning: Tuning,
    assets: SessionAssets,
    player: Player,
    enemies: [Enemy; ENEMY_COUNT],
    shell: Shell,
    lights: LightRig,
    rng: StdRng,
}

impl GameSession {
    pub fn new(assets: SessionAssets, tuning: Tuning, mut rng: StdRng) -> Result<Self, LightError> {
        let player = Player::new(assets.tank);
        let enemies = std::array::from_fn(|_| {
            let position = spawn_position(&mut rng, player.position.z, &tuning);
            Enemy::new(assets.tank, position)
        });
        let lights = scenery::light_rig(&tuning)?;

        Ok(Self {
            shell: Shell::new(assets.shell),
            tuning,
            assets,
            player,
            enemies,
            lights,
            rng,
        })
    }

    /// Advance the range by one fixed tick
    pub fn tick(&mut self, input: &ActionState) -> Vec<GameEvent> {
        let mut events = Vec::new();

        scenery::toggle_lights(&mut self.lights, input);
        self.apply_movement(input);

        if input.just_pressed(Action::Fire) {
            self.shell
                .launch(self.player.position + self.tuning.shell_offset);
            events.push(GameEvent::Fired);
        }

        if advance_shell(&mut self.shell, self.player.position.z, &self.tuning) {
            if let Some(index) = check_hit(&mut self.shell, &mut self.enemies, &self.tuning) {
                self.player.kills += 1;
                debug!("Enemy {} destroyed, {} kills", index, self.player.kills);
                events.push(GameEvent::EnemyDestroyed {
                    index,
                    kills: self.player.kills,
                });

                if wave_complete(self.player.kills, &self.tuning) {
                    respawn_wave(
                        &mut self.enemies,
                        self.player.position.z,
                        &mut self.rng,
                        &self.tuning,
                    );
                    debug!("Wave respawned");
                    events.push(GameEvent::WaveRespawned);
                }
            }
        }

        events
    }

    /// W/S drive along z, A/D along x with A towards +x; the lights ride along
    fn apply_movement(&mut self, input: &ActionState) {
        let step = self.tuning.move_step;
        let delta = Vec3::new(
            input.axis(Action::MoveRight, Action::MoveLeft) * step,
            0.0,
            input.axis(Action::MoveBackward, Action::MoveForward) * step,
        );

        if delta != Vec3::ZERO {
            self.player.position += delta;
            self.lights.translate(delta);
        }
    }

    /// Queue the whole game view: background, 3D scene and HUD
    pub fn draw(&self, frame: &mut Frame, camera: Camera, fps: f32) {
        frame.background(self.assets.background);
        frame.scene(camera, &self.lights);

        frame.model(ModelDraw::new(self.assets.ground, Vec3::ZERO, 1.0));
        frame.model(
            ModelDraw::new(self.player.model, self.player.position, self.player.scale)
                .with_rotation_y(self.tuning.player_rotation_y),
        );
        if self.shell.visible {
            frame.model(ModelDraw::new(
                self.shell.model,
                self.shell.position,
                self.tuning.shell_scale,
            ));
        }
        for enemy in self.enemies.iter().filter(|e| e.visible) {
            frame.model(ModelDraw::new(enemy.model, enemy.position, 1.0));
        }

        scenery::draw_gizmos(frame, &self.lights, &self.tuning);

        scenery::draw_help(frame, fps, MOVE_HELP);
        frame.text(
            format!("Kills: {}", self.player.kills),
            670.0,
            0.0,
            20.0,
            Color::BLACK,
        );
    }

    pub fn player(&self) -> &Player {
        &self.player
    }
}

#[cfg(test)]
impl GameSession {
    fn enemies(&self) -> &[Enemy; ENEMY_COUNT] {
        &self.enemies
    }

    fn shell(&self) -> &Shell {
        &self.shell
    }

    fn lights(&self) -> &LightRig {
        &self.lights
    }

    fn enemies_mut(&mut self) -> &mut [Enemy; ENEMY_COUNT] {
        &mut self.enemies
    }
}
