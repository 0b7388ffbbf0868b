// The shooting range

use super::Screen;
use crate::engine::assets::{AssetManager, SoundHandle, DEFAULT_ASSET_ROOT};
use crate::engine::audio::AudioDevice;
use crate::engine::input::InputManager;
use crate::engine::renderer::{Camera, CameraController, Frame, GpuContext, MeshData};
use crate::game::modes::TIGER_II_MODEL;
use crate::game::session::{GameEvent, GameSession, SessionAssets};
use crate::game::tuning::TUNING;
use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

const SHELL_MODEL: &str = "bullet.obj";
const GRASS_TEXTURE: &str = "grass.png";
const BACKGROUND_TEXTURE: &str = "bg.png";
const FIRE_SOUND: &str = "tank_shot.wav";
const DESTROY_SOUND: &str = "destroy.wav";

pub struct GameScreen {
    session: GameSession,
    camera: Camera,
    controller: CameraController,
    fire_sound: SoundHandle,
    destroy_sound: SoundHandle,
    audio: AudioDevice,
    assets: AssetManager,
}

impl GameScreen {
    pub fn new(gpu: &GpuContext) -> Result<Self> {
        info!("Entering game");
        let tuning = TUNING;
        let mut assets = AssetManager::new(DEFAULT_ASSET_ROOT);

        let tank = assets.load_model(gpu, TIGER_II_MODEL);
        let shell = assets.load_model(gpu, SHELL_MODEL);

        let plane = MeshData::plane(
            tuning.ground_size,
            tuning.ground_size,
            tuning.ground_subdivisions,
            tuning.ground_subdivisions,
        );
        let ground = assets.add_mesh_model(gpu, "ground", &plane);
        let grass = assets.load_texture(gpu, GRASS_TEXTURE);
        assets.set_model_texture(ground, grass);

        let background = assets.load_texture(gpu, BACKGROUND_TEXTURE);
        let fire_sound = assets.load_sound(FIRE_SOUND);
        let destroy_sound = assets.load_sound(DESTROY_SOUND);

        let camera_offset = tuning.camera_offset;
        let fovy = tuning.camera_fovy;
        let session = GameSession::new(
            SessionAssets {
                tank,
                shell,
                ground,
                background,
            },
            tuning,
            StdRng::from_entropy(),
        )
        .context("Failed to set up the light rig")?;

        let target = session.player().position;
        let camera = Camera::new(target + camera_offset, target, fovy);

        Ok(Self {
            session,
            camera,
            controller: CameraController::third_person(camera_offset),
            fire_sound,
            destroy_sound,
            audio: AudioDevice::open(),
            assets,
        })
    }

    fn play(&mut self, sound: SoundHandle) {
        if let Some(sound) = self.assets.sound(sound) {
            self.audio.play(sound);
        }
    }

    fn stop(&mut self, sound: SoundHandle) {
        if let Some(sound) = self.assets.sound(sound) {
            self.audio.stop(sound);
        }
    }
}

impl Screen for GameScreen {
    fn update(&mut self, input: &InputManager) {
        for event in self.session.tick(input.state()) {
            match event {
                GameEvent::Fired => self.play(self.fire_sound),
                GameEvent::EnemyDestroyed { .. } => {
                    self.stop(self.fire_sound);
                    self.play(self.destroy_sound);
                }
                GameEvent::WaveRespawned => {}
            }
        }

        self.controller
            .update(&mut self.camera, input.state(), input.mouse_delta());
        self.controller
            .follow(&mut self.camera, self.session.player().position);
        self.audio.update();
    }

    fn draw(&self, frame: &mut Frame, fps: f32) {
        self.session.draw(frame, self.camera, fps);
    }

    fn assets(&self) -> Option<&AssetManager> {
        Some(&self.assets)
    }
}

impl Drop for GameScreen {
    fn drop(&mut self) {
        info!(
            "Leaving game with {} kills, stopping {} sounds",
            self.session.player().kills,
            self.audio.playing_count()
        );
        self.audio.stop_all();
    }
}
