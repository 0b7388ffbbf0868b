// Model viewer: one tank under the light rig, free-look camera

use super::Screen;
use crate::engine::assets::{AssetManager, ModelHandle, TextureHandle, DEFAULT_ASSET_ROOT};
use crate::engine::input::InputManager;
use crate::engine::renderer::{
    Camera, CameraController, Frame, GpuContext, LightRig, MeshData, ModelDraw,
};
use crate::game::modes::ViewerModel;
use crate::game::scenery;
use crate::game::tuning::{Tuning, TUNING};
use anyhow::{Context, Result};
use glam::Vec3;
use log::info;

const MOVE_HELP: &str = "Use [W][A][S][D] keys to move";
const EYE: Vec3 = Vec3::new(2.0, 2.5, 6.0);
const GROUND_SIZE: f32 = 10.0;

pub struct ViewerScreen {
    tuning: Tuning,
    subject: ViewerModel,
    model: ModelHandle,
    ground: ModelHandle,
    background: TextureHandle,
    lights: LightRig,
    camera: Camera,
    controller: CameraController,
    assets: AssetManager,
}

impl ViewerScreen {
    pub fn new(gpu: &GpuContext, subject: ViewerModel) -> Result<Self> {
        info!("Viewing {:?}", subject);
        let tuning = TUNING;
        let mut assets = AssetManager::new(DEFAULT_ASSET_ROOT);

        let model = assets.load_model(gpu, subject.path());
        let plane = MeshData::plane(
            GROUND_SIZE,
            GROUND_SIZE,
            tuning.ground_subdivisions,
            tuning.ground_subdivisions,
        );
        let ground = assets.add_mesh_model(gpu, "viewer-ground", &plane);
        let background = assets.load_texture(gpu, "bg.png");

        let lights = scenery::light_rig(&tuning).context("Failed to set up the light rig")?;
        let camera = Camera::new(EYE, subject.position(), tuning.camera_fovy);

        Ok(Self {
            controller: CameraController::first_person(&camera),
            tuning,
            subject,
            model,
            ground,
            background,
            lights,
            camera,
            assets,
        })
    }
}

impl Screen for ViewerScreen {
    fn update(&mut self, input: &InputManager) {
        scenery::toggle_lights(&mut self.lights, input.state());
        self.controller
            .update(&mut self.camera, input.state(), input.mouse_delta());
    }

    fn draw(&self, frame: &mut Frame, fps: f32) {
        frame.background(self.background);
        frame.scene(self.camera, &self.lights);

        frame.model(ModelDraw::new(self.ground, Vec3::ZERO, 1.0));
        frame.model(ModelDraw::new(
            self.model,
            self.subject.position(),
            self.subject.scale(),
        ));

        scenery::draw_gizmos(frame, &self.lights, &self.tuning);
        scenery::draw_help(frame, fps, MOVE_HELP);
    }

    fn assets(&self) -> Option<&AssetManager> {
        Some(&self.assets)
    }
}
