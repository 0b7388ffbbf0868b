// Application shell: window events, fixed ticks, mode switches and rendering

use crate::engine::game_loop::GameLoop;
use crate::engine::input::InputManager;
use crate::engine::renderer::{Color, Frame, Renderer};
use crate::game::modes::{Mode, ModeMachine};
use crate::game::screens::{self, Screen};
use anyhow::{Context, Result};
use log::{error, info};
use std::sync::Arc;
use winit::event::{DeviceEvent, Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::Window;

/// Compiled-in window configuration
#[derive(Debug, Clone, Copy)]
pub struct WindowSettings {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    pub msaa_samples: u32,
}

pub const WINDOW: WindowSettings = WindowSettings {
    title: "Tank Range",
    width: 1400,
    height: 750,
    msaa_samples: 4,
};

pub struct App {
    window: Arc<Window>,
    renderer: Renderer,
    input: InputManager,
    game_loop: GameLoop,
    modes: ModeMachine,
    screen: Box<dyn Screen>,
}

impl App {
    pub fn new(window: Arc<Window>, renderer: Renderer) -> Result<Self> {
        let modes = ModeMachine::new();
        let screen = screens::create(modes.mode(), renderer.gpu())?;

        Ok(Self {
            window,
            renderer,
            input: InputManager::new(),
            game_loop: GameLoop::new(),
            modes,
            screen,
        })
    }

    /// Drive the event loop until the main menu is left or the window closes
    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<()> {
        let mut failure = None;

        event_loop.run(|event, elwt| {
            match event {
                Event::WindowEvent { event, .. } => {
                    if let Err(e) = self.handle_window_event(&event) {
                        error!("{:#}", e);
                        failure = Some(e);
                        self.modes.quit();
                    }
                }
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta },
                    ..
                } => self.input.process_mouse_motion(delta),
                Event::AboutToWait => self.window.request_redraw(),
                _ => {}
            }

            if !self.modes.is_running() {
                elwt.exit();
            }
        })?;

        info!(
            "Shutting down after {} frames, {} ticks",
            self.game_loop.frame_count(),
            self.game_loop.tick_count()
        );
        failure.map_or(Ok(()), Err)
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> Result<()> {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested");
                self.modes.quit();
            }
            WindowEvent::Resized(size) => self.renderer.resize(*size),
            WindowEvent::Focused(false) => self.input.reset(),
            WindowEvent::KeyboardInput { event, .. } => self.input.process_keyboard_event(event),
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(*button, *state)
            }
            WindowEvent::RedrawRequested => self.frame()?,
            _ => {}
        }
        Ok(())
    }

    /// Run the ticks that are due, then draw once
    fn frame(&mut self) -> Result<()> {
        let ticks = self.game_loop.begin_frame();
        for _ in 0..ticks {
            if let Some(mode) = self.modes.update(self.input.state()) {
                self.switch_to(mode)?;
                break;
            }
            if !self.modes.is_running() {
                return Ok(());
            }

            self.screen.update(&self.input);
            self.input.update();
        }

        let clear = if self.modes.mode().is_menu() {
            Color::WHITE
        } else {
            Color::BLACK
        };
        let mut frame = Frame::new(clear);
        self.screen.draw(&mut frame, self.game_loop.fps());
        self.renderer.render(&frame, self.screen.assets())
    }

    fn switch_to(&mut self, mode: Mode) -> Result<()> {
        info!("Switching from {:?} to {:?}", self.modes.previous_mode(), mode);

        // Release the old screen's assets and sounds before loading the next
        self.screen = Box::new(screens::MenuScreen::main_menu());
        self.screen = screens::create(mode, self.renderer.gpu())
            .with_context(|| format!("Failed to enter {:?}", mode))?;

        // Loading may take a while; neither the keys nor the clock carry over
        self.input.reset();
        self.game_loop.reset();
        Ok(())
    }
}
