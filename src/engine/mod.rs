// Engine modules: renderer, input, assets, audio, loop timing

pub mod assets;
pub mod audio;
pub mod game_loop;
pub mod input;
pub mod renderer;
