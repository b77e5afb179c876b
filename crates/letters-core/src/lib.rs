pub mod chime;
pub mod config;
pub mod constants;
pub mod physics;
pub mod scene;
pub mod state;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use chime::*;
pub use config::*;
pub use constants::*;
pub use physics::*;
pub use scene::*;
pub use state::*;
