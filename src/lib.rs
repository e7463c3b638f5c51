//! Terminal 3D scene demo
//!
//! Builds a fixed scene (ground plane, rotating cube, bouncing sphere, spot
//! light), renders it to the terminal every frame with a CPU ray caster, and
//! lets the user toggle between a half-block color render and an inverted
//! ASCII-character render while tweaking the motion parameters live.

pub mod effect;
pub mod motion;
pub mod renderer;
pub mod scene;
pub mod stats;
pub mod terminal;

pub use effect::{EffectPipeline, RenderPath};
pub use motion::Controls;
pub use renderer::Renderer;
pub use scene::Scene;

/// Character ramp for the ASCII render path, dark to light.
pub const ASCII_GRADIENT: &str = " .:-=+*#%@";

/// Default rotation speed (radians per 60 FPS reference frame).
pub const DEFAULT_ROTATION_SPEED: f32 = 0.05;

/// Default bounce speed (phase rate multiplier).
pub const DEFAULT_BOUNCING_SPEED: f32 = 0.07;
