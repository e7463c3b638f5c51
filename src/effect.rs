//! Render path selection.
//!
//! Two mutually exclusive ways to draw the same scene and camera: the
//! half-block color render and the inverted ASCII effect. Exactly one is
//! active at a time; `toggle` swaps them.

use crate::renderer::Renderer;
use std::fmt;

/// The two render paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    /// Standard half-block color render (the base pass).
    Color,
    /// ASCII character render, white on black.
    Ascii,
}

impl fmt::Display for RenderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderPath::Color => write!(f, "color"),
            RenderPath::Ascii => write!(f, "ascii"),
        }
    }
}

/// Owns the active render path and composes each frame through it.
pub struct EffectPipeline {
    active: RenderPath,
}

impl EffectPipeline {
    pub fn new(initial: RenderPath) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> RenderPath {
        self.active
    }

    /// Swap render paths. Two toggles restore the original path.
    pub fn toggle(&mut self) {
        self.active = match self.active {
            RenderPath::Color => RenderPath::Ascii,
            RenderPath::Ascii => RenderPath::Color,
        };
    }

    /// Encode the rendered framebuffer through the active path.
    ///
    /// Further post-processing passes would chain here before encoding.
    pub fn compose(&self, renderer: &Renderer) -> String {
        match self.active {
            RenderPath::Color => renderer.to_halfblock(),
            RenderPath::Ascii => renderer.to_ascii(),
        }
    }
}

impl Default for EffectPipeline {
    fn default() -> Self {
        Self::new(RenderPath::Color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    #[test]
    fn test_initial_path_is_color() {
        let pipeline = EffectPipeline::default();
        assert_eq!(pipeline.active(), RenderPath::Color);
    }

    #[test]
    fn test_toggle_switches_to_ascii() {
        let mut pipeline = EffectPipeline::default();
        pipeline.toggle();
        assert_eq!(pipeline.active(), RenderPath::Ascii);
    }

    #[test]
    fn test_double_toggle_round_trips() {
        let mut pipeline = EffectPipeline::default();
        let before = pipeline.active();
        pipeline.toggle();
        assert_ne!(pipeline.active(), before);
        pipeline.toggle();
        assert_eq!(pipeline.active(), before);
    }

    #[test]
    fn test_compose_follows_active_path() {
        let mut renderer = Renderer::new(20, 10);
        renderer.render(&Scene::demo());

        let mut pipeline = EffectPipeline::default();
        assert!(pipeline.compose(&renderer).contains('\u{2580}'));

        pipeline.toggle();
        let ascii = pipeline.compose(&renderer);
        assert!(ascii.starts_with("\x1b[97;40m"));
        assert!(!ascii.contains('\u{2580}'));
    }
}
