//! Motion parameters and the per-frame animation step.
//!
//! `advance` is a pure scene mutation: it touches only the cube's rotation
//! angles and the sphere's height, so the motion formulas are testable
//! without a terminal or a renderer.

use crate::scene::Scene;
use crate::{DEFAULT_BOUNCING_SPEED, DEFAULT_ROTATION_SPEED};

/// Upper bound for the rotation speed control.
pub const ROTATION_SPEED_MAX: f32 = 0.5;
/// Upper bound for the bounce speed control.
pub const BOUNCING_SPEED_MAX: f32 = 0.07;

/// Keyboard adjustment step sizes.
const ROTATION_STEP: f32 = 0.01;
const BOUNCING_STEP: f32 = 0.005;

/// Rotation rate is normalized to a 60 FPS reference frame.
const REFERENCE_FRAME_RATE: f32 = 60.0;
/// Sphere rest height.
const BOUNCE_BASE: f32 = 4.0;
/// Peak bounce height above rest.
const BOUNCE_AMPLITUDE: f32 = 10.0;
/// Phase rate multiplier applied to the bounce speed.
const BOUNCE_PHASE_RATE: f32 = 20.0;

/// The two user-tweakable motion parameters.
///
/// Values are clamped at every write, so out-of-range speeds cannot be
/// observed: rotation in [0, 0.5], bounce in [0, 0.07].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    rotation_speed: f32,
    bouncing_speed: f32,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATION_SPEED, DEFAULT_BOUNCING_SPEED)
    }
}

impl Controls {
    pub fn new(rotation_speed: f32, bouncing_speed: f32) -> Self {
        Self {
            rotation_speed: rotation_speed.clamp(0.0, ROTATION_SPEED_MAX),
            bouncing_speed: bouncing_speed.clamp(0.0, BOUNCING_SPEED_MAX),
        }
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn bouncing_speed(&self) -> f32 {
        self.bouncing_speed
    }

    /// Step the rotation speed up or down, clamped to its range.
    pub fn adjust_rotation(&mut self, direction: i32) {
        let next = self.rotation_speed + direction.signum() as f32 * ROTATION_STEP;
        self.rotation_speed = next.clamp(0.0, ROTATION_SPEED_MAX);
    }

    /// Step the bounce speed up or down, clamped to its range.
    pub fn adjust_bouncing(&mut self, direction: i32) {
        let next = self.bouncing_speed + direction.signum() as f32 * BOUNCING_STEP;
        self.bouncing_speed = next.clamp(0.0, BOUNCING_SPEED_MAX);
    }
}

/// Advance the scene by one frame.
///
/// `delta` is the time since the previous frame in seconds; `elapsed` is the
/// total time since the loop began. The cube gains the same rotation on all
/// three axes; the sphere's height stays within [4, 14].
pub fn advance(scene: &mut Scene, controls: &Controls, delta: f32, elapsed: f32) {
    let spin = controls.rotation_speed * delta * REFERENCE_FRAME_RATE;
    scene.cube.rotation.x += spin;
    scene.cube.rotation.y += spin;
    scene.cube.rotation.z += spin;

    let phase = elapsed * controls.bouncing_speed * BOUNCE_PHASE_RATE;
    scene.sphere.center.y = BOUNCE_BASE + phase.sin().abs() * BOUNCE_AMPLITUDE;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_advance_is_uniform() {
        let mut scene = Scene::demo();
        let controls = Controls::new(0.3, 0.0);
        advance(&mut scene, &controls, 0.02, 0.02);

        let expected = 0.3 * 0.02 * 60.0;
        assert!((scene.cube.rotation.x - expected).abs() < 1e-6);
        assert_eq!(scene.cube.rotation.x, scene.cube.rotation.y);
        assert_eq!(scene.cube.rotation.y, scene.cube.rotation.z);
    }

    #[test]
    fn test_rotation_reference_frame_scenario() {
        // rotationSpeed=0.05 at exactly one 60 FPS frame: +0.05 per axis.
        let mut scene = Scene::demo();
        let controls = Controls::new(0.05, 0.0);
        advance(&mut scene, &controls, 1.0 / 60.0, 1.0 / 60.0);
        assert!((scene.cube.rotation.x - 0.05).abs() < 1e-6);
        assert!((scene.cube.rotation.z - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_zero_delta_leaves_rotation() {
        let mut scene = Scene::demo();
        let controls = Controls::default();
        advance(&mut scene, &controls, 0.0, 5.0);
        assert_eq!(scene.cube.rotation.x, 0.0);
    }

    #[test]
    fn test_bounce_at_time_zero() {
        let mut scene = Scene::demo();
        let controls = Controls::new(0.0, 0.07);
        advance(&mut scene, &controls, 0.0, 0.0);
        assert!((scene.sphere.center.y - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_height_stays_in_range() {
        let mut scene = Scene::demo();
        let controls = Controls::new(0.0, 0.07);
        for i in 0..1000 {
            let elapsed = i as f32 * 0.037;
            advance(&mut scene, &controls, 0.016, elapsed);
            assert!(scene.sphere.center.y >= 4.0 - 1e-5);
            assert!(scene.sphere.center.y <= 14.0 + 1e-5);
        }
    }

    #[test]
    fn test_bounce_reaches_above_rest() {
        let mut scene = Scene::demo();
        let controls = Controls::new(0.0, 0.07);
        // Peak of the first arch: phase = pi/2.
        let elapsed = std::f32::consts::FRAC_PI_2 / (0.07 * 20.0);
        advance(&mut scene, &controls, 0.016, elapsed);
        assert!((scene.sphere.center.y - 14.0).abs() < 1e-3);
    }

    #[test]
    fn test_controls_clamp_on_construction() {
        let controls = Controls::new(2.0, -1.0);
        assert!((controls.rotation_speed() - ROTATION_SPEED_MAX).abs() < 1e-6);
        assert_eq!(controls.bouncing_speed(), 0.0);
    }

    #[test]
    fn test_controls_clamp_on_adjust() {
        let mut controls = Controls::new(ROTATION_SPEED_MAX, BOUNCING_SPEED_MAX);
        controls.adjust_rotation(1);
        controls.adjust_bouncing(1);
        assert!((controls.rotation_speed() - ROTATION_SPEED_MAX).abs() < 1e-6);
        assert!((controls.bouncing_speed() - BOUNCING_SPEED_MAX).abs() < 1e-6);

        let mut controls = Controls::new(0.0, 0.0);
        controls.adjust_rotation(-1);
        controls.adjust_bouncing(-1);
        assert_eq!(controls.rotation_speed(), 0.0);
        assert_eq!(controls.bouncing_speed(), 0.0);
    }

    #[test]
    fn test_adjust_steps_move_the_value() {
        let mut controls = Controls::default();
        let before = controls.rotation_speed();
        controls.adjust_rotation(1);
        assert!(controls.rotation_speed() > before);
        controls.adjust_rotation(-1);
        assert!((controls.rotation_speed() - before).abs() < 1e-6);
    }
}
