//! Scene graph for the demo: ground plane, cube, sphere, spot light, camera.
//!
//! Placement is fixed at construction time. The animation step mutates only
//! the cube's rotation angles and the sphere's height.

use nalgebra::{Point3, Vector3};

/// Rectangular ground plane, defined by a corner and two edge vectors.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub corner: Point3<f32>,
    pub u: Vector3<f32>,
    pub v: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub color: Vector3<f32>,
}

impl Plane {
    pub fn new(corner: Point3<f32>, u: Vector3<f32>, v: Vector3<f32>, color: Vector3<f32>) -> Self {
        let normal = u.cross(&v).normalize();
        Self { corner, u, v, normal, color }
    }
}

/// Axis-aligned box rotated by per-axis Euler angles.
#[derive(Debug, Clone, Copy)]
pub struct Cube {
    pub center: Point3<f32>,
    pub half_extent: f32,
    /// Rotation angles (radians) around x, y and z.
    pub rotation: Vector3<f32>,
    pub color: Vector3<f32>,
}

impl Cube {
    pub fn new(center: Point3<f32>, side: f32, color: Vector3<f32>) -> Self {
        Self {
            center,
            half_extent: side / 2.0,
            rotation: Vector3::zeros(),
            color,
        }
    }
}

/// Sphere primitive.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
    pub color: Vector3<f32>,
}

impl Sphere {
    pub fn new(center: Point3<f32>, radius: f32, color: Vector3<f32>) -> Self {
        Self { center, radius, color }
    }
}

/// Shadow-casting light. Shadows come from occlusion rays at shading time.
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    pub position: Point3<f32>,
    pub intensity: f32,
}

/// Camera for viewing the scene.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub origin: Point3<f32>,
    pub look_at: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub aspect_ratio: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            origin: Point3::new(-30.0, 40.0, 30.0),
            look_at: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
            aspect_ratio: 16.0 / 9.0,
        }
    }
}

impl Camera {
    pub fn set_aspect_ratio(&mut self, ratio: f32) {
        self.aspect_ratio = ratio;
    }
}

/// The complete scene: one plane, one cube, one sphere, one light.
#[derive(Debug, Clone)]
pub struct Scene {
    pub plane: Plane,
    pub cube: Cube,
    pub sphere: Sphere,
    pub light: SpotLight,
}

impl Default for Scene {
    fn default() -> Self {
        Self::demo()
    }
}

impl Scene {
    /// The fixed demo scene.
    ///
    /// A 60x20 white ground plane centered at (15, 0, 0), a red 4x4x4 cube at
    /// (-4, 3, 0), a blue sphere of radius 4 at (20, 4, 2) and a white spot
    /// light at (-40, 60, -10).
    pub fn demo() -> Self {
        // Edge order chosen so the plane normal points up (+Y).
        let plane = Plane::new(
            Point3::new(-15.0, 0.0, -10.0),
            Vector3::new(0.0, 0.0, 20.0),
            Vector3::new(60.0, 0.0, 0.0),
            Vector3::new(0.9, 0.9, 0.9),
        );

        let cube = Cube::new(
            Point3::new(-4.0, 3.0, 0.0),
            4.0,
            Vector3::new(1.0, 0.1, 0.1),
        );

        let sphere = Sphere::new(
            Point3::new(20.0, 4.0, 2.0),
            4.0,
            Vector3::new(0.47, 0.47, 1.0),
        );

        let light = SpotLight {
            position: Point3::new(-40.0, 60.0, -10.0),
            intensity: 0.85,
        };

        Self { plane, cube, sphere, light }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_placement() {
        let scene = Scene::demo();
        assert_eq!(scene.cube.center, Point3::new(-4.0, 3.0, 0.0));
        assert_eq!(scene.cube.half_extent, 2.0);
        assert_eq!(scene.sphere.center, Point3::new(20.0, 4.0, 2.0));
        assert_eq!(scene.sphere.radius, 4.0);
        assert_eq!(scene.light.position, Point3::new(-40.0, 60.0, -10.0));
    }

    #[test]
    fn test_demo_starts_unrotated() {
        let scene = Scene::demo();
        assert_eq!(scene.cube.rotation, Vector3::zeros());
    }

    #[test]
    fn test_plane_faces_up() {
        let scene = Scene::demo();
        assert!((scene.plane.normal - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_plane_spans_demo_extent() {
        let scene = Scene::demo();
        let far_corner = scene.plane.corner + scene.plane.u + scene.plane.v;
        assert!((far_corner - Point3::new(45.0, 0.0, 10.0)).norm() < 1e-6);
    }

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.origin, Point3::new(-30.0, 40.0, 30.0));
        assert_eq!(camera.look_at, Point3::origin());
        assert!((camera.fov - 45.0).abs() < 1e-6);
        assert!((camera.near - 0.1).abs() < 1e-6);
        assert!((camera.far - 1000.0).abs() < 1e-6);
    }
}
