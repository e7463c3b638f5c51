//! CPU ray-cast renderer.
//!
//! Casts one primary ray per framebuffer pixel, shades with a single
//! shadow-tested light, and encodes the framebuffer either as half-block
//! ANSI color or as an inverted ASCII character ramp.

use crate::scene::{Camera, Cube, Plane, Scene, Sphere};
use nalgebra::{Point3, Rotation3, Vector3};
use rayon::prelude::*;

/// A ray in 3D space.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

/// Ray-object intersection record.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    pub t: f32,
    pub point: Point3<f32>,
    pub normal: Vector3<f32>,
    pub color: Vector3<f32>,
}

impl HitRecord {
    pub fn new(
        t: f32,
        point: Point3<f32>,
        outward_normal: Vector3<f32>,
        ray: &Ray,
        color: Vector3<f32>,
    ) -> Self {
        // Keep the normal facing the ray origin.
        let normal = if ray.direction.dot(&outward_normal) < 0.0 {
            outward_normal
        } else {
            -outward_normal
        };
        Self { t, point, normal, color }
    }
}

/// Trait for hittable scene objects.
pub trait Hittable {
    fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<HitRecord>;
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<HitRecord> {
        let oc = ray.origin - self.center;
        let a = ray.direction.magnitude_squared();
        let half_b = oc.dot(&ray.direction);
        let c = oc.magnitude_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();

        let mut root = (-half_b - sqrt_d) / a;
        if root < t_min || root > t_max {
            root = (-half_b + sqrt_d) / a;
            if root < t_min || root > t_max {
                return None;
            }
        }

        let point = ray.at(root);
        let outward_normal = (point - self.center) / self.radius;
        Some(HitRecord::new(root, point, outward_normal, ray, self.color))
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<HitRecord> {
        let denom = self.normal.dot(&ray.direction);
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.corner - ray.origin).dot(&self.normal) / denom;
        if t < t_min || t > t_max {
            return None;
        }

        // Reject points outside the rectangle.
        let p = ray.at(t) - self.corner;
        let u_dot = p.dot(&self.u);
        let v_dot = p.dot(&self.v);
        if u_dot < 0.0 || u_dot > self.u.magnitude_squared() {
            return None;
        }
        if v_dot < 0.0 || v_dot > self.v.magnitude_squared() {
            return None;
        }

        Some(HitRecord::new(t, ray.at(t), self.normal, ray, self.color))
    }
}

impl Hittable for Cube {
    fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<HitRecord> {
        let rot = Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z);
        let inv = rot.inverse();

        // Slab test in the cube's local frame.
        let origin = inv * (ray.origin - self.center);
        let direction = inv * ray.direction;
        let h = self.half_extent;

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        for axis in 0..3 {
            if direction[axis].abs() < 1e-8 {
                if origin[axis].abs() > h {
                    return None;
                }
                continue;
            }
            let inv_d = 1.0 / direction[axis];
            let (t0, t1) = {
                let a = (-h - origin[axis]) * inv_d;
                let b = (h - origin[axis]) * inv_d;
                if a < b { (a, b) } else { (b, a) }
            };
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        let t = if t_near >= t_min && t_near <= t_max {
            t_near
        } else if t_far >= t_min && t_far <= t_max {
            t_far
        } else {
            return None;
        };

        // Local normal: the face whose coordinate is at the boundary.
        let local = origin + direction * t;
        let mut face = 0;
        for axis in 1..3 {
            if local[axis].abs() > local[face].abs() {
                face = axis;
            }
        }
        let mut local_normal = Vector3::zeros();
        local_normal[face] = local[face].signum();

        let outward_normal = rot * local_normal;
        Some(HitRecord::new(t, ray.at(t), outward_normal, ray, self.color))
    }
}

/// Nearest intersection over the whole scene.
fn intersect_scene(ray: &Ray, t_min: f32, t_max: f32, scene: &Scene) -> Option<HitRecord> {
    let mut closest: Option<HitRecord> = None;
    let mut max_t = t_max;

    for hit in [
        scene.plane.hit(ray, t_min, max_t),
        scene.cube.hit(ray, t_min, max_t),
        scene.sphere.hit(ray, t_min, max_t),
    ]
    .into_iter()
    .flatten()
    {
        if hit.t < max_t {
            max_t = hit.t;
            closest = Some(hit);
        }
    }

    closest
}

/// Ambient term applied everywhere, shadowed or not.
const AMBIENT: f32 = 0.15;

/// Lambert shading with a shadow ray toward the scene light.
pub(crate) fn shade_point(point: Point3<f32>, normal: Vector3<f32>, scene: &Scene) -> f32 {
    let to_light = scene.light.position - point;
    let distance = to_light.magnitude();
    let light_dir = to_light / distance;

    let shadow_ray = Ray::new(point + normal * 1e-3, light_dir);
    if intersect_scene(&shadow_ray, 1e-3, distance, scene).is_some() {
        return AMBIENT;
    }

    AMBIENT + normal.dot(&light_dir).max(0.0) * scene.light.intensity
}

fn trace(ray: &Ray, scene: &Scene, t_min: f32, t_max: f32) -> Vector3<f32> {
    if let Some(hit) = intersect_scene(ray, t_min, t_max, scene) {
        hit.color * shade_point(hit.point, hit.normal, scene)
    } else {
        // Background: dim vertical gradient.
        let t = 0.5 * (ray.direction.y + 1.0);
        Vector3::new(0.02, 0.02, 0.05) * (1.0 - t) + Vector3::new(0.06, 0.06, 0.12) * t
    }
}

/// The renderer: a framebuffer plus the camera viewing the scene.
///
/// The framebuffer is two pixels tall per terminal row; both output encoders
/// emit `(height + 1) / 2` lines.
pub struct Renderer {
    width: usize,
    height: usize,
    framebuffer: Vec<Vector3<f32>>,
    camera: Camera,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(width as f32 / height as f32);
        Self {
            width,
            height,
            framebuffer: vec![Vector3::zeros(); width * height],
            camera,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.framebuffer = vec![Vector3::zeros(); width * height];
        self.camera.set_aspect_ratio(width as f32 / height as f32);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Render the scene into the framebuffer, one primary ray per pixel.
    pub fn render(&mut self, scene: &Scene) {
        let width = self.width;
        let height = self.height;
        let camera = self.camera;

        let half_height = (camera.fov.to_radians() / 2.0).tan();
        let half_width = camera.aspect_ratio * half_height;

        // Camera basis vectors.
        let w = (camera.origin - camera.look_at).normalize();
        let u = camera.up.cross(&w).normalize();
        let v = w.cross(&u);

        let rows: Vec<Vec<Vector3<f32>>> = (0..height)
            .into_par_iter()
            .map(|y| {
                (0..width)
                    .map(|x| {
                        let px = (2.0 * ((x as f32 + 0.5) / width as f32) - 1.0) * half_width;
                        let py = (1.0 - 2.0 * ((y as f32 + 0.5) / height as f32)) * half_height;
                        let direction = (u * px + v * py - w).normalize();
                        let ray = Ray::new(camera.origin, direction);

                        let mut color = trace(&ray, scene, camera.near, camera.far);

                        // Gamma correction.
                        color.x = color.x.max(0.0).sqrt().min(1.0);
                        color.y = color.y.max(0.0).sqrt().min(1.0);
                        color.z = color.z.max(0.0).sqrt().min(1.0);
                        color
                    })
                    .collect()
            })
            .collect();

        self.framebuffer = rows.into_iter().flatten().collect();
    }

    /// Number of text lines each encoder produces.
    pub fn output_lines(&self) -> usize {
        (self.height + 1) / 2
    }

    fn pixel(&self, x: usize, y: usize) -> Vector3<f32> {
        self.framebuffer[y * self.width + x]
    }

    /// Map RGB to the 6x6x6 cube of the 256-color palette.
    fn ansi_256(color: Vector3<f32>) -> u8 {
        let quant = |c: f32| ((c.clamp(0.0, 1.0) * 255.0) as u16 * 6 / 256) as u8;
        16 + 36 * quant(color.x) + 6 * quant(color.y) + quant(color.z)
    }

    /// Half-block color encoding: `U+2580` per cell, upper pixel as foreground
    /// and lower pixel as background, with ANSI codes emitted only on change.
    pub fn to_halfblock(&self) -> String {
        let lines = self.output_lines();
        let mut out = String::with_capacity(self.width * lines * 12);

        let mut last_fg: Option<u8> = None;
        let mut last_bg: Option<u8> = None;

        for row in 0..lines {
            let top = row * 2;
            let bottom = top + 1;

            for x in 0..self.width {
                let fg = Self::ansi_256(self.pixel(x, top));
                let bg = if bottom < self.height {
                    Self::ansi_256(self.pixel(x, bottom))
                } else {
                    16
                };

                match (last_fg != Some(fg), last_bg != Some(bg)) {
                    (true, true) => out.push_str(&format!("\x1b[38;5;{};48;5;{}m", fg, bg)),
                    (true, false) => out.push_str(&format!("\x1b[38;5;{}m", fg)),
                    (false, true) => out.push_str(&format!("\x1b[48;5;{}m", bg)),
                    (false, false) => {}
                }
                last_fg = Some(fg);
                last_bg = Some(bg);

                out.push('\u{2580}');
            }
            out.push('\n');
        }

        // Reset attributes on the last line, before its newline.
        out.pop();
        out.push_str("\x1b[0m");
        out
    }

    /// ASCII character encoding of the same framebuffer, white on black
    /// (inverted foreground/background). Vertical pixel pairs are averaged so
    /// the line count matches the half-block encoder.
    pub fn to_ascii(&self) -> String {
        let ramp: Vec<char> = crate::ASCII_GRADIENT.chars().collect();
        let lines = self.output_lines();
        let mut out = String::with_capacity(self.width * lines + lines + 16);

        out.push_str("\x1b[97;40m");
        for row in 0..lines {
            let top = row * 2;
            let bottom = top + 1;

            for x in 0..self.width {
                let mut color = self.pixel(x, top);
                if bottom < self.height {
                    color = (color + self.pixel(x, bottom)) / 2.0;
                }

                let luminance = (0.299 * color.x + 0.587 * color.y + 0.114 * color.z)
                    .clamp(0.0, 1.0);
                let index = ((luminance * (ramp.len() - 1) as f32).round() as usize)
                    .min(ramp.len() - 1);
                out.push(ramp[index]);
            }
            out.push('\n');
        }
        out.pop();
        out.push_str("\x1b[0m");

        out
    }
}
