use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use crate::systems::pick::Ray;

/// Perspective camera looking at a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    /// xyz = eye position, w = 1.
    pub position: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_y_deg: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_deg,
            aspect,
            near,
            far,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// OpenGL clip convention (z in [-1, 1]) to match WebGL.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Resize the viewport (e.g. on window resize). Zero-height viewports are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }

    /// Ray from the eye through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let through = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, through - self.position)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: self.view_projection().to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }
}

/// Window pixel coordinates (origin top-left) to NDC (origin center, y up).
pub fn window_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

/// Orbit-style camera controller: drag rotates around the target, the wheel
/// dollies in and out. Spherical coordinates with +Y up.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    /// Distance from target.
    pub radius: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,
    pub enable_zoom: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitControls {
    const MIN_POLAR: f32 = 1e-6;

    /// Derive the orbit from where the camera currently is.
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, std::f32::consts::FRAC_PI_2)
        };
        Self {
            target: camera.target,
            radius,
            theta,
            phi,
            enable_zoom: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
        }
    }

    /// Rotate by a pointer drag of (dx, dy) pixels. A drag the full viewport
    /// height turns the camera once around.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let k = std::f32::consts::TAU * self.rotate_speed / viewport_height;
        self.theta -= dx * k;
        self.phi = (self.phi - dy * k).clamp(Self::MIN_POLAR, std::f32::consts::PI - Self::MIN_POLAR);
    }

    /// Wheel dolly. Negative `delta_y` (wheel up) moves closer.
    pub fn dolly(&mut self, delta_y: f32) {
        if !self.enable_zoom || delta_y == 0.0 {
            return;
        }
        let scale = 0.95f32.powf(self.zoom_speed * (delta_y * 0.01).abs());
        if delta_y < 0.0 {
            self.radius *= scale;
        } else {
            self.radius /= scale;
        }
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);
    }

    /// Eye position implied by the current spherical coordinates.
    pub fn eye(&self) -> Vec3 {
        let s = self.phi.sin();
        self.target
            + Vec3::new(
                self.radius * s * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * s * self.theta.cos(),
            )
    }

    /// Apply to the camera. Called once per frame.
    pub fn update(&self, camera: &mut PerspectiveCamera) {
        camera.position = self.eye();
        camera.target = self.target;
    }
}
