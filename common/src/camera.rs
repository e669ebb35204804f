//! Orbital camera controls for 3D scenes

use glam::{Mat4, Vec3};

/// Pitch is kept just short of the poles so `look_at` never degenerates
const PITCH_LIMIT: f32 = 1.5;

/// 3D perspective camera with damped orbit, pan and zoom controls
#[derive(Debug, Clone)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    // Orbital parameters
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fraction of pending motion applied per update; `None` applies it at once
    pub damping: Option<f32>,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_pan: Vec3,
}

impl Camera3D {
    pub fn new(aspect_ratio: f32) -> Self {
        let distance = 10.0;
        let yaw = 0.0f32;
        let pitch = 0.3f32;

        let position = Vec3::new(
            distance * pitch.cos() * yaw.sin(),
            distance * pitch.sin(),
            distance * pitch.cos() * yaw.cos(),
        );

        Self {
            position,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 45.0f32.to_radians(),
            aspect_ratio,
            near: 0.1,
            far: 1000.0,
            distance,
            yaw,
            pitch,
            min_distance: 1.0,
            max_distance: f32::INFINITY,
            damping: None,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_pan: Vec3::ZERO,
        }
    }

    /// Place the camera at `eye`, deriving the orbital parameters around the current target
    pub fn look_from(mut self, eye: Vec3) -> Self {
        let offset = eye - self.target;
        self.distance = offset.length().max(f32::EPSILON);
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / self.distance)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_orbital();
        self
    }

    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max.max(min);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self.update_orbital();
        self
    }

    pub fn with_damping(mut self, damping: Option<f32>) -> Self {
        self.damping = damping.map(|f| f.clamp(f32::EPSILON, 1.0));
        self
    }

    /// Update camera position based on orbital parameters
    pub fn update_orbital(&mut self) {
        self.position = self.target
            + Vec3::new(
                self.distance * self.pitch.cos() * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                self.distance * self.pitch.cos() * self.yaw.cos(),
            );
    }

    /// Queue an orbit around the target; applied by [`Camera3D::update`]
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.pending_yaw += delta_yaw;
        self.pending_pitch += delta_pitch;
    }

    /// Queue a pan of the target in screen space, scaled by the orbit distance
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        self.pending_pan += (-right * delta_x + up * delta_y) * self.distance;
    }

    /// Zoom in/out, clamped to the distance limits
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).clamp(self.min_distance, self.max_distance);
        self.update_orbital();
    }

    /// Apply queued motion. Call once per frame.
    pub fn update(&mut self) {
        let step = self.damping.unwrap_or(1.0);

        self.yaw += self.pending_yaw * step;
        self.pitch = (self.pitch + self.pending_pitch * step).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.target += self.pending_pan * step;

        if self.damping.is_some() {
            self.pending_yaw *= 1.0 - step;
            self.pending_pitch *= 1.0 - step;
            self.pending_pan *= 1.0 - step;
        } else {
            self.pending_yaw = 0.0;
            self.pending_pitch = 0.0;
            self.pending_pan = Vec3::ZERO;
        }

        self.update_orbital();
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Get the combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_from_recovers_eye() {
        let eye = Vec3::new(0.0, 200.0, 700.0);
        let camera = Camera3D::new(16.0 / 9.0).look_from(eye);

        assert!((camera.position - eye).length() < 1e-2);
        assert!((camera.distance - eye.length()).abs() < 1e-3);
        assert!(camera.yaw.abs() < 1e-6);
    }

    #[test]
    fn test_zoom_clamps_to_limits() {
        let mut camera = Camera3D::new(1.0)
            .look_from(Vec3::new(0.0, 0.0, 500.0))
            .with_distance_limits(100.0, 1500.0);

        camera.zoom(10_000.0);
        assert_eq!(camera.distance, 100.0);

        camera.zoom(-10_000.0);
        assert_eq!(camera.distance, 1500.0);
        assert!((camera.position.length() - 1500.0).abs() < 1e-2);
    }

    #[test]
    fn test_limits_clamp_initial_distance() {
        let camera = Camera3D::new(1.0)
            .look_from(Vec3::new(0.0, 0.0, 50.0))
            .with_distance_limits(100.0, 1500.0);
        assert_eq!(camera.distance, 100.0);
    }

    #[test]
    fn test_undamped_orbit_applies_immediately() {
        let mut camera = Camera3D::new(1.0);
        let yaw = camera.yaw;

        camera.orbit(0.5, 0.0);
        camera.update();
        assert!((camera.yaw - (yaw + 0.5)).abs() < 1e-6);

        // Nothing left pending
        camera.update();
        assert!((camera.yaw - (yaw + 0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_damped_orbit_converges() {
        let mut camera = Camera3D::new(1.0).with_damping(Some(0.05));
        let yaw = camera.yaw;

        camera.orbit(1.0, 0.0);
        camera.update();
        assert!((camera.yaw - (yaw + 0.05)).abs() < 1e-6);

        for _ in 0..500 {
            camera.update();
        }
        assert!((camera.yaw - (yaw + 1.0)).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera3D::new(1.0);
        camera.orbit(0.0, 10.0);
        camera.update();
        assert_eq!(camera.pitch, PITCH_LIMIT);
    }

    #[test]
    fn test_pan_moves_target_and_keeps_distance() {
        let mut camera = Camera3D::new(1.0).look_from(Vec3::new(0.0, 0.0, 10.0));
        camera.pan(0.1, 0.0);
        camera.update();

        assert!(camera.target.x.abs() > 0.0);
        assert!(((camera.position - camera.target).length() - camera.distance).abs() < 1e-4);
    }
}
