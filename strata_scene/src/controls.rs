use glam::Vec3;

use crate::camera::Camera;

/// Mutable orbit-control configuration. The zoom controller overrides this
/// wholesale while a layer is focused and restores the saved copy on return,
/// so every field the override touches has to live here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitControls {
    pub enabled: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub enable_damping: bool,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_azimuth_angle: f32,
    pub max_azimuth_angle: f32,
    pub target: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: true,
            enable_zoom: true,
            enable_pan: true,
            enable_damping: true,
            min_polar_angle: 0.0,
            max_polar_angle: std::f32::consts::PI,
            min_azimuth_angle: f32::NEG_INFINITY,
            max_azimuth_angle: f32::INFINITY,
            target: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn snapshot(&self) -> ControlsSnapshot {
        ControlsSnapshot {
            enable_zoom: self.enable_zoom,
            enable_pan: self.enable_pan,
            min_polar_angle: self.min_polar_angle,
            max_polar_angle: self.max_polar_angle,
            min_azimuth_angle: self.min_azimuth_angle,
            max_azimuth_angle: self.max_azimuth_angle,
            target: self.target,
        }
    }

    pub fn restore(&mut self, snapshot: ControlsSnapshot) {
        self.enable_zoom = snapshot.enable_zoom;
        self.enable_pan = snapshot.enable_pan;
        self.min_polar_angle = snapshot.min_polar_angle;
        self.max_polar_angle = snapshot.max_polar_angle;
        self.min_azimuth_angle = snapshot.min_azimuth_angle;
        self.max_azimuth_angle = snapshot.max_azimuth_angle;
        self.target = snapshot.target;
    }

    /// Pin orbiting to the horizontal ring through the camera's current
    /// polar angle: both polar bounds collapse to `polar`, azimuth stays
    /// unbounded, zoom and pan are disabled, and the orbit centre moves to
    /// `target`.
    pub fn lock_horizontal_orbit(&mut self, polar: f32, target: Vec3) {
        self.enable_zoom = false;
        self.enable_pan = false;
        self.min_polar_angle = polar;
        self.max_polar_angle = polar;
        self.min_azimuth_angle = f32::NEG_INFINITY;
        self.max_azimuth_angle = f32::INFINITY;
        self.target = target;
        self.enabled = true;
    }

    /// Per-frame update: clamp the eye onto the configured polar band and
    /// re-aim the camera at the orbit target. No-op while disabled, which
    /// is how the transitions take exclusive ownership of the camera.
    pub fn update(&self, camera: &mut Camera) {
        if !self.enabled {
            return;
        }
        let offset = camera.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let clamped = polar.clamp(self.min_polar_angle, self.max_polar_angle);
        if (clamped - polar).abs() > 1e-6 {
            let azimuth = offset.x.atan2(offset.z);
            let sin_polar = clamped.sin();
            camera.position = self.target
                + Vec3::new(
                    radius * sin_polar * azimuth.sin(),
                    radius * clamped.cos(),
                    radius * sin_polar * azimuth.cos(),
                );
        }
        camera.look_at(self.target);
    }
}

/// The fields `lock_horizontal_orbit` tramples, saved so the free-orbit
/// configuration survives a focus/return round trip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlsSnapshot {
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_azimuth_angle: f32,
    pub max_azimuth_angle: f32,
    pub target: Vec3,
}
