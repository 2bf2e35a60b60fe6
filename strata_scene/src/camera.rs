use glam::{EulerRot, Mat4, Quat, Vec3};

/// Vertical field of view of the scene camera, in degrees.
pub const FOV_Y_DEGREES: f32 = 75.0;

/// Perspective camera described by a world position and a YXZ Euler
/// rotation (yaw, pitch, roll). The camera looks down its local -Z axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    /// Aim the camera at `target`, keeping +Y up. A degenerate target at
    /// the eye position leaves the rotation unchanged.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.position;
        if dir.length_squared() <= f32::EPSILON {
            return;
        }
        let forward = dir.normalize();
        let pitch = forward.y.clamp(-1.0, 1.0).asin();
        let yaw = (-forward.x).atan2(-forward.z);
        self.rotation = Vec3::new(pitch, yaw, 0.0);
    }

    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y,
            self.rotation.x,
            self.rotation.z,
        )
    }

    /// Unit vector the camera is looking along.
    pub fn forward(&self) -> Vec3 {
        self.rotation_quat() * Vec3::NEG_Z
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation_quat(), self.position).inverse()
    }

    /// Angle between +Y and the eye offset from `target`: 0 directly above,
    /// pi/2 level with it. This is the polar angle the orbit lock pins.
    pub fn polar_angle_about(&self, target: Vec3) -> f32 {
        let offset = self.position - target;
        if offset.length_squared() <= f32::EPSILON {
            return 0.0;
        }
        offset.normalize().y.clamp(-1.0, 1.0).acos()
    }

    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            position: self.position,
            rotation: self.rotation,
        }
    }
}

/// Pose captured before a transition mutates the camera, restored when the
/// transition unwinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSnapshot {
    pub position: Vec3,
    pub rotation: Vec3,
}
