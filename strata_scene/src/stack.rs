use glam::Vec3;

use crate::camera::Camera;
use crate::controls::OrbitControls;
use crate::layer::LayerId;

/// Resting heights for the sapling model and the floating title, which move
/// with the stack when it fans open.
pub const SAPLING_EXPANDED_Y: f32 = 0.4;
pub const SAPLING_COLLAPSED_Y: f32 = -3.0;
pub const TITLE_EXPANDED_Y: f32 = 6.0;
pub const TITLE_COLLAPSED_Y: f32 = 3.0;

/// Default camera start pose.
pub const CAMERA_START: Vec3 = Vec3::new(4.0, 3.0, 8.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn at_height(y: f32) -> Self {
        Self {
            position: Vec3::new(0.0, y, 0.0),
            scale: Vec3::ONE,
        }
    }
}

/// The mutable scene the controllers choreograph and the renderer draws
/// every frame: slab transforms, the optional sapling, the floating title,
/// the camera, and the orbit-controls configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneState {
    layers: [Transform; LayerId::COUNT],
    pub sapling: Option<Transform>,
    pub title: Transform,
    pub camera: Camera,
    pub controls: OrbitControls,
}

impl SceneState {
    /// Collapsed stack, sapling tucked below it, camera on the default
    /// start pose looking at the origin.
    pub fn new() -> Self {
        let mut camera = Camera::new(CAMERA_START);
        camera.look_at(Vec3::ZERO);
        Self {
            layers: Self::rest_pose(false),
            sapling: Some(Transform::at_height(SAPLING_COLLAPSED_Y)),
            title: Transform::at_height(TITLE_COLLAPSED_Y),
            camera,
            controls: OrbitControls::default(),
        }
    }

    fn rest_pose(expanded: bool) -> [Transform; LayerId::COUNT] {
        LayerId::ALL.map(|layer| Transform::at_height(layer.rest_height(expanded)))
    }

    pub fn layer(&self, id: LayerId) -> Transform {
        self.layers[id.index()]
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut Transform {
        &mut self.layers[id.index()]
    }

    /// Snapshot of every slab transform, in stack order.
    pub fn layer_poses(&self) -> [Transform; LayerId::COUNT] {
        self.layers
    }

    pub fn restore_layer_poses(&mut self, poses: &[Transform; LayerId::COUNT]) {
        self.layers = *poses;
    }

    /// Apply the per-frame orbit-controls clamp to the camera.
    pub fn update_controls(&mut self) {
        let controls = self.controls;
        controls.update(&mut self.camera);
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}
