//! Scene data model for the soil-strata viewer: the named layer stack and
//! its slab geometry, the camera, the orbit-controls configuration, and the
//! asset manifest. Everything here is plain mutable state; the choreography
//! that animates it lives in `strata_engine`.

pub mod camera;
pub mod controls;
pub mod layer;
pub mod manifest;
pub mod stack;

pub use camera::{Camera, CameraSnapshot};
pub use controls::{ControlsSnapshot, OrbitControls};
pub use layer::LayerId;
pub use manifest::{load_manifest, ManifestError, SceneManifest, SoundSet};
pub use stack::{SceneState, Transform};
