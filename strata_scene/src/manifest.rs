use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layer::LayerId;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("reading scene manifest {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("parsing scene manifest {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// External assets the viewer binds: one colour texture per layer, the three
/// sounds, the sapling model, and the camera start pose. Every field has a
/// default matching the shipped asset set, so an empty `{}` manifest is a
/// valid one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneManifest {
    #[serde(default = "default_textures")]
    pub textures: BTreeMap<LayerId, String>,
    #[serde(default)]
    pub sounds: SoundSet,
    #[serde(default = "default_camera_position")]
    pub camera_position: [f32; 3],
    #[serde(default = "default_sapling_model")]
    pub sapling_model: Option<String>,
}

impl Default for SceneManifest {
    fn default() -> Self {
        Self {
            textures: default_textures(),
            sounds: SoundSet::default(),
            camera_position: default_camera_position(),
            sapling_model: default_sapling_model(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SoundSet {
    #[serde(default = "default_ambient")]
    pub ambient: String,
    #[serde(default = "default_narration")]
    pub narration: String,
    #[serde(default = "default_whoosh")]
    pub whoosh: String,
}

impl Default for SoundSet {
    fn default() -> Self {
        Self {
            ambient: default_ambient(),
            narration: default_narration(),
            whoosh: default_whoosh(),
        }
    }
}

fn default_textures() -> BTreeMap<LayerId, String> {
    let mut textures = BTreeMap::new();
    textures.insert(
        LayerId::Grass,
        "textures/Grass006_1K-JPG_Color.jpg".to_string(),
    );
    textures.insert(
        LayerId::Humus,
        "textures/trident_maple_bark_diff_1k.jpg".to_string(),
    );
    textures.insert(
        LayerId::Topsoil,
        "textures/gravelly_sand_diff_1k.jpg".to_string(),
    );
    textures.insert(
        LayerId::Subsoil,
        "textures/red_mud_stones_diff_1k.jpg".to_string(),
    );
    textures.insert(
        LayerId::ParentRock,
        "textures/rocks_ground_02_col_1k.jpg".to_string(),
    );
    textures.insert(
        LayerId::BedRock,
        "textures/broken_wall_diff_1k.jpg".to_string(),
    );
    textures
}

fn default_camera_position() -> [f32; 3] {
    [4.0, 3.0, 8.0]
}

fn default_sapling_model() -> Option<String> {
    Some("models/sapling.glb".to_string())
}

fn default_ambient() -> String {
    "sounds/avala-trail-forest-nature.mp3".to_string()
}

fn default_narration() -> String {
    "sounds/soil-narration.mp3".to_string()
}

fn default_whoosh() -> String {
    "sounds/whoosh.mp3".to_string()
}

pub fn load_manifest(path: &Path) -> Result<SceneManifest, ManifestError> {
    let raw = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ManifestError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_manifest_names_every_layer_texture() {
        let manifest = SceneManifest::default();
        for layer in LayerId::ALL {
            assert!(manifest.textures.contains_key(&layer), "{}", layer.slug());
        }
        assert_eq!(manifest.camera_position, [4.0, 3.0, 8.0]);
    }

    #[test]
    fn empty_json_object_parses_to_the_defaults() {
        let manifest: SceneManifest = serde_json::from_str("{}").unwrap();
        assert_eq!(manifest.sounds.whoosh, "sounds/whoosh.mp3");
        assert_eq!(manifest.textures.len(), LayerId::COUNT);
    }

    #[test]
    fn overrides_survive_a_parse() {
        let manifest: SceneManifest = serde_json::from_str(
            r#"{
                "textures": { "bedRock": "textures/custom_rock.jpg" },
                "camera_position": [0.0, 9.0, 14.0],
                "sapling_model": null
            }"#,
        )
        .unwrap();
        assert_eq!(
            manifest.textures.get(&LayerId::BedRock).map(String::as_str),
            Some("textures/custom_rock.jpg")
        );
        assert_eq!(manifest.camera_position, [0.0, 9.0, 14.0]);
        assert!(manifest.sapling_model.is_none());
    }
}
