use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The six soil strata, ordered top of the stack to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerId {
    Grass,
    Humus,
    Topsoil,
    Subsoil,
    ParentRock,
    BedRock,
}

impl LayerId {
    pub const COUNT: usize = 6;

    pub const ALL: [LayerId; Self::COUNT] = [
        LayerId::Grass,
        LayerId::Humus,
        LayerId::Topsoil,
        LayerId::Subsoil,
        LayerId::ParentRock,
        LayerId::BedRock,
    ];

    /// Stable index into per-layer arrays, top to bottom.
    pub const fn index(self) -> usize {
        match self {
            LayerId::Grass => 0,
            LayerId::Humus => 1,
            LayerId::Topsoil => 2,
            LayerId::Subsoil => 3,
            LayerId::ParentRock => 4,
            LayerId::BedRock => 5,
        }
    }

    pub fn from_slug(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "grass" => Some(LayerId::Grass),
            "humus" => Some(LayerId::Humus),
            "topsoil" => Some(LayerId::Topsoil),
            "subsoil" => Some(LayerId::Subsoil),
            "parentrock" | "parent_rock" => Some(LayerId::ParentRock),
            "bedrock" | "bed_rock" => Some(LayerId::BedRock),
            _ => None,
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            LayerId::Grass => "grass",
            LayerId::Humus => "humus",
            LayerId::Topsoil => "topsoil",
            LayerId::Subsoil => "subsoil",
            LayerId::ParentRock => "parentRock",
            LayerId::BedRock => "bedRock",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LayerId::Grass => "Grass",
            LayerId::Humus => "Humus",
            LayerId::Topsoil => "Topsoil",
            LayerId::Subsoil => "Subsoil",
            LayerId::ParentRock => "Parent rock",
            LayerId::BedRock => "Bedrock",
        }
    }

    /// Every layer except `self`, in stack order.
    pub fn siblings(self) -> impl Iterator<Item = LayerId> {
        Self::ALL.into_iter().filter(move |layer| *layer != self)
    }

    /// Full extents of the layer's slab mesh. The grass sheet is a thin
    /// plate sitting on top of the humus slab.
    pub const fn slab_size(self) -> Vec3 {
        match self {
            LayerId::Grass => Vec3::new(3.0, 0.05, 3.0),
            LayerId::Humus => Vec3::new(3.0, 0.5, 3.0),
            LayerId::Topsoil => Vec3::new(3.0, 1.0, 3.0),
            LayerId::Subsoil => Vec3::new(3.0, 1.5, 3.0),
            LayerId::ParentRock => Vec3::new(3.0, 1.5, 3.0),
            LayerId::BedRock => Vec3::new(3.0, 2.5, 3.0),
        }
    }

    /// Resting centre height of the slab for the collapsed or expanded
    /// arrangement of the stack.
    pub const fn rest_height(self, expanded: bool) -> f32 {
        if expanded {
            match self {
                LayerId::Grass => 5.3,
                LayerId::Humus => 5.0,
                LayerId::Topsoil => 3.7,
                LayerId::Subsoil => 2.0,
                LayerId::ParentRock => -0.5,
                LayerId::BedRock => -4.0,
            }
        } else {
            match self {
                LayerId::Grass => 2.3,
                LayerId::Humus => 2.0,
                LayerId::Topsoil => 1.25,
                LayerId::Subsoil => 0.0,
                LayerId::ParentRock => -1.5,
                LayerId::BedRock => -3.5,
            }
        }
    }
}
