//! Geometry for the slab stack: one shared unit cube drawn instanced, with
//! a per-instance model matrix and colour.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use strata_scene::{LayerId, Transform};

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct SlabVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct SlabInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_projection: [[f32; 4]; 4],
}

pub fn view_projection_uniform(matrix: Mat4) -> SceneUniforms {
    SceneUniforms {
        view_projection: matrix.to_cols_array_2d(),
    }
}

/// Axis-aligned unit cube centred on the origin, four vertices per face so
/// the normals stay flat. Indexed, counter-clockwise winding.
pub fn unit_cube() -> (Vec<SlabVertex>, Vec<u16>) {
    // (normal, tangent, bitangent) per face.
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, tangent, bitangent) in FACES {
        let n = Vec3::from(normal) * 0.5;
        let t = Vec3::from(tangent) * 0.5;
        let b = Vec3::from(bitangent) * 0.5;
        let base = vertices.len() as u16;
        for corner in [n - t - b, n + t - b, n + t + b, n - t + b] {
            vertices.push(SlabVertex {
                position: corner.to_array(),
                normal,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

/// Earth tones standing in for the layer textures.
pub fn layer_color(layer: LayerId) -> [f32; 4] {
    match layer {
        LayerId::Grass => [0.45, 0.72, 0.33, 1.0],
        LayerId::Humus => [0.35, 0.23, 0.12, 1.0],
        LayerId::Topsoil => [0.72, 0.57, 0.39, 1.0],
        LayerId::Subsoil => [0.62, 0.36, 0.26, 1.0],
        LayerId::ParentRock => [0.46, 0.43, 0.39, 1.0],
        LayerId::BedRock => [0.35, 0.34, 0.33, 1.0],
    }
}

pub const SAPLING_COLOR: [f32; 4] = [0.30, 0.55, 0.24, 1.0];
pub const SAPLING_SIZE: Vec3 = Vec3::new(0.3, 1.0, 0.3);

/// Instance for one slab: the layer's animated transform applied on top of
/// the slab's fixed extents.
pub fn slab_instance(layer: LayerId, transform: Transform) -> SlabInstance {
    instance(transform, layer.slab_size(), layer_color(layer))
}

pub fn sapling_instance(transform: Transform) -> SlabInstance {
    instance(transform, SAPLING_SIZE, SAPLING_COLOR)
}

fn instance(transform: Transform, extents: Vec3, color: [f32; 4]) -> SlabInstance {
    let model = Mat4::from_scale_rotation_translation(
        transform.scale * extents,
        Quat::IDENTITY,
        transform.position,
    );
    SlabInstance {
        model: model.to_cols_array_2d(),
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_has_flat_shaded_faces() {
        let (vertices, indices) = unit_cube();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        for vertex in &vertices {
            for component in vertex.position {
                assert!(component.abs() <= 0.5 + 1e-6);
            }
            let normal = Vec3::from(vertex.normal);
            assert!((normal.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn slab_instance_bakes_extents_and_hover_scale() {
        let mut transform = Transform::at_height(1.25);
        transform.scale = Vec3::splat(1.1);
        let instance = slab_instance(LayerId::Topsoil, transform);
        // Column-major: model[0][0] is the x extent times the hover scale.
        assert!((instance.model[0][0] - 3.0 * 1.1).abs() < 1e-5);
        assert!((instance.model[1][1] - 1.0 * 1.1).abs() < 1e-5);
        assert!((instance.model[3][1] - 1.25).abs() < 1e-5);
    }
}
