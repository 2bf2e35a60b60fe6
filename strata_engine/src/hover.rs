//! Hover picking. Every frame the dispatcher casts a ray from the camera
//! through the pointer, resets every slab to identity scale, and enlarges
//! the nearest hit slightly. It stands down completely while a zoom
//! transition is active so the focused layer's enlarged scale survives.

use glam::Vec3;
use strata_scene::{camera::FOV_Y_DEGREES, LayerId, SceneState};

use crate::session::SessionContext;

const HOVER_SCALE: f32 = 1.1;

/// Pointer position in normalized device coordinates: x right, y up, both
/// in [-1, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerNdc {
    pub x: f32,
    pub y: f32,
}

#[derive(Default)]
pub struct HoverDispatcher {
    current: Option<LayerId>,
}

impl HoverDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_intersect(&self) -> Option<LayerId> {
        self.current
    }

    /// Per-frame pick pass. `pointer` is `None` while the cursor is outside
    /// the window; `aspect` is the viewport width over height.
    pub fn update(&mut self, ctx: &mut SessionContext, pointer: Option<PointerNdc>, aspect: f32) {
        if ctx.transition.is_active() {
            return;
        }
        for layer in LayerId::ALL {
            ctx.scene.layer_mut(layer).scale = Vec3::ONE;
        }
        self.current = None;
        ctx.hovered = None;

        let Some(pointer) = pointer else {
            return;
        };
        let (origin, direction) = pointer_ray(&ctx.scene, pointer, aspect);
        let mut nearest: Option<(LayerId, f32)> = None;
        for layer in LayerId::ALL {
            let center = ctx.scene.layer(layer).position;
            let half = layer.slab_size() * 0.5;
            if let Some(distance) = ray_box_intersection(origin, direction, center, half) {
                if nearest.map_or(true, |(_, best)| distance < best) {
                    nearest = Some((layer, distance));
                }
            }
        }
        if let Some((layer, _)) = nearest {
            ctx.scene.layer_mut(layer).scale = Vec3::splat(HOVER_SCALE);
            self.current = Some(layer);
            ctx.hovered = Some(layer);
        }
    }
}

/// World-space ray through the pointer for a perspective camera with the
/// scene's fixed vertical field of view.
fn pointer_ray(scene: &SceneState, pointer: PointerNdc, aspect: f32) -> (Vec3, Vec3) {
    let tan_half = (FOV_Y_DEGREES.to_radians() * 0.5).tan();
    let local = Vec3::new(
        pointer.x * tan_half * aspect,
        pointer.y * tan_half,
        -1.0,
    );
    let direction = (scene.camera.rotation_quat() * local).normalize();
    (scene.camera.position, direction)
}

/// Slab-method ray/AABB test. Returns the entry distance along the ray, or
/// zero when the origin is already inside the box.
fn ray_box_intersection(origin: Vec3, direction: Vec3, center: Vec3, half: Vec3) -> Option<f32> {
    let min = center - half;
    let max = center + half;
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() <= f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let t0 = (min[axis] - o) / d;
        let t1 = (max[axis] - o) / d;
        let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        t_enter = t_enter.max(near);
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return None;
        }
    }
    if t_exit < 0.0 {
        return None;
    }
    Some(t_enter.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TransitionState;
    use strata_scene::Camera;

    const ASPECT: f32 = 16.0 / 9.0;

    fn scene_looking_down_z(eye: Vec3) -> SessionContext {
        let mut ctx = SessionContext::new();
        ctx.scene.camera = Camera::new(eye);
        ctx
    }

    #[test]
    fn centre_pointer_hits_the_slab_straight_ahead() {
        let mut ctx = scene_looking_down_z(Vec3::new(0.0, 1.25, 10.0));
        let mut hover = HoverDispatcher::new();
        hover.update(&mut ctx, Some(PointerNdc { x: 0.0, y: 0.0 }), ASPECT);
        assert_eq!(hover.current_intersect(), Some(LayerId::Topsoil));
        assert_eq!(ctx.hovered, Some(LayerId::Topsoil));
        assert_eq!(
            ctx.scene.layer(LayerId::Topsoil).scale,
            Vec3::splat(HOVER_SCALE)
        );
        for other in LayerId::Topsoil.siblings() {
            assert_eq!(ctx.scene.layer(other).scale, Vec3::ONE);
        }
    }

    #[test]
    fn pointer_leaving_the_window_clears_the_highlight() {
        let mut ctx = scene_looking_down_z(Vec3::new(0.0, 0.0, 10.0));
        let mut hover = HoverDispatcher::new();
        hover.update(&mut ctx, Some(PointerNdc { x: 0.0, y: 0.0 }), ASPECT);
        assert!(hover.current_intersect().is_some());
        hover.update(&mut ctx, None, ASPECT);
        assert_eq!(hover.current_intersect(), None);
        for layer in LayerId::ALL {
            assert_eq!(ctx.scene.layer(layer).scale, Vec3::ONE);
        }
    }

    #[test]
    fn miss_above_the_stack_selects_nothing() {
        let mut ctx = scene_looking_down_z(Vec3::new(0.0, 30.0, 10.0));
        let mut hover = HoverDispatcher::new();
        hover.update(&mut ctx, Some(PointerNdc { x: 0.0, y: 0.9 }), ASPECT);
        assert_eq!(hover.current_intersect(), None);
        assert_eq!(ctx.hovered, None);
    }

    #[test]
    fn dispatcher_stands_down_during_a_transition() {
        let mut ctx = scene_looking_down_z(Vec3::new(0.0, 1.25, 10.0));
        ctx.scene.layer_mut(LayerId::Topsoil).scale = Vec3::splat(1.2);
        ctx.transition = TransitionState::Focused(LayerId::Topsoil);
        let mut hover = HoverDispatcher::new();
        hover.update(&mut ctx, Some(PointerNdc { x: 0.0, y: 0.0 }), ASPECT);
        // Focused scale untouched, nothing recorded.
        assert_eq!(ctx.scene.layer(LayerId::Topsoil).scale, Vec3::splat(1.2));
        assert_eq!(hover.current_intersect(), None);
    }

    #[test]
    fn nearest_of_two_overlapping_slabs_wins() {
        let mut ctx = scene_looking_down_z(Vec3::new(0.0, 0.0, 10.0));
        // Stack two slabs on the ray, one closer to the eye.
        ctx.scene.layer_mut(LayerId::Subsoil).position = Vec3::new(0.0, 0.0, 4.0);
        ctx.scene.layer_mut(LayerId::BedRock).position = Vec3::new(0.0, 0.0, -4.0);
        let mut hover = HoverDispatcher::new();
        hover.update(&mut ctx, Some(PointerNdc { x: 0.0, y: 0.0 }), ASPECT);
        assert_eq!(hover.current_intersect(), Some(LayerId::Subsoil));
    }

    #[test]
    fn ray_box_entry_distance_is_sane() {
        let hit = ray_box_intersection(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::splat(1.0),
        );
        assert!(matches!(hit, Some(t) if (t - 9.0).abs() < 1e-5));
        let inside = ray_box_intersection(Vec3::ZERO, Vec3::NEG_Z, Vec3::ZERO, Vec3::splat(1.0));
        assert_eq!(inside, Some(0.0));
        let miss = ray_box_intersection(
            Vec3::new(5.0, 0.0, 10.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::splat(1.0),
        );
        assert!(miss.is_none());
    }
}
