//! End-to-end focus/return behavior through the public runtime, covering
//! the camera flight, the orbit lock, and pose restoration for every layer.

use glam::Vec3;
use strata_engine::{Runtime, TransitionState};
use strata_scene::LayerId;

const DT: f32 = 1.0 / 60.0;
const TOLERANCE: f32 = 1e-3;

fn advance_until<F: Fn(&Runtime) -> bool>(runtime: &mut Runtime, done: F) {
    for _ in 0..100_000 {
        runtime.advance(DT);
        if done(runtime) {
            return;
        }
    }
    panic!("runtime never reached the expected state");
}

#[test]
fn focus_then_return_restores_the_collapsed_scene_for_every_layer() {
    for subject in LayerId::ALL {
        let mut runtime = Runtime::new();
        let rest = runtime.ctx.scene.layer_poses();
        let rest_camera = runtime.ctx.scene.camera.position;

        runtime.focus(subject);
        advance_until(&mut runtime, |r| {
            r.ctx.transition == TransitionState::Focused(subject)
        });

        let focused = runtime.ctx.scene.layer(subject);
        assert!(
            focused.position.length() < TOLERANCE,
            "{} not centred",
            subject.slug()
        );
        assert!((focused.scale - Vec3::splat(1.2)).length() < TOLERANCE);
        for sibling in subject.siblings() {
            assert!(
                runtime.ctx.scene.layer(sibling).position.y < -90.0,
                "{} still visible while {} is focused",
                sibling.slug(),
                subject.slug()
            );
        }
        assert!((runtime.ctx.scene.camera.position - Vec3::new(5.0, 5.0, 8.0)).length() < TOLERANCE);
        assert!(runtime.ctx.back_visible);

        assert!(runtime.trigger_back());
        advance_until(&mut runtime, |r| r.is_idle());

        for layer in LayerId::ALL {
            let pose = runtime.ctx.scene.layer(layer);
            let original = rest[layer.index()];
            assert!(
                (pose.position - original.position).length() < TOLERANCE,
                "{} position not restored after focusing {}",
                layer.slug(),
                subject.slug()
            );
            assert!((pose.scale - original.scale).length() < TOLERANCE);
        }
        assert!((runtime.ctx.scene.camera.position - rest_camera).length() < TOLERANCE);
        assert!(!runtime.ctx.back_visible);
    }
}

#[test]
fn orbit_lock_pins_the_polar_angle_while_focused() {
    let mut runtime = Runtime::new();
    runtime.focus(LayerId::Topsoil);
    advance_until(&mut runtime, |r| {
        r.ctx.transition.focused_layer().is_some()
    });

    let controls = runtime.ctx.scene.controls;
    assert!(controls.enabled);
    assert!(!controls.enable_zoom);
    assert!(!controls.enable_pan);
    assert_eq!(controls.min_polar_angle, controls.max_polar_angle);
    assert!(controls.min_azimuth_angle.is_infinite());
    assert!(controls.max_azimuth_angle.is_infinite());
    assert_eq!(controls.target, runtime.ctx.scene.layer(LayerId::Topsoil).position);

    // The per-frame clamp holds the camera on the locked ring even if
    // something nudges it off.
    runtime.ctx.scene.camera.position += Vec3::new(0.0, 1.5, 0.0);
    runtime.advance(DT);
    let polar = runtime
        .ctx
        .scene
        .camera
        .polar_angle_about(runtime.ctx.scene.controls.target);
    assert!((polar - controls.min_polar_angle).abs() < 1e-3);
}

#[test]
fn focus_during_focus_is_single_flight() {
    let mut runtime = Runtime::new();
    runtime.focus(LayerId::Grass);
    runtime.advance(DT);
    runtime.focus(LayerId::BedRock);
    assert_eq!(
        runtime.ctx.transition,
        TransitionState::FocusingIn(LayerId::Grass)
    );
    advance_until(&mut runtime, |r| r.ctx.back_visible);
    // Still the first subject.
    assert_eq!(
        runtime.ctx.transition.focused_layer(),
        Some(LayerId::Grass)
    );
}

#[test]
fn whoosh_plays_on_return_only() {
    let mut runtime = Runtime::new();
    runtime.focus(LayerId::Humus);
    advance_until(&mut runtime, |r| r.ctx.back_visible);
    assert!(runtime.ctx.cues.history().is_empty());
    runtime.trigger_back();
    assert_eq!(runtime.ctx.cues.drain().len(), 1);
}
