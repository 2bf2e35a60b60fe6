//! Guided-tour behavior through the public runtime: auto-expand chaining,
//! waypoint coverage, camera restoration, and the re-entry counter.

use strata_engine::{Runtime, TourState};
use strata_scene::LayerId;

const DT: f32 = 1.0 / 60.0;

fn advance_until_idle(runtime: &mut Runtime) {
    for _ in 0..100_000 {
        runtime.advance(DT);
        if runtime.is_idle() {
            return;
        }
    }
    panic!("tour never completed");
}

#[test]
fn tour_from_collapsed_stack_expands_tours_and_collapses() {
    let mut runtime = Runtime::new();
    let start_camera = runtime.ctx.scene.camera.position;

    runtime.start_tour();
    assert_eq!(runtime.ctx.tour, TourState::Running);
    // The stack fans open before the first leg.
    assert!(runtime.ctx.expanded);
    advance_until_idle(&mut runtime);

    let events = runtime.ctx.events();
    let position = |needle: &str| events.iter().position(|event| event == needle);
    let expand_done = position("expand.done").expect("expand completion logged");
    let first_waypoint = position("tour.waypoint overview").expect("overview reached");
    assert!(
        expand_done < first_waypoint,
        "first leg must wait for the expand animation"
    );
    for name in ["humus", "subsoil", "parentRock", "bedRock"] {
        assert!(
            position(&format!("tour.waypoint {name}")).is_some(),
            "missing waypoint {name}"
        );
    }
    let tour_done = position("tour.done").expect("tour completion logged");
    let collapse_start = position("collapse.start").expect("auto-collapse logged");
    assert!(collapse_start < tour_done);

    assert_eq!(runtime.ctx.scene.camera.position, start_camera);
    assert!(!runtime.ctx.expanded);
    for layer in LayerId::ALL {
        let y = runtime.ctx.scene.layer(layer).position.y;
        assert!((y - layer.rest_height(false)).abs() < 1e-3, "{}", layer.slug());
    }
    assert!(runtime.ctx.scene.controls.enabled);
}

#[test]
fn narration_cue_fires_once_at_the_overview() {
    let mut runtime = Runtime::new();
    runtime.start_tour();
    advance_until_idle(&mut runtime);
    let narrations = runtime
        .ctx
        .cues
        .history()
        .iter()
        .filter(|cue| matches!(cue, strata_engine::Cue::Narration))
        .count();
    assert_eq!(narrations, 1);
}

#[test]
fn double_trigger_runs_exactly_one_tour() {
    let mut runtime = Runtime::new();
    runtime.start_tour();
    runtime.start_tour();
    advance_until_idle(&mut runtime);
    let starts = runtime
        .ctx
        .events()
        .iter()
        .filter(|event| *event == "tour.start")
        .count();
    assert_eq!(starts, 1);

    // The counter resets on completion, so a later run still works.
    runtime.start_tour();
    assert_eq!(runtime.ctx.tour, TourState::Running);
}

#[test]
fn clicks_are_ignored_while_the_tour_runs() {
    let mut runtime = Runtime::new();
    runtime.start_tour();
    runtime.advance(DT);
    runtime.click();
    assert!(runtime.ctx.transition.is_idle());
    advance_until_idle(&mut runtime);
}
