//! Spawns the demo binary and checks the JSON transcript it writes, so the
//! CLI surface and the serialization stay honest end to end.

use std::fs;
use std::process::Command;

use strata_engine::SessionTranscript;

fn run_demo(args: &[&str]) -> SessionTranscript {
    let dir = tempfile::tempdir().expect("create temp dir");
    let transcript_path = dir.path().join("transcript.json");
    let output = Command::new(env!("CARGO_BIN_EXE_strata_engine"))
        .args(args)
        .arg("--transcript-json")
        .arg(&transcript_path)
        .output()
        .expect("run strata_engine demo");
    assert!(
        output.status.success(),
        "demo failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let raw = fs::read_to_string(&transcript_path).expect("read transcript");
    serde_json::from_str(&raw).expect("parse transcript")
}

#[test]
fn focus_demo_transcript_ends_at_rest() {
    let transcript = run_demo(&["--focus-demo", "topsoil"]);
    assert!(transcript.frames > 0);
    assert!(!transcript.expanded);
    for pose in &transcript.layers {
        let expected_y = pose.layer.rest_height(false);
        assert!(
            (pose.position[1] - expected_y).abs() < 1e-3,
            "{} ended at y={}",
            pose.layer.slug(),
            pose.position[1]
        );
        assert!((pose.scale[1] - 1.0).abs() < 1e-3);
    }
    for expected in [
        "zoom.focus.start topsoil",
        "zoom.focused topsoil",
        "zoom.return.start topsoil",
        "zoom.return.done topsoil",
    ] {
        assert!(
            transcript.events.iter().any(|event| event == expected),
            "missing event {expected}"
        );
    }
    assert_eq!(transcript.cues.len(), 1, "exactly the return whoosh");
}

#[test]
fn tour_demo_transcript_walks_the_waypoints_in_order() {
    let transcript = run_demo(&["--tour-demo"]);
    let indices: Vec<usize> = [
        "tour.waypoint overview",
        "tour.waypoint humus",
        "tour.waypoint subsoil",
        "tour.waypoint parentRock",
        "tour.waypoint bedRock",
        "tour.done",
    ]
    .iter()
    .map(|needle| {
        transcript
            .events
            .iter()
            .position(|event| event == *needle)
            .unwrap_or_else(|| panic!("missing event {needle}"))
    })
    .collect();
    assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(!transcript.expanded, "auto-expanded stack collapses again");
}

#[test]
fn expand_demo_transcript_leaves_the_stack_expanded() {
    let transcript = run_demo(&["--expand-demo"]);
    assert!(transcript.expanded);
    for pose in &transcript.layers {
        assert!((pose.position[1] - pose.layer.rest_height(true)).abs() < 1e-3);
    }
}
