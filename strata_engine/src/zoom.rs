//! Layer zoom controller. One parameterized state machine drives the
//! focus/return choreography for whichever layer was selected: focus hides
//! the rest of the stack, centres and enlarges the subject, and flies the
//! camera in while tracking it; return unwinds everything from snapshots
//! captured at focus entry. The controller holds a single transition slot,
//! so overlapping requests are dropped, not queued.

use glam::Vec3;
use strata_scene::{
    stack::{SAPLING_COLLAPSED_Y, SAPLING_EXPANDED_Y},
    CameraSnapshot, ControlsSnapshot, LayerId, Transform,
};

use crate::cues::Cue;
use crate::session::{SessionContext, TransitionState};
use crate::tween::{Channel, Follow, Timeline, Track, TrackTarget};

const HIDE_Y: f32 = -100.0;
const FOCUS_SCALE: f32 = 1.2;
const FOCUS_CAMERA: Vec3 = Vec3::new(5.0, 5.0, 8.0);

const HIDE_DURATION: f32 = 1.0;
const CENTER_START: f32 = 0.5;
const CENTER_DURATION: f32 = 1.5;
const SCALE_DURATION: f32 = 1.0;
const CAMERA_START: f32 = 0.8;
const CAMERA_DURATION: f32 = 2.0;

const RETURN_CAMERA_DURATION: f32 = 2.0;
const RETURN_SUBJECT_START: f32 = 0.5;
const RETURN_SUBJECT_DURATION: f32 = 1.5;
const RETURN_SIBLING_START: f32 = 1.0;
const RETURN_SIBLING_DURATION: f32 = 1.5;

/// Invoked once when the matching return transition completes.
pub type ZoomCallback = Box<dyn FnOnce(&mut SessionContext)>;

/// Everything captured at focus entry, consumed exactly once on return.
struct FocusSnapshot {
    camera: CameraSnapshot,
    layers: [Transform; LayerId::COUNT],
    controls: Option<ControlsSnapshot>,
}

enum Phase {
    FocusingIn,
    Focused,
    ReturningOut,
}

struct ActiveZoom {
    subject: LayerId,
    phase: Phase,
    timeline: Timeline,
    snapshot: FocusSnapshot,
    on_complete: Option<ZoomCallback>,
}

#[derive(Default)]
pub struct LayerZoomController {
    active: Option<ActiveZoom>,
}

impl LayerZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn focused_layer(&self) -> Option<LayerId> {
        match self.active.as_ref() {
            Some(active) if matches!(active.phase, Phase::Focused) => Some(active.subject),
            _ => None,
        }
    }

    pub fn focus(&mut self, ctx: &mut SessionContext, layer: LayerId) {
        self.focus_with(ctx, layer, None);
    }

    /// Begin the focus transition for `layer`. Dropped silently while any
    /// transition or the tour already owns the camera.
    pub fn focus_with(
        &mut self,
        ctx: &mut SessionContext,
        layer: LayerId,
        on_complete: Option<ZoomCallback>,
    ) {
        if self.active.is_some() || ctx.camera_busy() {
            ctx.log_event(format!("zoom.focus.ignored {}", layer.slug()));
            return;
        }
        let snapshot = FocusSnapshot {
            camera: ctx.scene.camera.snapshot(),
            layers: ctx.scene.layer_poses(),
            controls: None,
        };
        ctx.scene.controls.enabled = false;
        ctx.transition = TransitionState::FocusingIn(layer);
        ctx.log_event(format!("zoom.focus.start {}", layer.slug()));
        self.active = Some(ActiveZoom {
            subject: layer,
            phase: Phase::FocusingIn,
            timeline: build_focus_timeline(layer, ctx.scene.sapling.is_some()),
            snapshot,
            on_complete,
        });
    }

    /// Reverse a completed focus. Ignored unless the transition slot is in
    /// the fully focused phase, so mashing the affordance mid-flight does
    /// not restart the unwind.
    pub fn trigger_return(&mut self, ctx: &mut SessionContext) {
        let Some(active) = self.active.as_mut() else {
            ctx.log_event("zoom.return.ignored");
            return;
        };
        if !matches!(active.phase, Phase::Focused) {
            ctx.log_event(format!("zoom.return.ignored {}", active.subject.slug()));
            return;
        }
        ctx.back_visible = false;
        ctx.cues.push(Cue::Whoosh);
        if let Some(saved) = active.snapshot.controls.take() {
            ctx.scene.controls.restore(saved);
        }
        // The return timeline owns the camera until it lands.
        ctx.scene.controls.enabled = false;
        active.timeline = build_return_timeline(
            active.subject,
            &active.snapshot,
            ctx.expanded,
            ctx.scene.sapling.is_some(),
        );
        active.phase = Phase::ReturningOut;
        ctx.transition = TransitionState::ReturningOut(active.subject);
        ctx.log_event(format!("zoom.return.start {}", active.subject.slug()));
    }

    /// Advance the in-flight transition by one frame.
    pub fn tick(&mut self, ctx: &mut SessionContext, dt: f32) {
        let Some(mut active) = self.active.take() else {
            return;
        };
        match active.phase {
            Phase::Focused => {}
            Phase::FocusingIn => {
                if active.timeline.advance(&mut ctx.scene, dt) {
                    let subject_pos = ctx.scene.layer(active.subject).position;
                    let polar = ctx.scene.camera.polar_angle_about(subject_pos);
                    active.snapshot.controls = Some(ctx.scene.controls.snapshot());
                    ctx.scene.controls.lock_horizontal_orbit(polar, subject_pos);
                    active.phase = Phase::Focused;
                    ctx.transition = TransitionState::Focused(active.subject);
                    ctx.back_visible = true;
                    ctx.log_event(format!("zoom.focused {}", active.subject.slug()));
                }
            }
            Phase::ReturningOut => {
                if active.timeline.advance(&mut ctx.scene, dt) {
                    // Land exactly on the snapshot; the tween gets within
                    // float tolerance, the snap removes the residue.
                    ctx.scene.restore_layer_poses(&active.snapshot.layers);
                    ctx.scene.camera.position = active.snapshot.camera.position;
                    ctx.scene.camera.rotation = active.snapshot.camera.rotation;
                    if let Some(sapling) = ctx.scene.sapling.as_mut() {
                        sapling.position.y = sapling_rest_y(ctx.expanded);
                    }
                    ctx.scene.controls.enabled = true;
                    ctx.transition = TransitionState::Idle;
                    ctx.log_event(format!("zoom.return.done {}", active.subject.slug()));
                    if let Some(callback) = active.on_complete.take() {
                        callback(ctx);
                    }
                    return;
                }
            }
        }
        self.active = Some(active);
    }
}

fn sapling_rest_y(expanded: bool) -> f32 {
    if expanded {
        SAPLING_EXPANDED_Y
    } else {
        SAPLING_COLLAPSED_Y
    }
}

fn build_focus_timeline(subject: LayerId, has_sapling: bool) -> Timeline {
    let mut timeline = Timeline::new();
    for sibling in subject.siblings() {
        timeline.push(Track::new(
            Channel::LayerPosition(sibling),
            TrackTarget::Y(HIDE_Y),
            0.0,
            HIDE_DURATION,
        ));
    }
    if has_sapling {
        timeline.push(Track::new(
            Channel::SaplingPosition,
            TrackTarget::Y(HIDE_Y),
            0.0,
            HIDE_DURATION,
        ));
    }
    timeline.push(Track::new(
        Channel::LayerPosition(subject),
        TrackTarget::Vector(Vec3::ZERO),
        CENTER_START,
        CENTER_DURATION,
    ));
    timeline.push(Track::new(
        Channel::LayerScale(subject),
        TrackTarget::Vector(Vec3::splat(FOCUS_SCALE)),
        CENTER_START,
        SCALE_DURATION,
    ));
    timeline.push(
        Track::new(
            Channel::CameraPosition,
            TrackTarget::Vector(FOCUS_CAMERA),
            CAMERA_START,
            CAMERA_DURATION,
        )
        .with_follow(Follow::CameraLookAtLayer(subject)),
    );
    timeline
}

fn build_return_timeline(
    subject: LayerId,
    snapshot: &FocusSnapshot,
    expanded: bool,
    has_sapling: bool,
) -> Timeline {
    let mut timeline = Timeline::new();
    timeline.push(Track::new(
        Channel::CameraPosition,
        TrackTarget::Vector(snapshot.camera.position),
        0.0,
        RETURN_CAMERA_DURATION,
    ));
    timeline.push(Track::new(
        Channel::CameraRotation,
        TrackTarget::Vector(snapshot.camera.rotation),
        0.0,
        RETURN_CAMERA_DURATION,
    ));
    let subject_pose = snapshot.layers[subject.index()];
    timeline.push(Track::new(
        Channel::LayerPosition(subject),
        TrackTarget::Vector(subject_pose.position),
        RETURN_SUBJECT_START,
        RETURN_SUBJECT_DURATION,
    ));
    timeline.push(Track::new(
        Channel::LayerScale(subject),
        TrackTarget::Vector(subject_pose.scale),
        RETURN_SUBJECT_START,
        RETURN_SUBJECT_DURATION,
    ));
    for sibling in subject.siblings() {
        timeline.push(Track::new(
            Channel::LayerPosition(sibling),
            TrackTarget::Vector(snapshot.layers[sibling.index()].position),
            RETURN_SIBLING_START,
            RETURN_SIBLING_DURATION,
        ));
    }
    if has_sapling {
        timeline.push(Track::new(
            Channel::SaplingPosition,
            TrackTarget::Y(sapling_rest_y(expanded)),
            RETURN_SIBLING_START,
            RETURN_SIBLING_DURATION,
        ));
    }
    timeline
}
