//! Guided tour: a counter-guarded camera flythrough over the expanded
//! stack. The run counter is incremented before any other work and only the
//! call that takes it to exactly one proceeds, so double-fired input cannot
//! start two tours. If the stack is collapsed the tour expands it first and
//! waits for that animation's real completion before the first leg; a stack
//! the tour expanded is collapsed again on the way out.

use glam::Vec3;
use strata_scene::CameraSnapshot;

use crate::cues::Cue;
use crate::expand::ExpandController;
use crate::session::{SessionContext, TourState};
use crate::tween::{Channel, Follow, Timeline, Track, TrackTarget};

struct Waypoint {
    name: &'static str,
    position: Vec3,
    target: Vec3,
    travel: f32,
    hold: f32,
    narration: bool,
}

/// Flythrough stations, framed against the expanded rest heights.
const WAYPOINTS: [Waypoint; 5] = [
    Waypoint {
        name: "overview",
        position: Vec3::new(0.0, 9.0, 14.0),
        target: Vec3::new(0.0, 2.0, 0.0),
        travel: 2.5,
        hold: 4.0,
        narration: true,
    },
    Waypoint {
        name: "humus",
        position: Vec3::new(3.0, 6.0, 5.0),
        target: Vec3::new(0.0, 5.0, 0.0),
        travel: 2.0,
        hold: 3.0,
        narration: false,
    },
    Waypoint {
        name: "subsoil",
        position: Vec3::new(3.0, 3.0, 5.0),
        target: Vec3::new(0.0, 2.0, 0.0),
        travel: 2.0,
        hold: 3.0,
        narration: false,
    },
    Waypoint {
        name: "parentRock",
        position: Vec3::new(3.0, 0.5, 5.0),
        target: Vec3::new(0.0, -0.5, 0.0),
        travel: 2.0,
        hold: 3.0,
        narration: false,
    },
    Waypoint {
        name: "bedRock",
        position: Vec3::new(3.0, -3.0, 5.0),
        target: Vec3::new(0.0, -4.0, 0.0),
        travel: 2.0,
        hold: 3.0,
        narration: false,
    },
];

const RETURN_TRAVEL: f32 = 2.5;

enum TourStage {
    Expanding,
    Travel(usize),
    Hold { index: usize, remaining: f32 },
    ReturnTravel,
    Collapsing,
}

struct ActiveTour {
    stage: TourStage,
    timeline: Timeline,
    start_camera: CameraSnapshot,
    start_target: Vec3,
    auto_expanded: bool,
}

#[derive(Default)]
pub struct GuidedTourController {
    runs: u32,
    active: Option<ActiveTour>,
}

impl GuidedTourController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Start the flythrough. A second call before completion loses the
    /// counter race and is dropped; a call during a zoom transition resets
    /// the counter so a later attempt can still win.
    pub fn run_tour(&mut self, ctx: &mut SessionContext, expand: &mut ExpandController) {
        self.runs += 1;
        if self.runs != 1 {
            ctx.log_event("tour.ignored.duplicate");
            return;
        }
        if ctx.transition.is_active() {
            self.runs = 0;
            ctx.log_event("tour.ignored.busy");
            return;
        }
        let start_camera = ctx.scene.camera.snapshot();
        let start_target = ctx.scene.controls.target;
        let auto_expanded = !ctx.expanded;
        ctx.tour = TourState::Running;
        ctx.scene.controls.enabled = false;
        ctx.log_event("tour.start");
        let (stage, timeline) = if auto_expanded {
            expand.toggle(ctx);
            (TourStage::Expanding, Timeline::new())
        } else {
            (TourStage::Travel(0), travel_timeline(&WAYPOINTS[0]))
        };
        self.active = Some(ActiveTour {
            stage,
            timeline,
            start_camera,
            start_target,
            auto_expanded,
        });
    }

    /// Advance the tour by one frame. The expand controller is ticked by
    /// the runtime before this runs, so `is_animating` reflects this frame.
    pub fn tick(&mut self, ctx: &mut SessionContext, expand: &mut ExpandController, dt: f32) {
        let Some(mut active) = self.active.take() else {
            return;
        };
        match active.stage {
            TourStage::Expanding => {
                if !expand.is_animating() {
                    active.timeline = travel_timeline(&WAYPOINTS[0]);
                    active.stage = TourStage::Travel(0);
                }
            }
            TourStage::Travel(index) => {
                if active.timeline.advance(&mut ctx.scene, dt) {
                    let waypoint = &WAYPOINTS[index];
                    ctx.log_event(format!("tour.waypoint {}", waypoint.name));
                    if waypoint.narration {
                        ctx.cues.push(Cue::Narration);
                    }
                    active.stage = TourStage::Hold {
                        index,
                        remaining: waypoint.hold,
                    };
                }
            }
            TourStage::Hold { index, remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    active.stage = TourStage::Hold { index, remaining };
                } else if index + 1 < WAYPOINTS.len() {
                    active.timeline = travel_timeline(&WAYPOINTS[index + 1]);
                    active.stage = TourStage::Travel(index + 1);
                } else {
                    active.timeline = return_timeline(&active);
                    active.stage = TourStage::ReturnTravel;
                }
            }
            TourStage::ReturnTravel => {
                if active.timeline.advance(&mut ctx.scene, dt) {
                    if active.auto_expanded {
                        expand.toggle(ctx);
                        active.stage = TourStage::Collapsing;
                    } else {
                        self.finish(ctx, &active);
                        return;
                    }
                }
            }
            TourStage::Collapsing => {
                if !expand.is_animating() {
                    self.finish(ctx, &active);
                    return;
                }
            }
        }
        self.active = Some(active);
    }

    fn finish(&mut self, ctx: &mut SessionContext, active: &ActiveTour) {
        ctx.scene.camera.position = active.start_camera.position;
        ctx.scene.camera.rotation = active.start_camera.rotation;
        ctx.scene.controls.target = active.start_target;
        ctx.scene.controls.enabled = true;
        ctx.tour = TourState::Idle;
        self.runs = 0;
        ctx.log_event("tour.done");
    }
}

fn travel_timeline(waypoint: &Waypoint) -> Timeline {
    leg(waypoint.position, waypoint.target, waypoint.travel)
}

fn return_timeline(active: &ActiveTour) -> Timeline {
    leg(active.start_camera.position, active.start_target, RETURN_TRAVEL)
}

// The controls-target track runs first so the camera's per-tick look-at
// follows the already-updated aim point.
fn leg(position: Vec3, target: Vec3, travel: f32) -> Timeline {
    Timeline::new()
        .with(Track::new(
            Channel::ControlsTarget,
            TrackTarget::Vector(target),
            0.0,
            travel,
        ))
        .with(
            Track::new(
                Channel::CameraPosition,
                TrackTarget::Vector(position),
                0.0,
                travel,
            )
            .with_follow(Follow::CameraLookAtControlsTarget),
        )
}
