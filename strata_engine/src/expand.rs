//! Expand/collapse of the whole stack: every slab glides to its other rest
//! height with a per-layer stagger (the top layers lead on expand, trail on
//! collapse), and the sapling and title ride along. The expanded flag flips
//! at trigger time so a mid-flight toggle reverses from wherever the slabs
//! currently are.

use strata_scene::{
    stack::{SAPLING_COLLAPSED_Y, SAPLING_EXPANDED_Y, TITLE_COLLAPSED_Y, TITLE_EXPANDED_Y},
    LayerId,
};

use crate::session::SessionContext;
use crate::tween::{Channel, Timeline, Track, TrackTarget};

/// Per-layer durations, top of the stack to bottom.
pub const EXPAND_DURATIONS: [f32; LayerId::COUNT] = [1.0, 1.0, 1.2, 1.4, 1.6, 1.7];
pub const COLLAPSE_DURATIONS: [f32; LayerId::COUNT] = [1.8, 1.8, 1.6, 1.4, 1.2, 1.0];

const TITLE_EXPAND_DURATION: f32 = 1.0;
const TITLE_COLLAPSE_DURATION: f32 = 1.8;
const SAPLING_DURATION: f32 = 1.5;

#[derive(Default)]
pub struct ExpandController {
    active: Option<(Timeline, bool)>,
}

impl ExpandController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Flip the stack between its two rest arrangements. Ignored while a
    /// zoom transition holds the scene; returns whether the toggle took.
    pub fn toggle(&mut self, ctx: &mut SessionContext) -> bool {
        if ctx.transition.is_active() {
            ctx.log_event("expand.ignored");
            return false;
        }
        ctx.expanded = !ctx.expanded;
        let expanding = ctx.expanded;
        self.active = Some((
            build_toggle_timeline(expanding, ctx.scene.sapling.is_some()),
            expanding,
        ));
        ctx.log_event(if expanding {
            "expand.start"
        } else {
            "collapse.start"
        });
        true
    }

    pub fn tick(&mut self, ctx: &mut SessionContext, dt: f32) {
        let Some((mut timeline, expanding)) = self.active.take() else {
            return;
        };
        if timeline.advance(&mut ctx.scene, dt) {
            ctx.log_event(if expanding {
                "expand.done"
            } else {
                "collapse.done"
            });
        } else {
            self.active = Some((timeline, expanding));
        }
    }
}

fn build_toggle_timeline(expanding: bool, has_sapling: bool) -> Timeline {
    let durations = if expanding {
        EXPAND_DURATIONS
    } else {
        COLLAPSE_DURATIONS
    };
    let mut timeline = Timeline::new();
    for layer in LayerId::ALL {
        timeline.push(Track::new(
            Channel::LayerPosition(layer),
            TrackTarget::Y(layer.rest_height(expanding)),
            0.0,
            durations[layer.index()],
        ));
    }
    let (title_y, title_duration) = if expanding {
        (TITLE_EXPANDED_Y, TITLE_EXPAND_DURATION)
    } else {
        (TITLE_COLLAPSED_Y, TITLE_COLLAPSE_DURATION)
    };
    timeline.push(Track::new(
        Channel::TitlePosition,
        TrackTarget::Y(title_y),
        0.0,
        title_duration,
    ));
    if has_sapling {
        let sapling_y = if expanding {
            SAPLING_EXPANDED_Y
        } else {
            SAPLING_COLLAPSED_Y
        };
        timeline.push(Track::new(
            Channel::SaplingPosition,
            TrackTarget::Y(sapling_y),
            0.0,
            SAPLING_DURATION,
        ));
    }
    timeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TransitionState;

    const DT: f32 = 1.0 / 60.0;

    fn run_to_rest(expand: &mut ExpandController, ctx: &mut SessionContext) {
        for _ in 0..10_000 {
            expand.tick(ctx, DT);
            if !expand.is_animating() {
                return;
            }
        }
        panic!("expand animation never settled");
    }

    #[test]
    fn toggle_fans_the_stack_open_then_back() {
        let mut ctx = SessionContext::new();
        let mut expand = ExpandController::new();

        assert!(expand.toggle(&mut ctx));
        assert!(ctx.expanded);
        run_to_rest(&mut expand, &mut ctx);
        for layer in LayerId::ALL {
            assert!((ctx.scene.layer(layer).position.y - layer.rest_height(true)).abs() < 1e-4);
        }
        assert!((ctx.scene.title.position.y - TITLE_EXPANDED_Y).abs() < 1e-4);

        assert!(expand.toggle(&mut ctx));
        assert!(!ctx.expanded);
        run_to_rest(&mut expand, &mut ctx);
        for layer in LayerId::ALL {
            assert!((ctx.scene.layer(layer).position.y - layer.rest_height(false)).abs() < 1e-4);
        }
        assert_eq!(
            ctx.events().last().map(String::as_str),
            Some("collapse.done")
        );
    }

    #[test]
    fn toggle_is_refused_during_a_zoom_transition() {
        let mut ctx = SessionContext::new();
        ctx.transition = TransitionState::Focused(LayerId::Grass);
        let mut expand = ExpandController::new();
        assert!(!expand.toggle(&mut ctx));
        assert!(!ctx.expanded);
        assert!(!expand.is_animating());
    }

    #[test]
    fn mid_flight_toggle_reverses_from_the_current_pose() {
        let mut ctx = SessionContext::new();
        let mut expand = ExpandController::new();
        expand.toggle(&mut ctx);
        for _ in 0..20 {
            expand.tick(&mut ctx, DT);
        }
        let partway = ctx.scene.layer(LayerId::Grass).position.y;
        assert!(partway > LayerId::Grass.rest_height(false));
        expand.toggle(&mut ctx);
        run_to_rest(&mut expand, &mut ctx);
        assert!(
            (ctx.scene.layer(LayerId::Grass).position.y - LayerId::Grass.rest_height(false)).abs()
                < 1e-4
        );
    }
}
