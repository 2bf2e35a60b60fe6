//! Frame-driven composition of the controllers. Everything runs on the
//! caller's thread: the frontend forwards input between frames and calls
//! `advance` exactly once per rendered frame, so two timeline steps can
//! never interleave.

use strata_scene::{LayerId, SceneState};

use crate::cues::Cue;
use crate::expand::ExpandController;
use crate::hover::{HoverDispatcher, PointerNdc};
use crate::session::{SessionContext, TourState};
use crate::tour::GuidedTourController;
use crate::zoom::{LayerZoomController, ZoomCallback};

pub struct Runtime {
    pub ctx: SessionContext,
    zoom: LayerZoomController,
    tour: GuidedTourController,
    expand: ExpandController,
    hover: HoverDispatcher,
    pointer: Option<PointerNdc>,
    aspect: f32,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_context(SessionContext::new())
    }

    pub fn with_context(ctx: SessionContext) -> Self {
        Self {
            ctx,
            zoom: LayerZoomController::new(),
            tour: GuidedTourController::new(),
            expand: ExpandController::new(),
            hover: HoverDispatcher::new(),
            pointer: None,
            aspect: 16.0 / 9.0,
        }
    }

    pub fn scene(&self) -> &SceneState {
        &self.ctx.scene
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn pointer_moved(&mut self, ndc: PointerNdc) {
        self.pointer = Some(ndc);
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    /// Step one frame: active timelines first, then the orbit-controls
    /// clamp, then the hover pick pass over the settled transforms.
    pub fn advance(&mut self, dt: f32) {
        self.expand.tick(&mut self.ctx, dt);
        self.zoom.tick(&mut self.ctx, dt);
        self.tour.tick(&mut self.ctx, &mut self.expand, dt);
        self.ctx.scene.update_controls();
        self.hover.update(&mut self.ctx, self.pointer, self.aspect);
    }

    /// Click selects whatever the hover pass last recorded. Ignored while
    /// anything owns the camera.
    pub fn click(&mut self) {
        if self.ctx.camera_busy() {
            return;
        }
        if let Some(layer) = self.ctx.hovered {
            self.ctx.log_event(format!("pick.click {}", layer.slug()));
            self.zoom.focus(&mut self.ctx, layer);
        }
    }

    pub fn focus(&mut self, layer: LayerId) {
        self.zoom.focus(&mut self.ctx, layer);
    }

    pub fn focus_with(&mut self, layer: LayerId, on_complete: ZoomCallback) {
        self.zoom.focus_with(&mut self.ctx, layer, Some(on_complete));
    }

    /// The back affordance: returns true when the press was consumed.
    pub fn trigger_back(&mut self) -> bool {
        if !self.ctx.back_visible {
            return false;
        }
        self.zoom.trigger_return(&mut self.ctx);
        true
    }

    pub fn toggle_expand(&mut self) {
        if self.ctx.tour == TourState::Running {
            self.ctx.log_event("expand.ignored.tour");
            return;
        }
        self.expand.toggle(&mut self.ctx);
    }

    pub fn start_tour(&mut self) {
        self.tour.run_tour(&mut self.ctx, &mut self.expand);
    }

    pub fn set_ambient_playing(&mut self, playing: bool) {
        self.ctx.cues.push(if playing {
            Cue::AmbientPlay
        } else {
            Cue::AmbientPause
        });
    }

    pub fn set_ambient_volume(&mut self, level: f32) {
        self.ctx.cues.push(Cue::AmbientVolume {
            level: level.clamp(0.0, 1.0),
        });
    }

    /// True once every controller has settled back to rest.
    pub fn is_idle(&self) -> bool {
        self.ctx.transition.is_idle()
            && self.ctx.tour == TourState::Idle
            && !self.expand.is_animating()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TransitionState;
    use glam::Vec3;
    use strata_scene::Camera;

    const DT: f32 = 1.0 / 60.0;

    fn advance_until_idle(runtime: &mut Runtime) {
        for _ in 0..100_000 {
            runtime.advance(DT);
            if runtime.is_idle() {
                return;
            }
        }
        panic!("runtime never settled");
    }

    #[test]
    fn click_focuses_the_hovered_layer() {
        let mut runtime = Runtime::new();
        runtime.ctx.scene.camera = Camera::new(Vec3::new(0.0, 1.25, 10.0));
        runtime.ctx.scene.controls.enabled = false;
        runtime.pointer_moved(PointerNdc { x: 0.0, y: 0.0 });
        runtime.advance(DT);
        assert_eq!(runtime.ctx.hovered, Some(LayerId::Topsoil));

        runtime.click();
        assert_eq!(
            runtime.ctx.transition,
            TransitionState::FocusingIn(LayerId::Topsoil)
        );
        assert!(runtime
            .ctx
            .events()
            .iter()
            .any(|event| event == "pick.click topsoil"));
    }

    #[test]
    fn click_with_no_hover_does_nothing() {
        let mut runtime = Runtime::new();
        runtime.advance(DT);
        runtime.click();
        assert!(runtime.ctx.transition.is_idle());
    }

    #[test]
    fn full_focus_and_back_cycle_settles_at_rest() {
        let mut runtime = Runtime::new();
        let rest = runtime.ctx.scene.layer_poses();
        runtime.focus(LayerId::Subsoil);
        for _ in 0..100_000 {
            runtime.advance(DT);
            if runtime.ctx.back_visible {
                break;
            }
        }
        assert_eq!(
            runtime.ctx.transition.focused_layer(),
            Some(LayerId::Subsoil)
        );
        assert!(runtime.trigger_back());
        advance_until_idle(&mut runtime);
        for layer in LayerId::ALL {
            let pose = runtime.ctx.scene.layer(layer);
            let original = rest[layer.index()];
            assert!((pose.position - original.position).length() < 1e-3);
        }
        assert!(!runtime.trigger_back(), "affordance must be hidden again");
    }

    #[test]
    fn expand_is_refused_while_the_tour_runs() {
        let mut runtime = Runtime::new();
        runtime.start_tour();
        runtime.advance(DT);
        let expanded = runtime.ctx.expanded;
        runtime.toggle_expand();
        assert_eq!(runtime.ctx.expanded, expanded);
    }

    #[test]
    fn ambient_cues_reach_the_bus() {
        let mut runtime = Runtime::new();
        runtime.set_ambient_playing(true);
        runtime.set_ambient_volume(0.5);
        let cues = runtime.ctx.cues.drain();
        assert_eq!(
            cues,
            vec![Cue::AmbientPlay, Cue::AmbientVolume { level: 0.5 }]
        );
    }
}
