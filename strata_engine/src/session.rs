//! Shared session context the controllers cooperate over: the scene state,
//! the transition/tour guard flags, the hover record, the back affordance,
//! the cue bus, and an append-only event log that mirrors significant state
//! transitions for transcripts and regression tests.

use strata_scene::{LayerId, SceneState};

use crate::cues::CueBus;

/// Lifecycle of the single zoom-transition slot. There is exactly one of
/// these per session; a second focus request while the slot is non-idle is
/// ignored rather than queued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionState {
    Idle,
    FocusingIn(LayerId),
    Focused(LayerId),
    ReturningOut(LayerId),
}

impl TransitionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, TransitionState::Idle)
    }

    /// Any non-idle state claims the camera and suppresses hover picking.
    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }

    pub fn focused_layer(&self) -> Option<LayerId> {
        match self {
            TransitionState::Focused(layer) => Some(*layer),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TourState {
    Idle,
    Running,
}

pub struct SessionContext {
    pub scene: SceneState,
    pub transition: TransitionState,
    pub tour: TourState,
    /// Whether the stack is (heading) fanned open; flipped at toggle time.
    pub expanded: bool,
    pub hovered: Option<LayerId>,
    /// The return affordance shown while a layer is focused.
    pub back_visible: bool,
    pub cues: CueBus,
    events: Vec<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::with_scene(SceneState::new())
    }

    pub fn with_scene(scene: SceneState) -> Self {
        Self {
            scene,
            transition: TransitionState::Idle,
            tour: TourState::Idle,
            expanded: false,
            hovered: None,
            back_visible: false,
            cues: CueBus::new(),
            events: Vec::new(),
        }
    }

    /// True while anything owns the camera: a zoom transition in any phase,
    /// or a running tour.
    pub fn camera_busy(&self) -> bool {
        self.transition.is_active() || self.tour == TourState::Running
    }

    pub fn log_event(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("{message}");
        self.events.push(message);
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<String> {
        std::mem::take(&mut self.events)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
