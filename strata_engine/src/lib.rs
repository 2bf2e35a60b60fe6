//! Choreography engine for the soil-strata scene: a declarative tween
//! timeline scheduler and the controllers built on it (layer zoom, guided
//! tour, expand/collapse, hover picking), composed by a frame-driven
//! runtime. Everything is headless and deterministic; the viewer crate is
//! one frontend, the demo binary and the regression tests are others.

pub mod cli;
pub mod cues;
pub mod expand;
pub mod hover;
pub mod runtime;
pub mod session;
pub mod tour;
pub mod transcript;
pub mod tween;
pub mod zoom;

pub use cues::{Cue, CueBus};
pub use hover::{HoverDispatcher, PointerNdc};
pub use runtime::Runtime;
pub use session::{SessionContext, TourState, TransitionState};
pub use transcript::SessionTranscript;
