//! Audio cue bus. Controllers never touch an audio device; they record cues
//! here and the frontend drains the bus once per frame, so headless runs
//! and tests see the exact cue sequence a windowed session would play.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cue {
    AmbientPlay,
    AmbientPause,
    AmbientStop,
    AmbientVolume { level: f32 },
    Narration,
    Whoosh,
}

impl Cue {
    pub fn label(&self) -> &'static str {
        match self {
            Cue::AmbientPlay => "ambient.play",
            Cue::AmbientPause => "ambient.pause",
            Cue::AmbientStop => "ambient.stop",
            Cue::AmbientVolume { .. } => "ambient.volume",
            Cue::Narration => "narration",
            Cue::Whoosh => "whoosh",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CueBus {
    pending: Vec<Cue>,
    history: Vec<Cue>,
}

impl CueBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cue: Cue) {
        log::debug!("cue {}", cue.label());
        self.pending.push(cue);
        self.history.push(cue);
    }

    /// Hand the undelivered cues to the frontend.
    pub fn drain(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.pending)
    }

    /// Every cue recorded this session, delivered or not.
    pub fn history(&self) -> &[Cue] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_pending_but_keeps_history() {
        let mut bus = CueBus::new();
        bus.push(Cue::AmbientPlay);
        bus.push(Cue::Whoosh);
        assert_eq!(bus.drain(), vec![Cue::AmbientPlay, Cue::Whoosh]);
        assert!(bus.drain().is_empty());
        assert_eq!(bus.history().len(), 2);
    }
}
