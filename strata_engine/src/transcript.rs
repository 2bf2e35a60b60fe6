//! JSON transcript of a headless run: the event log, the cue history, and
//! the final scene pose. Regression tests spawn the demo binary and assert
//! against this instead of scraping stdout.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use strata_scene::LayerId;

use crate::cues::Cue;
use crate::runtime::Runtime;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayerPose {
    pub layer: LayerId,
    pub position: [f32; 3],
    pub scale: [f32; 3],
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionTranscript {
    pub frames: u64,
    pub expanded: bool,
    pub camera_position: [f32; 3],
    pub layers: Vec<LayerPose>,
    pub events: Vec<String>,
    pub cues: Vec<Cue>,
}

impl SessionTranscript {
    pub fn capture(runtime: &Runtime, frames: u64) -> Self {
        let scene = runtime.scene();
        let layers = LayerId::ALL
            .into_iter()
            .map(|layer| {
                let pose = scene.layer(layer);
                LayerPose {
                    layer,
                    position: pose.position.to_array(),
                    scale: pose.scale.to_array(),
                }
            })
            .collect();
        Self {
            frames,
            expanded: runtime.ctx.expanded,
            camera_position: scene.camera.position.to_array(),
            layers,
            events: runtime.ctx.events().to_vec(),
            cues: runtime.ctx.cues.history().to_vec(),
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)
            .context("serializing session transcript")?;
        fs::write(path, payload)
            .with_context(|| format!("writing session transcript to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_reports_every_layer_once() {
        let runtime = Runtime::new();
        let transcript = SessionTranscript::capture(&runtime, 0);
        assert_eq!(transcript.layers.len(), LayerId::COUNT);
        assert_eq!(transcript.camera_position, [4.0, 3.0, 8.0]);
        assert!(!transcript.expanded);
    }

    #[test]
    fn transcript_round_trips_through_json() {
        let mut runtime = Runtime::new();
        runtime.ctx.log_event("zoom.focus.start grass");
        runtime.ctx.cues.push(Cue::Whoosh);
        let transcript = SessionTranscript::capture(&runtime, 42);
        let raw = serde_json::to_string(&transcript).unwrap();
        let parsed: SessionTranscript = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.frames, 42);
        assert_eq!(parsed.events, ["zoom.focus.start grass"]);
        assert_eq!(parsed.cues, [Cue::Whoosh]);
    }
}
