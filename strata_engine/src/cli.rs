use std::path::PathBuf;

use clap::Parser;
use strata_scene::LayerId;

/// Headless driver for the soil-strata choreography: runs scripted demos at
/// a fixed timestep and optionally dumps a JSON transcript.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Run a focus/return cycle against the named layer
    /// (grass, humus, topsoil, subsoil, parentRock, bedRock)
    #[arg(long, value_parser = parse_layer)]
    pub focus_demo: Option<LayerId>,

    /// Run the guided tour from a collapsed stack
    #[arg(long)]
    pub tour_demo: bool,

    /// Toggle the expand/collapse animation once
    #[arg(long)]
    pub expand_demo: bool,

    /// Write a JSON transcript of events, cues, and final poses
    #[arg(long)]
    pub transcript_json: Option<PathBuf>,

    /// Fixed timestep for the headless frame loop, in milliseconds
    #[arg(long, default_value_t = 16)]
    pub step_ms: u64,
}

fn parse_layer(value: &str) -> Result<LayerId, String> {
    LayerId::from_slug(value).ok_or_else(|| format!("unknown layer: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_demo_accepts_layer_slugs() {
        let args = Args::parse_from(["strata_engine", "--focus-demo", "parentRock"]);
        assert_eq!(args.focus_demo, Some(LayerId::ParentRock));
        assert_eq!(args.step_ms, 16);
    }

    #[test]
    fn unknown_layer_is_rejected() {
        let result = Args::try_parse_from(["strata_engine", "--focus-demo", "magma"]);
        assert!(result.is_err());
    }
}
