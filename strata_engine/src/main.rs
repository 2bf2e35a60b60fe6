use anyhow::{bail, Result};
use clap::Parser;

use strata_engine::cli::Args;
use strata_engine::{Runtime, SessionTranscript};

const MAX_FRAMES_PER_PHASE: u64 = 20_000;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.step_ms == 0 {
        bail!("--step-ms must be at least 1");
    }
    let dt = args.step_ms as f32 / 1000.0;

    let mut runtime = Runtime::new();
    let mut frames = 0u64;

    if args.expand_demo {
        runtime.toggle_expand();
        frames += run_until(&mut runtime, dt, |runtime| runtime.is_idle())?;
    }

    if let Some(layer) = args.focus_demo {
        runtime.focus(layer);
        frames += run_until(&mut runtime, dt, |runtime| runtime.ctx.back_visible)?;
        if !runtime.trigger_back() {
            bail!("focus demo never reached the focused state");
        }
        frames += run_until(&mut runtime, dt, |runtime| runtime.is_idle())?;
    }

    if args.tour_demo {
        runtime.start_tour();
        frames += run_until(&mut runtime, dt, |runtime| runtime.is_idle())?;
    }

    println!("[strata_engine] {} frames simulated", frames);
    for event in runtime.ctx.events() {
        println!("[strata_engine] event {event}");
    }

    if let Some(path) = args.transcript_json.as_deref() {
        let transcript = SessionTranscript::capture(&runtime, frames);
        transcript.write_json(path)?;
        println!("[strata_engine] transcript written to {}", path.display());
    }

    Ok(())
}

fn run_until<F>(runtime: &mut Runtime, dt: f32, done: F) -> Result<u64>
where
    F: Fn(&Runtime) -> bool,
{
    for frame in 1..=MAX_FRAMES_PER_PHASE {
        runtime.advance(dt);
        if done(runtime) {
            return Ok(frame);
        }
    }
    bail!("demo did not settle within {MAX_FRAMES_PER_PHASE} frames");
}
