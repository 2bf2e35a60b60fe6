use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use strata_scene::{load_manifest, SceneManifest};

/// Interactive viewer for the layered soil scene.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// JSON scene manifest naming textures, sounds, and the camera pose;
    /// built-in defaults are used when omitted
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Initialize everything except the window, then exit
    #[arg(long)]
    pub headless: bool,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Start with the stack fanned open
    #[arg(long)]
    pub start_expanded: bool,

    /// Skip ambient audio playback
    #[arg(long)]
    pub mute: bool,
}

impl Args {
    pub fn resolve_manifest(&self) -> Result<SceneManifest> {
        match self.manifest.as_deref() {
            Some(path) => load_manifest(path)
                .with_context(|| format!("loading scene manifest {}", path.display())),
            None => Ok(SceneManifest::default()),
        }
    }
}
