mod audio;
mod cli;
mod mesh;
mod shaders;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use pollster::FutureExt;
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use strata_engine::{PointerNdc, Runtime, SessionContext};
use strata_scene::SceneState;

use crate::audio::CuePlayer;
use crate::cli::Args;
use crate::state::ViewerState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let manifest = args.resolve_manifest()?;
    println!(
        "[strata_viewer] manifest: {} layer textures, ambient {}",
        manifest.textures.len(),
        manifest.sounds.ambient
    );

    let mut scene = SceneState::new();
    scene.camera.position = Vec3::from(manifest.camera_position);
    scene.camera.look_at(Vec3::ZERO);
    let mut runtime = Runtime::with_context(SessionContext::with_scene(scene));
    if args.start_expanded {
        runtime.toggle_expand();
    }

    if args.headless {
        // Exercise one engine frame so a broken manifest or scene fails
        // here instead of after window creation on a real run.
        runtime.advance(1.0 / 60.0);
        println!(
            "[strata_viewer] headless boot ok ({} events logged)",
            runtime.ctx.events().len()
        );
        return Ok(());
    }

    let audio = CuePlayer::new(manifest.sounds.clone(), args.mute);

    let event_loop = EventLoop::new().context("creating event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Layers of Soil")
            .with_inner_size(PhysicalSize::new(args.width.max(1), args.height.max(1)))
            .build(&event_loop)
            .context("creating viewer window")?,
    );

    let mut state = ViewerState::new(window, runtime, audio).block_on()?;
    let mut ambient_playing = !args.mute;
    println!("[strata_viewer] controls: click focus, Esc/B back, E expand, T tour, M mute");

    event_loop
        .run(move |event, target| {
            target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { window_id, event } if window_id == state.window.id() => {
                    match event {
                        WindowEvent::CloseRequested => target.exit(),
                        WindowEvent::Resized(new_size) => state.resize(new_size),
                        WindowEvent::CursorMoved { position, .. } => {
                            let size = state.size();
                            state.runtime.pointer_moved(PointerNdc {
                                x: (position.x as f32 / size.width.max(1) as f32) * 2.0 - 1.0,
                                y: -((position.y as f32 / size.height.max(1) as f32) * 2.0 - 1.0),
                            });
                        }
                        WindowEvent::CursorLeft { .. } => state.runtime.pointer_left(),
                        WindowEvent::MouseInput {
                            state: ElementState::Pressed,
                            button: MouseButton::Left,
                            ..
                        } => state.runtime.click(),
                        WindowEvent::KeyboardInput { event, .. } => {
                            if event.state == ElementState::Pressed && !event.repeat {
                                handle_key(&mut state, &event.logical_key, target, &mut ambient_playing);
                            }
                        }
                        WindowEvent::RedrawRequested => match state.render() {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                state.resize(state.size());
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                eprintln!("[strata_viewer] out of GPU memory, exiting");
                                target.exit();
                            }
                            Err(err) => log::warn!("surface error: {err:?}"),
                        },
                        _ => {}
                    }
                }
                Event::AboutToWait => state.window.request_redraw(),
                _ => {}
            }
        })
        .context("running event loop")?;

    Ok(())
}

fn handle_key(
    state: &mut ViewerState,
    key: &Key,
    target: &EventLoopWindowTarget<()>,
    ambient_playing: &mut bool,
) {
    match key {
        Key::Named(NamedKey::Escape) => {
            // Escape backs out of a focused layer first; a second press
            // closes the window.
            if !state.runtime.trigger_back() {
                target.exit();
            }
        }
        Key::Character(text) => match text.as_str() {
            "b" | "B" => {
                state.runtime.trigger_back();
            }
            "e" | "E" => state.runtime.toggle_expand(),
            "t" | "T" => state.runtime.start_tour(),
            "m" | "M" => {
                *ambient_playing = !*ambient_playing;
                state.runtime.set_ambient_playing(*ambient_playing);
            }
            _ => {}
        },
        _ => {}
    }
}
