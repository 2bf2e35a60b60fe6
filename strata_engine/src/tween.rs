//! Declarative tween timelines. A `Timeline` is a list of `Track`s, each
//! naming a scene channel, a destination, a start offset, and a duration;
//! `advance` steps every active track by the frame delta. Start values are
//! captured lazily the first tick a track is active, so a track starting at
//! offset 0.5 interpolates from wherever an earlier track left the channel.

use glam::Vec3;
use strata_scene::{LayerId, SceneState};

/// Interpolation curves. The choreography uses the symmetric quadratic
/// ease-in-out everywhere; linear exists for holds and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power2InOut,
}

impl Ease {
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Scene property a track writes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Channel {
    LayerPosition(LayerId),
    LayerScale(LayerId),
    SaplingPosition,
    TitlePosition,
    CameraPosition,
    CameraRotation,
    ControlsTarget,
}

/// Destination of a track. `Y` pins only the height and preserves the
/// channel's x/z as captured, matching tweens that animate a single axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackTarget {
    Vector(Vec3),
    Y(f32),
}

/// Per-tick side effect applied after the owning track writes its channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Follow {
    /// Re-aim the camera at the layer's live position every tick.
    CameraLookAtLayer(LayerId),
    /// Re-aim the camera at the orbit-controls target every tick; pairs
    /// with a concurrent `ControlsTarget` track.
    CameraLookAtControlsTarget,
}

#[derive(Clone, Debug)]
pub struct Track {
    channel: Channel,
    target: TrackTarget,
    start: f32,
    duration: f32,
    ease: Ease,
    follow: Option<Follow>,
    // Captured (from, resolved destination) the first active tick.
    endpoints: Option<(Vec3, Vec3)>,
    finished: bool,
}

impl Track {
    pub fn new(channel: Channel, target: TrackTarget, start: f32, duration: f32) -> Self {
        Self {
            channel,
            target,
            start,
            duration,
            ease: Ease::Power2InOut,
            follow: None,
            endpoints: None,
            finished: false,
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_follow(mut self, follow: Follow) -> Self {
        self.follow = Some(follow);
        self
    }

    fn end_time(&self) -> f32 {
        self.start + self.duration
    }
}

#[derive(Clone, Debug, Default)]
pub struct Timeline {
    tracks: Vec<Track>,
    elapsed: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    pub fn with(mut self, track: Track) -> Self {
        self.push(track);
        self
    }

    /// End time of the slowest track.
    pub fn duration(&self) -> f32 {
        self.tracks
            .iter()
            .map(Track::end_time)
            .fold(0.0_f32, f32::max)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration()
    }

    /// Step every active track by `dt`, writing interpolated values into the
    /// scene. Returns true once the whole timeline has completed; finished
    /// tracks land exactly on their destination.
    pub fn advance(&mut self, scene: &mut SceneState, dt: f32) -> bool {
        self.elapsed += dt;
        let elapsed = self.elapsed;
        for track in &mut self.tracks {
            if track.finished || elapsed < track.start {
                continue;
            }
            if track.endpoints.is_none() {
                let from = read_channel(scene, track.channel);
                let to = match track.target {
                    TrackTarget::Vector(v) => v,
                    TrackTarget::Y(y) => Vec3::new(from.x, y, from.z),
                };
                track.endpoints = Some((from, to));
            }
            let Some((from, to)) = track.endpoints else {
                continue;
            };
            let t = if track.duration <= f32::EPSILON {
                1.0
            } else {
                ((elapsed - track.start) / track.duration).clamp(0.0, 1.0)
            };
            let value = if t >= 1.0 {
                track.finished = true;
                to
            } else {
                from + (to - from) * track.ease.sample(t)
            };
            write_channel(scene, track.channel, value);
            if let Some(follow) = track.follow {
                apply_follow(scene, follow);
            }
        }
        self.is_finished()
    }
}

fn read_channel(scene: &SceneState, channel: Channel) -> Vec3 {
    match channel {
        Channel::LayerPosition(id) => scene.layer(id).position,
        Channel::LayerScale(id) => scene.layer(id).scale,
        Channel::SaplingPosition => scene.sapling.map(|s| s.position).unwrap_or(Vec3::ZERO),
        Channel::TitlePosition => scene.title.position,
        Channel::CameraPosition => scene.camera.position,
        Channel::CameraRotation => scene.camera.rotation,
        Channel::ControlsTarget => scene.controls.target,
    }
}

fn write_channel(scene: &mut SceneState, channel: Channel, value: Vec3) {
    match channel {
        Channel::LayerPosition(id) => scene.layer_mut(id).position = value,
        Channel::LayerScale(id) => scene.layer_mut(id).scale = value,
        Channel::SaplingPosition => {
            if let Some(sapling) = scene.sapling.as_mut() {
                sapling.position = value;
            }
        }
        Channel::TitlePosition => scene.title.position = value,
        Channel::CameraPosition => scene.camera.position = value,
        Channel::CameraRotation => scene.camera.rotation = value,
        Channel::ControlsTarget => scene.controls.target = value,
    }
}

fn apply_follow(scene: &mut SceneState, follow: Follow) {
    match follow {
        Follow::CameraLookAtLayer(id) => {
            let target = scene.layer(id).position;
            scene.camera.look_at(target);
        }
        Follow::CameraLookAtControlsTarget => {
            let target = scene.controls.target;
            scene.camera.look_at(target);
        }
    }
}
