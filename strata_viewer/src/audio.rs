//! Cue playback. With the `audio` feature the three manifest sounds play
//! through rodio; without it (or when an asset is missing) cues degrade to
//! log lines so the choreography never stalls on audio problems.

use strata_engine::Cue;
use strata_scene::SoundSet;

#[cfg(feature = "audio")]
mod backend {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    pub struct AudioBackend {
        // Dropping the stream silences every sink, so it rides along.
        _stream: OutputStream,
        handle: OutputStreamHandle,
        ambient: Sink,
    }

    impl AudioBackend {
        pub fn new(ambient_path: &str, start_playing: bool, volume: f32) -> Option<Self> {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|err| log::warn!("audio device unavailable: {err}"))
                .ok()?;
            let ambient = Sink::try_new(&handle)
                .map_err(|err| log::warn!("audio sink unavailable: {err}"))
                .ok()?;
            ambient.set_volume(volume);
            if let Some(source) = decode(ambient_path) {
                ambient.append(source.repeat_infinite());
            }
            if !start_playing {
                ambient.pause();
            }
            Some(Self {
                _stream: stream,
                handle,
                ambient,
            })
        }

        pub fn play_one_shot(&self, path: &str) {
            let Some(source) = decode(path) else {
                return;
            };
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.append(source);
                    sink.detach();
                }
                Err(err) => log::warn!("one-shot sink failed for {path}: {err}"),
            }
        }

        pub fn ambient_play(&self) {
            self.ambient.play();
        }

        pub fn ambient_pause(&self) {
            self.ambient.pause();
        }

        pub fn ambient_stop(&self) {
            self.ambient.stop();
        }

        pub fn ambient_volume(&self, level: f32) {
            self.ambient.set_volume(level);
        }
    }

    fn decode(path: &str) -> Option<Decoder<BufReader<File>>> {
        if !Path::new(path).exists() {
            log::warn!("sound asset missing: {path}");
            return None;
        }
        let file = File::open(path)
            .map_err(|err| log::warn!("opening {path}: {err}"))
            .ok()?;
        Decoder::new(BufReader::new(file))
            .map_err(|err| log::warn!("decoding {path}: {err}"))
            .ok()
    }
}

pub struct CuePlayer {
    sounds: SoundSet,
    #[cfg(feature = "audio")]
    backend: Option<backend::AudioBackend>,
}

impl CuePlayer {
    pub const AMBIENT_VOLUME: f32 = 0.5;

    pub fn new(sounds: SoundSet, muted: bool) -> Self {
        #[cfg(feature = "audio")]
        {
            let backend = if muted {
                None
            } else {
                backend::AudioBackend::new(&sounds.ambient, true, Self::AMBIENT_VOLUME)
            };
            Self { sounds, backend }
        }
        #[cfg(not(feature = "audio"))]
        {
            if !muted {
                log::info!("audio feature disabled; cues will be logged only");
            }
            Self { sounds }
        }
    }

    pub fn play(&mut self, cue: Cue) {
        log::debug!("cue delivered {}", cue.label());
        #[cfg(feature = "audio")]
        if let Some(backend) = self.backend.as_ref() {
            match cue {
                Cue::AmbientPlay => backend.ambient_play(),
                Cue::AmbientPause => backend.ambient_pause(),
                Cue::AmbientStop => backend.ambient_stop(),
                Cue::AmbientVolume { level } => backend.ambient_volume(level),
                Cue::Narration => backend.play_one_shot(&self.sounds.narration),
                Cue::Whoosh => backend.play_one_shot(&self.sounds.whoosh),
            }
        }
        #[cfg(not(feature = "audio"))]
        match cue {
            Cue::Narration => log::info!("narration cue (asset {})", self.sounds.narration),
            Cue::Whoosh => log::info!("whoosh cue (asset {})", self.sounds.whoosh),
            _ => {}
        }
    }
}
