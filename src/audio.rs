use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::GameConfig;

pub const SHOT_SOUND_PATH: &str = "assets/sounds/shot.wav";
pub const COLLISION_SOUND_PATH: &str = "assets/sounds/collision.wav";
pub const MUSIC_PATH: &str = "assets/sounds/music.wav";

type Sound = Buffered<Decoder<BufReader<File>>>;

/// Volumes for each channel, 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volumes {
    pub shot: f32,
    pub collision: f32,
    pub music: f32,
}

impl Volumes {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            shot: config.shot_volume.clamp(0.0, 1.0),
            collision: config.collision_volume.clamp(0.0, 1.0),
            music: config.music_volume.clamp(0.0, 1.0),
        }
    }
}

/// Audio manager for sound effects and background music.
///
/// Every part is optional: a missing device or file just means silence.
pub struct AudioManager {
    // Dropping the stream stops all playback
    output: Option<(OutputStream, OutputStreamHandle)>,
    shot_sound: Option<Sound>,
    collision_sound: Option<Sound>,
    music: Option<Sound>,
    music_sink: Option<Sink>,
    volumes: Volumes,
}

impl AudioManager {
    /// Open the default output device and pre-load every sound
    pub fn new(volumes: Volumes) -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(err) => {
                log::warn!("Failed to open audio output, continuing without sound: {err}");
                None
            }
        };

        let load = |path: &str| {
            if output.is_none() {
                return None;
            }
            match load_sound(path) {
                Ok(sound) => Some(sound),
                Err(err) => {
                    log::warn!("Failed to load sound {path}: {err}");
                    None
                }
            }
        };

        let shot_sound = load(SHOT_SOUND_PATH);
        let collision_sound = load(COLLISION_SOUND_PATH);
        let music = load(MUSIC_PATH);

        Self {
            output,
            shot_sound,
            collision_sound,
            music,
            music_sink: None,
            volumes,
        }
    }

    /// An audio manager that never makes a sound
    pub fn silent(volumes: Volumes) -> Self {
        Self {
            output: None,
            shot_sound: None,
            collision_sound: None,
            music: None,
            music_sink: None,
            volumes,
        }
    }

    pub fn play_shot_sound(&self) {
        self.play(self.shot_sound.as_ref(), self.volumes.shot);
    }

    pub fn play_collision_sound(&self) {
        self.play(self.collision_sound.as_ref(), self.volumes.collision);
    }

    /// Start the looping background track if it is loaded and not playing yet
    pub fn start_music(&mut self) {
        if self.music_sink.is_some() {
            return;
        }
        let (Some((_, handle)), Some(music)) = (&self.output, &self.music) else {
            return;
        };
        match Sink::try_new(handle) {
            Ok(sink) => {
                sink.set_volume(self.volumes.music);
                sink.append(music.clone().repeat_infinite());
                self.music_sink = Some(sink);
            }
            Err(err) => log::warn!("Failed to start music: {err}"),
        }
    }

    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music_sink.take() {
            sink.stop();
        }
    }

    fn play(&self, sound: Option<&Sound>, volume: f32) {
        let (Some((_, handle)), Some(sound)) = (&self.output, sound) else {
            return;
        };
        // Playback errors are not worth interrupting the game for
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(volume);
            // Cloning a buffered source only clones references
            sink.append(sound.clone());
            sink.detach();
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Volumes::from_config(&GameConfig::default()))
    }
}

fn load_sound(path: impl AsRef<Path>) -> Result<Sound, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let source = Decoder::new(BufReader::new(file))?;
    Ok(source.buffered())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volumes_are_clamped() {
        let config = GameConfig {
            shot_volume: 1.5,
            collision_volume: -0.2,
            ..GameConfig::default()
        };
        let volumes = Volumes::from_config(&config);
        assert_eq!(volumes.shot, 1.0);
        assert_eq!(volumes.collision, 0.0);
        assert_eq!(volumes.music, 0.5);
    }

    #[test]
    fn test_silent_manager_is_a_no_op() {
        let mut audio = AudioManager::silent(Volumes::from_config(&GameConfig::default()));
        audio.play_shot_sound();
        audio.play_collision_sound();
        audio.start_music();
        assert!(audio.music_sink.is_none());
        audio.stop_music();
    }
}
