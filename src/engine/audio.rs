// Sound playback through rodio
//
// Every `play` gets its own sink, so the same sound can overlap itself.
// Without an output device the AudioDevice stays silent and every call
// is a no-op.

use crate::engine::assets::AssetId;
use log::{info, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Audio backend initialization failed: {0}")]
    BackendInitFailed(String),

    #[error("Audio playback failed: {0}")]
    PlaybackFailed(String),
}

/// Encoded sound data (WAV, OGG, MP3 or FLAC) ready to be played
#[derive(Debug, Clone)]
pub struct Sound {
    id: AssetId,
    data: Option<Arc<[u8]>>,
    /// Playback volume, 1.0 = unchanged
    pub volume: f32,
}

impl Sound {
    pub fn new(id: AssetId, data: Vec<u8>) -> Self {
        Self {
            id,
            data: Some(data.into()),
            volume: 1.0,
        }
    }

    /// A sound that plays nothing (stand-in for a missing file)
    pub fn silent(id: AssetId) -> Self {
        Self {
            id,
            data: None,
            volume: 1.0,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.data.is_none()
    }
}

/// Output device plus the sinks that are still playing
pub struct AudioDevice {
    /// Must outlive every sink created from `handle`
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
    playing: Vec<(AssetId, Sink)>,
}

impl AudioDevice {
    /// Open the default output device, falling back to a silent device
    pub fn open() -> Self {
        match Self::try_open() {
            Ok(device) => device,
            Err(e) => {
                warn!("{}; continuing without sound", e);
                Self::disabled()
            }
        }
    }

    pub fn try_open() -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| AudioError::BackendInitFailed(e.to_string()))?;
        info!("Audio device opened");

        Ok(Self {
            _stream: Some(stream),
            handle: Some(handle),
            playing: Vec::new(),
        })
    }

    /// A device that never plays anything
    pub fn disabled() -> Self {
        Self {
            _stream: None,
            handle: None,
            playing: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.handle.is_some()
    }

    /// Start a new instance of `sound`, overlapping any that are running
    pub fn play(&mut self, sound: &Sound) {
        if sound.is_silent() || !self.is_enabled() {
            return;
        }
        if let Err(e) = self.try_play(sound) {
            warn!("{}", e);
        }
    }

    fn try_play(&mut self, sound: &Sound) -> Result<(), AudioError> {
        let (Some(handle), Some(data)) = (self.handle.as_ref(), sound.data.as_ref()) else {
            return Ok(());
        };

        let sink = Sink::try_new(handle)
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to create sink: {}", e)))?;
        let source = Decoder::new(Cursor::new(Arc::clone(data)))
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to decode audio: {}", e)))?;

        sink.set_volume(sound.volume);
        sink.append(source);
        self.playing.push((sound.id, sink));
        Ok(())
    }

    /// Stop every running instance of `sound`
    pub fn stop(&mut self, sound: &Sound) {
        self.playing.retain(|(id, sink)| {
            if *id == sound.id {
                sink.stop();
                false
            } else {
                true
            }
        });
    }

    pub fn stop_all(&mut self) {
        for (_, sink) in self.playing.drain(..) {
            sink.stop();
        }
    }

    /// Drop sinks that finished playing
    pub fn update(&mut self) {
        self.playing.retain(|(_, sink)| !sink.empty());
    }

    pub fn playing_count(&self) -> usize {
        self.playing.len()
    }
}

impl Drop for AudioDevice {
    fn drop(&mut self) {
        self.stop_all();
        if self.is_enabled() {
            info!("Audio device closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_sound() {
        let sound = Sound::silent(AssetId::from_path("missing.wav"));
        assert!(sound.is_silent());
        assert_eq!(sound.volume, 1.0);
    }

    #[test]
    fn test_disabled_device_is_noop() {
        let mut device = AudioDevice::disabled();
        let sound = Sound::new(AssetId::from_path("tank_shot.wav"), b"RIFF".to_vec());

        assert!(!device.is_enabled());
        device.play(&sound);
        device.play(&sound);
        assert_eq!(device.playing_count(), 0);

        device.stop(&sound);
        device.stop_all();
        device.update();
    }

    #[test]
    fn test_silent_sound_never_plays() {
        // May have no output device in CI; either way nothing starts
        let mut device = AudioDevice::open();
        device.play(&Sound::silent(AssetId::from_path("destroy.wav")));
        assert_eq!(device.playing_count(), 0);
    }

    #[test]
    fn test_undecodable_sound_is_reported() {
        if let Ok(mut device) = AudioDevice::try_open() {
            let garbage = Sound::new(AssetId::from_path("garbage.wav"), vec![0u8; 16]);
            assert!(matches!(
                device.try_play(&garbage),
                Err(AudioError::PlaybackFailed(_))
            ));
            assert_eq!(device.playing_count(), 0);
        }
    }
}
