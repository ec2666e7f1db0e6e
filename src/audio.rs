//! Audio cue routing
//!
//! The simulation never plays sound. It emits events; `AudioManager`
//! subscribes, maps each cue to a clip, and queues playback requests for
//! whatever audio backend the host has.

use crate::events::{GameEvent, SessionObserver, SoundCue};

/// Looping menu music
pub const MENU_MUSIC_CLIP: &str = "Audios/retro-game-arcade-short-236130.mp3";

impl SoundCue {
    /// Clip file for this cue
    pub fn clip(&self) -> &'static str {
        match self {
            SoundCue::SessionStart => "Audios/game-start-6104.mp3",
            SoundCue::Fire => "Audios/laser-45816.mp3",
            SoundCue::EnemyDestroyed => "Audios/retro-jump-2-236687.mp3",
            SoundCue::PlayerDied => "Audios/game-over-arcade-6435.mp3",
        }
    }
}

/// A clip the backend should play now
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    pub clip: &'static str,
    pub volume: f32,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
    pending: Vec<PlayRequest>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
            pending: Vec::new(),
        }
    }

    /// Build from persisted settings
    pub fn from_settings(settings: &crate::Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        if !settings.music_muted {
            audio.music_playing = true;
            audio.queue_music();
        }
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flip menu music on/off; returns whether it is now playing
    pub fn toggle_music(&mut self) -> bool {
        self.music_playing = !self.music_playing;
        if self.music_playing {
            self.queue_music();
        }
        self.music_playing
    }

    fn queue_music(&mut self) {
        if self.muted {
            return;
        }
        self.pending.push(PlayRequest {
            clip: MENU_MUSIC_CLIP,
            volume: self.master_volume * self.music_volume,
        });
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Queue a sound effect
    pub fn play(&mut self, cue: SoundCue) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        log::debug!("Playing {:?} ({})", cue, cue.clip());
        self.pending.push(PlayRequest {
            clip: cue.clip(),
            volume,
        });
    }

    /// Take everything queued since the last call
    pub fn drain(&mut self) -> Vec<PlayRequest> {
        std::mem::take(&mut self.pending)
    }
}

impl SessionObserver for AudioManager {
    fn on_event(&mut self, event: &GameEvent) {
        if let Some(cue) = event.sound_cue() {
            self.play(cue);
        }
    }
}
