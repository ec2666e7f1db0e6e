//! Events emitted by the simulation for audio, UI and leaderboard feedback.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};

/// Something observable that happened during a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A fresh session began
    SessionStarted,
    /// A projectile left the centre
    ProjectileFired { id: u32 },
    /// An enemy appeared at the perimeter
    EnemySpawned { id: u32, radius: f32 },
    /// A large enemy was hit and shrank
    EnemyShrunk { id: u32, radius: f32 },
    /// An enemy was destroyed
    EnemyDestroyed { id: u32 },
    /// Session score changed
    ScoreChanged { score: u32 },
    /// An enemy reached the player
    GameOver { final_score: u32 },
}

/// Named audio triggers; the audio collaborator picks the clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    SessionStart,
    Fire,
    EnemyDestroyed,
    PlayerDied,
}

impl GameEvent {
    /// The sound this event should trigger, if any
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::SessionStarted => Some(SoundCue::SessionStart),
            GameEvent::ProjectileFired { .. } => Some(SoundCue::Fire),
            GameEvent::EnemyDestroyed { .. } => Some(SoundCue::EnemyDestroyed),
            GameEvent::GameOver { .. } => Some(SoundCue::PlayerDied),
            GameEvent::EnemySpawned { .. }
            | GameEvent::EnemyShrunk { .. }
            | GameEvent::ScoreChanged { .. } => None,
        }
    }
}

/// Receives session notifications; every method defaults to a no-op
pub trait SessionObserver {
    /// Every event, in emission order
    fn on_event(&mut self, _event: &GameEvent) {}

    /// Score changed, including the reset to 0 on start
    fn on_score_change(&mut self, _score: u32) {}

    /// Session ended; `player` is the externally supplied leaderboard name
    fn on_game_over(&mut self, _final_score: u32, _player: Option<&str>) {}
}

/// Forward every event down a channel; a dropped receiver is ignored
impl SessionObserver for mpsc::Sender<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        let _ = self.send(event.clone());
    }
}

/// Share one observer between the session and the host
impl<T: SessionObserver> SessionObserver for Rc<RefCell<T>> {
    fn on_event(&mut self, event: &GameEvent) {
        self.borrow_mut().on_event(event);
    }

    fn on_score_change(&mut self, score: u32) {
        self.borrow_mut().on_score_change(score);
    }

    fn on_game_over(&mut self, final_score: u32, player: Option<&str>) {
        self.borrow_mut().on_game_over(final_score, player);
    }
}

/// Dispatch a batch of events to every observer
pub(crate) fn dispatch(
    observers: &mut [Box<dyn SessionObserver>],
    events: &[GameEvent],
    player: Option<&str>,
) {
    for event in events {
        for observer in observers.iter_mut() {
            observer.on_event(event);
            match event {
                GameEvent::ScoreChanged { score } => observer.on_score_change(*score),
                GameEvent::GameOver { final_score } => observer.on_game_over(*final_score, player),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        scores: Vec<u32>,
        game_overs: Vec<(u32, Option<String>)>,
        seen: usize,
    }

    impl SessionObserver for Recorder {
        fn on_event(&mut self, _event: &GameEvent) {
            self.seen += 1;
        }

        fn on_score_change(&mut self, score: u32) {
            self.scores.push(score);
        }

        fn on_game_over(&mut self, final_score: u32, player: Option<&str>) {
            self.game_overs.push((final_score, player.map(str::to_owned)));
        }
    }

    #[test]
    fn test_sound_cues() {
        assert_eq!(GameEvent::SessionStarted.sound_cue(), Some(SoundCue::SessionStart));
        assert_eq!(GameEvent::ProjectileFired { id: 1 }.sound_cue(), Some(SoundCue::Fire));
        assert_eq!(
            GameEvent::EnemyDestroyed { id: 1 }.sound_cue(),
            Some(SoundCue::EnemyDestroyed)
        );
        assert_eq!(
            GameEvent::GameOver { final_score: 3 }.sound_cue(),
            Some(SoundCue::PlayerDied)
        );
        assert_eq!(GameEvent::EnemyShrunk { id: 1, radius: 12.0 }.sound_cue(), None);
        assert_eq!(GameEvent::ScoreChanged { score: 1 }.sound_cue(), None);
    }

    #[test]
    fn test_dispatch_routes_to_typed_callbacks() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut observers: Vec<Box<dyn SessionObserver>> = Vec::new();
        observers.push(Box::new(recorder.clone()));

        let events = [
            GameEvent::ScoreChanged { score: 0 },
            GameEvent::EnemyDestroyed { id: 4 },
            GameEvent::ScoreChanged { score: 1 },
            GameEvent::GameOver { final_score: 1 },
        ];
        dispatch(&mut observers, &events, Some("ada"));

        let r = recorder.borrow();
        assert_eq!(r.seen, 4);
        assert_eq!(r.scores, vec![0, 1]);
        assert_eq!(r.game_overs, vec![(1, Some("ada".to_string()))]);
    }

    #[test]
    fn test_channel_observer() {
        let (tx, rx) = mpsc::channel::<GameEvent>();
        let mut observers: Vec<Box<dyn SessionObserver>> = Vec::new();
        observers.push(Box::new(tx));
        dispatch(&mut observers, &[GameEvent::SessionStarted], None);
        assert_eq!(rx.try_recv().unwrap(), GameEvent::SessionStarted);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_events_serialize_tagged() {
        let json = serde_json::to_string(&GameEvent::GameOver { final_score: 5 }).unwrap();
        assert_eq!(json, r#"{"type":"GameOver","final_score":5}"#);
    }
}
