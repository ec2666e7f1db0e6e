//! Game session controller
//!
//! Owns the simulation state, the seeded RNG and the run queue that drives
//! the frame tick and the enemy spawner. Hosts either advance the queue's
//! clock with `advance` or call `step` once per display refresh.
//!
//! Misuse is never an error: `fire` outside a running session is a silent
//! no-op, and `start` on a running session resets and restarts it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{PROJECTILE_SPEED, SPAWN_INTERVAL_MS};
use crate::events::{GameEvent, SessionObserver, dispatch};
use crate::scheduler::{Scheduler, clamp_period};
use crate::sim::{GameState, SessionPhase, Viewport, spawn_into, tick};
use crate::{angle_between, unit_velocity};

/// Work items on the session's run queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTask {
    /// One engine tick
    Frame,
    /// One spawner callback
    Spawn,
}

/// Session construction parameters
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub viewport: Viewport,
    /// RNG seed for spawns; same seed, same enemies
    pub seed: u64,
    /// Period of the frame task on the run queue; raised to
    /// `scheduler::MIN_PERIOD_MS` when smaller or not finite
    pub frame_interval_ms: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            seed: 0,
            frame_interval_ms: 1000.0 / 60.0,
        }
    }
}

/// One play-through at a time, restartable
pub struct Session {
    state: GameState,
    viewport: Viewport,
    rng: Pcg32,
    scheduler: Scheduler<SessionTask>,
    frame_interval_ms: f64,
    player_name: Option<String>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let frame_interval_ms = clamp_period(config.frame_interval_ms);
        if frame_interval_ms != config.frame_interval_ms {
            log::warn!(
                "Frame interval {} ms out of range, using {} ms",
                config.frame_interval_ms,
                frame_interval_ms
            );
        }
        Self {
            state: GameState::new(config.viewport),
            viewport: config.viewport,
            rng: Pcg32::seed_from_u64(config.seed),
            scheduler: Scheduler::new(),
            frame_interval_ms,
            player_name: None,
            observers: Vec::new(),
        }
    }

    /// Register an observer for score, game-over and per-event notifications
    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Name reported with the game-over notification
    pub fn set_player_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        let trimmed = name.trim();
        self.player_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current run-queue clock
    pub fn now_ms(&self) -> f64 {
        self.scheduler.now_ms()
    }

    /// Whether the frame and spawn tasks are scheduled
    pub fn is_scheduled(&self) -> bool {
        !self.scheduler.is_empty()
    }

    /// Change the viewport; takes effect on the next tick, spawn or fire
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    /// Begin a fresh session (restarts cleanly if one is already running)
    pub fn start(&mut self) {
        if self.state.phase == SessionPhase::Running {
            log::info!("Restarting running session");
        }
        self.scheduler.cancel_all();
        self.state.clear(self.viewport);
        self.state.phase = SessionPhase::Running;

        self.scheduler.every(self.frame_interval_ms, SessionTask::Frame);
        self.scheduler.every(SPAWN_INTERVAL_MS, SessionTask::Spawn);

        log::info!(
            "Session started ({}x{})",
            self.viewport.width,
            self.viewport.height
        );
        self.emit(&[
            GameEvent::SessionStarted,
            GameEvent::ScoreChanged { score: 0 },
        ]);
    }

    /// Fire a projectile from the centre toward `target`
    ///
    /// Returns false (and does nothing) unless the session is running.
    pub fn fire(&mut self, target: Vec2) -> bool {
        if self.state.phase != SessionPhase::Running {
            return false;
        }
        let origin = self.viewport.center();
        let vel = unit_velocity(angle_between(origin, target)) * PROJECTILE_SPEED;
        let id = self.state.push_projectile(origin, vel);
        self.emit(&[GameEvent::ProjectileFired { id }]);
        true
    }

    /// Halt ticking and spawning; score and entities are kept
    pub fn stop(&mut self) {
        self.scheduler.cancel_all();
        if self.state.phase == SessionPhase::Running {
            self.state.phase = SessionPhase::Idle;
            log::info!("Session stopped at score {}", self.state.score);
        }
    }

    /// Stop, then clear score and entities
    pub fn reset(&mut self) {
        self.stop();
        let had_score = self.state.score != 0;
        self.state.clear(self.viewport);
        self.state.phase = SessionPhase::Idle;
        if had_score {
            self.emit(&[GameEvent::ScoreChanged { score: 0 }]);
        }
    }

    /// Run exactly one engine tick
    pub fn step(&mut self) {
        let events = tick(&mut self.state, self.viewport);
        if self.state.phase == SessionPhase::GameOver {
            // Cancel before anything else on the queue can run
            self.scheduler.cancel_all();
        }
        self.emit(&events);
    }

    /// Run one spawner callback now
    pub fn spawn_enemy(&mut self) -> Option<u32> {
        if self.state.phase != SessionPhase::Running {
            return None;
        }
        let id = spawn_into(&mut self.state, self.viewport, &mut self.rng);
        let radius = self.state.enemies.last().map_or(0.0, |e| e.radius);
        self.emit(&[GameEvent::EnemySpawned { id, radius }]);
        Some(id)
    }

    /// Advance the run-queue clock, running every due callback in order
    pub fn advance(&mut self, elapsed_ms: f64) {
        let until = self.scheduler.now_ms() + elapsed_ms.max(0.0);
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            match task {
                SessionTask::Frame => self.step(),
                SessionTask::Spawn => {
                    self.spawn_enemy();
                }
            }
        }
        self.scheduler.advance_to(until);
    }

    fn emit(&mut self, events: &[GameEvent]) {
        if events.is_empty() {
            return;
        }
        for event in events {
            log::debug!("{:?}", event);
        }
        dispatch(&mut self.observers, events, self.player_name.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ENEMY_PALETTE, Enemy};
    use std::sync::mpsc;

    fn session() -> Session {
        Session::new(SessionConfig {
            viewport: Viewport::new(800.0, 600.0),
            seed: 42,
            frame_interval_ms: 1000.0 / 60.0,
        })
    }

    fn session_with_channel() -> (Session, mpsc::Receiver<GameEvent>) {
        let mut s = session();
        let (tx, rx) = mpsc::channel::<GameEvent>();
        s.subscribe(Box::new(tx));
        (s, rx)
    }

    fn drain(rx: &mpsc::Receiver<GameEvent>) -> Vec<GameEvent> {
        rx.try_iter().collect()
    }

    fn place_enemy(s: &mut Session, pos: Vec2, vel: Vec2, radius: f32) {
        let id = s.state.next_entity_id();
        s.state.enemies.push(Enemy {
            id,
            pos,
            vel,
            radius,
            color: ENEMY_PALETTE[2],
        });
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = session();
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(!s.is_scheduled());
    }

    #[test]
    fn test_start_emits_and_schedules() {
        let (mut s, rx) = session_with_channel();
        s.start();
        assert_eq!(s.phase(), SessionPhase::Running);
        assert!(s.is_scheduled());
        assert_eq!(s.state().player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(
            drain(&rx),
            vec![GameEvent::SessionStarted, GameEvent::ScoreChanged { score: 0 }]
        );
    }

    #[test]
    fn test_fire_requires_running() {
        let mut s = session();
        assert!(!s.fire(Vec2::new(800.0, 300.0)));
        assert!(s.state().projectiles.is_empty());

        s.start();
        assert!(s.fire(Vec2::new(800.0, 300.0)));
        assert_eq!(s.state().projectiles[0].vel, Vec2::new(4.0, 0.0));

        s.step();
        assert_eq!(s.state().projectiles[0].pos, Vec2::new(404.0, 300.0));
    }

    #[test]
    fn test_spawn_cadence_is_900ms() {
        let mut s = session();
        s.start();

        s.advance(899.0);
        assert!(s.state().enemies.is_empty());

        s.advance(1.0);
        assert_eq!(s.state().enemies.len(), 1);

        s.advance(900.0 * 3.0);
        assert_eq!(s.state().enemies.len(), 4);
    }

    #[test]
    fn test_frame_task_ticks_at_frame_rate() {
        let mut s = Session::new(SessionConfig {
            viewport: Viewport::new(800.0, 600.0),
            seed: 1,
            frame_interval_ms: 10.0,
        });
        s.start();
        s.advance(100.0);
        assert_eq!(s.state().time_ticks, 10);
    }

    #[test]
    fn test_zero_frame_interval_still_terminates() {
        for interval in [0.0, -16.0, f64::NAN] {
            let mut s = Session::new(SessionConfig {
                viewport: Viewport::new(800.0, 600.0),
                seed: 1,
                frame_interval_ms: interval,
            });
            s.start();
            s.advance(10.0);
            assert_eq!(s.state().time_ticks, 10);
            assert_eq!(s.now_ms(), 10.0);
        }
    }

    #[test]
    fn test_spawn_uses_resized_viewport() {
        let mut s = session();
        s.start();
        s.resize(400.0, 1000.0);
        s.advance(900.0);

        assert_eq!(s.state().enemies.len(), 1);
        let e = &s.state().enemies[0];
        let (x, y, r) = (e.pos.x, e.pos.y, e.radius);
        let on_side = (x == -r || x == 400.0 + r) && (0.0..1000.0).contains(&y);
        let on_top_bottom = (y == -r || y == 1000.0 + r) && (0.0..400.0).contains(&x);
        assert!(on_side || on_top_bottom, "enemy at {:?} r={}", e.pos, r);

        // Aimed at the new centre
        let to_centre = (Vec2::new(200.0, 500.0) - e.pos).normalize();
        assert!((e.vel - to_centre).length() < 1e-4);
    }

    #[test]
    fn test_game_over_cancels_spawner_and_notifies() {
        let (mut s, rx) = session_with_channel();
        s.set_player_name("  grace ");
        s.start();
        drain(&rx);

        place_enemy(&mut s, Vec2::new(400.0, 300.0), Vec2::ZERO, 15.0);
        s.state.score = 3;

        // Long enough for many frames and several spawns
        s.advance(5_000.0);

        assert_eq!(s.phase(), SessionPhase::GameOver);
        assert!(!s.is_scheduled());
        assert_eq!(s.state().time_ticks, 1);
        // Only the manually placed enemy; no spawn ran after the game ended
        assert_eq!(s.state().enemies.len(), 1);

        let events = drain(&rx);
        let game_overs: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(game_overs, vec![&GameEvent::GameOver { final_score: 3 }]);
        assert_eq!(s.player_name(), Some("grace"));

        // Further advancing does nothing
        s.advance(5_000.0);
        assert!(drain(&rx).is_empty());
        assert!(!s.fire(Vec2::ZERO));
    }

    #[test]
    fn test_stop_keeps_state_and_cancels() {
        let mut s = session();
        s.start();
        s.fire(Vec2::new(800.0, 300.0));
        s.advance(900.0);
        let enemies = s.state().enemies.len();
        let ticks = s.state().time_ticks;

        s.stop();
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(!s.is_scheduled());

        s.advance(10_000.0);
        assert_eq!(s.state().enemies.len(), enemies);
        assert_eq!(s.state().time_ticks, ticks);
        assert_eq!(s.state().projectiles.len(), 1);
    }

    #[test]
    fn test_reset_clears_and_reports_zero() {
        let (mut s, rx) = session_with_channel();
        s.start();
        s.state.score = 5;
        s.advance(900.0);
        drain(&rx);

        s.reset();
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert_eq!(s.score(), 0);
        assert!(s.state().enemies.is_empty());
        assert!(!s.is_scheduled());
        assert_eq!(drain(&rx), vec![GameEvent::ScoreChanged { score: 0 }]);
    }

    #[test]
    fn test_start_while_running_restarts() {
        let mut s = session();
        s.start();
        s.advance(2_000.0);
        assert!(!s.state().enemies.is_empty());

        s.start();
        assert_eq!(s.phase(), SessionPhase::Running);
        assert!(s.state().enemies.is_empty());
        assert_eq!(s.state().time_ticks, 0);

        // Still exactly one spawn task
        s.advance(900.0);
        assert_eq!(s.state().enemies.len(), 1);
    }

    #[test]
    fn test_start_after_game_over() {
        let mut s = session();
        s.start();
        place_enemy(&mut s, Vec2::new(400.0, 300.0), Vec2::ZERO, 10.0);
        s.step();
        assert_eq!(s.phase(), SessionPhase::GameOver);

        s.start();
        assert_eq!(s.phase(), SessionPhase::Running);
        assert!(s.state().enemies.is_empty());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_kills_reach_observers_as_score_changes() {
        let (mut s, rx) = session_with_channel();
        s.start();
        drain(&rx);

        place_enemy(&mut s, Vec2::new(600.0, 300.0), Vec2::ZERO, 12.0);
        s.fire(Vec2::new(800.0, 300.0));
        // 400 -> 600 minus radii takes ~47 ticks
        for _ in 0..60 {
            s.step();
        }

        assert_eq!(s.score(), 1);
        let events = drain(&rx);
        assert!(events.contains(&GameEvent::ScoreChanged { score: 1 }));
        assert!(events.iter().any(|e| matches!(e, GameEvent::EnemyDestroyed { .. })));
    }

    #[test]
    fn test_fire_uses_current_viewport_centre() {
        let mut s = session();
        s.start();
        s.resize(1000.0, 1000.0);
        s.fire(Vec2::new(1000.0, 500.0));
        assert_eq!(s.state().projectiles[0].pos, Vec2::new(500.0, 500.0));
        assert_eq!(s.state().projectiles[0].vel, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = session();
        let mut b = session();
        a.start();
        b.start();
        a.advance(4_500.0);
        b.advance(4_500.0);
        let pa: Vec<_> = a.state().enemies.iter().map(|e| (e.pos, e.radius)).collect();
        let pb: Vec<_> = b.state().enemies.iter().map(|e| (e.pos, e.radius)).collect();
        assert_eq!(pa, pb);
    }
}
