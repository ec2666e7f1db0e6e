//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Pointer/tap input → fire targets
//! - Frame timing (wall-clock elapsed per host frame)

use std::time::Instant;

use glam::Vec2;

/// Longest frame delta handed to the session; a stalled host must not
/// flood the run queue with catch-up ticks
pub const MAX_FRAME_MS: f64 = 100.0;

/// A click or tap on the render surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    /// Mouse event in client coordinates, with the surface's top-left corner
    pub fn from_client(client_x: f32, client_y: f32, surface_origin: Vec2) -> Self {
        Self {
            x: client_x - surface_origin.x,
            y: client_y - surface_origin.y,
        }
    }

    /// First touch of a touch event; `None` for an empty touch list
    pub fn from_touches(touches: &[(f32, f32)], surface_origin: Vec2) -> Option<Self> {
        touches
            .first()
            .map(|&(x, y)| Self::from_client(x, y, surface_origin))
    }

    /// Point to hand to `Session::fire`
    pub fn target(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Measures elapsed wall time between host frames
#[derive(Debug)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Milliseconds since the previous call (0 on the first call), clamped
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    /// Same as `tick` with an explicit timestamp
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        let elapsed = self
            .last
            .map(|last| now.saturating_duration_since(last).as_secs_f64() * 1000.0)
            .unwrap_or(0.0);
        self.last = Some(now);
        elapsed.min(MAX_FRAME_MS)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_pointer_offsets_by_surface_origin() {
        let ev = PointerEvent::from_client(810.0, 320.0, Vec2::new(10.0, 20.0));
        assert_eq!(ev.target(), Vec2::new(800.0, 300.0));
    }

    #[test]
    fn test_touches() {
        assert!(PointerEvent::from_touches(&[], Vec2::ZERO).is_none());
        let ev = PointerEvent::from_touches(&[(5.0, 6.0), (7.0, 8.0)], Vec2::ZERO).unwrap();
        assert_eq!(ev, PointerEvent { x: 5.0, y: 6.0 });
    }

    #[test]
    fn test_frame_clock_clamps() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        assert_eq!(clock.tick_at(t0), 0.0);

        let dt = clock.tick_at(t0 + Duration::from_millis(16));
        assert!((dt - 16.0).abs() < 1e-6);

        let dt = clock.tick_at(t0 + Duration::from_secs(5));
        assert_eq!(dt, MAX_FRAME_MS);
    }
}
