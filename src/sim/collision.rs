//! Circle-circle contact and viewport bounds tests
//!
//! Contact uses a small gap tolerance rather than exact overlap, so circles
//! that are within `CONTACT_GAP` pixels of each other already count as touching.

use glam::Vec2;

use super::state::Viewport;
use crate::consts::CONTACT_GAP;
use crate::distance;

/// Check whether two circles are in contact
///
/// `b` is the enemy in every engine call; its radius is subtracted first.
pub fn circles_touch(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    distance(a_pos, b_pos) - b_radius - a_radius < CONTACT_GAP
}

/// Check whether any part of a circle pokes past a viewport edge
pub fn circle_leaves_viewport(pos: Vec2, radius: f32, viewport: Viewport) -> bool {
    pos.x - radius < 0.0
        || pos.x + radius > viewport.width
        || pos.y - radius < 0.0
        || pos.y + radius > viewport.height
}
