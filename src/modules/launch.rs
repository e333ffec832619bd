//! Drag gesture to launch impulse.

use macroquad::prelude::Vec2;

/// Direction from `point1` to `point2`, in radians
pub fn calculate_angle(point1: Vec2, point2: Vec2) -> f32 {
    (point2.y - point1.y).atan2(point2.x - point1.x)
}

pub fn calculate_distance(point1: Vec2, point2: Vec2) -> f32 {
    point1.distance(point2)
}

/// Impulse for a drag from `press` to `release`, `scale` units per unit of drag.
///
/// A drag of zero length gives a zero impulse.
pub fn launch_impulse(press: Vec2, release: Vec2, scale: f32) -> Vec2 {
    let angle = calculate_angle(press, release);
    let force = calculate_distance(press, release) * scale;
    Vec2::new(angle.cos() * force, angle.sin() * force)
}
