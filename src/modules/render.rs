/*
Debug drawing of the physics world.

Every collider is drawn from its Rapier shape and world position in the color
the world keeps for it, so anything added to the world shows up without extra
drawing code. Needs a macroquad context: call from the main loop only.
*/

use macroquad::prelude::*;
use rapier2d::prelude::{Collider, Isometry, Point, Real};

use crate::modules::entities::Line;
use crate::modules::scene::Scene;

fn to_vec2(p: Point<Real>) -> Vec2 {
    vec2(p.x, p.y)
}

/// Draw the drag line (while aiming) and then every collider
pub fn draw_scene(scene: &Scene, pointer: Vec2) {
    if let Some(line) = scene.launch_state().drag_line(pointer) {
        draw_drag_line(&line);
    }

    for (collider, color) in scene.world.colliders() {
        draw_collider(collider, color);
    }
}

pub fn draw_drag_line(line: &Line) {
    draw_line(
        line.point1.x,
        line.point1.y,
        line.point2.x,
        line.point2.y,
        line.width,
        line.color,
    );
}

/// Outline color for a fill: same hue, opaque
fn outline(color: Color) -> Color {
    Color { a: 1.0, ..color }
}

pub fn draw_collider(collider: &Collider, color: Color) {
    let iso: &Isometry<Real> = collider.position();
    let center = vec2(iso.translation.x, iso.translation.y);
    let rot = iso.rotation.angle();
    let shape = collider.shape();

    // Circles: ball, pendulum weight
    if let Some(ball) = shape.as_ball() {
        draw_circle(center.x, center.y, ball.radius, color);
        draw_circle_lines(center.x, center.y, ball.radius, 1.0, outline(color));
        // Radius marker so rotation is visible
        let rim = center + Vec2::from_angle(rot).rotate(vec2(ball.radius, 0.0));
        draw_line(center.x, center.y, rim.x, rim.y, 1.0, outline(color));
        return;
    }

    // Boundaries
    if let Some(cuboid) = shape.as_cuboid() {
        draw_box(center, cuboid.half_extents.x, cuboid.half_extents.y, rot, color);
        return;
    }

    // Stacked blocks: the border radius grows the box on every side
    if let Some(round) = shape.as_round_cuboid() {
        let r = round.border_radius;
        let he = round.inner_shape.half_extents;
        draw_box(center, he.x + r, he.y + r, rot, color);
        return;
    }

    // Pendulum arm
    if let Some(capsule) = shape.as_capsule() {
        let a = to_vec2(iso * capsule.segment.a);
        let b = to_vec2(iso * capsule.segment.b);
        let r = capsule.radius;
        draw_line(a.x, a.y, b.x, b.y, r * 2.0, color);
        draw_circle(a.x, a.y, r, color);
        draw_circle(b.x, b.y, r, color);
        return;
    }

    if let Some(segment) = shape.as_segment() {
        let a = to_vec2(iso * segment.a);
        let b = to_vec2(iso * segment.b);
        draw_line(a.x, a.y, b.x, b.y, 1.0, color);
        return;
    }

    log::trace!("No drawing for shape {:?}", shape.shape_type());
}

fn draw_box(center: Vec2, hx: f32, hy: f32, rot: f32, color: Color) {
    // offset 0.5 rotates around the center, which sits at (x, y)
    draw_rectangle_ex(
        center.x,
        center.y,
        hx * 2.0,
        hy * 2.0,
        DrawRectangleParams {
            offset: vec2(0.5, 0.5),
            rotation: rot,
            color,
        },
    );
}
