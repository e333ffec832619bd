/*
Virtual resolution.

The scene is laid out in fixed virtual units (the settings width/height).
Each frame the camera is fitted so the whole virtual area is visible and
centered in whatever size the window currently has. Pointer positions go
through screen_to_virtual before they reach the scene.

In the loop:
    use_virtual_resolution(1600.0, 1000.0);
    let (mx, my) = mouse_position();
    let pointer = screen_to_virtual(vec2(mx, my), 1600.0, 1000.0);

Disable the "scale" feature to draw 1:1 in window pixels instead.
*/

use macroquad::prelude::*;

/// Pixels per virtual unit so that `virtual_size` fits inside `screen`
pub fn fit_scale(screen: Vec2, virtual_size: Vec2) -> f32 {
    let scale = (screen.x / virtual_size.x).min(screen.y / virtual_size.y);
    if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
}

/// Map a window position to virtual units for a centered, fitted view
pub fn to_virtual(pos: Vec2, screen: Vec2, virtual_size: Vec2) -> Vec2 {
    let scale = fit_scale(screen, virtual_size);
    virtual_size / 2.0 + (pos - screen / 2.0) / scale
}

/// Camera showing the whole virtual area centered in `screen`.
///
/// Positive Y points down, like screen space.
pub fn fitted_camera(screen: Vec2, virtual_size: Vec2) -> Camera2D {
    let scale = fit_scale(screen, virtual_size);
    Camera2D {
        target: virtual_size / 2.0,
        zoom: vec2(2.0 * scale / screen.x, 2.0 * scale / screen.y),
        ..Default::default()
    }
}

#[cfg(feature = "scale")]
pub fn use_virtual_resolution(width: f32, height: f32) {
    let screen = vec2(screen_width(), screen_height());
    set_camera(&fitted_camera(screen, vec2(width, height)));
}

#[cfg(not(feature = "scale"))]
pub fn use_virtual_resolution(_width: f32, _height: f32) {
    set_default_camera();
}

#[cfg(feature = "scale")]
pub fn screen_to_virtual(pos: Vec2, width: f32, height: f32) -> Vec2 {
    let screen = vec2(screen_width(), screen_height());
    to_virtual(pos, screen, vec2(width, height))
}

#[cfg(not(feature = "scale"))]
pub fn screen_to_virtual(pos: Vec2, _width: f32, _height: f32) -> Vec2 {
    pos
}
