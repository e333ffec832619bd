/*
Program Details: <2D launch sandbox>
Click to place a ball, click again to launch it along the drag, click a third
time to remove it. Walls, blocks and a pendulum are simulated by Rapier2D.
Esc or closing the window quits.
*/

use launch_sandbox::modules::clock::FrameLimiter;
use launch_sandbox::modules::render::draw_scene;
use launch_sandbox::modules::scale::{screen_to_virtual, use_virtual_resolution};
use launch_sandbox::{Scene, Settings};
use macroquad::prelude::*;

/// Set up window settings before the app runs.
///
/// Runs before `main`, so the logger starts here and settings are loaded once.
fn window_conf() -> Conf {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    Conf {
        window_title: Settings::shared().title.clone(),
        window_width: 1280,
        window_height: 800,
        fullscreen: false,
        high_dpi: true,
        window_resizable: true,
        sample_count: 4, // MSAA
        ..Default::default()
    }
}

/// Pointer position in scene units
fn pointer(settings: &Settings) -> Vec2 {
    let (x, y) = mouse_position();
    screen_to_virtual(vec2(x, y), settings.width, settings.height)
}

#[macroquad::main(window_conf)]
async fn main() {
    let settings = Settings::shared();
    log::info!(
        "Launch sandbox starting: {}x{} at {} fps, gravity {:?}",
        settings.width,
        settings.height,
        settings.fps,
        settings.gravity
    );

    // Walls, blocks and pendulum are registered here, the ball comes later
    let mut scene = Scene::new(settings);
    let mut limiter = FrameLimiter::new(settings.fps, get_time());

    loop {
        if is_key_pressed(KeyCode::Escape) {
            log::info!("Quit requested");
            break;
        }

        // ---- Draw ----
        use_virtual_resolution(settings.width, settings.height);
        clear_background(settings.background_color());
        draw_scene(&scene, pointer(settings));

        // ---- Physics step ----
        // One fixed step per frame, so the frame cap below also sets sim speed
        scene.step();

        next_frame().await;
        limiter.wait(get_time());

        // ---- Input ----
        if is_mouse_button_pressed(MouseButton::Left) {
            scene.press(pointer(settings));
        }
    }
}
