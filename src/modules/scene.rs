//! Scene state: the physics world, the fixed scenery and the launchable ball.
//!
//! The ball follows a three-press cycle driven by [`Scene::press`]:
//! spawn and aim, launch, remove.

use macroquad::prelude::Vec2;

use crate::modules::entities::{
    Ball, BodyHandles, Boundary, Line, Pendulum, PendulumHandles, Spawn, Structure,
};
use crate::modules::launch::launch_impulse;
use crate::modules::settings::Settings;
use crate::modules::world::{BodyKind, PhysicsWorld};

/// Where the ball is in its press cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LaunchState {
    /// No ball in the world
    Empty,
    /// Ball placed and immobile, drag line shown from `press` to the pointer
    Aiming {
        ball: BodyHandles,
        press: Vec2,
        line: Line,
    },
    /// Ball launched and simulated
    InFlight { ball: BodyHandles },
}

impl LaunchState {
    pub fn ball(&self) -> Option<BodyHandles> {
        match *self {
            LaunchState::Empty => None,
            LaunchState::Aiming { ball, .. } | LaunchState::InFlight { ball } => Some(ball),
        }
    }

    /// Drag line for the current pointer, only while aiming
    pub fn drag_line(&self, pointer: Vec2) -> Option<Line> {
        match *self {
            LaunchState::Aiming { line, .. } => Some(line.to(pointer)),
            _ => None,
        }
    }
}

pub struct Scene {
    pub world: PhysicsWorld,
    pub boundaries: [BodyHandles; 4],
    pub structures: [BodyHandles; 3],
    pub pendulum: PendulumHandles,
    impulse_scale: f32,
    state: LaunchState,
}

impl Scene {
    /// Build the world and register the scenery in it
    pub fn new(settings: &Settings) -> Self {
        let mut world = PhysicsWorld::new(settings.gravity(), settings.dt());

        let boundaries = Boundary::enclosure(settings).map(|b| b.spawn(&mut world));
        let structures = Structure::stack(settings).map(|s| s.spawn(&mut world));
        let pendulum = Pendulum::default().spawn(&mut world);

        log::info!(
            "Scene ready: {} bodies, {} colliders, {} joints",
            world.body_count(),
            world.collider_count(),
            world.joint_count()
        );

        Self {
            world,
            boundaries,
            structures,
            pendulum,
            impulse_scale: settings.impulse_scale,
            state: LaunchState::Empty,
        }
    }

    pub fn launch_state(&self) -> &LaunchState {
        &self.state
    }

    /// Handle one press of the primary button at `pointer`
    pub fn press(&mut self, pointer: Vec2) {
        self.state = match self.state {
            LaunchState::Empty => {
                let ball = Ball::new(pointer).spawn(&mut self.world);
                log::debug!("Ball placed at {pointer}");
                LaunchState::Aiming {
                    ball,
                    press: pointer,
                    line: Line::new(pointer, pointer),
                }
            }
            LaunchState::Aiming { ball, press, .. } => {
                let impulse = launch_impulse(press, pointer, self.impulse_scale);
                // The aiming ball is owned by this state, so it must still be live
                let promoted = self.world.set_body_kind(ball.body, BodyKind::Dynamic);
                let pushed =
                    self.world
                        .apply_impulse_at_local_point(ball.body, impulse, Ball::POINT_IMPULSE);
                debug_assert!(promoted && pushed, "aiming ball missing from the world");
                log::debug!("Ball launched with impulse {impulse}");
                LaunchState::InFlight { ball }
            }
            LaunchState::InFlight { ball } => {
                // A stale ball is already gone, removal is a no-op then
                if self.world.remove_body(ball.body) {
                    log::debug!("Ball removed");
                }
                LaunchState::Empty
            }
        };
    }

    /// Advance the simulation by one fixed step
    pub fn step(&mut self) {
        self.world.step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(&Settings::default())
    }

    #[test]
    fn test_three_presses_return_to_empty() {
        let mut scene = scene();
        let bodies = scene.world.body_count();

        scene.press(Vec2::new(300.0, 300.0));
        assert!(matches!(scene.launch_state(), LaunchState::Aiming { .. }));
        assert_eq!(scene.world.body_count(), bodies + 1);

        scene.press(Vec2::new(500.0, 250.0));
        assert!(matches!(scene.launch_state(), LaunchState::InFlight { .. }));
        assert_eq!(scene.world.body_count(), bodies + 1);

        scene.press(Vec2::new(10.0, 10.0));
        assert_eq!(*scene.launch_state(), LaunchState::Empty);
        assert_eq!(scene.world.body_count(), bodies);
    }

    #[test]
    fn test_cycle_repeats() {
        let mut scene = scene();
        let bodies = scene.world.body_count();
        for i in 0..4 {
            let p = Vec2::new(200.0 + i as f32 * 50.0, 300.0);
            scene.press(p);
            assert!(scene.world.body_count() <= bodies + 1);
            scene.step();
            scene.press(p + Vec2::new(80.0, -40.0));
            scene.step();
            scene.press(p);
            assert_eq!(scene.world.body_count(), bodies);
        }
    }

    #[test]
    fn test_aiming_ball_is_immobile() {
        let mut scene = scene();
        let at = Vec2::new(400.0, 300.0);
        scene.press(at);
        let ball = scene.launch_state().ball().unwrap();
        for _ in 0..60 {
            scene.step();
        }
        assert_eq!(scene.world.body_kind(ball.body), Some(BodyKind::Static));
        assert_eq!(scene.world.body_translation(ball.body), Some(at));
    }

    #[test]
    fn test_drag_line_only_while_aiming() {
        let mut scene = scene();
        let pointer = Vec2::new(700.0, 200.0);
        assert!(scene.launch_state().drag_line(pointer).is_none());

        scene.press(Vec2::new(400.0, 300.0));
        let line = scene.launch_state().drag_line(pointer).unwrap();
        assert_eq!(line.point1, Vec2::new(400.0, 300.0));
        assert_eq!(line.point2, pointer);

        scene.press(pointer);
        assert!(scene.launch_state().drag_line(pointer).is_none());
    }

    #[test]
    fn test_launch_follows_drag() {
        let mut scene = scene();
        scene.press(Vec2::new(400.0, 300.0));
        scene.press(Vec2::new(500.0, 300.0));
        let ball = scene.launch_state().ball().unwrap();

        assert_eq!(scene.world.body_kind(ball.body), Some(BodyKind::Dynamic));
        let vel = scene.world.body_linvel(ball.body).unwrap();
        assert!(vel.x > 0.0);
        assert!(vel.y.abs() < 1e-3);

        for _ in 0..10 {
            scene.step();
        }
        let pos = scene.world.body_translation(ball.body).unwrap();
        assert!(pos.x > 400.0);
    }

    #[test]
    fn test_zero_drag_launch() {
        let mut scene = scene();
        let at = Vec2::new(400.0, 300.0);
        scene.press(at);
        scene.press(at);
        let ball = scene.launch_state().ball().unwrap();
        assert_eq!(scene.world.body_kind(ball.body), Some(BodyKind::Dynamic));
        assert_eq!(scene.world.body_linvel(ball.body), Some(Vec2::ZERO));

        // Only gravity acts on it afterwards
        for _ in 0..10 {
            scene.step();
        }
        let pos = scene.world.body_translation(ball.body).unwrap();
        assert!((pos.x - at.x).abs() < 1e-3);
        assert!(pos.y > at.y);
    }

    #[test]
    fn test_boundaries_never_move() {
        let mut scene = scene();
        let before: Vec<_> = scene
            .boundaries
            .iter()
            .map(|b| scene.world.body_translation(b.body))
            .collect();

        scene.press(Vec2::new(300.0, 700.0));
        scene.press(Vec2::new(100.0, 850.0));
        for _ in 0..240 {
            scene.step();
        }

        for (b, pos) in scene.boundaries.iter().zip(before) {
            assert_eq!(scene.world.body_kind(b.body), Some(BodyKind::Static));
            assert_eq!(scene.world.body_translation(b.body), pos);
        }
    }

    #[test]
    fn test_pendulum_keeps_arm_length() {
        let mut scene = scene();
        let length = Pendulum::default().pin_length();
        let pivot = scene.world.body_translation(scene.pendulum.pivot).unwrap();

        for step in 1..=300 {
            scene.step();
            let bob = scene.world.body_translation(scene.pendulum.body).unwrap();
            assert!((bob.distance(pivot) - length).abs() < 2.0);

            if step == 120 {
                // Two seconds in, well short of a full period, the weight has dropped
                let weight = scene
                    .world
                    .local_to_world(scene.pendulum.body, Pendulum::default().pos_circle)
                    .unwrap();
                assert!(weight.y > 650.0);
            }
        }
    }

    #[test]
    fn test_pendulum_bob_turns_on_its_own() {
        use std::f32::consts::TAU;

        // Smallest angle between two headings
        fn gap(a: f32, b: f32) -> f32 {
            let d = (a - b).rem_euclid(TAU);
            d.min(TAU - d)
        }

        let mut scene = scene();
        let pivot = scene.world.body_translation(scene.pendulum.pivot).unwrap();
        let arm_angle = |scene: &Scene| {
            let origin = scene.world.body_translation(scene.pendulum.body).unwrap();
            (origin.y - pivot.y).atan2(origin.x - pivot.x)
        };
        let arm_start = arm_angle(&scene);
        let rot_start = scene.world.body_rotation(scene.pendulum.body).unwrap();
        let length = Pendulum::default().pin_length();

        let mut widest = 0.0f32;
        for _ in 0..150 {
            scene.step();
            let bob = scene.world.body_translation(scene.pendulum.body).unwrap();
            assert!((bob.distance(pivot) - length).abs() < 2.0);

            let arm_turn = arm_angle(&scene) - arm_start;
            let body_turn = scene.world.body_rotation(scene.pendulum.body).unwrap() - rot_start;
            widest = widest.max(gap(arm_turn, body_turn));
        }

        // A hinge would keep the two turns equal, the pin lets them drift apart
        assert!(widest > 0.1);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "aiming ball missing")]
    fn test_launching_a_vanished_ball_is_a_logic_error() {
        let mut scene = scene();
        scene.press(Vec2::new(400.0, 300.0));
        let ball = scene.launch_state().ball().unwrap();
        scene.world.remove_body(ball.body);
        scene.press(Vec2::new(500.0, 300.0));
    }

    #[test]
    fn test_removing_a_vanished_ball_is_noop() {
        let mut scene = scene();
        let bodies = scene.world.body_count();
        scene.press(Vec2::new(400.0, 300.0));
        scene.press(Vec2::new(500.0, 300.0));
        let ball = scene.launch_state().ball().unwrap();
        assert!(scene.world.remove_body(ball.body));

        scene.press(Vec2::new(10.0, 10.0));
        assert_eq!(*scene.launch_state(), LaunchState::Empty);
        assert_eq!(scene.world.body_count(), bodies);
    }
}
