/*
Physics world for the sandbox.

Wraps the Rapier2D sets and pipeline in one struct so the scene can hand a
single `&mut PhysicsWorld` around instead of eleven separate sets.
Rapier does not know about colors, so the world also keeps the render color
of every collider it owns.

In your mod.rs file located in the modules folder add:
    pub mod world;
Then:
    use crate::modules::world::{BodyKind, PhysicsWorld};
*/

use std::collections::HashMap;

use macroquad::prelude::{Color, Vec2};
// Import Rapier2D physics engine - provides 2D rigid body physics simulation
use rapier2d::prelude::*;

/// Whether a body is moved by the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Never moves, infinite mass
    Static,
    /// Moved by gravity, collisions, joints and impulses
    Dynamic,
}

impl BodyKind {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyKind::Static => RigidBodyType::Fixed,
            BodyKind::Dynamic => RigidBodyType::Dynamic,
        }
    }

    fn from_rapier(body_type: RigidBodyType) -> Self {
        match body_type {
            RigidBodyType::Dynamic => BodyKind::Dynamic,
            _ => BodyKind::Static,
        }
    }
}

/// Start a rigid body builder of the given kind at a position
pub fn body_builder(kind: BodyKind, pos: Vec2) -> RigidBodyBuilder {
    RigidBodyBuilder::new(kind.to_rapier()).translation(vector![pos.x, pos.y])
}

/// Color used for colliders inserted without a palette entry
pub const DEFAULT_COLOR: Color = Color::new(0.78, 0.78, 0.78, 1.0);

pub struct PhysicsWorld {
    // Define gravity vector, positive Y points down in screen coordinates
    gravity: Vector<Real>,
    // Integration parameters control the timestep and solver iterations
    integration_params: IntegrationParameters,
    // PhysicsPipeline orchestrates all physics computations each frame
    pipeline: PhysicsPipeline,
    // IslandManager groups bodies that can interact
    island_manager: IslandManager,
    // BroadPhase quickly eliminates impossible collisions
    broad_phase: BroadPhase,
    // NarrowPhase computes contacts on the pairs the broad phase kept
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    // Pin joints live here
    joints: ImpulseJointSet,
    // Unused by the sandbox but required by the pipeline
    multibody_joints: MultibodyJointSet,
    // Keeps a fast ball from tunneling through thin walls
    ccd: CCDSolver,
    palette: HashMap<ColliderHandle, Color>,
}

impl PhysicsWorld {
    /// Create an empty world. `dt` is the fixed step used by every call to `step`.
    pub fn new(gravity: Vec2, dt: f32) -> Self {
        let mut integration_params = IntegrationParameters::default();
        integration_params.dt = dt;

        Self {
            gravity: vector![gravity.x, gravity.y],
            integration_params,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            palette: HashMap::new(),
        }
    }

    pub fn dt(&self) -> f32 {
        self.integration_params.dt
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity.x, self.gravity.y)
    }

    /// Insert a rigid body and get its handle
    pub fn insert_body(&mut self, body: impl Into<RigidBody>) -> RigidBodyHandle {
        self.bodies.insert(body)
    }

    /// Attach a collider to a body and remember the color it is drawn with
    pub fn insert_collider(
        &mut self,
        body: RigidBodyHandle,
        collider: impl Into<Collider>,
        color: Color,
    ) -> ColliderHandle {
        // The collider inherits the position and movement of its parent body
        let handle = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);
        self.palette.insert(handle, color);
        handle
    }

    /// Pin two bodies together so the distance between the anchors stays `length`.
    ///
    /// Anchors are in each body's local frame. Like a massless rod hinged at
    /// both ends: each body keeps rotating freely about its own anchor.
    pub fn insert_pin_joint(
        &mut self,
        body1: RigidBodyHandle,
        body2: RigidBodyHandle,
        anchor1: Vec2,
        anchor2: Vec2,
        length: f32,
    ) -> ImpulseJointHandle {
        // Same layout as Rapier's rope joint, with the slack removed
        let joint = GenericJointBuilder::new(JointAxesMask::empty())
            .coupled_axes(JointAxesMask::LIN_AXES)
            .limits(JointAxis::X, [length, length])
            .local_anchor1(point![anchor1.x, anchor1.y])
            .local_anchor2(point![anchor2.x, anchor2.y]);
        self.joints.insert(body1, body2, joint, true)
    }

    /// Remove a body together with its colliders and joints.
    ///
    /// Returns false when the handle no longer refers to a live body.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> bool {
        let attached: Vec<ColliderHandle> = match self.bodies.get(handle) {
            Some(body) => body.colliders().to_vec(),
            None => {
                log::warn!("remove_body: {:?} is already gone", handle);
                return false;
            }
        };

        for collider in attached {
            self.palette.remove(&collider);
        }

        self.bodies
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    pub fn body_kind(&self, handle: RigidBodyHandle) -> Option<BodyKind> {
        self.bodies
            .get(handle)
            .map(|body| BodyKind::from_rapier(body.body_type()))
    }

    /// Switch a body between static and dynamic, waking it up
    pub fn set_body_kind(&mut self, handle: RigidBodyHandle, kind: BodyKind) -> bool {
        match self.bodies.get_mut(handle) {
            Some(body) => {
                body.set_body_type(kind.to_rapier(), true);
                true
            }
            None => false,
        }
    }

    /// Apply an impulse at a point given in the body's local frame.
    ///
    /// Static bodies ignore impulses.
    pub fn apply_impulse_at_local_point(
        &mut self,
        handle: RigidBodyHandle,
        impulse: Vec2,
        local_point: Vec2,
    ) -> bool {
        match self.bodies.get_mut(handle) {
            Some(body) => {
                let world_point = body.position() * point![local_point.x, local_point.y];
                body.apply_impulse_at_point(vector![impulse.x, impulse.y], world_point, true);
                true
            }
            None => false,
        }
    }

    pub fn body_translation(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|body| {
            let t = body.translation();
            Vec2::new(t.x, t.y)
        })
    }

    pub fn body_rotation(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.bodies.get(handle).map(|body| body.rotation().angle())
    }

    pub fn body_linvel(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|body| {
            let v = body.linvel();
            Vec2::new(v.x, v.y)
        })
    }

    /// Transform a point from a body's local frame into world coordinates
    pub fn local_to_world(&self, handle: RigidBodyHandle, local: Vec2) -> Option<Vec2> {
        self.bodies.get(handle).map(|body| {
            let p = body.position() * point![local.x, local.y];
            Vec2::new(p.x, p.y)
        })
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn color_of(&self, handle: ColliderHandle) -> Option<Color> {
        self.palette.get(&handle).copied()
    }

    /// Every collider in the world with its draw color
    pub fn colliders(&self) -> impl Iterator<Item = (&Collider, Color)> + '_ {
        self.colliders.iter().map(move |(handle, collider)| {
            let color = self.palette.get(&handle).copied().unwrap_or(DEFAULT_COLOR);
            (collider, color)
        })
    }

    /// Advance the simulation by exactly one fixed timestep
    pub fn step(&mut self) {
        // Computes forces, integrates velocities, detects collisions, and resolves them
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None, // No raycasts or shape casts in the sandbox
            &(),  // Physics hooks for custom collision filtering
            &(),  // Event handler for collision/contact events
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(Vec2::new(0.0, 180.0), 1.0 / 60.0)
    }

    fn add_ball(world: &mut PhysicsWorld, kind: BodyKind, pos: Vec2) -> RigidBodyHandle {
        let body = world.insert_body(body_builder(kind, pos));
        world.insert_collider(body, ColliderBuilder::ball(10.0).mass(5.0), Color::new(1.0, 0.0, 0.0, 1.0));
        body
    }

    #[test]
    fn test_dynamic_body_falls() {
        let mut world = world();
        let ball = add_ball(&mut world, BodyKind::Dynamic, Vec2::new(100.0, 100.0));
        for _ in 0..30 {
            world.step();
        }
        let pos = world.body_translation(ball).unwrap();
        assert!(pos.y > 100.0);
        assert!((pos.x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_static_body_stays() {
        let mut world = world();
        let ball = add_ball(&mut world, BodyKind::Static, Vec2::new(100.0, 100.0));
        for _ in 0..30 {
            world.step();
        }
        assert_eq!(world.body_translation(ball), Some(Vec2::new(100.0, 100.0)));
        assert_eq!(world.body_kind(ball), Some(BodyKind::Static));
    }

    #[test]
    fn test_promote_and_impulse() {
        let mut world = world();
        let ball = add_ball(&mut world, BodyKind::Static, Vec2::new(100.0, 100.0));

        assert!(world.set_body_kind(ball, BodyKind::Dynamic));
        assert_eq!(world.body_kind(ball), Some(BodyKind::Dynamic));
        assert!(world.apply_impulse_at_local_point(ball, Vec2::new(500.0, 0.0), Vec2::ZERO));

        let vel = world.body_linvel(ball).unwrap();
        assert!(vel.x > 0.0);
        assert!(vel.y.abs() < 1e-3);
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut world = world();
        let ball = add_ball(&mut world, BodyKind::Dynamic, Vec2::new(0.0, 0.0));
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.collider_count(), 1);

        assert!(world.remove_body(ball));
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.collider_count(), 0);
        assert_eq!(world.colliders().count(), 0);

        assert!(!world.remove_body(ball));
        assert!(!world.set_body_kind(ball, BodyKind::Dynamic));
        assert!(!world.apply_impulse_at_local_point(ball, Vec2::ONE, Vec2::ZERO));
    }

    #[test]
    fn test_collider_colors() {
        let mut world = world();
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        let body = world.insert_body(body_builder(BodyKind::Static, Vec2::ZERO));
        let handle = world.insert_collider(body, ColliderBuilder::cuboid(5.0, 5.0), red);
        assert_eq!(world.color_of(handle), Some(red));
        assert!(world.colliders().all(|(_, color)| color == red));
    }

    #[test]
    fn test_pin_joint_keeps_distance_not_rotation() {
        let mut world = world();
        let anchor = world.insert_body(body_builder(BodyKind::Static, Vec2::new(100.0, 100.0)));
        // A rod hanging sideways off its pinned end
        let rod = world.insert_body(body_builder(BodyKind::Dynamic, Vec2::new(100.0, 150.0)));
        world.insert_collider(
            rod,
            ColliderBuilder::ball(5.0).translation(vector![80.0, 0.0]).mass(5.0),
            DEFAULT_COLOR,
        );
        world.insert_pin_joint(anchor, rod, Vec2::ZERO, Vec2::ZERO, 50.0);
        assert_eq!(world.joint_count(), 1);

        for _ in 0..60 {
            world.step();
            let origin = world.body_translation(rod).unwrap();
            assert!((origin.distance(Vec2::new(100.0, 100.0)) - 50.0).abs() < 1.0);
        }

        // The weight swung down around the pinned end, the pin itself barely moved
        let rotation = world.body_rotation(rod).unwrap();
        assert!(rotation.abs() > 0.1);
    }
}
