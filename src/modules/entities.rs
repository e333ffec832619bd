/*
Entity definitions for the sandbox scene.

Each entity is a plain value describing a body, its shapes and their physical
parameters. Nothing touches the physics world until `Spawn::spawn` is called,
and every entity is registered the same way:

    let handles = Structure::new(pos, size, BROWN).spawn(&mut world);

`Line` is the exception: it is a drawing aid only and never enters the world.
*/

use macroquad::prelude::{Color, Vec2, WHITE};
use rapier2d::prelude::*;

use crate::modules::settings::{Settings, rgba};
use crate::modules::world::{BodyKind, PhysicsWorld, body_builder};

/// Register an entity's bodies, shapes and joints in a world
pub trait Spawn {
    type Handles;

    fn spawn(&self, world: &mut PhysicsWorld) -> Self::Handles;
}

/// Physical material of one shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Bounce coefficient, 0..1 nominal
    pub elasticity: f32,
    pub friction: f32,
}

impl Material {
    fn apply(self, builder: ColliderBuilder) -> ColliderBuilder {
        builder.restitution(self.elasticity).friction(self.friction)
    }
}

/// Body + single collider, the handles of most entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyHandles {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

// -------------------- Ball --------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub color: Color,
    /// Circle center relative to the body origin
    pub offset: Vec2,
    pub material: Material,
    /// Local point the launch impulse is applied at
    pub point_impulse: Vec2,
}

impl Ball {
    pub const RADIUS: f32 = 30.0;
    pub const MASS: f32 = 20.0;
    pub const COLOR: Color = rgba(0, 255, 0, 100);
    pub const MATERIAL: Material = Material {
        elasticity: 0.9,
        friction: 1.4,
    };
    /// Impulses hit the body origin
    pub const POINT_IMPULSE: Vec2 = Vec2::ZERO;

    /// A ball with the scene defaults centered on `pos`
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: Self::RADIUS,
            mass: Self::MASS,
            color: Self::COLOR,
            offset: Vec2::ZERO,
            material: Self::MATERIAL,
            point_impulse: Self::POINT_IMPULSE,
        }
    }
}

impl Spawn for Ball {
    type Handles = BodyHandles;

    /// The ball starts immobile, launching promotes it to dynamic
    fn spawn(&self, world: &mut PhysicsWorld) -> BodyHandles {
        let body = world.insert_body(body_builder(BodyKind::Static, self.pos).ccd_enabled(true));
        let collider = self
            .material
            .apply(ColliderBuilder::ball(self.radius))
            .translation(vector![self.offset.x, self.offset.y])
            .mass(self.mass);
        let collider = world.insert_collider(body, collider, self.color);
        BodyHandles { body, collider }
    }
}

// -------------------- Boundary ----------------------------------------------

/// Static box used for the floor, the ceiling and both walls
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    /// Center of the box
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub material: Material,
}

impl Boundary {
    pub const THICKNESS: f32 = 25.0;
    /// Distance from the window edge to the center of the ceiling and walls
    pub const INSET: f32 = 10.0;
    pub const COLOR: Color = rgba(0, 0, 255, 100);
    pub const MATERIAL: Material = Material {
        elasticity: 0.4,
        friction: 0.5,
    };

    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            color: Self::COLOR,
            material: Self::MATERIAL,
        }
    }

    pub fn floor(width: f32, height: f32) -> Self {
        Self::new(Vec2::new(width / 2.0, height), Vec2::new(width, Self::THICKNESS))
    }

    pub fn ceiling(width: f32) -> Self {
        Self::new(Vec2::new(width / 2.0, Self::INSET), Vec2::new(width, Self::THICKNESS))
    }

    pub fn left_wall(height: f32) -> Self {
        Self::new(Vec2::new(Self::INSET, height / 2.0), Vec2::new(Self::THICKNESS, height))
    }

    pub fn right_wall(width: f32, height: f32) -> Self {
        Self::new(
            Vec2::new(width - Self::INSET, height / 2.0),
            Vec2::new(Self::THICKNESS, height),
        )
    }

    /// Floor, ceiling, left wall, right wall
    pub fn enclosure(settings: &Settings) -> [Self; 4] {
        [
            Self::floor(settings.width, settings.height),
            Self::ceiling(settings.width),
            Self::left_wall(settings.height),
            Self::right_wall(settings.width, settings.height),
        ]
    }
}

impl Spawn for Boundary {
    type Handles = BodyHandles;

    fn spawn(&self, world: &mut PhysicsWorld) -> BodyHandles {
        let body = world.insert_body(body_builder(BodyKind::Static, self.pos));
        // cuboid() takes half-extents
        let collider = self
            .material
            .apply(ColliderBuilder::cuboid(self.size.x / 2.0, self.size.y / 2.0));
        let collider = world.insert_collider(body, collider, self.color);
        BodyHandles { body, collider }
    }
}

// -------------------- Structure ---------------------------------------------

/// Dynamic block with slightly rounded corners
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub mass: f32,
    /// Corner radius, added around the box
    pub radius: f32,
    pub material: Material,
}

impl Structure {
    pub const MASS: f32 = 100.0;
    pub const RADIUS: f32 = 2.0;
    pub const MATERIAL: Material = Material {
        elasticity: 0.4,
        friction: 0.4,
    };

    pub fn new(pos: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            pos,
            size,
            color,
            mass: Self::MASS,
            radius: Self::RADIUS,
            material: Self::MATERIAL,
        }
    }

    /// Two pillars and a lintel resting on them
    pub fn stack(settings: &Settings) -> [Self; 3] {
        let color = settings.accent_color();
        let h = settings.height;
        [
            Self::new(Vec2::new(1200.0, h - 120.0), Vec2::new(40.0, 200.0), color),
            Self::new(Vec2::new(1500.0, h - 120.0), Vec2::new(40.0, 200.0), color),
            Self::new(Vec2::new(1350.0, h - 240.0), Vec2::new(340.0, 40.0), color),
        ]
    }
}

impl Spawn for Structure {
    type Handles = BodyHandles;

    fn spawn(&self, world: &mut PhysicsWorld) -> BodyHandles {
        let body = world.insert_body(body_builder(BodyKind::Dynamic, self.pos));
        let collider = self
            .material
            .apply(ColliderBuilder::round_cuboid(
                self.size.x / 2.0,
                self.size.y / 2.0,
                self.radius,
            ))
            .mass(self.mass);
        let collider = world.insert_collider(body, collider, self.color);
        BodyHandles { body, collider }
    }
}

// -------------------- Pendulum ----------------------------------------------

/// A rod with a weight at its end, pinned to a fixed pivot.
///
/// The bob body carries both shapes. Its origin is pinned to the pivot origin
/// at their initial separation, and the rod runs from that origin to the
/// weight. The bob swings around the pivot and also turns about its own origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Pendulum {
    pub pos_center: Vec2,
    pub pos_body: Vec2,
    pub point1_line: Vec2,
    pub point2_line: Vec2,
    pub width_line: f32,
    pub mass_line: f32,
    pub material_line: Material,
    pub color_line: Color,
    /// Weight center relative to the bob body
    pub pos_circle: Vec2,
    pub radius: f32,
    pub mass_circle: f32,
    pub material_circle: Material,
    pub color_circle: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendulumHandles {
    pub pivot: RigidBodyHandle,
    pub body: RigidBodyHandle,
    pub line: ColliderHandle,
    pub circle: ColliderHandle,
    pub joint: ImpulseJointHandle,
}

impl Default for Pendulum {
    fn default() -> Self {
        Self {
            pos_center: Vec2::new(850.0, 500.0),
            pos_body: Vec2::new(850.0, 600.0),
            point1_line: Vec2::ZERO,
            point2_line: Vec2::new(325.0, 0.0),
            width_line: 3.0,
            mass_line: 8.0,
            material_line: Material {
                elasticity: 0.1,
                friction: 1.0,
            },
            color_line: rgba(200, 200, 200, 255),
            pos_circle: Vec2::new(325.0, 0.0),
            radius: 40.0,
            mass_circle: 30.0,
            material_circle: Material {
                elasticity: 0.95,
                friction: 1.0,
            },
            color_circle: rgba(111, 0, 111, 100),
        }
    }
}

impl Pendulum {
    /// Distance the pin joint keeps between pivot and bob origin
    pub fn pin_length(&self) -> f32 {
        self.pos_center.distance(self.pos_body)
    }
}

impl Spawn for Pendulum {
    type Handles = PendulumHandles;

    fn spawn(&self, world: &mut PhysicsWorld) -> PendulumHandles {
        let pivot = world.insert_body(body_builder(BodyKind::Static, self.pos_center));
        let body = world.insert_body(body_builder(BodyKind::Dynamic, self.pos_body));

        // Segment with thickness is a capsule in Rapier
        let line = self
            .material_line
            .apply(ColliderBuilder::new(SharedShape::capsule(
                point![self.point1_line.x, self.point1_line.y],
                point![self.point2_line.x, self.point2_line.y],
                self.width_line,
            )))
            .mass(self.mass_line);
        let line = world.insert_collider(body, line, self.color_line);

        let circle = self
            .material_circle
            .apply(ColliderBuilder::ball(self.radius))
            .translation(vector![self.pos_circle.x, self.pos_circle.y])
            .mass(self.mass_circle);
        let circle = world.insert_collider(body, circle, self.color_circle);

        // Both origins, held at their starting distance
        let joint = world.insert_pin_joint(pivot, body, Vec2::ZERO, Vec2::ZERO, self.pin_length());

        PendulumHandles {
            pivot,
            body,
            line,
            circle,
            joint,
        }
    }
}

// -------------------- Line --------------------------------------------------

/// Drag indicator drawn from the press point to the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub point1: Vec2,
    pub point2: Vec2,
    pub color: Color,
    pub width: f32,
}

impl Line {
    pub const WIDTH: f32 = 3.0;

    pub fn new(point1: Vec2, point2: Vec2) -> Self {
        Self {
            point1,
            point2,
            color: WHITE,
            width: Self::WIDTH,
        }
    }

    /// Same line ending at a new point
    pub fn to(self, point2: Vec2) -> Self {
        Self { point2, ..self }
    }
}
