pub mod clock;
pub mod entities;
pub mod launch;
pub mod render;
pub mod scale;
pub mod scene;
pub mod settings;
pub mod world;
