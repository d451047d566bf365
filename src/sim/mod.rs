//! Bubble physics, independent of the browser.

pub mod collision;
pub mod field;
pub mod geometry;
pub mod particle;
pub mod random;

pub use field::{BoundsSource, ParticleField};
pub use geometry::{Rect, Size, Vec2};
pub use particle::{element_id, Particle};
pub use random::RandomSource;
