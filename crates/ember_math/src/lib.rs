//! Foundational value types for the ember path tracer.
//!
//! Re-exports `glam` for vector math and adds the ray-tracing primitives
//! everything else is built on: `Ray`, `Interval`, and `Aabb`.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
