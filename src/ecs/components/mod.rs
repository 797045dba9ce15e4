//! ECS components. Placement uses [`crate::transform::Transform`] directly.

pub mod physics;

pub use crate::transform::Transform;
pub use physics::*;
