//! Rein collision
//!
//! Narrow-phase collision detection, ray queries and picking for the rein
//! engine.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **transform** - World placement of a shape
//! 2. **physics** - Shapes, pair tests, dispatch, contacts and ray tests
//! 3. **picking** - Cameras, viewports and screen to world unprojection
//! 4. **ecs** - hecs integration: colliders, layers, world passes (feature = "ecs")
//!
//! Every query is pure and synchronous. A miss is `None`; only validated
//! construction returns [`Error`].

pub mod error;
pub mod physics;
pub mod picking;
pub mod transform;

#[cfg(feature = "ecs")]
pub mod ecs;

// Re-export commonly used types
pub use error::{Error, Result};

pub use transform::Transform;

pub use physics::{
    detect_collision, ray_intersection, ColliderShape, CollisionConfig, Contact, ContactManifold,
    PairKind, PhysicsAabb, Plane, Ray, RayIntersection, ShapeKind,
};

pub use picking::{
    ray_from_screen, ray_from_viewport_center, PerspectiveCamera, PickingConfig, Viewport,
};

#[cfg(feature = "ecs")]
pub use ecs::prelude::*;

// Re-export glam for convenience
pub use glam;
