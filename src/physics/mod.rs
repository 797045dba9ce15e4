//! Narrow-phase collision detection and ray queries.
//!
//! # Architecture
//!
//! Queries are layered bottom-up:
//!
//! 1. Shape helpers (box corners, separating axes, capsule segments)
//! 2. Pair tests, one per combination of shape kinds
//! 3. Dispatch, which orders a pair for its test and flips the result back
//! 4. Ray tests built on a shared ray-plane primitive
//!
//! Every query is a pure function of its inputs. A miss is a `None`, never
//! an error.

pub mod collider;
pub mod contact;
pub mod dispatch;
pub mod narrowphase;
pub mod plane;
pub mod ray;

use crate::error::{Error, Result};

pub use collider::{ColliderShape, PhysicsAabb, ShapeKind};
pub use contact::{Contact, ContactManifold};
pub use dispatch::{detect_collision, PairKind};
pub use plane::Plane;
pub use ray::{ray_intersection, Ray, RayIntersection, RAY_BOX_EPSILON};

/// Tuning for world-level collision passes.
#[derive(Debug, Clone)]
pub struct CollisionConfig {
    /// Candidate pair count from which a pass runs on the rayon pool.
    /// Requires the `parallel` feature. Default: 64.
    pub parallel_pair_threshold: usize,
    /// Tolerance of the ray-box bounds check. Default: 1e-4.
    pub ray_box_epsilon: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            parallel_pair_threshold: 64,
            ray_box_epsilon: RAY_BOX_EPSILON,
        }
    }
}

impl CollisionConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.ray_box_epsilon.is_finite() || self.ray_box_epsilon < 0.0 {
            return Err(Error::InvalidDimension {
                what: "ray box epsilon",
                value: self.ray_box_epsilon,
            });
        }
        Ok(())
    }
}
