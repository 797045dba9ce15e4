//! ECS systems (narrow phase, ray queries).

pub mod narrowphase;
pub mod raycast;

pub use narrowphase::detect_contacts;
pub use raycast::{raycast, raycast_all, RayHit, RaycastQuery};
