//! Entity Component System integration with hecs.

pub mod components;
pub mod systems;

pub mod prelude {
    pub use super::components::*;
    pub use super::systems::{detect_contacts, raycast, raycast_all, RayHit, RaycastQuery};
}
