//! Collision components for ECS entities.

use glam::Vec3;

use crate::physics::collider::ColliderShape;
use crate::transform::Transform;

bitflags::bitflags! {
    /// Categories used to filter ray queries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        const DEFAULT = 1 << 0;
        /// Can be selected with the mouse.
        const PICKABLE = 1 << 1;
        const STATIC = 1 << 2;
        const DYNAMIC = 1 << 3;
        const ALL = u32::MAX;
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Collision detection component.
///
/// Placement comes from the entity's [`Transform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Offset from the entity's transform origin, in the entity's rotated frame.
    pub offset: Vec3,
    pub layers: CollisionLayers,
}

impl Collider {
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            offset: Vec3::ZERO,
            layers: CollisionLayers::DEFAULT,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_layers(mut self, layers: CollisionLayers) -> Self {
        self.layers = layers;
        self
    }

    /// Placement of the shape itself once the offset is applied.
    pub fn world_transform(&self, transform: &Transform) -> Transform {
        if self.offset == Vec3::ZERO {
            *transform
        } else {
            Transform {
                position: transform.transform_point(self.offset),
                ..*transform
            }
        }
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::new(ColliderShape::Sphere { radius: 0.5 })
    }
}
