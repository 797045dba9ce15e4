//! Contact data structures handed to the solver.

use glam::Vec3;

/// A single contact between two shapes.
///
/// `local_a` and `local_b` are offsets from each shape's position to its
/// contact point, in world orientation. `normal` is unit length and points
/// from shape A towards shape B; moving B along it by `penetration`
/// separates the pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub local_a: Vec3,
    pub local_b: Vec3,
    pub normal: Vec3,
    /// Penetration depth, never negative.
    pub penetration: f32,
}

impl Contact {
    pub fn new(local_a: Vec3, local_b: Vec3, normal: Vec3, penetration: f32) -> Self {
        Self {
            local_a,
            local_b,
            normal,
            penetration,
        }
    }

    /// The same contact seen with A and B exchanged.
    #[inline]
    pub fn flipped(self) -> Self {
        Self {
            local_a: self.local_b,
            local_b: self.local_a,
            normal: -self.normal,
            penetration: self.penetration,
        }
    }
}

/// Contacts accumulated for one pair of bodies.
///
/// Narrow-phase tests keep a single representative point per pair, but the
/// manifold accepts any number so callers can merge results.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactManifold<K> {
    pub entity_a: K,
    pub entity_b: K,
    pub points: Vec<Contact>,
}

impl<K: Copy> ContactManifold<K> {
    pub fn new(entity_a: K, entity_b: K) -> Self {
        Self {
            entity_a,
            entity_b,
            points: Vec::new(),
        }
    }

    pub fn from_contact(entity_a: K, entity_b: K, contact: Contact) -> Self {
        Self {
            entity_a,
            entity_b,
            points: vec![contact],
        }
    }

    pub fn add_contact_point(
        &mut self,
        local_a: Vec3,
        local_b: Vec3,
        normal: Vec3,
        penetration: f32,
    ) {
        self.points
            .push(Contact::new(local_a, local_b, normal, penetration));
    }

    pub fn push(&mut self, contact: Contact) {
        self.points.push(contact);
    }

    /// The point with the largest penetration.
    pub fn deepest(&self) -> Option<&Contact> {
        self.points
            .iter()
            .max_by(|a, b| a.penetration.total_cmp(&b.penetration))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The manifold with the roles of A and B exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            entity_a: self.entity_b,
            entity_b: self.entity_a,
            points: self.points.iter().map(|c| c.flipped()).collect(),
        }
    }
}
