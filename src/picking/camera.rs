//! Perspective camera and viewport used to build picking rays.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::error::{Error, Result};

/// Viewport rectangle in window pixels, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyViewport { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Get the aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Centre of the rectangle in window pixels.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }
}

/// First-person perspective camera described by pitch and yaw.
///
/// With both angles at zero the camera looks down -Z with +Y up. Yaw turns
/// about world Y, pitch about the camera's X axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Pitch in radians.
    pub pitch: f32,
    /// Yaw in radians.
    pub yaw: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl PerspectiveCamera {
    /// Create a camera. Angles are given in degrees.
    pub fn new(
        position: Vec3,
        pitch_degrees: f32,
        yaw_degrees: f32,
        fov_degrees: f32,
        near: f32,
        far: f32,
    ) -> Result<Self> {
        if !fov_degrees.is_finite() || fov_degrees <= 0.0 || fov_degrees >= 180.0 {
            return Err(Error::InvalidFieldOfView(fov_degrees));
        }
        if !(near > 0.0 && far > near && far.is_finite()) {
            return Err(Error::InvalidClipPlanes { near, far });
        }
        Ok(Self {
            position,
            pitch: pitch_degrees.to_radians(),
            yaw: yaw_degrees.to_radians(),
            fov: fov_degrees.to_radians(),
            near,
            far,
        })
    }

    /// Orientation of the camera in world space.
    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(-self.pitch)
            * Mat4::from_rotation_y(-self.yaw)
            * Mat4::from_translation(-self.position)
    }

    /// Get the projection matrix for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, self.near, self.far)
    }

    /// Unit viewing direction.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }
}
