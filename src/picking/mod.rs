//! Picking rays built from screen coordinates.

pub mod camera;
pub mod unproject;

use crate::error::{Error, Result};

pub use camera::{PerspectiveCamera, Viewport};
pub use unproject::{
    camera_forward, inverse_projection, inverse_view, ray_from_screen, ray_from_viewport_center,
    unproject,
};

/// NDC depths at which the near and far points of a picking ray are
/// unprojected.
///
/// Unprojecting at exactly -1 or 1 degenerates, so the defaults sit just
/// inside the clip range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickingConfig {
    /// Default: -0.99999.
    pub near_depth: f32,
    /// Default: 0.99999.
    pub far_depth: f32,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            near_depth: -0.99999,
            far_depth: 0.99999,
        }
    }
}

impl PickingConfig {
    pub fn validate(&self) -> Result<()> {
        let (near, far) = (self.near_depth, self.far_depth);
        if !(near > -1.0 && far < 1.0 && near < far) {
            return Err(Error::InvalidDepthRange { near, far });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picking_config_validation() {
        assert!(PickingConfig::default().validate().is_ok());

        let at_clip = PickingConfig {
            near_depth: -1.0,
            far_depth: 1.0,
        };
        assert_eq!(
            at_clip.validate(),
            Err(Error::InvalidDepthRange {
                near: -1.0,
                far: 1.0
            })
        );

        let reversed = PickingConfig {
            near_depth: 0.5,
            far_depth: -0.5,
        };
        assert!(reversed.validate().is_err());
    }
}
