//! Screen to world unprojection.
//!
//! The inverse view and projection matrices are written down in closed form
//! from the camera parameters instead of running a general 4x4 inverse.

use glam::{Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};

use crate::physics::ray::Ray;

use super::camera::{PerspectiveCamera, Viewport};
use super::PickingConfig;

/// Inverse of [`PerspectiveCamera::view_matrix`]: `T(position) * Ry(yaw) * Rx(pitch)`.
pub fn inverse_view(camera: &PerspectiveCamera) -> Mat4 {
    Mat4::from_translation(camera.position)
        * Mat4::from_rotation_y(camera.yaw)
        * Mat4::from_rotation_x(camera.pitch)
}

/// Inverse of `Mat4::perspective_rh_gl(fov, aspect, near, far)`.
///
/// With `f = 1 / tan(fov / 2)`, `c = (far + near) / (near - far)` and
/// `d = 2 * far * near / (near - far)` the projection maps
/// `(x, y, z, w)` to `(f x / aspect, f y, c z + d w, -z)`. Solving for the
/// eye-space vector gives `x = aspect X / f`, `y = Y / f`, `z = -W` and
/// `w = (Z + c W) / d`.
pub fn inverse_projection(aspect: f32, fov: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov * 0.5).tan();
    let neg_depth = near - far;
    let c = (far + near) / neg_depth;
    let d = 2.0 * near * far / neg_depth;

    Mat4::from_cols(
        Vec4::new(aspect / f, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0 / f, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0 / d),
        Vec4::new(0.0, 0.0, -1.0, c / d),
    )
}

/// Map a screen position back into world space.
///
/// `screen.xy` is in window pixels with a bottom-left origin and `screen.z`
/// is the NDC depth in `[-1, 1]`. `None` when the homogeneous w vanishes.
pub fn unproject(camera: &PerspectiveCamera, viewport: &Viewport, screen: Vec3) -> Option<Vec3> {
    let inverse = inverse_view(camera)
        * inverse_projection(viewport.aspect(), camera.fov, camera.near, camera.far);

    let clip = Vec4::new(
        (screen.x - viewport.x as f32) / viewport.width as f32 * 2.0 - 1.0,
        (screen.y - viewport.y as f32) / viewport.height as f32 * 2.0 - 1.0,
        screen.z,
        1.0,
    );

    let world = inverse * clip;
    if world.w.abs() <= f32::EPSILON {
        return None;
    }
    Some(world.xyz() / world.w)
}

/// Ray from the camera through a bottom-left-origin screen position.
fn ray_through(
    camera: &PerspectiveCamera,
    viewport: &Viewport,
    screen: Vec2,
    config: &PickingConfig,
) -> Option<Ray> {
    let near = unproject(camera, viewport, screen.extend(config.near_depth))?;
    let far = unproject(camera, viewport, screen.extend(config.far_depth))?;
    let direction = (far - near).try_normalize()?;
    Some(Ray::new(camera.position, direction))
}

/// Picking ray under a cursor.
///
/// `cursor` is measured in pixels from the viewport's top-left corner, the
/// way window systems report the mouse; it is flipped onto the bottom-left
/// origin used by unprojection.
pub fn ray_from_screen(
    camera: &PerspectiveCamera,
    viewport: &Viewport,
    cursor: Vec2,
    config: &PickingConfig,
) -> Option<Ray> {
    let screen = Vec2::new(
        viewport.x as f32 + cursor.x,
        viewport.y as f32 + viewport.height as f32 - cursor.y,
    );
    ray_through(camera, viewport, screen, config)
}

/// Ray through the centre of the viewport, e.g. for a crosshair.
pub fn ray_from_viewport_center(
    camera: &PerspectiveCamera,
    viewport: &Viewport,
    config: &PickingConfig,
) -> Option<Ray> {
    ray_through(camera, viewport, viewport.center(), config)
}

/// Direction of the ray through the viewport centre.
pub fn camera_forward(
    camera: &PerspectiveCamera,
    viewport: &Viewport,
    config: &PickingConfig,
) -> Option<Vec3> {
    ray_from_viewport_center(camera, viewport, config).map(|ray| ray.direction)
}
