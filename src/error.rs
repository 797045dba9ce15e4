//! Error types for validated construction.
//!
//! Geometric queries never fail; a miss is reported as `None`. Only values
//! that carry configuration (cameras, viewports, shapes, configs) are
//! validated up front.

/// Errors raised when building cameras, viewports, shapes or configs.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Field of view outside the open range (0, 180) degrees.
    #[error("invalid field of view: {0} degrees")]
    InvalidFieldOfView(f32),

    /// Clip planes must satisfy `0 < near < far`.
    #[error("invalid clip planes: near = {near}, far = {far}")]
    InvalidClipPlanes { near: f32, far: f32 },

    /// Viewport with no area.
    #[error("empty viewport: {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },

    /// Unprojection depth sentinels must lie strictly inside (-1, 1) with near < far.
    #[error("invalid unprojection depth range: near = {near}, far = {far}")]
    InvalidDepthRange { near: f32, far: f32 },

    /// Negative or non-finite shape dimension.
    #[error("invalid {what}: {value}")]
    InvalidDimension { what: &'static str, value: f32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
