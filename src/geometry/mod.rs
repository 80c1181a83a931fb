//! Geometry for spatial triggers.
//!
//! - [`is_inside`]: point-in-volume test for boxes, spheres and cylinders
//! - [`within_radius`]: point-in-radius test
//! - [`Volume`]: serializable shape + size + height declaration
//! - [`Camera`]: view direction math for facing and line-of-sight checks
//!
//! The engine tests points against volumes; it does not resolve collisions.

mod camera;
mod volume;

pub use camera::Camera;
pub use volume::{is_inside, within_radius, Volume, VolumeShape, VolumeSize};
