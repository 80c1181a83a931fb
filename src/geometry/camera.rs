//! Camera view math for facing and line-of-sight checks.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The host camera as seen by the trigger engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World-space eye position.
    pub position: Vec3,
    /// View direction. Need not be normalised.
    pub forward: Vec3,
}

impl Camera {
    /// Create a camera from an eye position and view direction.
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    /// Create a camera at `position` looking straight at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self::new(position, target - position)
    }

    /// Unit view direction, or `None` for a zero/non-finite forward vector.
    #[must_use]
    pub fn direction(&self) -> Option<Vec3> {
        self.forward.try_normalize()
    }

    /// Angle in radians between the view direction and the ray to `target`.
    ///
    /// `None` when either direction is undefined (target at the eye, or a
    /// degenerate forward vector).
    #[must_use]
    pub fn angle_to(&self, target: Vec3) -> Option<f32> {
        let forward = self.direction()?;
        let to_target = (target - self.position).try_normalize()?;
        Some(forward.dot(to_target).clamp(-1.0, 1.0).acos())
    }

    /// Dot product between the view direction and a unit `direction`.
    #[must_use]
    pub fn facing_dot(&self, direction: Vec3) -> Option<f32> {
        Some(self.direction()?.dot(direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_to_target() {
        let camera = Camera::new(Vec3::ZERO, Vec3::Z);
        let straight = camera.angle_to(Vec3::new(0.0, 0.0, 10.0)).unwrap();
        assert!(straight.abs() < 1e-6);

        let side = camera.angle_to(Vec3::new(10.0, 0.0, 0.0)).unwrap();
        assert!((side - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_angles() {
        let camera = Camera::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(camera.angle_to(Vec3::X), None);

        let camera = Camera::new(Vec3::ONE, Vec3::X);
        assert_eq!(camera.angle_to(Vec3::ONE), None);
    }

    #[test]
    fn test_looking_at() {
        let camera = Camera::looking_at(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 2.0, -5.0));
        assert!(camera.angle_to(Vec3::new(0.0, 2.0, -50.0)).unwrap() < 1e-6);
        assert!((camera.facing_dot(Vec3::NEG_Z).unwrap() - 1.0).abs() < 1e-6);
    }
}
