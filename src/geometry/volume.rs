//! Point-in-volume classification.
//!
//! Pure predicates with no side effects. Degenerate input (zero, negative or
//! non-finite sizes, non-finite points) always classifies as outside.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Shape of a trigger volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeShape {
    /// Axis-aligned box. Size is the full extent along each axis.
    Box,
    /// Sphere. Radius is the scalar size, or `size.x`.
    Sphere,
    /// Upright cylinder around the Y axis. Radius as for spheres.
    Cylinder,
}

/// Size of a trigger volume: a single scalar or per-axis extents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VolumeSize {
    /// One value for every axis (cube side, radius, cylinder radius).
    Uniform(f32),
    /// Per-axis values.
    Extents(Vec3),
}

impl VolumeSize {
    /// The radius used by spheres and cylinders.
    #[must_use]
    pub fn radius(self) -> f32 {
        match self {
            Self::Uniform(s) => s,
            Self::Extents(v) => v.x,
        }
    }

    /// Full extents used by boxes.
    #[must_use]
    pub fn extents(self) -> Vec3 {
        match self {
            Self::Uniform(s) => Vec3::splat(s),
            Self::Extents(v) => v,
        }
    }

    /// Cylinder height when none is given explicitly.
    #[must_use]
    pub fn fallback_height(self) -> f32 {
        match self {
            Self::Uniform(s) => s,
            Self::Extents(v) => v.y,
        }
    }
}

impl From<f32> for VolumeSize {
    fn from(size: f32) -> Self {
        Self::Uniform(size)
    }
}

impl From<Vec3> for VolumeSize {
    fn from(size: Vec3) -> Self {
        Self::Extents(size)
    }
}

/// A complete volume declaration, relative to a trigger's position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    /// Volume shape.
    pub shape: VolumeShape,
    /// Volume size.
    pub size: VolumeSize,
    /// Cylinder height. Ignored by other shapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl Volume {
    /// Create a volume declaration.
    pub fn new(shape: VolumeShape, size: impl Into<VolumeSize>) -> Self {
        Self {
            shape,
            size: size.into(),
            height: None,
        }
    }

    /// Axis-aligned box with full extents.
    pub fn cuboid(extents: Vec3) -> Self {
        Self::new(VolumeShape::Box, extents)
    }

    /// Sphere with a radius.
    pub fn sphere(radius: f32) -> Self {
        Self::new(VolumeShape::Sphere, radius)
    }

    /// Upright cylinder.
    pub fn cylinder(radius: f32, height: f32) -> Self {
        Self::new(VolumeShape::Cylinder, radius).with_height(height)
    }

    /// Set the cylinder height (builder pattern).
    #[must_use]
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Is `point` inside this volume placed at `origin`?
    #[must_use]
    pub fn contains(&self, origin: Vec3, point: Vec3) -> bool {
        is_inside(point, self.shape, self.size, origin, self.height)
    }

    /// Does the declaration describe a non-degenerate volume?
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self.shape {
            VolumeShape::Box => {
                let e = self.size.extents();
                e.is_finite() && e.cmpgt(Vec3::ZERO).all()
            }
            VolumeShape::Sphere => positive(self.size.radius()),
            VolumeShape::Cylinder => {
                positive(self.size.radius())
                    && positive(self.height.unwrap_or_else(|| self.size.fallback_height()))
            }
        }
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Is `point` inside a volume of `shape` and `size` centred at `position`?
///
/// - Box: `|point - position| <= size / 2` on every axis.
/// - Sphere: Euclidean distance `<= radius`.
/// - Cylinder: XZ distance `<= radius` and `|dy| <= height / 2`. Without an
///   explicit `height`, the scalar size or `size.y` is used.
///
/// Boundaries are inclusive.
///
/// ```
/// use glam::Vec3;
/// use level_triggers::geometry::{is_inside, VolumeShape, VolumeSize};
///
/// let size = VolumeSize::Uniform(5.0);
/// assert!(is_inside(Vec3::new(3.0, 0.0, 4.0), VolumeShape::Sphere, size, Vec3::ZERO, None));
/// assert!(!is_inside(Vec3::new(3.0, 0.1, 4.0), VolumeShape::Sphere, size, Vec3::ZERO, None));
/// ```
#[must_use]
pub fn is_inside(
    point: Vec3,
    shape: VolumeShape,
    size: VolumeSize,
    position: Vec3,
    height: Option<f32>,
) -> bool {
    if !point.is_finite() || !position.is_finite() {
        return false;
    }
    let offset = point - position;

    match shape {
        VolumeShape::Box => {
            let extents = size.extents();
            if !extents.is_finite() || !extents.cmpgt(Vec3::ZERO).all() {
                return false;
            }
            offset.abs().cmple(extents * 0.5).all()
        }
        VolumeShape::Sphere => {
            let radius = size.radius();
            positive(radius) && offset.length_squared() <= radius * radius
        }
        VolumeShape::Cylinder => {
            let radius = size.radius();
            let height = height.unwrap_or_else(|| size.fallback_height());
            if !positive(radius) || !positive(height) {
                return false;
            }
            let horizontal = Vec2::new(offset.x, offset.z);
            horizontal.length_squared() <= radius * radius && offset.y.abs() <= height * 0.5
        }
    }
}

/// Is `point` within `radius` of `center`? A non-positive radius never matches.
#[must_use]
pub fn within_radius(point: Vec3, center: Vec3, radius: f32) -> bool {
    positive(radius)
        && point.is_finite()
        && center.is_finite()
        && point.distance_squared(center) <= radius * radius
}
