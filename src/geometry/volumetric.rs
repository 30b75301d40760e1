use nalgebra::{
    Point3,
    UnitVector3,
    Vector3,
};
use serde::Serialize;

use crate::geometry::{
    ArrowSpec,
    ColorClass,
};

/// Head length relative to the arrow length.
pub const HEAD_LENGTH_FACTOR: f64 = 0.2;

/// Head width relative to the arrow length.
pub const HEAD_WIDTH_FACTOR: f64 = 0.08;

/// Arrow primitive of the 3D scene. Like an arrow helper: a line shaft from
/// `origin` and a cone head ending at `origin + direction * length`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VolumetricArrow {
    pub origin: Point3<f64>,
    pub direction: UnitVector3<f64>,
    /// Never negative. Negative magnitudes flip `direction` instead.
    pub length: f64,
    pub head_length: f64,
    pub head_width: f64,
    pub color: ColorClass,
}

impl VolumetricArrow {
    pub fn from_spec(spec: &ArrowSpec) -> Self {
        let length = spec.length();
        let direction = if spec.magnitude < 0.0 {
            UnitVector3::new_unchecked(-spec.direction.into_inner())
        }
        else {
            spec.direction
        };

        Self {
            origin: spec.origin,
            direction,
            length,
            head_length: HEAD_LENGTH_FACTOR * length,
            head_width: HEAD_WIDTH_FACTOR * length,
            color: spec.color,
        }
    }

    pub fn tip(&self) -> Point3<f64> {
        self.origin + self.direction.into_inner() * self.length
    }

    /// Point where the shaft ends and the head begins.
    pub fn head_base(&self) -> Point3<f64> {
        self.origin + self.direction.into_inner() * (self.length - self.head_length)
    }

    /// Two unit vectors perpendicular to the arrow direction, used to span
    /// the head's base circle.
    pub fn head_basis(&self) -> (Vector3<f64>, Vector3<f64>) {
        let direction = self.direction.into_inner();
        let helper = if direction.x.abs() < 0.9 {
            Vector3::x()
        }
        else {
            Vector3::y()
        };
        let u = direction.cross(&helper).normalize();
        let v = direction.cross(&u);
        (u, v)
    }
}
