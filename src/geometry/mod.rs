//! Backend-independent arrow geometry.
//!
//! Layouts emit [`ArrowSpec`]s. The planar and volumetric backends turn them
//! into their own primitives with [`planar::PlanarArrow`] and
//! [`volumetric::VolumetricArrow`].

pub mod planar;
pub mod volumetric;

use nalgebra::{
    Point2,
    Point3,
    UnitVector3,
    Vector3,
};
use palette::Srgb;
use serde::{
    Deserialize,
    Serialize,
};

/// Which part of the field an arrow shows. Determines the color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorClass {
    /// Normal component, blue
    Normal,
    /// Tangential component, red
    Tangential,
    /// Vector sum of both components, purple
    Resultant,
}

impl ColorClass {
    pub fn default_color(&self) -> Srgb<u8> {
        match self {
            ColorClass::Normal => Srgb::new(0x00, 0x00, 0xff),
            ColorClass::Tangential => Srgb::new(0xff, 0x00, 0x00),
            ColorClass::Resultant => Srgb::new(0x80, 0x00, 0x80),
        }
    }
}

/// A single arrow, independent of how it will be drawn.
///
/// The magnitude is signed. A negative magnitude draws the arrow in the
/// opposite direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrowSpec {
    pub origin: Point3<f64>,
    pub direction: UnitVector3<f64>,
    pub magnitude: f64,
    pub color: ColorClass,
}

impl ArrowSpec {
    pub fn new(
        origin: Point3<f64>,
        direction: UnitVector3<f64>,
        magnitude: f64,
        color: ColorClass,
    ) -> Self {
        Self {
            origin,
            direction,
            magnitude,
            color,
        }
    }

    /// Arrow along an arbitrary, not necessarily normalized, direction.
    ///
    /// A zero direction falls back to the x-axis.
    pub fn along(
        origin: Point3<f64>,
        direction: Vector3<f64>,
        magnitude: f64,
        color: ColorClass,
    ) -> Self {
        let direction = UnitVector3::try_new(direction, f64::EPSILON).unwrap_or(Vector3::x_axis());
        Self::new(origin, direction, magnitude, color)
    }

    /// Planar arrow pointing along `(cos(angle), sin(angle))` in canvas
    /// coordinates.
    pub fn at_angle(origin: Point2<f64>, magnitude: f64, angle: f64, color: ColorClass) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            planar_origin(origin),
            UnitVector3::new_unchecked(Vector3::new(cos, sin, 0.0)),
            magnitude,
            color,
        )
    }

    /// Planar arrow along the canvas x-axis.
    pub fn horizontal(origin: Point2<f64>, length: f64, color: ColorClass) -> Self {
        Self::new(planar_origin(origin), Vector3::x_axis(), length, color)
    }

    /// Planar arrow along the canvas y-axis, which points down.
    pub fn vertical(origin: Point2<f64>, length: f64, color: ColorClass) -> Self {
        Self::new(planar_origin(origin), Vector3::y_axis(), length, color)
    }

    /// Direction the arrow actually points to, taking the sign of the
    /// magnitude into account.
    pub fn pointing(&self) -> Vector3<f64> {
        if self.magnitude < 0.0 {
            -self.direction.into_inner()
        }
        else {
            self.direction.into_inner()
        }
    }

    pub fn length(&self) -> f64 {
        self.magnitude.abs()
    }

    pub fn tip(&self) -> Point3<f64> {
        self.origin + self.direction.into_inner() * self.magnitude
    }
}

fn planar_origin(origin: Point2<f64>) -> Point3<f64> {
    Point3::new(origin.x, origin.y, 0.0)
}
