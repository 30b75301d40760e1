pub mod medium;

use bitflags::bitflags;
use serde::{
    Deserialize,
    Serialize,
};

pub use crate::physics::medium::{
    MediumPair,
    ParameterLabels,
};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::VariantArray,
    strum::Display,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    #[strum(to_string = "Electric Field")]
    Electric,
    #[strum(to_string = "Magnetic Field")]
    Magnetic,
}

impl FieldKind {
    /// Angle of the resultant vector relative to the shaft reference axis.
    ///
    /// Electric fields measure the angle as `atan2(normal, tangential)`,
    /// magnetic fields as `atan2(tangential, normal)`.
    pub fn resultant_angle(&self, normal: f64, tangential: f64) -> f64 {
        match self {
            FieldKind::Electric => normal.atan2(tangential),
            FieldKind::Magnetic => tangential.atan2(normal),
        }
    }

    /// Compose normal and tangential component into one vector.
    pub fn compose(&self, normal: f64, tangential: f64) -> Resultant {
        Resultant {
            magnitude: resultant_magnitude(normal, tangential),
            angle: self.resultant_angle(normal, tangential),
        }
    }
}

impl From<FieldKind> for FieldKinds {
    fn from(value: FieldKind) -> Self {
        match value {
            FieldKind::Electric => FieldKinds::ELECTRIC,
            FieldKind::Magnetic => FieldKinds::MAGNETIC,
        }
    }
}

bitflags! {
    /// Set of fields that are currently shown. Both may be shown at once, in
    /// which case their arrows are superimposed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct FieldKinds: u8 {
        const ELECTRIC = 0b0000_0001;
        const MAGNETIC = 0b0000_0010;
    }
}

impl FieldKinds {
    /// Iterate over the contained fields, electric first.
    pub fn kinds(&self) -> impl Iterator<Item = FieldKind> + '_ {
        <FieldKind as strum::VariantArray>::VARIANTS
            .iter()
            .copied()
            .filter(|kind| self.contains((*kind).into()))
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Normal and tangential components as separate arrows.
    #[default]
    Component,
    /// One arrow per point, the vector sum of both components.
    Resultant,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resultant {
    pub magnitude: f64,
    pub angle: f64,
}

pub fn resultant_magnitude(normal: f64, tangential: f64) -> f64 {
    (normal * normal + tangential * tangential).sqrt()
}
