//! Arrow layouts for both backends.
//!
//! Each lattice knows, for every field kind and display mode, where to put
//! arrows and how long they are. Medium 1 always gets the reference lengths.
//! In medium 2 the tangential component is multiplied by
//! `param1 / param2`.

pub mod planar;
pub mod volumetric;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    geometry::ArrowSpec,
    physics::{
        DisplayMode,
        FieldKind,
        FieldKinds,
        MediumPair,
    },
};

/// Everything a layout depends on. Passed by value into the layout functions,
/// which never look at UI state themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub fields: FieldKinds,
    pub mode: DisplayMode,
    pub media: MediumPair,
}

pub trait FieldLayout {
    fn component(&self, field: FieldKind, ratio: f64, out: &mut Vec<ArrowSpec>);

    fn resultant(&self, field: FieldKind, ratio: f64, out: &mut Vec<ArrowSpec>);

    /// Arrows of all enabled fields, electric first.
    fn generate(&self, params: &LayoutParams) -> Vec<ArrowSpec> {
        let ratio = params.media.ratio();
        let mut arrows = vec![];

        for field in params.fields.kinds() {
            match params.mode {
                DisplayMode::Component => self.component(field, ratio, &mut arrows),
                DisplayMode::Resultant => self.resultant(field, ratio, &mut arrows),
            }
        }

        arrows
    }
}

/// Scales a medium-2 reference length by the medium ratio.
///
/// Every finite result is exactly `base * ratio`, however long. Only the
/// infinities from a zero `param2` are replaced by `±max_length`, and `NaN`
/// becomes zero.
pub fn scaled_length(base: f64, ratio: f64, max_length: f64) -> f64 {
    let length = base * ratio;

    if length.is_nan() {
        tracing::warn!(base, ratio, "scaled arrow length is NaN, drawing nothing");
        0.0
    }
    else if length.is_infinite() {
        tracing::warn!(base, ratio, max_length, "scaled arrow length is infinite, clamped");
        max_length.copysign(length)
    }
    else {
        length
    }
}
