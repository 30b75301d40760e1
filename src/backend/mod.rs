//! Render targets for generated arrows.
//!
//! A backend only keeps a display list of its own primitives. Painting that
//! list is done by the views in [`crate::app`].

pub mod planar;
pub mod volumetric;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    geometry::ArrowSpec,
    layout::{
        FieldLayout,
        LayoutParams,
    },
};

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
pub enum ActiveBackend {
    #[default]
    #[strum(to_string = "2D")]
    Planar,
    #[strum(to_string = "3D")]
    Volumetric,
}

pub trait ArrowBackend {
    type Layout: FieldLayout;

    fn layout(&self) -> &Self::Layout;

    fn clear(&mut self);

    fn add_arrow(&mut self, arrow: &ArrowSpec);

    /// Throws away the current arrows and lays out new ones.
    fn regenerate(&mut self, params: &LayoutParams) {
        let arrows = self.layout().generate(params);

        self.clear();
        for arrow in &arrows {
            self.add_arrow(arrow);
        }

        tracing::trace!(num_arrows = arrows.len(), "regenerated arrows");
    }
}
