use std::iter::successors;

use nalgebra::Point2;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    geometry::{
        ArrowSpec,
        ColorClass,
    },
    layout::{
        FieldLayout,
        scaled_length,
    },
    physics::FieldKind,
};

/// Vertical distance between rows.
pub const SPACING: f64 = 40.0;

/// Number of rows used for sparse arrows (tangential magnetic components and
/// resultants).
pub const SPARSE_ROWS: usize = 3;

/// Lengths and placement of one field's component arrows.
#[derive(Clone, Copy, Debug)]
struct Components {
    /// Horizontal distance of the arrow anchors from the boundary
    offset: f64,
    normal: f64,
    tangential: f64,
}

const ELECTRIC_COMPONENTS: Components = Components {
    offset: 100.0,
    normal: 40.0,
    tangential: 80.0,
};

const MAGNETIC_COMPONENTS: Components = Components {
    offset: 150.0,
    normal: 80.0,
    tangential: 40.0,
};

const ELECTRIC_RESULTANT: Components = Components {
    offset: 100.0,
    normal: 40.0,
    tangential: 80.0,
};

const MAGNETIC_RESULTANT: Components = Components {
    offset: 100.0,
    normal: 80.0,
    tangential: 40.0,
};

/// 2D layout on a canvas with the boundary as a vertical line through its
/// center.
///
/// Coordinates are canvas coordinates, y grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanarLattice {
    pub width: f64,
    pub height: f64,
    /// Length drawn in place of an infinite scaled component (zero
    /// `param2`).
    pub max_arrow_length: f64,
}

impl Default for PlanarLattice {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            max_arrow_length: 350.0,
        }
    }
}

impl PlanarLattice {
    /// x-coordinate of the boundary
    pub fn center_x(&self) -> f64 {
        0.5 * self.width
    }

    /// Rows spaced by [`SPACING`], leaving one spacing free at top and bottom.
    pub fn rows(&self) -> impl Iterator<Item = f64> + use<> {
        let end = self.height - SPACING;
        successors(Some(SPACING), |y| Some(y + SPACING)).take_while(move |y| *y < end)
    }

    /// [`SPARSE_ROWS`] rows evenly distributed over the band between the
    /// first and last row.
    pub fn sparse_rows(&self) -> impl Iterator<Item = f64> + use<> {
        let step = (self.height - 2.0 * SPACING) / (SPARSE_ROWS + 1) as f64;
        (1..=SPARSE_ROWS).map(move |i| SPACING + step * i as f64)
    }

    fn electric_component(&self, ratio: f64, out: &mut Vec<ArrowSpec>) {
        let Components {
            offset,
            normal,
            tangential,
        } = ELECTRIC_COMPONENTS;
        let cx = self.center_x();
        let tangential2 = scaled_length(tangential, ratio, self.max_arrow_length);

        for y in self.rows() {
            let left = Point2::new(cx - offset, y);
            let right = Point2::new(cx + offset, y);

            out.push(ArrowSpec::vertical(left, normal, ColorClass::Normal));
            out.push(ArrowSpec::vertical(right, normal, ColorClass::Normal));
            out.push(ArrowSpec::horizontal(left, tangential, ColorClass::Tangential));
            out.push(ArrowSpec::horizontal(right, tangential2, ColorClass::Tangential));
        }
    }

    fn magnetic_component(&self, ratio: f64, out: &mut Vec<ArrowSpec>) {
        let Components {
            offset,
            normal,
            tangential,
        } = MAGNETIC_COMPONENTS;
        let cx = self.center_x();
        let tangential2 = scaled_length(tangential, ratio, self.max_arrow_length);

        // normal arrows end right at the anchor in medium 1 and start there in
        // medium 2
        for y in self.rows() {
            out.push(ArrowSpec::horizontal(
                Point2::new(cx - offset - normal, y),
                normal,
                ColorClass::Normal,
            ));
            out.push(ArrowSpec::horizontal(
                Point2::new(cx + offset, y),
                normal,
                ColorClass::Normal,
            ));
        }

        for y in self.sparse_rows() {
            out.push(ArrowSpec::vertical(
                Point2::new(cx - offset, y),
                tangential,
                ColorClass::Tangential,
            ));
            out.push(ArrowSpec::vertical(
                Point2::new(cx + offset, y),
                tangential2,
                ColorClass::Tangential,
            ));
        }
    }

    fn resultants(&self, field: FieldKind, ratio: f64, out: &mut Vec<ArrowSpec>) {
        let Components {
            offset,
            normal,
            tangential,
        } = match field {
            FieldKind::Electric => ELECTRIC_RESULTANT,
            FieldKind::Magnetic => MAGNETIC_RESULTANT,
        };
        let cx = self.center_x();

        let medium1 = field.compose(normal, tangential);
        let medium2 = field.compose(
            normal,
            scaled_length(tangential, ratio, self.max_arrow_length),
        );

        for y in self.sparse_rows() {
            out.push(ArrowSpec::at_angle(
                Point2::new(cx - offset, y),
                medium1.magnitude,
                medium1.angle,
                ColorClass::Resultant,
            ));
            out.push(ArrowSpec::at_angle(
                Point2::new(cx + offset, y),
                medium2.magnitude,
                medium2.angle,
                ColorClass::Resultant,
            ));
        }
    }
}

impl FieldLayout for PlanarLattice {
    fn component(&self, field: FieldKind, ratio: f64, out: &mut Vec<ArrowSpec>) {
        match field {
            FieldKind::Electric => self.electric_component(ratio, out),
            FieldKind::Magnetic => self.magnetic_component(ratio, out),
        }
    }

    fn resultant(&self, field: FieldKind, ratio: f64, out: &mut Vec<ArrowSpec>) {
        self.resultants(field, ratio, out);
    }
}
