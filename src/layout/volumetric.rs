use nalgebra::{
    Point3,
    Vector3,
};
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
    physics::{
        FieldKind,
        resultant_magnitude,
    },
};

/// Lattice covers `[-EXTENT, EXTENT]` along y and z.
pub const EXTENT: i32 = 4;

/// Distance of the arrow anchors from the boundary plane `x = 0`.
pub const OFFSET: f64 = 2.0;

/// 3D layout on a cubic lattice. The boundary is the plane `x = 0`, medium 1
/// is at negative x.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolumetricLattice {
    /// Length drawn in place of an infinite scaled component (zero
    /// `param2`).
    pub max_arrow_length: f64,
}

impl Default for VolumetricLattice {
    fn default() -> Self {
        Self {
            max_arrow_length: 8.0,
        }
    }
}

fn lattice_coordinates() -> impl Iterator<Item = i32> + Clone {
    -EXTENT..=EXTENT
}

/// Only every other row carries an arrow.
fn is_even_row(y: i32) -> bool {
    y.abs() % 2 == 0
}

/// Puts the same arrow shape into both media, only the length in medium 2 is
/// different.
fn push_pair(
    out: &mut Vec<ArrowSpec>,
    origins: (Point3<f64>, Point3<f64>),
    direction: Vector3<f64>,
    lengths: (f64, f64),
    color: ColorClass,
) {
    out.push(ArrowSpec::along(origins.0, direction, lengths.0, color));
    out.push(ArrowSpec::along(origins.1, direction, lengths.1, color));
}

impl VolumetricLattice {
    fn electric_component(&self, ratio: f64, out: &mut Vec<ArrowSpec>) {
        let normal = 0.5;
        let tangential = 1.0;
        let tangential2 = scaled_length(tangential, ratio, self.max_arrow_length);

        for z in lattice_coordinates() {
            for y in lattice_coordinates() {
                let (y, z) = (y as f64, z as f64);
                push_pair(
                    out,
                    (Point3::new(-OFFSET, y, z), Point3::new(OFFSET, y, z)),
                    Vector3::y(),
                    (normal, normal),
                    ColorClass::Normal,
                );
            }
        }

        // tangential arrows only in the middle band
        for z in lattice_coordinates() {
            for y in -2..=2 {
                let (y, z) = (y as f64, z as f64);
                push_pair(
                    out,
                    (Point3::new(-OFFSET, y, z), Point3::new(OFFSET, y, z)),
                    Vector3::x(),
                    (tangential, tangential2),
                    ColorClass::Tangential,
                );
            }
        }
    }

    fn magnetic_component(&self, ratio: f64, out: &mut Vec<ArrowSpec>) {
        let normal = 1.0;
        let tangential = 0.5;
        let tangential2 = scaled_length(tangential, ratio, self.max_arrow_length);

        for z in lattice_coordinates() {
            for y in lattice_coordinates() {
                let (yf, zf) = (y as f64, z as f64);

                push_pair(
                    out,
                    (
                        Point3::new(-OFFSET - normal, yf, zf),
                        Point3::new(OFFSET, yf, zf),
                    ),
                    Vector3::x(),
                    (normal, normal),
                    ColorClass::Normal,
                );

                if is_even_row(y) {
                    push_pair(
                        out,
                        (Point3::new(-OFFSET, yf, zf), Point3::new(OFFSET, yf, zf)),
                        -Vector3::y(),
                        (tangential, tangential2),
                        ColorClass::Tangential,
                    );
                }
            }
        }
    }

    fn electric_resultant(&self, ratio: f64, out: &mut Vec<ArrowSpec>) {
        let normal = 0.5;
        let tangential = 1.0;
        let tangential2 = scaled_length(tangential, ratio, self.max_arrow_length);

        let mut push_resultants = |y: f64, z: f64| {
            out.push(ArrowSpec::along(
                Point3::new(-OFFSET, y, z),
                Vector3::new(tangential, normal, 0.0),
                resultant_magnitude(normal, tangential),
                ColorClass::Resultant,
            ));
            out.push(ArrowSpec::along(
                Point3::new(OFFSET, y, z),
                Vector3::new(tangential2, normal, 0.0),
                resultant_magnitude(normal, tangential2),
                ColorClass::Resultant,
            ));
        };

        // every other row
        for z in lattice_coordinates() {
            for y in lattice_coordinates().step_by(2) {
                push_resultants(y as f64, z as f64);
            }
        }

        // and a second set shifted by half a cell in between
        for z in 0..2 * EXTENT {
            for y in (0..2 * EXTENT).step_by(2) {
                push_resultants(y as f64 - 3.5, z as f64 - 3.5);
            }
        }
    }

    fn magnetic_resultant(&self, ratio: f64, out: &mut Vec<ArrowSpec>) {
        let normal = 1.0;
        let tangential = 0.5;
        let tangential2 = scaled_length(tangential, ratio, self.max_arrow_length);

        for z in lattice_coordinates() {
            for y in lattice_coordinates().filter(|y| is_even_row(*y)) {
                let (y, z) = (y as f64, z as f64);
                out.push(ArrowSpec::along(
                    Point3::new(-OFFSET, y, z),
                    Vector3::new(normal, -tangential, 0.0),
                    resultant_magnitude(normal, tangential),
                    ColorClass::Resultant,
                ));
                out.push(ArrowSpec::along(
                    Point3::new(OFFSET, y, z),
                    Vector3::new(normal, -tangential2, 0.0),
                    resultant_magnitude(normal, tangential2),
                    ColorClass::Resultant,
                ));
            }
        }
    }
}

impl FieldLayout for VolumetricLattice {
    fn component(&self, field: FieldKind, ratio: f64, out: &mut Vec<ArrowSpec>) {
        match field {
            FieldKind::Electric => self.electric_component(ratio, out),
            FieldKind::Magnetic => self.magnetic_component(ratio, out),
        }
    }

    fn resultant(&self, field: FieldKind, ratio: f64, out: &mut Vec<ArrowSpec>) {
        match field {
            FieldKind::Electric => self.electric_resultant(ratio, out),
            FieldKind::Magnetic => self.magnetic_resultant(ratio, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector3;

    use crate::{
        geometry::{
            ArrowSpec,
            ColorClass,
        },
        layout::{
            FieldLayout,
            LayoutParams,
            volumetric::VolumetricLattice,
        },
        physics::{
            DisplayMode,
            FieldKind,
            FieldKinds,
            MediumPair,
        },
    };

    fn generate(field: FieldKind, mode: DisplayMode, param1: f64, param2: f64) -> Vec<ArrowSpec> {
        VolumetricLattice::default().generate(&LayoutParams {
            fields: field.into(),
            mode,
            media: MediumPair::new(param1, param2),
        })
    }

    #[test]
    fn it_has_fixed_arrow_counts() {
        let count = |field, mode| generate(field, mode, 1.0, 2.0).len();
        assert_eq!(count(FieldKind::Electric, DisplayMode::Component), 162 + 90);
        assert_eq!(count(FieldKind::Magnetic, DisplayMode::Component), 162 + 90);
        assert_eq!(count(FieldKind::Electric, DisplayMode::Resultant), 90 + 64);
        assert_eq!(count(FieldKind::Magnetic, DisplayMode::Resultant), 90);
    }

    #[test]
    fn it_thins_magnetic_tangentials_to_even_rows() {
        let arrows = generate(FieldKind::Magnetic, DisplayMode::Component, 1.0, 2.0);
        let tangentials = arrows
            .iter()
            .filter(|a| a.color == ColorClass::Tangential)
            .collect::<Vec<_>>();

        assert_eq!(tangentials.len(), 5 * 9 * 2);
        for arrow in tangentials {
            assert_eq!(arrow.origin.y.rem_euclid(2.0), 0.0);
            assert_eq!(arrow.direction.into_inner(), -Vector3::y());
            let expected = if arrow.origin.x > 0.0 { 0.25 } else { 0.5 };
            assert_eq!(arrow.magnitude, expected);
        }
    }

    #[test]
    fn it_scales_electric_tangentials() {
        let arrows = generate(FieldKind::Electric, DisplayMode::Component, 1.0, 2.0);
        for arrow in arrows.iter().filter(|a| a.color == ColorClass::Tangential) {
            assert!(arrow.origin.y.abs() <= 2.0);
            let expected = if arrow.origin.x > 0.0 { 0.5 } else { 1.0 };
            assert_eq!(arrow.magnitude, expected);
        }
        for arrow in arrows.iter().filter(|a| a.color == ColorClass::Normal) {
            assert_eq!(arrow.magnitude, 0.5);
            assert_eq!(arrow.direction.into_inner(), Vector3::y());
        }
    }

    #[test]
    fn it_places_intermediate_electric_resultants() {
        let arrows = generate(FieldKind::Electric, DisplayMode::Resultant, 1.0, 1.0);
        let mut ys = arrows
            .iter()
            .filter(|a| a.origin.z == -3.5)
            .map(|a| a.origin.y)
            .collect::<Vec<_>>();
        ys.dedup();
        assert_eq!(ys, vec![-3.5, -1.5, 0.5, 2.5]);
    }

    #[test]
    fn it_composes_magnetic_resultants() {
        let arrows = generate(FieldKind::Magnetic, DisplayMode::Resultant, 2.0, 1.0);
        let medium2 = arrows.iter().find(|a| a.origin.x > 0.0).unwrap();
        assert!((medium2.magnitude - (1.0f64 + 1.0).sqrt()).abs() < 1e-9);

        let expected = Vector3::new(1.0, -1.0, 0.0).normalize();
        assert!((medium2.direction.into_inner() - expected).norm() < 1e-12);
    }

    #[test]
    fn it_scales_exactly_over_the_whole_slider_range() {
        for (param1, param2) in [(10.0, 1.0), (1.0, 10.0), (7.3, 1.1)] {
            let ratio: f64 = param1 / param2;

            let electric = generate(FieldKind::Electric, DisplayMode::Component, param1, param2);
            for arrow in electric
                .iter()
                .filter(|a| a.color == ColorClass::Tangential && a.origin.x > 0.0)
            {
                assert_eq!(arrow.magnitude, 1.0 * ratio);
            }

            let magnetic = generate(FieldKind::Magnetic, DisplayMode::Component, param1, param2);
            for arrow in magnetic
                .iter()
                .filter(|a| a.color == ColorClass::Tangential && a.origin.x > 0.0)
            {
                assert_eq!(arrow.magnitude, 0.5 * ratio);
            }
        }
    }

    #[test]
    fn it_keeps_medium_1_independent_of_parameters() {
        let medium1 = |param1, param2| {
            let mut arrows = vec![];
            for mode in [DisplayMode::Component, DisplayMode::Resultant] {
                arrows.extend(
                    VolumetricLattice::default()
                        .generate(&LayoutParams {
                            fields: FieldKinds::all(),
                            mode,
                            media: MediumPair::new(param1, param2),
                        })
                        .into_iter()
                        .filter(|arrow| arrow.origin.x < 0.0),
                );
            }
            arrows
        };
        assert_eq!(medium1(1.0, 2.0), medium1(10.0, 1.0));
        assert_eq!(medium1(1.0, 2.0), medium1(4.4, 0.0));
    }

    #[test]
    fn it_never_produces_nan_directions() {
        for mode in [DisplayMode::Component, DisplayMode::Resultant] {
            let arrows = VolumetricLattice::default().generate(&LayoutParams {
                fields: FieldKinds::all(),
                mode,
                media: MediumPair::new(1.0, 0.0),
            });
            for arrow in arrows {
                assert!(arrow.magnitude.is_finite());
                assert!(arrow.direction.iter().all(|c| c.is_finite()));
            }
        }
    }
}
