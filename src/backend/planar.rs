use nalgebra::Point2;

use crate::{
    backend::ArrowBackend,
    geometry::{
        ArrowSpec,
        ColorClass,
        planar::{
            HEAD_LENGTH,
            PlanarArrow,
            Segment,
        },
    },
    layout::planar::PlanarLattice,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeKind {
    Boundary,
    Arrow(ColorClass),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub segment: Segment,
    pub kind: StrokeKind,
}

/// Immediate-mode 2D canvas. Clearing it leaves only the boundary line.
#[derive(Clone, derive_more::Debug)]
pub struct PlanarCanvas {
    lattice: PlanarLattice,
    head_length: f64,
    #[debug("[{} strokes]", strokes.len())]
    strokes: Vec<Stroke>,
}

impl PlanarCanvas {
    pub fn new(lattice: PlanarLattice) -> Self {
        let mut canvas = Self {
            lattice,
            head_length: HEAD_LENGTH,
            strokes: vec![],
        };
        canvas.clear();
        canvas
    }

    pub fn width(&self) -> f64 {
        self.lattice.width
    }

    pub fn height(&self) -> f64 {
        self.lattice.height
    }

    pub fn stroke(&mut self, segment: Segment, kind: StrokeKind) {
        self.strokes.push(Stroke { segment, kind });
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Strokes that belong to arrows, i.e. everything except the boundary.
    pub fn arrow_strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes
            .iter()
            .filter(|stroke| matches!(stroke.kind, StrokeKind::Arrow(_)))
    }
}

impl Default for PlanarCanvas {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl ArrowBackend for PlanarCanvas {
    type Layout = PlanarLattice;

    fn layout(&self) -> &PlanarLattice {
        &self.lattice
    }

    fn clear(&mut self) {
        self.strokes.clear();

        let x = self.lattice.center_x();
        self.stroke(
            Segment::new(Point2::new(x, 0.0), Point2::new(x, self.lattice.height)),
            StrokeKind::Boundary,
        );
    }

    fn add_arrow(&mut self, arrow: &ArrowSpec) {
        let arrow = PlanarArrow::from_spec(arrow, self.head_length);
        for segment in arrow.segments() {
            self.stroke(segment, StrokeKind::Arrow(arrow.color));
        }
    }
}
