use std::f64::consts::FRAC_PI_6;

use nalgebra::{
    Point2,
    Rotation2,
    Vector2,
};

use crate::geometry::{
    ArrowSpec,
    ColorClass,
};

/// Length of the two arrowhead strokes in canvas units.
pub const HEAD_LENGTH: f64 = 10.0;

/// Angle between shaft and each arrowhead stroke.
pub const HEAD_ANGLE: f64 = FRAC_PI_6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Point2<f64>,
    pub to: Point2<f64>,
}

impl Segment {
    pub fn new(from: Point2<f64>, to: Point2<f64>) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f64 {
        (self.to - self.from).norm()
    }
}

/// An arrow as three strokes: the shaft and two head strokes that meet at
/// the tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarArrow {
    pub shaft: Segment,
    pub head: [Segment; 2],
    pub color: ColorClass,
}

impl PlanarArrow {
    /// Projects the arrow onto the canvas plane (the z-coordinate is dropped)
    /// and attaches a head of fixed size.
    pub fn from_spec(spec: &ArrowSpec, head_length: f64) -> Self {
        let origin = spec.origin.xy();
        let tip = spec.tip().xy();

        let pointing = spec.pointing().xy();
        let head_length = if spec.magnitude == 0.0 {
            0.0
        }
        else {
            head_length
        };

        let head_stroke = |angle: f64| {
            let back: Vector2<f64> = Rotation2::new(angle) * pointing;
            Segment::new(tip, tip - back * head_length)
        };

        Self {
            shaft: Segment::new(origin, tip),
            head: [head_stroke(-HEAD_ANGLE), head_stroke(HEAD_ANGLE)],
            color: spec.color,
        }
    }

    pub fn tip(&self) -> Point2<f64> {
        self.shaft.to
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> {
        [self.shaft, self.head[0], self.head[1]].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Point2;

    use crate::geometry::{
        ArrowSpec,
        ColorClass,
        planar::{
            HEAD_ANGLE,
            HEAD_LENGTH,
            PlanarArrow,
        },
    };

    fn assert_near(a: Point2<f64>, b: Point2<f64>) {
        assert!((a - b).norm() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn it_draws_the_horizontal_head_at_30_degrees() {
        let spec = ArrowSpec::horizontal(Point2::new(100.0, 40.0), 80.0, ColorClass::Tangential);
        let arrow = PlanarArrow::from_spec(&spec, HEAD_LENGTH);

        assert_near(arrow.shaft.from, Point2::new(100.0, 40.0));
        assert_near(arrow.tip(), Point2::new(180.0, 40.0));

        let dx = HEAD_LENGTH * HEAD_ANGLE.cos();
        let dy = HEAD_LENGTH * HEAD_ANGLE.sin();
        assert_near(arrow.head[0].from, arrow.tip());
        assert_near(arrow.head[0].to, Point2::new(180.0 - dx, 40.0 + dy));
        assert_near(arrow.head[1].to, Point2::new(180.0 - dx, 40.0 - dy));
    }

    #[test]
    fn it_matches_the_angle_formula() {
        let angle = 40.0f64.atan2(80.0);
        let spec = ArrowSpec::at_angle(Point2::new(300.0, 170.0), 50.0, angle, ColorClass::Resultant);
        let arrow = PlanarArrow::from_spec(&spec, HEAD_LENGTH);

        let end = Point2::new(300.0 + 50.0 * angle.cos(), 170.0 + 50.0 * angle.sin());
        assert_near(arrow.tip(), end);
        assert_near(
            arrow.head[0].to,
            Point2::new(
                end.x - HEAD_LENGTH * (angle - HEAD_ANGLE).cos(),
                end.y - HEAD_LENGTH * (angle - HEAD_ANGLE).sin(),
            ),
        );
        assert_near(
            arrow.head[1].to,
            Point2::new(
                end.x - HEAD_LENGTH * (angle + HEAD_ANGLE).cos(),
                end.y - HEAD_LENGTH * (angle + HEAD_ANGLE).sin(),
            ),
        );
    }

    #[test]
    fn it_collapses_zero_length_arrows() {
        let spec = ArrowSpec::vertical(Point2::new(5.0, 5.0), 0.0, ColorClass::Normal);
        let arrow = PlanarArrow::from_spec(&spec, HEAD_LENGTH);
        for segment in arrow.segments() {
            assert_eq!(segment.length(), 0.0);
            assert_near(segment.from, Point2::new(5.0, 5.0));
        }
    }

    #[test]
    fn it_turns_the_head_around_for_negative_lengths() {
        let spec = ArrowSpec::horizontal(Point2::new(0.0, 0.0), -40.0, ColorClass::Tangential);
        let arrow = PlanarArrow::from_spec(&spec, HEAD_LENGTH);
        assert_near(arrow.tip(), Point2::new(-40.0, 0.0));
        // the head strokes go back towards the origin
        assert!(arrow.head[0].to.x > -40.0);
        assert!(arrow.head[1].to.x > -40.0);
    }
}
