use egui::{
    Pos2,
    Rect,
    Sense,
    Vec2,
};

use crate::{
    backend::planar::{
        PlanarCanvas,
        StrokeKind,
    },
    config::{
        ArrowColors,
        PlanarConfig,
    },
    util::palette::EguiPaletteConversions,
};

/// Paints a [`PlanarCanvas`], scaled to fit the available space while keeping
/// its aspect ratio.
#[derive(Debug)]
pub struct PlanarView<'a> {
    pub canvas: &'a PlanarCanvas,
    pub config: &'a PlanarConfig,
    pub colors: &'a ArrowColors,
}

impl egui::Widget for PlanarView<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());

        let transform = CanvasTransform::fit(self.canvas, response.rect);
        painter.rect_filled(
            transform.canvas_rect,
            0.0,
            self.config.background_color.palette_to_egui(),
        );

        let stroke_width = self.config.stroke_width * transform.scale.max(0.25);

        for stroke in self.canvas.strokes() {
            let color = match stroke.kind {
                StrokeKind::Boundary => self.config.boundary_color,
                StrokeKind::Arrow(color) => self.colors.get(color),
            };

            painter.line_segment(
                [
                    transform.to_screen(stroke.segment.from),
                    transform.to_screen(stroke.segment.to),
                ],
                (stroke_width, color.palette_to_egui()),
            );
        }

        response
    }
}

/// Maps canvas coordinates (y pointing down) into a screen rect.
#[derive(Clone, Copy, Debug)]
struct CanvasTransform {
    canvas_rect: Rect,
    scale: f32,
}

impl CanvasTransform {
    fn fit(canvas: &PlanarCanvas, rect: Rect) -> Self {
        let canvas_size = Vec2::new(canvas.width() as f32, canvas.height() as f32);
        let scale = (rect.width() / canvas_size.x)
            .min(rect.height() / canvas_size.y)
            .max(0.0);
        let canvas_rect = Rect::from_center_size(rect.center(), canvas_size * scale);
        Self { canvas_rect, scale }
    }

    fn to_screen(&self, point: nalgebra::Point2<f64>) -> Pos2 {
        self.canvas_rect.min + Vec2::new(point.x as f32, point.y as f32) * self.scale
    }
}
