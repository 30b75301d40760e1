use std::f64::consts::TAU;

use egui::{
    Color32,
    Pos2,
    Rect,
    Sense,
    Shape,
};
use nalgebra::{
    Point2,
    Point3,
    Vector2,
};

use crate::{
    app::camera::OrbitCamera,
    backend::volumetric::{
        SceneError,
        VolumetricScene,
    },
    config::{
        ArrowColors,
        VolumetricConfig,
    },
    geometry::volumetric::VolumetricArrow,
    util::palette::{
        EguiPaletteConversions,
        translucent,
    },
};

/// Number of segments used to approximate the base circle of arrow heads.
const HEAD_SEGMENTS: usize = 12;

const SHAFT_WIDTH: f32 = 1.5;

/// Software-projected view of a [`VolumetricScene`] with an orbit camera.
///
/// Drag to orbit, scroll to zoom.
#[derive(Debug)]
pub struct VolumetricView {
    camera: OrbitCamera,
    config: VolumetricConfig,
}

impl VolumetricView {
    pub fn new(config: VolumetricConfig) -> Result<Self, SceneError> {
        let camera = OrbitCamera::new(config.fovy, &config.camera)?;
        Ok(Self { camera, config })
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        scene: &VolumetricScene,
        colors: &ArrowColors,
    ) -> egui::Response {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
        let rect = response.rect;

        if response.dragged() {
            let delta = response.drag_delta();
            self.camera.rotate(Vector2::new(delta.x, delta.y));
        }
        if response.hovered() {
            let scroll = ui.input(|input| input.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom(scroll);
            }
        }
        if self.camera.update() {
            // keep gliding
            ui.ctx().request_repaint();
        }

        self.camera.set_aspect_ratio(rect.aspect_ratio());

        painter.rect_filled(rect, 0.0, self.config.background_color.palette_to_egui());

        let screen = ScreenProjection {
            camera: &self.camera,
            rect,
        };

        self.paint_grid(&painter, &screen, scene);

        // painter's algorithm: arrows behind the boundary plane, the plane,
        // then the arrows in front of it.
        let eye = self.camera.eye().cast::<f64>();
        let mut arrows = scene.arrows().iter().collect::<Vec<_>>();
        arrows.sort_by(|a, b| {
            let a = (a.origin - eye).norm_squared();
            let b = (b.origin - eye).norm_squared();
            b.total_cmp(&a)
        });
        let (front, back): (Vec<_>, Vec<_>) = arrows
            .into_iter()
            .partition(|arrow| arrow.origin.x * eye.x > 0.0);

        for arrow in back {
            paint_arrow(&painter, &screen, arrow, colors);
        }

        let corners = scene
            .boundary_corners()
            .iter()
            .map(|corner| screen.project(corner))
            .collect::<Option<Vec<_>>>();
        if let Some(corners) = corners {
            painter.add(Shape::convex_polygon(
                corners,
                translucent(self.config.boundary_color, self.config.boundary_opacity),
                egui::Stroke::NONE,
            ));
        }

        for arrow in front {
            paint_arrow(&painter, &screen, arrow, colors);
        }

        response
    }

    fn paint_grid(
        &self,
        painter: &egui::Painter,
        screen: &ScreenProjection,
        scene: &VolumetricScene,
    ) {
        let grid = scene.grid();
        let center_line = grid.center_line();
        let grid_color = self.config.grid_color.palette_to_egui();
        let center_color = self.config.grid_center_color.palette_to_egui();

        for (i, (from, to)) in grid.lines().enumerate() {
            let color = if center_line == Some(i as u32 / 2) {
                center_color
            }
            else {
                grid_color
            };
            if let (Some(from), Some(to)) = (screen.project(&from), screen.project(&to)) {
                painter.line_segment([from, to], (1.0, color));
            }
        }
    }
}

/// Maps world space into the view's screen rect.
struct ScreenProjection<'a> {
    camera: &'a OrbitCamera,
    rect: Rect,
}

impl ScreenProjection<'_> {
    fn project(&self, point: &Point3<f64>) -> Option<Pos2> {
        self.camera
            .project(point)
            .map(|ndc| ndc_to_screen(&ndc, self.rect))
    }
}

fn ndc_to_screen(ndc: &Point2<f32>, rect: Rect) -> Pos2 {
    let center = rect.center();
    Pos2::new(
        center.x + 0.5 * ndc.x * rect.width(),
        center.y - 0.5 * ndc.y * rect.height(),
    )
}

fn paint_arrow(
    painter: &egui::Painter,
    screen: &ScreenProjection,
    arrow: &VolumetricArrow,
    colors: &ArrowColors,
) {
    if arrow.length == 0.0 {
        return;
    }

    let color = colors.get(arrow.color).palette_to_egui();

    if let (Some(origin), Some(head_base)) = (
        screen.project(&arrow.origin),
        screen.project(&arrow.head_base()),
    ) {
        painter.line_segment([origin, head_base], (SHAFT_WIDTH, color));
    }

    if let Some(mesh) = head_mesh(screen, arrow, color) {
        painter.add(Shape::mesh(mesh));
    }
}

/// Cone of the arrow head as a triangle fan, plus its base disk.
fn head_mesh(
    screen: &ScreenProjection,
    arrow: &VolumetricArrow,
    color: Color32,
) -> Option<egui::Mesh> {
    let tip = screen.project(&arrow.tip())?;
    let base = screen.project(&arrow.head_base())?;
    let rim = head_rim(arrow)
        .map(|point| screen.project(&point))
        .collect::<Option<Vec<_>>>()?;

    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(tip, color);
    mesh.colored_vertex(base, color);
    for point in &rim {
        mesh.colored_vertex(*point, color);
    }

    let n = rim.len() as u32;
    for i in 0..n {
        let a = 2 + i;
        let b = 2 + (i + 1) % n;
        mesh.add_triangle(0, a, b);
        mesh.add_triangle(1, a, b);
    }

    Some(mesh)
}

/// Points on the base circle of the head.
fn head_rim(arrow: &VolumetricArrow) -> impl Iterator<Item = Point3<f64>> {
    let base = arrow.head_base();
    let radius = 0.5 * arrow.head_width;
    let (u, v) = arrow.head_basis();

    (0..HEAD_SEGMENTS).map(move |i| {
        let (sin, cos) = (TAU * i as f64 / HEAD_SEGMENTS as f64).sin_cos();
        base + radius * (cos * u + sin * v)
    })
}
