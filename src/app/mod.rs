pub mod camera;
pub mod planar_view;
pub mod start;
pub mod volumetric_view;

use egui::Checkbox;
use strum::VariantArray;

pub use crate::app::start::run_app;
use crate::{
    app::{
        planar_view::PlanarView,
        volumetric_view::VolumetricView,
    },
    args::Args,
    backend::{
        ActiveBackend,
        planar::PlanarCanvas,
        volumetric::{
            SceneError,
            VolumetricScene,
        },
    },
    config::{
        AppConfig,
        VolumetricConfig,
    },
    controller::ViewController,
    error::ErrorDialog,
    physics::{
        DisplayMode,
        FieldKind,
        FieldKinds,
        medium::format_parameter,
    },
};

#[derive(Debug)]
pub struct CreateAppContext {
    pub egui_context: egui::Context,
    pub config: AppConfig,
    pub args: Args,
    pub error_dialog: ErrorDialog,
}

#[derive(Debug)]
pub struct App {
    config: AppConfig,
    controller: ViewController,
    volumetric_view: Option<VolumetricView>,
    show_about: bool,
    error_dialog: ErrorDialog,
}

impl App {
    pub fn new(context: CreateAppContext) -> Self {
        let CreateAppContext {
            egui_context,
            config,
            args,
            mut error_dialog,
        } = context;

        egui_context.all_styles_mut(|style| {
            style.compact_menu_style = false;
        });

        let planar = PlanarCanvas::new(config.planar.lattice);

        let (volumetric, volumetric_view) = if config.volumetric.enabled {
            match create_volumetric(&config.volumetric) {
                Ok((scene, view)) => (Some(scene), Some(view)),
                Err(error) => {
                    error_dialog.report("creating 3D view", error);
                    (None, None)
                }
            }
        }
        else {
            tracing::info!("3D view disabled");
            (None, None)
        };

        let state = args.state.view_state(config.parameters.initial);
        tracing::debug!(?state, "initial state");
        let controller = ViewController::new(state, planar, volumetric);

        Self {
            config,
            controller,
            volumetric_view,
            show_about: false,
            error_dialog,
        }
    }

    fn file_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("File", |ui| {
            setup_menu(ui);

            if ui.button("Exit").clicked() {
                tracing::info!("App close requested by user");
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn help_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("Help", |ui| {
            setup_menu(ui);

            if ui.button("About").clicked() {
                self.show_about = true;
            }
        });
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Display");
        ui.add_space(4.0);

        let state = *self.controller.state();

        for &field in FieldKind::VARIANTS {
            let mut shown = state.layout.fields.contains(FieldKinds::from(field));
            if ui.checkbox(&mut shown, format!("Show {field}")).changed() {
                self.controller.set_field(field, shown);
            }
        }

        let mut resultant = state.layout.mode == DisplayMode::Resultant;
        if ui.checkbox(&mut resultant, "Show Resultant").changed() {
            self.controller.set_display_mode(if resultant {
                DisplayMode::Resultant
            }
            else {
                DisplayMode::Component
            });
        }

        let available = self.controller.volumetric().is_some();
        let mut volumetric = state.active_backend == ActiveBackend::Volumetric;
        if ui
            .add_enabled(
                available,
                Checkbox::new(&mut volumetric, format!("{} View", ActiveBackend::Volumetric)),
            )
            .changed()
        {
            self.controller.set_active_backend(if volumetric {
                ActiveBackend::Volumetric
            }
            else {
                ActiveBackend::Planar
            });
        }
        if !available {
            ui.weak("3D view unavailable");
        }

        ui.separator();
        ui.heading("Media");
        ui.add_space(4.0);

        let labels = self.controller.parameter_labels();
        let media = state.layout.media;

        if let Some(value) = self.parameter_slider(ui, labels.medium1, media.param1) {
            self.controller.set_medium1(value);
        }
        if let Some(value) = self.parameter_slider(ui, labels.medium2, media.param2) {
            self.controller.set_medium2(value);
        }
    }

    /// Returns the new value if the slider was moved.
    fn parameter_slider(&self, ui: &mut egui::Ui, label: &str, value: f64) -> Option<f64> {
        let parameters = &self.config.parameters;
        let mut value = value;

        ui.label(label);
        let changed = ui
            .horizontal(|ui| {
                let response = ui.add(
                    egui::Slider::new(&mut value, parameters.min..=parameters.max)
                        .step_by(parameters.step)
                        .show_value(false),
                );
                ui.monospace(format_parameter(value));
                response.changed()
            })
            .inner;

        changed.then_some(value)
    }

    fn view(&mut self, ui: &mut egui::Ui) {
        match self.controller.visible_backend() {
            ActiveBackend::Planar => {
                ui.add(PlanarView {
                    canvas: self.controller.planar(),
                    config: &self.config.planar,
                    colors: &self.config.colors,
                });
            }
            ActiveBackend::Volumetric => {
                if let (Some(view), Some(scene)) =
                    (&mut self.volumetric_view, self.controller.volumetric())
                {
                    view.show(ui, scene, &self.config.colors);
                }
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                self.file_menu(ui);
                self.help_menu(ui);
            });
        });

        egui::SidePanel::left("controls")
            .resizable(false)
            .min_width(220.0)
            .show(ctx, |ui| {
                self.controls(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.view(ui);
            });

        egui::Window::new("About")
            .movable(true)
            .collapsible(false)
            .open(&mut self.show_about)
            .show(ctx, |ui| {
                ui.label(start::APP_TITLE);
                ui.label(format!("Version: {}", std::env!("CARGO_PKG_VERSION")));
            });

        self.error_dialog.show(ctx);
    }
}

fn create_volumetric(
    config: &VolumetricConfig,
) -> Result<(VolumetricScene, VolumetricView), SceneError> {
    let scene = VolumetricScene::new(config.lattice, config.grid())?;
    let view = VolumetricView::new(config.clone())?;
    Ok((scene, view))
}

fn setup_menu(ui: &mut egui::Ui) {
    ui.set_min_width(150.0);
}
