use std::sync::Arc;

use color_eyre::eyre::{
    Error,
    eyre,
};
use eframe::NativeOptions;
use egui::ViewportBuilder;
use egui_wgpu::{
    SurfaceErrorAction,
    WgpuConfiguration,
    WgpuSetup,
    WgpuSetupCreateNew,
};

use crate::{
    app::{
        App,
        CreateAppContext,
    },
    args::Args,
    config::{
        AppConfig,
        GraphicsConfig,
    },
    error::{
        ErrorDialog,
        ResultExt,
    },
    files::AppFiles,
};

pub const APP_TITLE: &str = "Field Boundary Conditions";

pub fn run_app(args: Args) -> Result<(), Error> {
    let app_files = AppFiles::open()?;
    tracing::info!(?app_files);

    let mut error_dialog = ErrorDialog::default();
    let config = if args.ignore_config {
        tracing::debug!("ignoring config file");
        AppConfig::default()
    }
    else {
        app_files
            .read_config_or_create::<AppConfig>()
            .or_report(&mut error_dialog, "reading config")
            .unwrap_or_default()
    };

    eframe::run_native(
        APP_TITLE,
        NativeOptions {
            viewport: ViewportBuilder::default()
                .with_title(APP_TITLE)
                .with_app_id(std::env!("CARGO_PKG_NAME"))
                .with_inner_size([1100.0, 680.0]),
            persistence_path: Some(app_files.egui_persist_path()),
            multisampling: config.graphics.multisample_count,
            wgpu_options: wgpu_configuration(&config.graphics),
            ..Default::default()
        },
        Box::new(move |cc| {
            if let Some(render_state) = &cc.wgpu_render_state {
                tracing::debug!(
                    target_format = ?render_state.target_format,
                    "created render state"
                );
            }

            Ok(Box::new(App::new(CreateAppContext {
                egui_context: cc.egui_ctx.clone(),
                config,
                args,
                error_dialog,
            })))
        }),
    )
    .map_err(|e| eyre!("{e}"))?;

    Ok(())
}

fn wgpu_configuration(graphics: &GraphicsConfig) -> WgpuConfiguration {
    WgpuConfiguration {
        on_surface_error: Arc::new(|error| {
            if error == wgpu::SurfaceError::Outdated {
                // ignore
            }
            else {
                tracing::error!("{}", error);
            }
            SurfaceErrorAction::SkipFrame
        }),
        wgpu_setup: WgpuSetup::CreateNew(WgpuSetupCreateNew {
            instance_descriptor: wgpu::InstanceDescriptor {
                backends: wgpu::Backends::from_env().unwrap_or(graphics.backends),
                flags: wgpu::InstanceFlags::from_build_config().with_env(),
                ..Default::default()
            },
            power_preference: wgpu::PowerPreference::from_env()
                .unwrap_or(graphics.power_preference),
            device_descriptor: Arc::new(|adapter| {
                let adapter_info = adapter.get_info();
                tracing::debug!(
                    backend = ?adapter_info.backend,
                    name = adapter_info.name,
                    "using adapter"
                );

                let required_limits = if adapter_info.backend == wgpu::Backend::Gl {
                    wgpu::Limits::downlevel_webgl2_defaults()
                }
                else {
                    wgpu::Limits::downlevel_defaults()
                };

                wgpu::DeviceDescriptor {
                    label: Some("egui wgpu device"),
                    required_limits,
                    ..Default::default()
                }
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}
