#![warn(unused_qualifications)]

pub mod app;
pub mod args;
pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod files;
pub mod geometry;
pub mod layout;
pub mod physics;
pub mod util;

use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};
use color_eyre::eyre::{
    Error,
    bail,
};
use dotenvy::dotenv;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::{
    args::StateArgs,
    backend::ActiveBackend,
    config::AppConfig,
    controller::ViewState,
    geometry::ArrowSpec,
    layout::FieldLayout,
};

fn main() -> Result<(), Error> {
    let _ = dotenv();
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .pretty()
        .init();

    let args = Args::parse();
    match args.command {
        Command::Main(args) => app::run_app(args)?,
        Command::DumpDefaultConfig { output, format } => {
            let config = AppConfig::default();
            let config = match format.as_str() {
                "toml" => toml::to_string_pretty(&config)?,
                "json" => serde_json::to_string_pretty(&config)?,
                _ => bail!("Invalid format: {format}"),
            };
            write_output(output.as_ref(), &config)?;
        }
        Command::Export { state, output } => {
            let config = AppConfig::default();
            let state = state.view_state(config.parameters.initial);
            let export = Export::new(state, &config);
            tracing::debug!(arrows = export.arrows.len(), "exporting arrows");
            write_output(output.as_ref(), &serde_json::to_string_pretty(&export)?)?;
        }
    }

    Ok(())
}

fn write_output(output: Option<&PathBuf>, contents: &str) -> Result<(), Error> {
    if let Some(output) = output {
        std::fs::write(output, contents)?;
    }
    else {
        println!("{contents}");
    }
    Ok(())
}

#[derive(Debug, Parser)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the visualizer
    Main(args::Args),
    DumpDefaultConfig {
        #[clap(short, long)]
        output: Option<PathBuf>,
        #[clap(short, long, default_value = "toml")]
        format: String,
    },
    /// Print the arrows for a state as JSON, using the default lattices
    Export {
        #[clap(flatten)]
        state: StateArgs,
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct Export {
    state: ViewState,
    arrows: Vec<ArrowSpec>,
}

impl Export {
    fn new(state: ViewState, config: &AppConfig) -> Self {
        let arrows = match state.active_backend {
            ActiveBackend::Planar => config.planar.lattice.generate(&state.layout),
            ActiveBackend::Volumetric => config.volumetric.lattice.generate(&state.layout),
        };
        Self { state, arrows }
    }
}
