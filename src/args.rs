use crate::{
    backend::ActiveBackend,
    controller::ViewState,
    layout::LayoutParams,
    physics::{
        DisplayMode,
        FieldKinds,
        MediumPair,
    },
};

/// Initial state of the visualizer.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct StateArgs {
    /// Show the electric field
    #[clap(long)]
    pub electric: bool,

    /// Show the magnetic field
    #[clap(long)]
    pub magnetic: bool,

    /// Show resultant vectors instead of normal/tangential components
    #[clap(long)]
    pub resultant: bool,

    /// Parameter of medium 1 (left of the boundary)
    #[clap(long)]
    pub medium1: Option<f64>,

    /// Parameter of medium 2 (right of the boundary)
    #[clap(long)]
    pub medium2: Option<f64>,

    #[clap(long, value_enum)]
    pub backend: Option<ActiveBackend>,
}

impl StateArgs {
    pub fn fields(&self) -> FieldKinds {
        let mut fields = FieldKinds::empty();
        fields.set(FieldKinds::ELECTRIC, self.electric);
        fields.set(FieldKinds::MAGNETIC, self.magnetic);
        fields
    }

    pub fn mode(&self) -> DisplayMode {
        if self.resultant {
            DisplayMode::Resultant
        }
        else {
            DisplayMode::Component
        }
    }

    /// Builds the initial view state. Media not given on the command line are
    /// taken from `initial`.
    pub fn view_state(&self, initial: MediumPair) -> ViewState {
        ViewState {
            layout: LayoutParams {
                fields: self.fields(),
                mode: self.mode(),
                media: MediumPair {
                    param1: self.medium1.unwrap_or(initial.param1),
                    param2: self.medium2.unwrap_or(initial.param2),
                },
            },
            active_backend: self.backend.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, clap::Parser)]
pub struct Args {
    #[clap(flatten)]
    pub state: StateArgs,

    #[clap(long)]
    pub ignore_config: bool,
}
