use serde::{
    Deserialize,
    Serialize,
};

use crate::physics::FieldKinds;

/// Material parameters of the two media on either side of the boundary.
///
/// Depending on the field that is shown, these are either the relative
/// permittivities or the relative permeabilities. Values are taken as they
/// come from the input controls. Zero or negative values are not rejected
/// and simply produce degenerate arrows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediumPair {
    /// epsilon_1 or mu_1
    pub param1: f64,
    /// epsilon_2 or mu_2
    pub param2: f64,
}

impl MediumPair {
    pub const fn new(param1: f64, param2: f64) -> Self {
        Self { param1, param2 }
    }

    /// Factor by which the scaled component in medium 2 differs from its
    /// counterpart in medium 1.
    ///
    /// This is `param1 / param2` without any guarding, so it's `+inf` for
    /// `param2 == 0`.
    pub fn ratio(&self) -> f64 {
        self.param1 / self.param2
    }
}

impl Default for MediumPair {
    fn default() -> Self {
        Self::new(1.0, 2.0)
    }
}

/// Labels shown next to the two medium sliders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParameterLabels {
    pub medium1: &'static str,
    pub medium2: &'static str,
}

impl ParameterLabels {
    pub const PERMITTIVITY: Self = Self {
        medium1: "ε₁ (Permittivity):",
        medium2: "ε₂ (Permittivity):",
    };

    pub const PERMEABILITY: Self = Self {
        medium1: "μ₁ (Permeability):",
        medium2: "μ₂ (Permeability):",
    };

    /// Labels after a change of the enabled fields.
    ///
    /// Magnetic takes precedence if both fields are shown. If no field is
    /// shown, the previous labels stay.
    pub fn update(self, fields: FieldKinds) -> Self {
        if fields.contains(FieldKinds::MAGNETIC) {
            Self::PERMEABILITY
        }
        else if fields.contains(FieldKinds::ELECTRIC) {
            Self::PERMITTIVITY
        }
        else {
            self
        }
    }
}

impl Default for ParameterLabels {
    fn default() -> Self {
        Self::PERMITTIVITY
    }
}

/// Format a parameter value like the slider readout does.
pub fn format_parameter(value: f64) -> String {
    format!("{value:.1}")
}
