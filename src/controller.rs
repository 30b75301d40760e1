use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    backend::{
        ActiveBackend,
        ArrowBackend,
        planar::PlanarCanvas,
        volumetric::VolumetricScene,
    },
    layout::LayoutParams,
    physics::{
        DisplayMode,
        FieldKind,
        FieldKinds,
        MediumPair,
        ParameterLabels,
    },
};

/// Everything the user selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub layout: LayoutParams,
    pub active_backend: ActiveBackend,
}

/// Holds the view state and keeps both backends in sync with it.
///
/// Every change to the layout parameters regenerates both backends, including
/// the one that's currently hidden, so switching backends never needs a
/// regeneration. The volumetric backend is optional: without it only the
/// planar backend is kept up to date.
#[derive(Debug)]
pub struct ViewController {
    state: ViewState,
    labels: ParameterLabels,
    planar: PlanarCanvas,
    volumetric: Option<VolumetricScene>,
}

impl ViewController {
    pub fn new(
        state: ViewState,
        planar: PlanarCanvas,
        volumetric: Option<VolumetricScene>,
    ) -> Self {
        let mut controller = Self {
            state,
            labels: ParameterLabels::default().update(state.layout.fields),
            planar,
            volumetric,
        };
        controller.regenerate();
        controller
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn planar(&self) -> &PlanarCanvas {
        &self.planar
    }

    pub fn volumetric(&self) -> Option<&VolumetricScene> {
        self.volumetric.as_ref()
    }

    pub fn parameter_labels(&self) -> ParameterLabels {
        self.labels
    }

    /// The backend that is actually shown. Falls back to planar if the
    /// volumetric backend is selected but unavailable.
    pub fn visible_backend(&self) -> ActiveBackend {
        match self.state.active_backend {
            ActiveBackend::Volumetric if self.volumetric.is_some() => ActiveBackend::Volumetric,
            _ => ActiveBackend::Planar,
        }
    }

    pub fn set_field(&mut self, field: FieldKind, enabled: bool) {
        let mut fields = self.state.layout.fields;
        fields.set(field.into(), enabled);
        self.set_fields(fields);
    }

    pub fn set_fields(&mut self, fields: FieldKinds) {
        if fields != self.state.layout.fields {
            self.state.layout.fields = fields;
            self.labels = self.labels.update(fields);
            self.regenerate();
        }
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if mode != self.state.layout.mode {
            self.state.layout.mode = mode;
            self.regenerate();
        }
    }

    pub fn set_medium1(&mut self, value: f64) {
        self.set_medium_pair(MediumPair {
            param1: value,
            ..self.state.layout.media
        });
    }

    pub fn set_medium2(&mut self, value: f64) {
        self.set_medium_pair(MediumPair {
            param2: value,
            ..self.state.layout.media
        });
    }

    pub fn set_medium_pair(&mut self, media: MediumPair) {
        if media != self.state.layout.media {
            self.state.layout.media = media;
            self.regenerate();
        }
    }

    /// Only changes which backend is visible. Both are always up to date, so
    /// nothing is regenerated.
    pub fn set_active_backend(&mut self, backend: ActiveBackend) {
        if backend != self.state.active_backend {
            tracing::debug!(%backend, "switching view");
            if backend == ActiveBackend::Volumetric && self.volumetric.is_none() {
                tracing::warn!("3D view is not available");
            }
            self.state.active_backend = backend;
        }
    }

    fn regenerate(&mut self) {
        let params = self.state.layout;
        tracing::debug!(?params, "regenerating arrows");

        self.planar.regenerate(&params);
        if let Some(volumetric) = &mut self.volumetric {
            volumetric.regenerate(&params);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        backend::{
            ActiveBackend,
            planar::PlanarCanvas,
            volumetric::VolumetricScene,
        },
        controller::{
            ViewController,
            ViewState,
        },
        physics::{
            DisplayMode,
            FieldKind,
            FieldKinds,
            MediumPair,
            ParameterLabels,
        },
    };

    fn controller() -> ViewController {
        let volumetric = VolumetricScene::new(Default::default(), Default::default()).unwrap();
        ViewController::new(
            ViewState::default(),
            PlanarCanvas::default(),
            Some(volumetric),
        )
    }

    fn arrow_counts(controller: &ViewController) -> (usize, usize) {
        (
            controller.planar().arrow_strokes().count(),
            controller.volumetric().map_or(0, |scene| scene.arrows().len()),
        )
    }

    #[test]
    fn it_starts_without_fields() {
        let controller = controller();
        assert_eq!(controller.state().layout.fields, FieldKinds::empty());
        assert_eq!(controller.state().active_backend, ActiveBackend::Planar);
        assert_eq!(arrow_counts(&controller), (0, 0));
    }

    #[test]
    fn it_regenerates_both_backends() {
        let mut controller = controller();
        controller.set_field(FieldKind::Electric, true);
        assert_eq!(arrow_counts(&controller), (52 * 3, 252));

        controller.set_display_mode(DisplayMode::Resultant);
        assert_eq!(arrow_counts(&controller), (6 * 3, 154));

        controller.set_field(FieldKind::Magnetic, true);
        assert_eq!(arrow_counts(&controller), (12 * 3, 154 + 90));

        controller.set_field(FieldKind::Electric, false);
        controller.set_field(FieldKind::Magnetic, false);
        assert_eq!(arrow_counts(&controller), (0, 0));
    }

    #[test]
    fn it_toggles_backends_without_touching_state() {
        let mut controller = controller();
        controller.set_field(FieldKind::Magnetic, true);
        controller.set_medium_pair(MediumPair::new(3.0, 5.0));

        let state = controller.state().layout;
        let planar = controller.planar().strokes().to_vec();
        let volumetric = controller.volumetric().unwrap().arrows().to_vec();

        controller.set_active_backend(ActiveBackend::Volumetric);
        controller.set_active_backend(ActiveBackend::Volumetric);
        assert_eq!(controller.visible_backend(), ActiveBackend::Volumetric);
        controller.set_active_backend(ActiveBackend::Planar);

        assert_eq!(controller.state().layout, state);
        assert_eq!(controller.planar().strokes(), &planar[..]);
        assert_eq!(controller.volumetric().unwrap().arrows(), &volumetric[..]);
    }

    #[test]
    fn it_round_trips_display_modes() {
        let mut controller = controller();
        controller.set_fields(FieldKinds::all());
        controller.set_medium1(4.2);
        controller.set_medium2(1.7);

        let planar = controller.planar().strokes().to_vec();
        let volumetric = controller.volumetric().unwrap().arrows().to_vec();

        controller.set_display_mode(DisplayMode::Resultant);
        assert_ne!(controller.planar().strokes(), &planar[..]);
        controller.set_display_mode(DisplayMode::Component);

        assert_eq!(controller.planar().strokes(), &planar[..]);
        assert_eq!(controller.volumetric().unwrap().arrows(), &volumetric[..]);
    }

    #[test]
    fn it_updates_medium_values_individually() {
        let mut controller = controller();
        controller.set_medium1(3.0);
        controller.set_medium2(6.0);
        assert_eq!(controller.state().layout.media, MediumPair::new(3.0, 6.0));
        assert_eq!(controller.state().layout.media.ratio(), 0.5);
    }

    #[test]
    fn it_switches_parameter_labels() {
        let mut controller = controller();
        assert_eq!(controller.parameter_labels(), ParameterLabels::PERMITTIVITY);

        controller.set_field(FieldKind::Magnetic, true);
        assert_eq!(controller.parameter_labels(), ParameterLabels::PERMEABILITY);

        controller.set_field(FieldKind::Electric, true);
        assert_eq!(controller.parameter_labels(), ParameterLabels::PERMEABILITY);

        controller.set_field(FieldKind::Magnetic, false);
        assert_eq!(controller.parameter_labels(), ParameterLabels::PERMITTIVITY);
    }

    #[test]
    fn it_degrades_without_volumetric_backend() {
        let mut controller =
            ViewController::new(ViewState::default(), PlanarCanvas::default(), None);
        controller.set_field(FieldKind::Electric, true);
        controller.set_active_backend(ActiveBackend::Volumetric);

        assert_eq!(controller.state().active_backend, ActiveBackend::Volumetric);
        assert_eq!(controller.visible_backend(), ActiveBackend::Planar);
        assert_eq!(arrow_counts(&controller), (52 * 3, 0));
    }
}
