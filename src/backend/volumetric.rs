use nalgebra::Point3;

use crate::{
    backend::ArrowBackend,
    geometry::{
        ArrowSpec,
        volumetric::VolumetricArrow,
    },
    layout::volumetric::VolumetricLattice,
};

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("Invalid maximum arrow length: {0}")]
    InvalidMaxArrowLength(f64),
    #[error("Invalid grid: size {size}, {divisions} divisions")]
    InvalidGrid { size: f64, divisions: u32 },
    #[error("Invalid field of view: {0} degrees")]
    InvalidFieldOfView(f32),
    #[error("Invalid camera distance: {0}")]
    InvalidCameraDistance(f32),
}

/// The helper grid on the xz-plane (the "floor" of the scene).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridHelper {
    pub size: f64,
    pub divisions: u32,
}

impl GridHelper {
    /// Line segments of the grid, first along x, then along z.
    pub fn lines(&self) -> impl Iterator<Item = (Point3<f64>, Point3<f64>)> + use<> {
        let half = 0.5 * self.size;
        let step = self.size / self.divisions as f64;

        (0..=self.divisions).flat_map(move |i| {
            let t = -half + step * i as f64;
            [
                (Point3::new(-half, 0.0, t), Point3::new(half, 0.0, t)),
                (Point3::new(t, 0.0, -half), Point3::new(t, 0.0, half)),
            ]
        })
    }
}

impl GridHelper {
    /// Index of the lines passing through the origin, if there are any.
    pub fn center_line(&self) -> Option<u32> {
        (self.divisions % 2 == 0).then_some(self.divisions / 2)
    }
}

impl Default for GridHelper {
    fn default() -> Self {
        Self {
            size: 10.0,
            divisions: 10,
        }
    }
}

/// Persistent 3D scene: the boundary plane, a helper grid and a group of
/// arrows that gets replaced on every regeneration.
#[derive(Clone, derive_more::Debug)]
pub struct VolumetricScene {
    lattice: VolumetricLattice,
    boundary_size: f64,
    grid: GridHelper,
    #[debug("[{} arrows]", arrows.len())]
    arrows: Vec<VolumetricArrow>,
}

impl VolumetricScene {
    pub fn new(lattice: VolumetricLattice, grid: GridHelper) -> Result<Self, SceneError> {
        if !(lattice.max_arrow_length.is_finite() && lattice.max_arrow_length > 0.0) {
            return Err(SceneError::InvalidMaxArrowLength(lattice.max_arrow_length));
        }
        if !(grid.size.is_finite() && grid.size > 0.0) || grid.divisions == 0 {
            return Err(SceneError::InvalidGrid {
                size: grid.size,
                divisions: grid.divisions,
            });
        }

        Ok(Self {
            lattice,
            boundary_size: grid.size,
            grid,
            arrows: vec![],
        })
    }

    pub fn arrows(&self) -> &[VolumetricArrow] {
        &self.arrows
    }

    pub fn grid(&self) -> &GridHelper {
        &self.grid
    }

    /// Corners of the boundary plane `x = 0`, in order around its edge.
    pub fn boundary_corners(&self) -> [Point3<f64>; 4] {
        let half = 0.5 * self.boundary_size;
        [
            Point3::new(0.0, -half, -half),
            Point3::new(0.0, half, -half),
            Point3::new(0.0, half, half),
            Point3::new(0.0, -half, half),
        ]
    }
}

impl ArrowBackend for VolumetricScene {
    type Layout = VolumetricLattice;

    fn layout(&self) -> &VolumetricLattice {
        &self.lattice
    }

    fn clear(&mut self) {
        self.arrows.clear();
    }

    fn add_arrow(&mut self, arrow: &ArrowSpec) {
        self.arrows.push(VolumetricArrow::from_spec(arrow));
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        backend::{
            ArrowBackend,
            volumetric::{
                GridHelper,
                SceneError,
                VolumetricScene,
            },
        },
        layout::{
            LayoutParams,
            volumetric::VolumetricLattice,
        },
        physics::{
            DisplayMode,
            FieldKinds,
            MediumPair,
        },
    };

    #[test]
    fn it_rejects_invalid_lattices() {
        let result = VolumetricScene::new(
            VolumetricLattice {
                max_arrow_length: f64::NAN,
            },
            Default::default(),
        );
        assert!(matches!(result, Err(SceneError::InvalidMaxArrowLength(_))));

        let result = VolumetricScene::new(
            Default::default(),
            GridHelper {
                size: 10.0,
                divisions: 0,
            },
        );
        assert!(matches!(result, Err(SceneError::InvalidGrid { .. })));
    }

    #[test]
    fn it_replaces_the_arrow_group() {
        let mut scene = VolumetricScene::new(Default::default(), Default::default()).unwrap();
        assert!(scene.arrows().is_empty());

        let params = LayoutParams {
            fields: FieldKinds::MAGNETIC,
            mode: DisplayMode::Resultant,
            media: MediumPair::new(1.0, 2.0),
        };
        scene.regenerate(&params);
        assert_eq!(scene.arrows().len(), 90);
        scene.regenerate(&params);
        assert_eq!(scene.arrows().len(), 90);
    }

    #[test]
    fn it_spans_the_grid() {
        let lines = GridHelper::default().lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 22);
        assert_eq!(lines[0].0.x, -5.0);
        assert_eq!(lines[0].1.x, 5.0);
        assert!(lines.iter().all(|(a, b)| a.y == 0.0 && b.y == 0.0));

        let center = GridHelper::default().center_line().unwrap() as usize;
        assert_eq!(lines[2 * center].0.z, 0.0);
        assert_eq!(lines[2 * center + 1].0.x, 0.0);
        assert_eq!(
            GridHelper {
                size: 10.0,
                divisions: 3
            }
            .center_line(),
            None
        );
    }
}
