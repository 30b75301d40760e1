use palette::Srgb;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    backend::volumetric::GridHelper,
    geometry::ColorClass,
    layout::{
        planar::PlanarLattice,
        volumetric::VolumetricLattice,
    },
    physics::MediumPair,
};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub parameters: ParametersConfig,

    #[serde(default)]
    pub colors: ArrowColors,

    #[serde(default)]
    pub planar: PlanarConfig,

    #[serde(default)]
    pub volumetric: VolumetricConfig,

    #[serde(default)]
    pub graphics: GraphicsConfig,
}

/// Range and initial values of the two medium sliders.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParametersConfig {
    #[serde(default = "default_parameter_min")]
    pub min: f64,

    #[serde(default = "default_parameter_max")]
    pub max: f64,

    #[serde(default = "default_parameter_step")]
    pub step: f64,

    #[serde(default = "default_media")]
    pub initial: MediumPair,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            min: default_parameter_min(),
            max: default_parameter_max(),
            step: default_parameter_step(),
            initial: default_media(),
        }
    }
}

fn default_parameter_min() -> f64 {
    1.0
}

fn default_parameter_max() -> f64 {
    10.0
}

fn default_parameter_step() -> f64 {
    0.1
}

fn default_media() -> MediumPair {
    MediumPair::new(1.0, 2.0)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrowColors {
    #[serde(
        default = "default_normal_color",
        with = "crate::util::palette::serde"
    )]
    pub normal: Srgb,

    #[serde(
        default = "default_tangential_color",
        with = "crate::util::palette::serde"
    )]
    pub tangential: Srgb,

    #[serde(
        default = "default_resultant_color",
        with = "crate::util::palette::serde"
    )]
    pub resultant: Srgb,
}

impl ArrowColors {
    pub fn get(&self, color: ColorClass) -> Srgb {
        match color {
            ColorClass::Normal => self.normal,
            ColorClass::Tangential => self.tangential,
            ColorClass::Resultant => self.resultant,
        }
    }
}

impl Default for ArrowColors {
    fn default() -> Self {
        Self {
            normal: default_normal_color(),
            tangential: default_tangential_color(),
            resultant: default_resultant_color(),
        }
    }
}

fn default_normal_color() -> Srgb {
    ColorClass::Normal.default_color().into_format()
}

fn default_tangential_color() -> Srgb {
    ColorClass::Tangential.default_color().into_format()
}

fn default_resultant_color() -> Srgb {
    ColorClass::Resultant.default_color().into_format()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanarConfig {
    #[serde(default)]
    pub lattice: PlanarLattice,

    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,

    #[serde(
        default = "default_planar_background",
        with = "crate::util::palette::serde"
    )]
    pub background_color: Srgb,

    #[serde(
        default = "default_boundary_color",
        with = "crate::util::palette::serde"
    )]
    pub boundary_color: Srgb,
}

impl Default for PlanarConfig {
    fn default() -> Self {
        Self {
            lattice: Default::default(),
            stroke_width: default_stroke_width(),
            background_color: default_planar_background(),
            boundary_color: default_boundary_color(),
        }
    }
}

fn default_stroke_width() -> f32 {
    2.0
}

fn default_planar_background() -> Srgb {
    Srgb::new(1.0, 1.0, 1.0)
}

fn default_boundary_color() -> Srgb {
    Srgb::new(0.0, 0.0, 0.0)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VolumetricConfig {
    /// Set to `false` to run without the 3D view.
    #[serde(default = "default_to_true")]
    pub enabled: bool,

    #[serde(default)]
    pub lattice: VolumetricLattice,

    #[serde(
        default = "default_volumetric_background",
        with = "crate::util::palette::serde"
    )]
    pub background_color: Srgb,

    /// in degrees
    #[serde(default = "default_fovy")]
    pub fovy: f32,

    #[serde(default)]
    pub camera: OrbitConfig,

    #[serde(default = "default_grid_size")]
    pub grid_size: f64,

    #[serde(default = "default_grid_divisions")]
    pub grid_divisions: u32,

    #[serde(
        default = "default_plane_color",
        with = "crate::util::palette::serde"
    )]
    pub boundary_color: Srgb,

    #[serde(default = "default_boundary_opacity")]
    pub boundary_opacity: f32,

    #[serde(
        default = "default_grid_center_color",
        with = "crate::util::palette::serde"
    )]
    pub grid_center_color: Srgb,

    #[serde(
        default = "default_grid_color",
        with = "crate::util::palette::serde"
    )]
    pub grid_color: Srgb,
}

impl VolumetricConfig {
    pub fn grid(&self) -> GridHelper {
        GridHelper {
            size: self.grid_size,
            divisions: self.grid_divisions,
        }
    }
}

impl Default for VolumetricConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lattice: Default::default(),
            background_color: default_volumetric_background(),
            fovy: default_fovy(),
            camera: Default::default(),
            grid_size: default_grid_size(),
            grid_divisions: default_grid_divisions(),
            boundary_color: default_plane_color(),
            boundary_opacity: default_boundary_opacity(),
            grid_center_color: default_grid_center_color(),
            grid_color: default_grid_color(),
        }
    }
}

fn default_to_true() -> bool {
    true
}

fn default_volumetric_background() -> Srgb {
    Srgb::<u8>::new(0xf0, 0xf0, 0xf0).into_format()
}

fn default_fovy() -> f32 {
    75.0
}

fn default_grid_size() -> f64 {
    10.0
}

fn default_grid_divisions() -> u32 {
    10
}

fn default_plane_color() -> Srgb {
    Srgb::<u8>::new(0x80, 0x80, 0x80).into_format()
}

fn default_boundary_opacity() -> f32 {
    0.2
}

fn default_grid_center_color() -> Srgb {
    Srgb::new(0.0, 0.0, 0.0)
}

fn default_grid_color() -> Srgb {
    Srgb::<u8>::new(0x40, 0x40, 0x40).into_format()
}

/// Initial placement and feel of the orbit camera.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrbitConfig {
    #[serde(default = "default_camera_distance")]
    pub distance: f32,

    /// in degrees, around the y-axis
    #[serde(default = "default_camera_yaw")]
    pub yaw: f32,

    /// in degrees, above the xz-plane
    #[serde(default = "default_camera_pitch")]
    pub pitch: f32,

    /// Fraction of the remaining orbit velocity that is removed per frame.
    #[serde(default = "default_damping_factor")]
    pub damping_factor: f32,

    /// Radians per point dragged
    #[serde(default = "default_rotate_speed")]
    pub rotate_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            distance: default_camera_distance(),
            yaw: default_camera_yaw(),
            pitch: default_camera_pitch(),
            damping_factor: default_damping_factor(),
            rotate_speed: default_rotate_speed(),
        }
    }
}

fn default_camera_distance() -> f32 {
    // camera at (5, 5, 5)
    75.0f32.sqrt()
}

fn default_camera_yaw() -> f32 {
    45.0
}

fn default_camera_pitch() -> f32 {
    // asin(1 / sqrt(3))
    35.264
}

fn default_damping_factor() -> f32 {
    0.05
}

fn default_rotate_speed() -> f32 {
    0.005
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphicsConfig {
    #[serde(default = "default_wgpu_backends")]
    pub backends: wgpu::Backends,

    #[serde(default)]
    pub power_preference: wgpu::PowerPreference,

    #[serde(default = "default_multisample_count")]
    pub multisample_count: u16,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            backends: default_wgpu_backends(),
            power_preference: Default::default(),
            multisample_count: default_multisample_count(),
        }
    }
}

fn default_wgpu_backends() -> wgpu::Backends {
    wgpu::Backends::PRIMARY
}

fn default_multisample_count() -> u16 {
    4
}
