use std::f32::consts::FRAC_PI_2;

use nalgebra::{
    Isometry3,
    Perspective3,
    Point2,
    Point3,
    Vector2,
    Vector3,
};

use crate::{
    backend::volumetric::SceneError,
    config::OrbitConfig,
};

const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.0;

/// Keeps the camera from flipping over the poles.
const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 100.0;

/// Below this (in radians) the remaining orbit motion is dropped.
const REST_THRESHOLD: f32 = 1e-5;

/// Camera orbiting around a target point, with damped rotation.
///
/// Dragging adds to a pending rotation. Each frame [`update`](Self::update)
/// applies `damping_factor` of it, so the camera keeps gliding for a while
/// after the pointer is released.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    projection: Perspective3<f32>,
    target: Point3<f32>,
    distance: f32,
    yaw: f32,
    pitch: f32,
    pending: Vector2<f32>,
    damping_factor: f32,
    rotate_speed: f32,
}

impl OrbitCamera {
    /// # Arguments
    ///
    /// - `fovy`: Vertical field of view in degrees.
    pub fn new(fovy: f32, config: &OrbitConfig) -> Result<Self, SceneError> {
        if !(fovy > 0.0 && fovy < 180.0) {
            return Err(SceneError::InvalidFieldOfView(fovy));
        }
        if !(config.distance.is_finite() && config.distance > 0.0) {
            return Err(SceneError::InvalidCameraDistance(config.distance));
        }

        let projection = Perspective3::new(1.0, fovy.to_radians(), Z_NEAR, Z_FAR);
        tracing::debug!(?projection);

        Ok(Self {
            projection,
            target: Point3::origin(),
            distance: config.distance,
            yaw: config.yaw.to_radians(),
            pitch: config.pitch.to_radians().clamp(-MAX_PITCH, MAX_PITCH),
            pending: Vector2::zeros(),
            damping_factor: config.damping_factor.clamp(0.0, 1.0),
            rotate_speed: config.rotate_speed,
        })
    }

    /// Set aspect ratio (width / height)
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.projection.set_aspect(aspect_ratio);
        }
    }

    pub fn eye(&self) -> Point3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + self.distance * Vector3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn view(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye(), &self.target, &Vector3::y())
    }

    /// Projects a point in world space to normalized device coordinates.
    ///
    /// Returns `None` for points behind the near plane.
    pub fn project(&self, point: &Point3<f64>) -> Option<Point2<f32>> {
        let point = self.view() * point.cast::<f32>();
        // the camera looks along -z
        if -point.z < Z_NEAR {
            return None;
        }
        let ndc = self.projection.project_point(&point);
        Some(Point2::new(ndc.x, ndc.y))
    }

    /// Queues a rotation for a pointer drag of `delta` points.
    pub fn rotate(&mut self, delta: Vector2<f32>) {
        self.pending += delta * self.rotate_speed;
    }

    /// Zooms in for positive `amount`, out for negative.
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance * (-0.001 * amount).exp()).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Advances the damped rotation by one frame. Returns `true` while the
    /// camera is still moving.
    pub fn update(&mut self) -> bool {
        if self.pending.norm() < REST_THRESHOLD {
            self.pending = Vector2::zeros();
            return false;
        }

        let step = self.pending * self.damping_factor;
        self.yaw -= step.x;
        self.pitch = (self.pitch + step.y).clamp(-MAX_PITCH, MAX_PITCH);
        self.pending -= step;

        true
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{
        Point3,
        Vector2,
    };

    use crate::{
        app::camera::{
            MAX_PITCH,
            OrbitCamera,
        },
        backend::volumetric::SceneError,
        config::OrbitConfig,
    };

    fn camera() -> OrbitCamera {
        OrbitCamera::new(75.0, &OrbitConfig::default()).unwrap()
    }

    #[test]
    fn it_starts_at_the_default_eye() {
        let eye = camera().eye();
        assert!((eye - Point3::new(5.0, 5.0, 5.0)).norm() < 1e-3);
    }

    #[test]
    fn it_projects_the_target_to_the_center() {
        let ndc = camera().project(&Point3::origin()).unwrap();
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
    }

    #[test]
    fn it_culls_points_behind_the_camera() {
        assert!(camera().project(&Point3::new(10.0, 10.0, 10.0)).is_none());
    }

    #[test]
    fn it_projects_up_as_up() {
        let ndc = camera().project(&Point3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(ndc.y > 0.0);
    }

    #[test]
    fn it_rejects_invalid_cameras() {
        assert!(matches!(
            OrbitCamera::new(0.0, &OrbitConfig::default()),
            Err(SceneError::InvalidFieldOfView(_))
        ));
        assert!(matches!(
            OrbitCamera::new(
                75.0,
                &OrbitConfig {
                    distance: -1.0,
                    ..Default::default()
                }
            ),
            Err(SceneError::InvalidCameraDistance(_))
        ));
    }

    #[test]
    fn it_damps_rotation() {
        let mut camera = camera();
        let yaw = camera.yaw();
        camera.rotate(Vector2::new(100.0, 0.0));

        assert!(camera.update());
        let first_step = yaw - camera.yaw();
        assert!(first_step > 0.0);
        assert!(first_step < 100.0 * 0.005);

        let mut frames = 0;
        while camera.update() {
            frames += 1;
            assert!(frames < 10_000);
        }
        assert!(((yaw - camera.yaw()) - 0.5).abs() < 1e-3);
        assert!(!camera.update());
    }

    #[test]
    fn it_clamps_pitch() {
        let mut camera = camera();
        camera.rotate(Vector2::new(0.0, 1e5));
        while camera.update() {}
        assert_eq!(camera.pitch(), MAX_PITCH);
    }

    #[test]
    fn it_zooms() {
        let mut camera = camera();
        let distance = camera.distance();
        camera.zoom(100.0);
        assert!(camera.distance() < distance);
        camera.zoom(-1e6);
        assert_eq!(camera.distance(), 100.0);
    }
}
