//! Camera for ray generation.

use marble_math::sampling::{gen_f32, random_in_unit_disk};
use marble_math::{Point3, Ray, Vec3};
use rand::RngCore;
use thiserror::Error;

/// Invalid camera configuration, reported by [`Camera::initialize`].
#[derive(Debug, Error, PartialEq)]
pub enum CameraError {
    #[error("camera configuration contains a non-finite value")]
    NonFinite,
    #[error("aspect_ratio must be positive, got {0}")]
    AspectRatio(f32),
    #[error("image_width must be positive")]
    ImageWidth,
    #[error("samples_per_pixel must be at least 1")]
    SamplesPerPixel,
    #[error("vfov must be in (0, 180) degrees, got {0}")]
    Vfov(f32),
    #[error("defocus_angle must be non-negative, got {0}")]
    DefocusAngle(f32),
    #[error("focus_dist must be positive, got {0}")]
    FocusDist(f32),
    #[error("vup is parallel to the view direction")]
    DegenerateBasis,
}

/// Camera for generating rays into the scene.
#[derive(Clone)]
pub struct Camera {
    // Image settings
    pub aspect_ratio: f32,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    // Camera positioning
    look_from: Point3,
    look_at: Point3,
    vup: Vec3,

    // Lens settings
    vfov: f32,          // Vertical field of view in degrees
    defocus_angle: f32, // Variation angle of rays through each pixel, degrees
    focus_dist: f32,    // Distance from camera to plane of perfect focus

    // Cached computed values (set by initialize())
    image_height: u32,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
    samples_scale: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 10,
            max_depth: 50,
            look_from: Point3::new(0.0, 0.0, 0.0),
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            // Cached values (initialized to defaults)
            image_height: 0,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
            samples_scale: 0.1,
        }
    }

    /// Set aspect ratio and image width; the height is derived.
    pub fn with_image(mut self, aspect_ratio: f32, width: u32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self.image_width = width;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    fn validate(&self) -> Result<(), CameraError> {
        let scalars = [
            self.aspect_ratio,
            self.vfov,
            self.defocus_angle,
            self.focus_dist,
        ];
        if scalars.iter().any(|s| !s.is_finite())
            || !self.look_from.is_finite()
            || !self.look_at.is_finite()
            || !self.vup.is_finite()
        {
            return Err(CameraError::NonFinite);
        }
        if self.aspect_ratio <= 0.0 {
            return Err(CameraError::AspectRatio(self.aspect_ratio));
        }
        if self.image_width == 0 {
            return Err(CameraError::ImageWidth);
        }
        if self.samples_per_pixel == 0 {
            return Err(CameraError::SamplesPerPixel);
        }
        if self.vfov <= 0.0 || self.vfov >= 180.0 {
            return Err(CameraError::Vfov(self.vfov));
        }
        if self.defocus_angle < 0.0 {
            return Err(CameraError::DefocusAngle(self.defocus_angle));
        }
        if self.focus_dist <= 0.0 {
            return Err(CameraError::FocusDist(self.focus_dist));
        }
        // Also catches look_from == look_at
        if self.vup.cross(self.look_from - self.look_at).length_squared() < 1e-12 {
            return Err(CameraError::DegenerateBasis);
        }
        Ok(())
    }

    /// Validate the configuration and compute the derived viewport state.
    ///
    /// Must be called before generating rays. Idempotent; the derived state
    /// is read-only for the duration of a render.
    pub fn initialize(&mut self) -> Result<(), CameraError> {
        self.validate()?;

        self.image_height = ((self.image_width as f32 / self.aspect_ratio) as u32).max(1);
        self.samples_scale = 1.0 / self.samples_per_pixel as f32;
        self.center = self.look_from;

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width =
            viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Calculate viewport vectors
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        // Calculate pixel delta vectors
        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        // Calculate upper left pixel location
        let viewport_upper_left =
            self.center - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;

        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        Ok(())
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The pixel center is jittered for anti-aliasing; with a positive
    /// defocus angle the origin is sampled over the lens disk.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        let ray_direction = pixel_sample - ray_origin;

        Ray::new(ray_origin, ray_direction)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    /// Image height derived from the aspect ratio (valid after initialize).
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample a random point in the unit square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_initialize() {
        let mut camera = Camera::new()
            .with_image(1.0, 100)
            .with_position(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, -1.0),
                Vec3::new(0.0, 1.0, 0.0),
            )
            .with_lens(90.0, 0.0, 1.0);

        camera.initialize().unwrap();

        assert_eq!(camera.center, Point3::ZERO);
        assert_eq!(camera.image_height(), 100);
        assert!((camera.w - Vec3::Z).length() < 0.001);
        assert!((camera.u - Vec3::X).length() < 0.001);
        assert!((camera.v - Vec3::Y).length() < 0.001);
    }

    #[test]
    fn test_image_height_from_aspect_ratio() {
        let mut camera = Camera::new().with_image(16.0 / 9.0, 400);
        camera.initialize().unwrap();
        assert_eq!(camera.image_height(), 225);

        // Extreme ratios never collapse to a zero-height image
        let mut camera = Camera::new().with_image(1000.0, 10);
        camera.initialize().unwrap();
        assert_eq!(camera.image_height(), 1);
    }

    #[test]
    fn test_camera_ray_direction() {
        let mut camera = Camera::new()
            .with_image(1.0, 100)
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);

        camera.initialize().unwrap();

        let mut rng = StdRng::seed_from_u64(42);

        // Center ray should point roughly towards -Z
        let ray = camera.get_ray(50, 50, &mut rng);
        assert!(ray.direction().z < 0.0);
        assert_eq!(ray.origin(), Point3::ZERO);
    }

    #[test]
    fn test_pinhole_origin_is_fixed() {
        let mut camera = Camera::new().with_lens(90.0, 0.0, 1.0);
        camera.initialize().unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..20 {
            assert_eq!(camera.get_ray(0, 0, &mut rng).origin(), Point3::ZERO);
        }
    }

    #[test]
    fn test_defocus_origin_stays_on_lens_disk() {
        let mut camera = Camera::new().with_lens(90.0, 2.0, 5.0);
        camera.initialize().unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        let lens_radius = 5.0 * (1.0f32).to_radians().tan();
        for _ in 0..100 {
            let origin = camera.get_ray(0, 0, &mut rng).origin();
            assert!((origin - camera.center).length() <= lens_radius + 1e-5);
        }
    }

    #[test]
    fn test_invalid_configuration() {
        assert_eq!(
            Camera::new().with_image(-1.0, 100).initialize(),
            Err(CameraError::AspectRatio(-1.0))
        );
        assert_eq!(
            Camera::new().with_image(1.0, 0).initialize(),
            Err(CameraError::ImageWidth)
        );
        assert_eq!(
            Camera::new().with_quality(0, 10).initialize(),
            Err(CameraError::SamplesPerPixel)
        );
        assert_eq!(
            Camera::new().with_lens(0.0, 0.0, 1.0).initialize(),
            Err(CameraError::Vfov(0.0))
        );
        assert_eq!(
            Camera::new().with_lens(90.0, -0.5, 1.0).initialize(),
            Err(CameraError::DefocusAngle(-0.5))
        );
        assert_eq!(
            Camera::new().with_lens(90.0, 0.0, 0.0).initialize(),
            Err(CameraError::FocusDist(0.0))
        );
        assert_eq!(
            Camera::new()
                .with_position(Point3::ZERO, Point3::new(0.0, 1.0, 0.0), Vec3::Y)
                .initialize(),
            Err(CameraError::DegenerateBasis)
        );
        assert_eq!(
            Camera::new()
                .with_lens(f32::NAN, 0.0, 1.0)
                .initialize(),
            Err(CameraError::NonFinite)
        );
    }
}
