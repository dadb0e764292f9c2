//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Gamma correction
//! - Anti-aliasing via multi-sampling

use crate::{Camera, Hittable};
use marble_math::{Color, Interval, Ray};
use rand::RngCore;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

/// Output intensity range: channels are clamped here before byte mapping.
const INTENSITY: Interval = Interval {
    min: 0.0,
    max: 0.999,
};

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through the
/// scene, bouncing off surfaces and accumulating attenuation until the ray
/// is absorbed, escapes to the sky, or exhausts its depth budget.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // Depth budget exhausted: no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    // The 0.001 lower bound skips self-intersections at t ~ 0 (shadow acne)
    match world.hit(ray, Interval::new(0.001, f32::INFINITY)) {
        Some(rec) => match rec.material.scatter(ray, &rec, rng) {
            Some(result) => {
                result.attenuation * ray_color(&result.scattered, world, depth - 1, rng)
            }
            // Ray was absorbed
            None => Color::ZERO,
        },
        // Miss: the sky is the only light source
        None => sky_gradient(ray),
    }
}

/// Background gradient, white at the horizon blending to sky blue overhead.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.999 * INTENSITY.clamp(linear_to_gamma(color.x))) as u8;
    let g = (255.999 * INTENSITY.clamp(linear_to_gamma(color.y))) as u8;
    let b = (255.999 * INTENSITY.clamp(linear_to_gamma(color.z))) as u8;
    [r, g, b]
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        // Camera.get_ray already adds random offset for anti-aliasing
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth, rng);
    }

    // Average the samples
    pixel_color * camera.samples_scale()
}

/// Render the entire scene to an image buffer.
///
/// Rows run top to bottom; the camera must already be initialized.
pub fn render(camera: &Camera, world: &dyn Hittable, rng: &mut dyn RngCore) -> ImageBuffer {
    let width = camera.image_width;
    let height = camera.image_height();
    let mut image = ImageBuffer::new(width, height);

    log::info!(
        "rendering {}x{} at {} spp, max depth {}",
        width,
        height,
        camera.samples_per_pixel,
        camera.max_depth
    );
    let start = Instant::now();

    for y in 0..height {
        log::debug!("scanlines remaining: {}", height - y);
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, rng);
            image.set(x, y, color);
        }
    }

    log::info!("render finished in {:.2?}", start.elapsed());
    image
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to gamma-corrected RGB bytes, row-major top to bottom.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 3) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    /// Write the image as plain-text PPM (P3).
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;
        for color in &self.pixels {
            let [r, g, b] = color_to_rgb(*color);
            writeln!(out, "{} {} {}", r, g, b)?;
        }
        Ok(())
    }

    /// Save the image as PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        image::save_buffer(
            path,
            &self.to_rgb_bytes(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )
    }
}
