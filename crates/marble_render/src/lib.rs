//! Marble - CPU Monte Carlo path tracing
//!
//! A stochastic ray tracer for sphere scenes with diffuse, metal, and
//! dielectric materials. Single threaded; every stochastic decision draws
//! from an rng handle supplied by the caller.

mod camera;
mod hittable;
mod material;
mod renderer;
mod sphere;

pub use camera::{Camera, CameraError};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer};
pub use sphere::Sphere;

/// Re-export math types from marble_math
pub use marble_math::{sampling, Color, Interval, Point3, Ray, Vec3};
