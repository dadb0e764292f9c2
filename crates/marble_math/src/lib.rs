// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
pub mod sampling;

pub use interval::Interval;
pub use ray::Ray;

/// RGB color with components nominally in [0, 1].
///
/// Values are only clamped at output-encoding time; in-flight colors may
/// exceed 1 after attenuation products accumulate.
pub type Color = Vec3;

/// A position in 3D space.
pub type Point3 = Vec3;
