//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use marble_math::{Interval, Point3, Ray};
use std::sync::Arc;

/// A sphere primitive.
///
/// The material is a shared handle: many spheres may reference the same
/// instance. A negative radius flips the outward normal toward the center,
/// which models hollow shells (a glass bubble is an outer dielectric
/// sphere plus an inner sphere of negative radius sharing its material).
pub struct Sphere {
    center: Point3,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The center must be finite and the radius finite and nonzero;
    /// anything else is a caller contract violation.
    pub fn new(center: Point3, radius: f32, material: Arc<dyn Material>) -> Self {
        debug_assert!(center.is_finite(), "sphere center must be finite");
        debug_assert!(
            radius.is_finite() && radius != 0.0,
            "sphere radius must be finite and nonzero"
        );

        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        // Dividing by the signed radius orients hollow-sphere normals inward
        let outward_normal = (p - self.center) / self.radius;

        Some(HitRecord::new(
            ray,
            p,
            root,
            outward_normal,
            self.material.as_ref(),
        ))
    }
}
