//! Renders the classic sphere-field scene to PNG and PPM.
//!
//! A ground sphere, three feature spheres (glass, diffuse, polished metal)
//! and a randomized grid of small spheres with mixed materials.

use anyhow::Result;
use marble_render::{
    render, sampling, Camera, Color, Dielectric, HittableList, Lambertian, Material, Metal,
    Point3, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(0x5eed);

    let start = std::time::Instant::now();
    let world = build_scene(&mut rng);
    println!("Scene built with {} spheres in {:?}", world.len(), start.elapsed());

    let mut camera = Camera::new()
        .with_image(16.0 / 9.0, 1200)
        .with_quality(500, 50)
        .with_position(
            Point3::new(5.0, 2.3, 9.0), // look_from
            Point3::new(0.0, 0.8, 0.0), // look_at
            Vec3::new(0.0, 1.0, 0.0),   // vup
        )
        .with_lens(20.0, 0.6, 9.7);
    camera.initialize()?;

    println!(
        "Rendering {}x{} @ {} spp...",
        camera.image_width,
        camera.image_height(),
        camera.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let image = render(&camera, &world, &mut rng);
    println!("Rendered in {:?}", start.elapsed());

    image.save_png("cover.png")?;
    println!("Saved to cover.png");

    let mut out = BufWriter::new(File::create("cover.ppm")?);
    image.write_ppm(&mut out)?;
    println!("Saved to cover.ppm");

    Ok(())
}

fn build_scene(rng: &mut StdRng) -> HittableList {
    let mut world = HittableList::new();

    // Ground
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::splat(0.5))),
    )));

    // Three feature spheres; the glass material is shared with the small
    // glass spheres below
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    world.add(Arc::new(Sphere::new(
        Point3::new(1.0, 0.85, 0.0),
        0.85,
        Arc::clone(&glass),
    )));

    world.add(Arc::new(Sphere::new(
        Point3::new(0.35, 0.5, 1.0),
        0.5,
        Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.4))),
    )));

    world.add(Arc::new(Sphere::new(
        Point3::new(-1.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    // Grid of small spheres with randomized materials
    for a in -13..5 {
        for b in -15..8 {
            let choose_mat = sampling::gen_f32(rng);
            let center = Point3::new(
                a as f32 + 0.9 * sampling::gen_f32(rng),
                0.2,
                b as f32 + 0.9 * sampling::gen_f32(rng),
            );

            // Keep clear of the feature spheres
            if (center - Point3::new(0.0, 0.2, 0.0)).length() <= 2.0 {
                continue;
            }

            let material: Arc<dyn Material> = if choose_mat < 0.80 {
                // diffuse
                let albedo = sampling::random_color(rng) * sampling::random_color(rng);
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                // metal
                let albedo = sampling::random_color_range(rng, 0.5, 1.0);
                let fuzz = sampling::gen_range_f32(rng, 0.0, 0.5);
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                // glass
                Arc::clone(&glass)
            };

            world.add(Arc::new(Sphere::new(center, 0.2, material)));
        }
    }

    world
}
