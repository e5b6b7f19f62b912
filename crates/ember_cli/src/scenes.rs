//! Built-in scenes.
//!
//! Every preset returns the world wrapped in a BVH, a camera aimed at it and
//! the background rays see when they escape.

use crate::cli::SceneName;
use ember_math::{Color, Interval, Point3, Vec3};
use ember_renderer::{
    gen_f32, gen_range_f32, AxisRect, Background, BvhNode, Camera, CheckerTexture,
    ConstantMedium, Dielectric, DiffuseLight, HittableList, ImageTexture, Lambertian, Material,
    Metal, MovingSphere, NoiseTexture, Plane, Sphere,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::Arc;

/// A renderable scene.
pub struct Scene {
    pub world: BvhNode,
    pub camera: Camera,
    pub background: Background,
}

impl Scene {
    fn new(world: HittableList, camera: Camera, background: Background) -> Self {
        let (time0, time1) = camera.shutter();
        Self {
            world: BvhNode::from_list(world, time0, time1),
            camera,
            background,
        }
    }
}

/// Build the preset `name` at the given resolution.
///
/// `seed` drives every random choice made while placing objects. `texture`
/// is only read by [`SceneName::Earth`].
pub fn build(name: SceneName, width: u32, height: u32, texture: &Path, seed: u64) -> Scene {
    let mut scene = match name {
        SceneName::RandomSpheres => random_spheres(seed),
        SceneName::TwoSpheres => two_spheres(),
        SceneName::TwoPerlinSpheres => two_perlin_spheres(seed),
        SceneName::Earth => earth(texture),
        SceneName::SimpleLight => simple_light(seed),
        SceneName::CornellSmoke => cornell_smoke(),
    };

    scene.camera = scene.camera.with_resolution(width, height);
    scene.camera.initialize();
    log::debug!("Built scene {:?} at {}x{}", name, width, height);
    scene
}

/// Camera shared by the outdoor scenes.
fn outdoor_camera() -> Camera {
    Camera::new()
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
}

fn random_spheres(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    let checker = Arc::new(CheckerTexture::from_colors(
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(checker)),
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(&mut rng);
            let center = Point3::new(
                a as f32 + 0.9 * gen_f32(&mut rng),
                0.2,
                b as f32 + 0.9 * gen_f32(&mut rng),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                // Diffuse spheres bounce during the shutter interval
                let albedo = random_color(&mut rng, 0.0, 1.0) * random_color(&mut rng, 0.0, 1.0);
                let center1 = center + Vec3::new(0.0, gen_range_f32(&mut rng, 0.0, 0.5), 0.0);
                world.add(Box::new(MovingSphere::new(
                    (center, 0.0),
                    (center1, 1.0),
                    0.2,
                    Arc::new(Lambertian::from_color(albedo)),
                )));
            } else {
                let material: Arc<dyn Material> = if choose_mat < 0.95 {
                    let albedo = random_color(&mut rng, 0.5, 1.0);
                    let fuzz = gen_range_f32(&mut rng, 0.0, 0.5);
                    Arc::new(Metal::new(albedo, fuzz))
                } else {
                    Arc::new(Dielectric::new(1.5))
                };
                world.add(Box::new(Sphere::new(center, 0.2, material)));
            }
        }
    }

    world.add(Box::new(Sphere::new(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::from_color(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    let camera = outdoor_camera()
        .with_lens(20.0, 0.6, 10.0)
        .with_shutter(0.0, 1.0);
    Scene::new(world, camera, Background::SkyGradient)
}

fn random_color(rng: &mut StdRng, min: f32, max: f32) -> Color {
    Color::new(
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
    )
}

fn two_spheres() -> Scene {
    let checker: Arc<dyn Material> = Arc::new(Lambertian::new(Arc::new(
        CheckerTexture::from_colors(Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9)),
    )));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, -10.0, 0.0),
        10.0,
        Arc::clone(&checker),
    )));
    world.add(Box::new(Sphere::new(Point3::new(0.0, 10.0, 0.0), 10.0, checker)));

    Scene::new(world, outdoor_camera(), Background::SkyGradient)
}

/// Ground and a sphere sharing one marble material.
fn marble_spheres(seed: u64) -> HittableList {
    let marble: Arc<dyn Material> =
        Arc::new(Lambertian::new(Arc::new(NoiseTexture::with_seed(4.0, seed))));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::clone(&marble),
    )));
    world.add(Box::new(Sphere::new(Point3::new(0.0, 2.0, 0.0), 2.0, marble)));
    world
}

fn two_perlin_spheres(seed: u64) -> Scene {
    Scene::new(marble_spheres(seed), outdoor_camera(), Background::SkyGradient)
}

fn earth(texture: &Path) -> Scene {
    let surface = Arc::new(Lambertian::new(Arc::new(ImageTexture::open(texture))));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(Point3::ZERO, 2.0, surface)));

    Scene::new(world, outdoor_camera(), Background::SkyGradient)
}

fn simple_light(seed: u64) -> Scene {
    let mut world = marble_spheres(seed);

    let light: Arc<dyn Material> = Arc::new(DiffuseLight::from_color(Color::splat(4.0)));
    world.add(Box::new(AxisRect::new(
        Plane::Xy,
        Interval::new(3.0, 5.0),
        Interval::new(1.0, 3.0),
        -2.0,
        Arc::clone(&light),
    )));
    world.add(Box::new(Sphere::new(Point3::new(0.0, 7.0, 0.0), 2.0, light)));

    let camera = Camera::new()
        .with_position(Point3::new(26.0, 3.0, 6.0), Point3::new(0.0, 2.0, 0.0), Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);
    Scene::new(world, camera, Background::Solid(Color::ZERO))
}

fn cornell_smoke() -> Scene {
    let red: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::splat(0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::from_color(Color::splat(7.0)));

    let full = Interval::new(0.0, 555.0);
    let mut world = HittableList::new();

    world.add(Box::new(AxisRect::new(Plane::Yz, full, full, 555.0, green)));
    world.add(Box::new(AxisRect::new(Plane::Yz, full, full, 0.0, red)));
    world.add(Box::new(AxisRect::new(
        Plane::Xz,
        Interval::new(113.0, 443.0),
        Interval::new(127.0, 432.0),
        554.0,
        light,
    )));
    world.add(Box::new(AxisRect::new(Plane::Xz, full, full, 555.0, Arc::clone(&white))));
    world.add(Box::new(AxisRect::new(Plane::Xz, full, full, 0.0, Arc::clone(&white))));
    world.add(Box::new(AxisRect::new(Plane::Xy, full, full, 555.0, Arc::clone(&white))));

    // Dark smoke on the left, light fog on the right
    world.add(Box::new(ConstantMedium::from_color(
        Box::new(Sphere::new(Point3::new(190.0, 90.0, 190.0), 90.0, Arc::clone(&white))),
        0.01,
        Color::ZERO,
    )));
    world.add(Box::new(ConstantMedium::from_color(
        Box::new(Sphere::new(Point3::new(370.0, 150.0, 340.0), 150.0, white)),
        0.01,
        Color::ONE,
    )));

    let camera = Camera::new()
        .with_position(
            Point3::new(278.0, 278.0, -800.0),
            Point3::new(278.0, 278.0, 0.0),
            Vec3::Y,
        )
        .with_lens(40.0, 0.0, 10.0);
    Scene::new(world, camera, Background::Solid(Color::ZERO))
}
