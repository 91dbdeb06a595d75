//! Built-in scene constructors.
//!
//! Each constructor is self-contained: scene layout, Perlin tables and BVH
//! axis picks all draw from a fixed-seed RNG, so the same scene name always
//! produces the same geometry.

use crate::bvh::BvhNode;
use crate::camera::Camera;
use crate::cuboid::Cuboid;
use crate::hittable::{Hittable, HittableList};
use crate::material::{Color, Dielectric, DiffuseLight, Lambertian, Material, Metal};
use crate::medium::ConstantMedium;
use crate::rect::{XyRect, XzRect, YzRect};
use crate::sampling::{gen_f32, gen_range_f32};
use crate::sphere::{MovingSphere, Sphere};
use crate::texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture};
use crate::transform::{RotateY, Translate};
use crate::{IMAGE_HEIGHT, IMAGE_WIDTH};
use ember_math::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Everything a render pass needs: geometry, camera and background radiance.
pub struct Scene {
    pub world: Arc<dyn Hittable>,
    pub camera: Camera,
    pub background: Color,
}

/// Names accepted by [`scene_by_name`], in menu order.
pub const SCENE_NAMES: &[&str] = &[
    "random_spheres",
    "two_checker_spheres",
    "perlin_spheres",
    "earth",
    "simple_light",
    "cornell_box",
    "cornell_smoke",
    "cornell_gold_fog",
    "next_week_final",
    "single_sphere",
    "three_spheres",
];

/// Look up a scene constructor by name.
pub fn scene_by_name(name: &str) -> Option<Scene> {
    match name {
        "random_spheres" => Some(random_spheres()),
        "two_checker_spheres" => Some(two_checker_spheres()),
        "perlin_spheres" => Some(perlin_spheres()),
        "earth" => Some(earth()),
        "simple_light" => Some(simple_light()),
        "cornell_box" => Some(cornell_box()),
        "cornell_smoke" => Some(cornell_smoke()),
        "cornell_gold_fog" => Some(cornell_gold_fog()),
        "next_week_final" => Some(next_week_final()),
        "single_sphere" => Some(single_sphere()),
        "three_spheres" => Some(three_spheres()),
        _ => None,
    }
}

const SKY: Color = Color::new(0.70, 0.80, 1.00);

fn aspect_ratio() -> f32 {
    IMAGE_WIDTH as f32 / IMAGE_HEIGHT as f32
}

fn sky_camera(lookfrom: Vec3, lookat: Vec3, vfov: f32, aperture: f32, focus_dist: f32) -> Camera {
    Camera::new(
        lookfrom,
        lookat,
        Vec3::Y,
        vfov,
        aspect_ratio(),
        aperture,
        focus_dist,
        0.0,
        1.0,
    )
}

/// Interior camera shared by the Cornell box variants.
fn cornell_camera() -> Camera {
    sky_camera(
        Vec3::new(278.0, 278.0, -800.0),
        Vec3::new(278.0, 278.0, 0.0),
        40.0,
        0.0,
        10.0,
    )
}

/// The five walls plus ceiling light of the standard Cornell box.
fn cornell_walls(world: &mut HittableList) {
    let red: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.73, 0.73, 0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::from_color(Color::new(7.0, 7.0, 7.0)));

    world.add(Arc::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 555.0, green)));
    world.add(Arc::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 0.0, red)));
    world.add(Arc::new(XzRect::new(113.0, 443.0, 127.0, 432.0, 554.0, light)));
    world.add(Arc::new(XzRect::new(0.0, 555.0, 0.0, 555.0, 0.0, white.clone())));
    world.add(Arc::new(XzRect::new(0.0, 555.0, 0.0, 555.0, 555.0, white.clone())));
    world.add(Arc::new(XyRect::new(0.0, 555.0, 0.0, 555.0, 555.0, white)));
}

/// A rotated, translated box with the given material.
fn cornell_block(p1: Vec3, angle: f32, offset: Vec3, material: Arc<dyn Material>) -> Arc<dyn Hittable> {
    let block = Arc::new(Cuboid::new(Vec3::ZERO, p1, material));
    let block = Arc::new(RotateY::new(block, angle));
    Arc::new(Translate::new(block, offset))
}

/// A field of small random spheres around three showcase spheres. The small
/// diffuse spheres bounce during the shutter interval.
pub fn random_spheres() -> Scene {
    let mut rng = StdRng::seed_from_u64(7);
    let mut world = HittableList::new();

    let checker: Arc<dyn Texture> = Arc::new(CheckerTexture::from_colors(
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(checker)),
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(&mut rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(&mut rng),
                0.2,
                b as f32 + 0.9 * gen_f32(&mut rng),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = Color::new(
                    gen_f32(&mut rng) * gen_f32(&mut rng),
                    gen_f32(&mut rng) * gen_f32(&mut rng),
                    gen_f32(&mut rng) * gen_f32(&mut rng),
                );
                let center1 = center + Vec3::new(0.0, gen_range_f32(&mut rng, 0.0, 0.5), 0.0);
                world.add(Arc::new(MovingSphere::new(
                    center,
                    center1,
                    0.0,
                    1.0,
                    0.2,
                    Arc::new(Lambertian::from_color(albedo)),
                )));
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    gen_range_f32(&mut rng, 0.5, 1.0),
                    gen_range_f32(&mut rng, 0.5, 1.0),
                    gen_range_f32(&mut rng, 0.5, 1.0),
                );
                let fuzz = gen_range_f32(&mut rng, 0.0, 0.5);
                world.add(Arc::new(Sphere::new(center, 0.2, Arc::new(Metal::new(albedo, fuzz)))));
            } else {
                world.add(Arc::new(Sphere::new(center, 0.2, Arc::new(Dielectric::new(1.5)))));
            }
        }
    }

    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::from_color(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    Scene {
        world: Arc::new(BvhNode::from_list(world, &mut rng)),
        camera: sky_camera(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, 20.0, 0.1, 10.0),
        background: SKY,
    }
}

/// Two large checker-textured spheres stacked vertically.
pub fn two_checker_spheres() -> Scene {
    let mut world = HittableList::new();
    let checker: Arc<dyn Texture> = Arc::new(CheckerTexture::from_colors(
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));

    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -10.0, 0.0),
        10.0,
        Arc::new(Lambertian::new(checker.clone())),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 10.0, 0.0),
        10.0,
        Arc::new(Lambertian::new(checker)),
    )));

    Scene {
        world: Arc::new(world),
        camera: sky_camera(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, 20.0, 0.0, 10.0),
        background: SKY,
    }
}

/// Marble-textured sphere resting on a marble ground sphere.
pub fn perlin_spheres() -> Scene {
    let mut rng = StdRng::seed_from_u64(7);
    let mut world = HittableList::new();

    let noise: Arc<dyn Texture> = Arc::new(NoiseTexture::new(4.0, &mut rng));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(noise.clone())),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 2.0, 0.0),
        2.0,
        Arc::new(Lambertian::new(noise)),
    )));

    Scene {
        world: Arc::new(world),
        camera: sky_camera(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, 20.0, 0.0, 10.0),
        background: SKY,
    }
}

/// A single image-mapped globe.
pub fn earth() -> Scene {
    let mut world = HittableList::new();
    let surface: Arc<dyn Texture> = Arc::new(ImageTexture::load("assets/earthmap.jpg"));
    world.add(Arc::new(Sphere::new(
        Vec3::ZERO,
        2.0,
        Arc::new(Lambertian::new(surface)),
    )));

    Scene {
        world: Arc::new(world),
        camera: sky_camera(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, 20.0, 0.0, 10.0),
        background: SKY,
    }
}

/// Marble spheres lit only by a rectangular area light.
pub fn simple_light() -> Scene {
    let mut rng = StdRng::seed_from_u64(7);
    let mut world = HittableList::new();

    let noise: Arc<dyn Texture> = Arc::new(NoiseTexture::new(4.0, &mut rng));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(noise.clone())),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 2.0, 0.0),
        2.0,
        Arc::new(Lambertian::new(noise)),
    )));

    let light: Arc<dyn Material> = Arc::new(DiffuseLight::from_color(Color::new(4.0, 4.0, 4.0)));
    world.add(Arc::new(XyRect::new(3.0, 5.0, 1.0, 3.0, -2.0, light)));

    Scene {
        world: Arc::new(world),
        camera: sky_camera(
            Vec3::new(26.0, 3.0, 6.0),
            Vec3::new(0.0, 2.0, 0.0),
            20.0,
            0.0,
            10.0,
        ),
        background: Color::ZERO,
    }
}

/// The classic Cornell box with two white blocks.
pub fn cornell_box() -> Scene {
    let mut world = HittableList::new();
    cornell_walls(&mut world);

    let white: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.73, 0.73, 0.73)));
    world.add(cornell_block(
        Vec3::new(165.0, 330.0, 165.0),
        15.0,
        Vec3::new(265.0, 0.0, 295.0),
        white.clone(),
    ));
    world.add(cornell_block(
        Vec3::new(165.0, 165.0, 165.0),
        -18.0,
        Vec3::new(130.0, 0.0, 65.0),
        white,
    ));

    Scene {
        world: Arc::new(world),
        camera: cornell_camera(),
        background: Color::ZERO,
    }
}

/// Cornell box where the blocks are volumes of smoke.
pub fn cornell_smoke() -> Scene {
    let mut world = HittableList::new();
    cornell_walls(&mut world);

    let white: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.73, 0.73, 0.73)));
    let tall = cornell_block(
        Vec3::new(165.0, 330.0, 165.0),
        15.0,
        Vec3::new(265.0, 0.0, 295.0),
        white.clone(),
    );
    let short = cornell_block(
        Vec3::new(165.0, 165.0, 165.0),
        -18.0,
        Vec3::new(130.0, 0.0, 65.0),
        white,
    );

    world.add(Arc::new(ConstantMedium::from_color(tall, 0.01, Color::ZERO)));
    world.add(Arc::new(ConstantMedium::from_color(short, 0.01, Color::ONE)));

    Scene {
        world: Arc::new(world),
        camera: cornell_camera(),
        background: Color::ZERO,
    }
}

/// Cornell box with a gold metal block, standing in a thin room-filling fog.
pub fn cornell_gold_fog() -> Scene {
    let mut world = HittableList::new();
    cornell_walls(&mut world);

    let gold: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.05));
    world.add(cornell_block(
        Vec3::new(165.0, 330.0, 165.0),
        15.0,
        Vec3::new(265.0, 0.0, 295.0),
        gold,
    ));
    world.add(Arc::new(Sphere::new(
        Vec3::new(190.0, 90.0, 190.0),
        90.0,
        Arc::new(Dielectric::new(1.5)),
    )));

    let room: Arc<dyn Hittable> = Arc::new(Cuboid::new(
        Vec3::ZERO,
        Vec3::new(555.0, 555.0, 555.0),
        Arc::new(Lambertian::from_color(Color::ONE)),
    ));
    world.add(Arc::new(ConstantMedium::from_color(
        room,
        0.0005,
        Color::ONE,
    )));

    Scene {
        world: Arc::new(world),
        camera: cornell_camera(),
        background: Color::ZERO,
    }
}

/// The showcase scene: boxed terrain, area light, motion blur, glass, metal,
/// subsurface sphere, mist, an earth globe, marble, and a cube of spheres.
pub fn next_week_final() -> Scene {
    let mut rng = StdRng::seed_from_u64(7);
    let mut world = HittableList::new();

    // Ground: a 20x20 grid of boxes with random heights
    let ground: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.48, 0.83, 0.53)));
    let mut boxes = HittableList::new();
    const BOXES_PER_SIDE: i32 = 20;
    for i in 0..BOXES_PER_SIDE {
        for j in 0..BOXES_PER_SIDE {
            let w = 100.0;
            let x0 = -1000.0 + i as f32 * w;
            let z0 = -1000.0 + j as f32 * w;
            let y1 = gen_range_f32(&mut rng, 1.0, 101.0);
            boxes.add(Arc::new(Cuboid::new(
                Vec3::new(x0, 0.0, z0),
                Vec3::new(x0 + w, y1, z0 + w),
                ground.clone(),
            )));
        }
    }
    world.add(Arc::new(BvhNode::from_list(boxes, &mut rng)));

    let light: Arc<dyn Material> = Arc::new(DiffuseLight::from_color(Color::new(7.0, 7.0, 7.0)));
    world.add(Arc::new(XzRect::new(123.0, 423.0, 147.0, 412.0, 554.0, light)));

    // Motion-blurred diffuse sphere
    let center0 = Vec3::new(400.0, 400.0, 200.0);
    let center1 = center0 + Vec3::new(30.0, 0.0, 0.0);
    world.add(Arc::new(MovingSphere::new(
        center0,
        center1,
        0.0,
        1.0,
        50.0,
        Arc::new(Lambertian::from_color(Color::new(0.7, 0.3, 0.1))),
    )));

    world.add(Arc::new(Sphere::new(
        Vec3::new(260.0, 150.0, 45.0),
        50.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 150.0, 145.0),
        50.0,
        Arc::new(Metal::new(Color::new(0.8, 0.8, 0.9), 1.0)),
    )));

    // Glass sphere with a blue scattering interior
    let boundary: Arc<dyn Hittable> = Arc::new(Sphere::new(
        Vec3::new(360.0, 150.0, 145.0),
        70.0,
        Arc::new(Dielectric::new(1.5)),
    ));
    world.add(boundary.clone());
    world.add(Arc::new(ConstantMedium::from_color(
        boundary,
        0.2,
        Color::new(0.2, 0.4, 0.9),
    )));

    // Thin mist covering the whole scene
    let mist_boundary: Arc<dyn Hittable> = Arc::new(Sphere::new(
        Vec3::ZERO,
        5000.0,
        Arc::new(Dielectric::new(1.5)),
    ));
    world.add(Arc::new(ConstantMedium::from_color(
        mist_boundary,
        0.0001,
        Color::ONE,
    )));

    let earth_texture: Arc<dyn Texture> = Arc::new(ImageTexture::load("assets/earthmap.jpg"));
    world.add(Arc::new(Sphere::new(
        Vec3::new(400.0, 200.0, 400.0),
        100.0,
        Arc::new(Lambertian::new(earth_texture)),
    )));

    let noise: Arc<dyn Texture> = Arc::new(NoiseTexture::new(0.1, &mut rng));
    world.add(Arc::new(Sphere::new(
        Vec3::new(220.0, 280.0, 300.0),
        80.0,
        Arc::new(Lambertian::new(noise)),
    )));

    // A rotated cube of a thousand small white spheres
    let white: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.73, 0.73, 0.73)));
    let mut cluster = HittableList::new();
    for _ in 0..1000 {
        let center = Vec3::new(
            gen_range_f32(&mut rng, 0.0, 165.0),
            gen_range_f32(&mut rng, 0.0, 165.0),
            gen_range_f32(&mut rng, 0.0, 165.0),
        );
        cluster.add(Arc::new(Sphere::new(center, 10.0, white.clone())));
    }
    let cluster = Arc::new(BvhNode::from_list(cluster, &mut rng));
    world.add(Arc::new(Translate::new(
        Arc::new(RotateY::new(cluster, 15.0)),
        Vec3::new(-100.0, 270.0, 395.0),
    )));

    Scene {
        world: Arc::new(BvhNode::from_list(world, &mut rng)),
        camera: sky_camera(
            Vec3::new(478.0, 278.0, -600.0),
            Vec3::new(278.0, 278.0, 0.0),
            40.0,
            0.0,
            10.0,
        ),
        background: Color::ZERO,
    }
}

/// One gray sphere under a sky. Small and fast; used as a smoke-test scene.
pub fn single_sphere() -> Scene {
    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Lambertian::new(Arc::new(SolidColor::from_rgb(0.5, 0.5, 0.5)))),
    )));

    Scene {
        world: Arc::new(world),
        camera: sky_camera(Vec3::ZERO, Vec3::NEG_Z, 90.0, 0.0, 1.0),
        background: SKY,
    }
}

/// Ground plane with diffuse, metal and glass spheres side by side.
pub fn three_spheres() -> Scene {
    let mut world = HittableList::new();

    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Arc::new(Lambertian::from_color(Color::new(0.8, 0.8, 0.0))),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Lambertian::from_color(Color::new(0.1, 0.2, 0.5))),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(-1.0, 0.0, -1.0),
        0.5,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(1.0, 0.0, -1.0),
        0.5,
        Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3)),
    )));

    Scene {
        world: Arc::new(world),
        camera: sky_camera(Vec3::ZERO, Vec3::NEG_Z, 90.0, 0.0, 1.0),
        background: SKY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HitRecord;
    use ember_math::{Interval, Ray};

    #[test]
    fn test_every_name_resolves() {
        for name in SCENE_NAMES {
            assert!(scene_by_name(name).is_some(), "missing scene {name}");
        }
        assert!(scene_by_name("no_such_scene").is_none());
    }

    #[test]
    fn test_scene_construction_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = random_spheres();
        let b = random_spheres();

        // Identical geometry: a shared probe ray must land at the same depth
        let ray = Ray::new(Vec3::new(13.0, 2.0, 3.0), Vec3::new(-13.0, -1.0, -3.0), 0.5);
        let mut rec_a = HitRecord::default();
        let mut rec_b = HitRecord::default();
        let window = Interval::new(0.001, f32::INFINITY);
        let hit_a = a.world.hit(&ray, window, &mut rng, &mut rec_a);
        let hit_b = b.world.hit(&ray, window, &mut rng, &mut rec_b);

        assert_eq!(hit_a, hit_b);
        if hit_a {
            assert_eq!(rec_a.t, rec_b.t);
        }
    }

    #[test]
    fn test_cornell_box_probe() {
        let mut rng = StdRng::seed_from_u64(1);
        let scene = cornell_box();

        // Above both blocks, parallel to the view axis: hits the back wall
        let origin = Vec3::new(278.0, 500.0, -800.0);
        let ray = Ray::new_simple(origin, Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(scene
            .world
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng, &mut rec));
        assert!((rec.p.z - 555.0).abs() < 1e-2);
        assert_eq!(scene.background, Color::ZERO);
    }

    #[test]
    fn test_sky_scenes_use_sky_background() {
        assert_eq!(random_spheres().background, SKY);
        assert_eq!(three_spheres().background, SKY);
        assert_eq!(simple_light().background, Color::ZERO);
    }
}
