//! End-to-end checks through the public scene-build and shading calls.

use lumen_renderer::{
    build_scene, ray_color, Acceleration, Camera, Color, DiffuseLight, Hittable, Interval,
    Lambertian, Material, Metal, Point3, Ray, Shape, Vec3, HIT_EPSILON,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn window() -> Interval {
    Interval::new(HIT_EPSILON, f32::INFINITY)
}

fn grey() -> Arc<dyn Material> {
    Arc::new(Lambertian::new(Color::splat(0.5)))
}

#[test]
fn center_ray_hits_sphere_facing_camera() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(1);
    let items = vec![(
        Shape::Sphere {
            center: Point3::new(0.0, 0.0, -2.0),
            radius: 0.5,
        },
        grey(),
    )];

    for acceleration in [Acceleration::List, Acceleration::Bvh] {
        let world = build_scene(items.clone(), acceleration, &mut rng).expect("scene builds");
        let camera = Camera::new(90.0, 16.0 / 9.0);
        let ray = camera.get_ray(0.5, 0.5);

        let rec = world.hit(&ray, window()).expect("center ray hits");
        assert!((rec.t - 1.5).abs() < 1e-4);
        assert!((rec.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4);

        // Depth 1 shades without recursing into the bounce.
        let color = ray_color(&ray, Color::ONE, world.as_ref(), 1, &mut rng);
        assert!(color.x.is_finite());
    }
}

#[test]
fn empty_scene_returns_background() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(2);
    let world = build_scene(Vec::new(), Acceleration::List, &mut rng).expect("empty list");
    let background = Color::new(0.2, 0.4, 0.9);

    for _ in 0..100 {
        let dir = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let ray = Ray::new_simple(Point3::ZERO, dir);
        assert_eq!(
            ray_color(&ray, background, world.as_ref(), 50, &mut rng),
            background
        );
    }
}

#[test]
fn light_sphere_returns_its_emission() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(3);
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(4.0)));
    let world = build_scene(
        vec![(
            Shape::Sphere {
                center: Point3::new(0.0, 0.0, -3.0),
                radius: 1.0,
            },
            light,
        )],
        Acceleration::Bvh,
        &mut rng,
    )
    .expect("scene builds");

    for depth in [1, 2, 10, 50] {
        let ray = Ray::new_simple(Point3::ZERO, Vec3::new(0.1, -0.1, -1.0));
        assert_eq!(
            ray_color(&ray, Color::ZERO, world.as_ref(), depth, &mut rng),
            Color::splat(4.0)
        );
    }
}

#[test]
fn depth_zero_is_black_everywhere() {
    let mut rng = StdRng::seed_from_u64(4);
    let world = build_scene(
        vec![(
            Shape::Sphere {
                center: Point3::new(0.0, 0.0, -1.0),
                radius: 0.5,
            },
            Arc::new(DiffuseLight::new(Color::ONE)) as Arc<dyn Material>,
        )],
        Acceleration::List,
        &mut rng,
    )
    .expect("scene builds");

    for dir in [Vec3::new(0.0, 0.0, -1.0), Vec3::Y, Vec3::new(0.3, 0.0, 1.0)] {
        let ray = Ray::new_simple(Point3::ZERO, dir);
        assert_eq!(
            ray_color(&ray, Color::ONE, world.as_ref(), 0, &mut rng),
            Color::ZERO
        );
    }
}

#[test]
fn shared_edge_between_rectangles_hits_exactly_one() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(5);
    let left: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(1.0, 0.0, 0.0)));
    let right: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.0, 1.0, 0.0)));
    let items = vec![
        (
            Shape::XyRect {
                x0: -1.0,
                x1: 0.0,
                y0: -1.0,
                y1: 1.0,
                k: -2.0,
            },
            left,
        ),
        (
            Shape::XyRect {
                x0: 0.0,
                x1: 1.0,
                y0: -1.0,
                y1: 1.0,
                k: -2.0,
            },
            right,
        ),
    ];

    let rects: Vec<Arc<dyn Hittable>> = items
        .iter()
        .map(|(shape, material)| shape.into_hittable(Arc::clone(material)))
        .collect();

    for acceleration in [Acceleration::List, Acceleration::Bvh] {
        let world = build_scene(items.clone(), acceleration, &mut rng).expect("scene builds");

        for y in [-0.75_f32, 0.0, 0.5] {
            // Aimed exactly at x = 0 on the plane z = -2.
            let ray = Ray::new_simple(Point3::ZERO, Vec3::new(0.0, y, -2.0));

            // The seam belongs to both rectangles, at the same t.
            let own_hits: Vec<f32> = rects
                .iter()
                .map(|rect| rect.hit(&ray, window()).expect("edge is inclusive").t)
                .collect();
            assert_eq!(own_hits[0], own_hits[1]);

            // The scene still reports a single record at that t.
            let rec = world.hit(&ray, window()).expect("no gap at the seam");
            assert_eq!(rec.t, own_hits[0]);
            assert!((rec.t - 1.0).abs() < 1e-5);
            assert!(rec.p.x.abs() < 1e-5);
        }
    }
}

/// Random spheres and rectangles for comparing acceleration modes.
fn random_scene(rng: &mut StdRng, count: usize) -> Vec<(Shape, Arc<dyn Material>)> {
    let diffuse = grey();
    let metal: Arc<dyn Material> = Arc::new(Metal::new(Color::splat(0.8), 0.1));

    (0..count)
        .map(|i| {
            let material = if i % 2 == 0 { diffuse.clone() } else { metal.clone() };
            let a = rng.gen_range(-8.0..8.0);
            let b = rng.gen_range(-8.0..8.0);
            let k = rng.gen_range(-8.0..8.0);
            let w = rng.gen_range(0.2..3.0);
            let h = rng.gen_range(0.2..3.0);
            let shape = match i % 4 {
                0 => Shape::Sphere {
                    center: Point3::new(a, b, k),
                    radius: rng.gen_range(0.1..1.5),
                },
                1 => Shape::XyRect {
                    x0: a,
                    x1: a + w,
                    y0: b,
                    y1: b + h,
                    k,
                },
                2 => Shape::XzRect {
                    x0: a,
                    x1: a + w,
                    z0: b,
                    z1: b + h,
                    k,
                },
                _ => Shape::YzRect {
                    y0: a,
                    y1: a + w,
                    z0: b,
                    z1: b + h,
                    k,
                },
            };
            (shape, material)
        })
        .collect()
}

#[test]
fn bvh_and_list_agree_on_random_scenes() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(6);

    for scene_index in 0..8 {
        let count = 1 + scene_index * 9;
        let items = random_scene(&mut rng, count);
        let list = build_scene(items.clone(), Acceleration::List, &mut rng).expect("list");
        let bvh = build_scene(items, Acceleration::Bvh, &mut rng).expect("bvh");

        for _ in 0..500 {
            let origin = Point3::new(
                rng.gen_range(-12.0..12.0),
                rng.gen_range(-12.0..12.0),
                rng.gen_range(-12.0..12.0),
            );
            let target = Point3::new(
                rng.gen_range(-8.0..8.0),
                rng.gen_range(-8.0..8.0),
                rng.gen_range(-8.0..8.0),
            );
            let ray = Ray::new_simple(origin, target - origin);

            match (list.hit(&ray, window()), bvh.hit(&ray, window())) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    assert!((a.t - b.t).abs() < 1e-4, "t {} vs {}", a.t, b.t);
                    assert!((a.normal - b.normal).length() < 1e-4);
                }
                (a, b) => panic!(
                    "list hit {:?} but bvh hit {:?} (scene {scene_index})",
                    a.map(|r| r.t),
                    b.map(|r| r.t)
                ),
            }
        }
    }
}
