//! Built-in demo scenes.

use crate::cli::SceneChoice;
use lumen_renderer::{
    Camera, CheckerTexture, Color, Dielectric, DiffuseLight, Lambertian, Material, Metal,
    Point3, Shape, Vec3,
};
use std::sync::Arc;

/// Shapes, viewpoint and background for one demo.
pub struct DemoScene {
    pub items: Vec<(Shape, Arc<dyn Material>)>,
    pub background: Color,
    /// Preferred aspect ratio when the image size is not given.
    pub aspect_ratio: f32,
    look_from: Point3,
    look_at: Point3,
    vfov: f32,
}

impl DemoScene {
    /// Camera for this scene at the given image aspect ratio.
    pub fn camera(&self, aspect_ratio: f32) -> Camera {
        Camera::looking_at(self.look_from, self.look_at, Vec3::Y, self.vfov, aspect_ratio)
    }
}

impl SceneChoice {
    pub fn build(self) -> DemoScene {
        match self {
            SceneChoice::TwoSpheres => two_spheres(),
            SceneChoice::Materials => materials(),
            SceneChoice::SimpleLight => simple_light(),
            SceneChoice::CornellBox => cornell_box(),
        }
    }
}

fn sphere(x: f32, y: f32, z: f32, radius: f32) -> Shape {
    Shape::Sphere {
        center: Point3::new(x, y, z),
        radius,
    }
}

/// A diffuse ball resting on a huge diffuse ground ball.
fn two_spheres() -> DemoScene {
    let grey: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));

    DemoScene {
        items: vec![
            (sphere(0.0, 0.0, -1.0, 0.5), grey.clone()),
            (sphere(0.0, -100.5, -1.0, 100.0), grey),
        ],
        background: Color::new(0.7, 0.8, 1.0),
        aspect_ratio: 16.0 / 9.0,
        look_from: Point3::ZERO,
        look_at: Point3::new(0.0, 0.0, -1.0),
        vfov: 90.0,
    }
}

/// One sphere of each scattering material.
fn materials() -> DemoScene {
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let bubble: Arc<dyn Material> = Arc::new(Dielectric::new(1.0 / 1.5));
    let gold: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3));

    DemoScene {
        items: vec![
            (sphere(0.0, -100.5, -1.0, 100.0), ground),
            (sphere(0.0, 0.0, -1.2, 0.5), center),
            (sphere(-1.0, 0.0, -1.0, 0.5), glass),
            // Air pocket inside the glass ball makes it read as hollow.
            (sphere(-1.0, 0.0, -1.0, 0.4), bubble),
            (sphere(1.0, 0.0, -1.0, 0.5), gold),
        ],
        background: Color::new(0.7, 0.8, 1.0),
        aspect_ratio: 16.0 / 9.0,
        look_from: Point3::ZERO,
        look_at: Point3::new(0.0, 0.0, -1.0),
        vfov: 90.0,
    }
}

/// Checkered ground and a ball lit only by a panel and a glowing sphere.
fn simple_light() -> DemoScene {
    let checker: Arc<dyn Material> = Arc::new(Lambertian::with_texture(Arc::new(
        CheckerTexture::from_colors(3.0, Color::new(0.2, 0.3, 0.1), Color::splat(0.9)),
    )));
    let clay: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.6, 0.4, 0.3)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(4.0)));

    DemoScene {
        items: vec![
            (sphere(0.0, -1000.0, 0.0, 1000.0), checker),
            (sphere(0.0, 2.0, 0.0, 2.0), clay),
            (
                Shape::XyRect {
                    x0: 3.0,
                    x1: 5.0,
                    y0: 1.0,
                    y1: 3.0,
                    k: -2.0,
                },
                light.clone(),
            ),
            (sphere(0.0, 7.0, 0.0, 2.0), light),
        ],
        background: Color::ZERO,
        aspect_ratio: 16.0 / 9.0,
        look_from: Point3::new(26.0, 3.0, 6.0),
        look_at: Point3::new(0.0, 2.0, 0.0),
        vfov: 20.0,
    }
}

/// Closed box with coloured side walls and a ceiling light.
fn cornell_box() -> DemoScene {
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(15.0)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let steel: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.85, 0.88), 0.0));

    let wall = |k: f32| Shape::YzRect {
        y0: 0.0,
        y1: 555.0,
        z0: 0.0,
        z1: 555.0,
        k,
    };
    let floor_or_ceiling = |k: f32| Shape::XzRect {
        x0: 0.0,
        x1: 555.0,
        z0: 0.0,
        z1: 555.0,
        k,
    };

    DemoScene {
        items: vec![
            (wall(555.0), green),
            (wall(0.0), red),
            (
                Shape::XzRect {
                    x0: 213.0,
                    x1: 343.0,
                    z0: 227.0,
                    z1: 332.0,
                    k: 554.0,
                },
                light,
            ),
            (floor_or_ceiling(0.0), white.clone()),
            (floor_or_ceiling(555.0), white.clone()),
            (
                Shape::XyRect {
                    x0: 0.0,
                    x1: 555.0,
                    y0: 0.0,
                    y1: 555.0,
                    k: 555.0,
                },
                white,
            ),
            (sphere(190.0, 90.0, 190.0, 90.0), glass),
            (sphere(370.0, 120.0, 370.0, 120.0), steel),
        ],
        background: Color::ZERO,
        aspect_ratio: 1.0,
        look_from: Point3::new(278.0, 278.0, -800.0),
        look_at: Point3::new(278.0, 278.0, 0.0),
        vfov: 40.0,
    }
}
