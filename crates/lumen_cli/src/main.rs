//! `lumen` - render a built-in scene to a PPM file.

mod cli;
mod scenes;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{init_logger, Args};
use lumen_renderer::{build_scene, render, render_parallel, save_ppm};
use rand::rngs::StdRng;
use rand::SeedableRng;
use settings::FileConfig;
use std::time::Instant;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let start = Instant::now();
    let scene = args.scene.build();
    let config = settings::resolve(&args, &scene, file)?;
    let camera = scene.camera(config.aspect_ratio());

    let mut rng = StdRng::seed_from_u64(config.seed);
    let world = build_scene(scene.items, args.accel.into(), &mut rng)
        .with_context(|| format!("building scene {:?}", args.scene))?;
    log::info!("Scene {:?} built in {:?}", args.scene, start.elapsed());

    let image = if args.single_thread {
        render(&camera, world.as_ref(), &config)
    } else {
        render_parallel(&camera, world.as_ref(), &config)
    };

    save_ppm(&image, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    Ok(())
}
