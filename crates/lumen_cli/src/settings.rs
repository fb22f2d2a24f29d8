//! Render settings resolution: defaults, then scene, then config file, then flags.

use crate::cli::Args;
use crate::scenes::DemoScene;
use anyhow::{Context, Result};
use lumen_renderer::RenderConfig;
use serde_json::{Map, Value};
use std::path::Path;

/// Keys that size the image; handled apart from the rest so a lone width or
/// height still follows the scene's aspect ratio.
const WIDTH_KEY: &str = "image_width";
const HEIGHT_KEY: &str = "image_height";

/// `RenderConfig` fields read from a JSON file. Only the keys present in the
/// file override anything.
#[derive(Debug, Default)]
pub struct FileConfig {
    fields: Map<String, Value>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Parse a JSON object of `RenderConfig` fields.
    ///
    /// Unknown keys and mistyped values are rejected here rather than at
    /// merge time.
    pub fn parse(text: &str) -> Result<Self> {
        let fields: Map<String, Value> = serde_json::from_str(text)?;
        serde_json::from_value::<RenderConfig>(Value::Object(fields.clone()))?;
        Ok(Self { fields })
    }

    fn dimension(&self, key: &str) -> Option<u32> {
        self.fields
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|value| u32::try_from(value).ok())
    }
}

/// Merge every settings layer into one config.
///
/// A width without a height (or the reverse) derives the other side from
/// the scene's aspect ratio.
pub fn resolve(args: &Args, scene: &DemoScene, file: FileConfig) -> Result<RenderConfig> {
    let defaults = RenderConfig::default();

    let width = args.width.or(file.dimension(WIDTH_KEY));
    let height = args.height.or(file.dimension(HEIGHT_KEY));
    let (image_width, image_height) = match (width, height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, (w as f32 / scene.aspect_ratio).round() as u32),
        (None, Some(h)) => ((h as f32 * scene.aspect_ratio).round() as u32, h),
        (None, None) => (
            defaults.image_width,
            (defaults.image_width as f32 / scene.aspect_ratio).round() as u32,
        ),
    };

    let base = RenderConfig {
        image_width,
        image_height,
        background: scene.background,
        ..defaults
    };

    let mut merged = serde_json::to_value(&base)?;
    if let Value::Object(map) = &mut merged {
        for (key, value) in file.fields {
            if key != WIDTH_KEY && key != HEIGHT_KEY {
                map.insert(key, value);
            }
        }
    }
    let mut config: RenderConfig =
        serde_json::from_value(merged).context("merging config file over scene defaults")?;

    if let Some(samples) = args.samples {
        config.samples_per_pixel = samples;
    }
    if let Some(depth) = args.depth {
        config.max_depth = depth;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    Ok(config.normalized())
}
