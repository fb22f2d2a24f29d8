//! PPM (P3) image output.

use crate::ImageBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write `image` as plain-text PPM: header, then one `r g b` line per pixel,
/// top row first.
pub fn write_ppm<W: Write>(writer: &mut W, image: &ImageBuffer) -> Result<(), OutputError> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in image.to_rgb() {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write `image` to a PPM file at `path`, replacing any existing file.
pub fn save_ppm(image: &ImageBuffer, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_ppm(&mut writer, image)?;
    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
