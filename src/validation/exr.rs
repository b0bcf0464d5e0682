//! RGB float image io for render outputs

use std::path::Path;

use anyhow::{Context, Result};
use image::Rgb32FImage;

pub fn read_exr(path: &Path) -> Result<Rgb32FImage> {
    let image =
        image::open(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(image.into_rgb32f())
}

pub fn write_exr(path: &Path, image: &Rgb32FImage) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}
