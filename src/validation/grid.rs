//! Comparison grid compositing
//!
//! Each registered scene contributes one cell, placed row-major. PNG grids
//! are for eyeballing; EXR grids keep the float radiance for numeric
//! comparison.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{Rgb32FImage, RgbImage};

use super::exr::{read_exr, write_exr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: u32,
    pub cols: u32,
}

impl GridLayout {
    /// Cell position for index `i`, row-major.
    fn cell(&self, i: usize) -> (u32, u32) {
        (i as u32 % self.cols, i as u32 / self.cols)
    }
}

/// Resolve a grid layout from the cell count and optional row/column
/// constraints: unset both → a single row; set one → the other is the
/// ceiling division.
pub fn grid_layout(count: usize, rows: Option<u32>, cols: Option<u32>) -> GridLayout {
    let count = count as u32;
    match (rows, cols) {
        (None, None) => GridLayout { rows: 1, cols: count },
        (None, Some(cols)) => GridLayout {
            rows: count.div_ceil(cols),
            cols,
        },
        (Some(rows), None) => GridLayout {
            rows,
            cols: count.div_ceil(rows),
        },
        (Some(rows), Some(cols)) => GridLayout { rows, cols },
    }
}

pub fn compose_png_grid(
    cells: &[PathBuf],
    layout: GridLayout,
    cell_resolution: u32,
    output: &Path,
) -> Result<()> {
    let mut grid = RgbImage::new(layout.cols * cell_resolution, layout.rows * cell_resolution);

    for (i, path) in cells.iter().enumerate() {
        let cell = image::open(path)
            .with_context(|| format!("failed to read {}", path.display()))?
            .into_rgb8();
        let cell = imageops::resize(&cell, cell_resolution, cell_resolution, FilterType::Triangle);
        let (col, row) = layout.cell(i);
        imageops::replace(
            &mut grid,
            &cell,
            (col * cell_resolution) as i64,
            (row * cell_resolution) as i64,
        );
    }

    grid.save(output)
        .with_context(|| format!("failed to write {}", output.display()))
}

pub fn compose_exr_grid(
    cells: &[PathBuf],
    layout: GridLayout,
    cell_resolution: u32,
    output: &Path,
) -> Result<()> {
    let mut grid =
        Rgb32FImage::new(layout.cols * cell_resolution, layout.rows * cell_resolution);

    for (i, path) in cells.iter().enumerate() {
        let cell = read_exr(path)?;
        let cell = imageops::resize(&cell, cell_resolution, cell_resolution, FilterType::CatmullRom);
        let (col, row) = layout.cell(i);
        imageops::replace(
            &mut grid,
            &cell,
            (col * cell_resolution) as i64,
            (row * cell_resolution) as i64,
        );
    }

    write_exr(output, &grid)
}
