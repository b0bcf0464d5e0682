//! Validation suite orchestration
//!
//! A suite is a caller-owned run aggregate: it collects scene variants,
//! writes both dialect documents per variant, drives the two renderer
//! executables, and composes comparison grids from their outputs. Scenes
//! are deep-copied at registration so a caller can keep mutating one
//! template across many registrations.

pub mod exr;
pub mod grid;

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use image::DynamicImage;
use tracing::{error, info};

use crate::config::ValidationConfig;
use crate::convert::convert_scene_file;
use crate::scene::Scene;

pub use grid::{compose_exr_grid, compose_png_grid, grid_layout, GridLayout};

/// Options for [`ValidationSuite::make_grid`].
#[derive(Debug, Clone)]
pub struct GridOptions {
    pub name: String,
    pub rows: Option<u32>,
    pub cols: Option<u32>,
    pub cell_resolution: u32,
    /// Write a `<name>_labels.txt` sidecar mapping cell index to label.
    pub generate_labels: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            name: "grid".to_string(),
            rows: None,
            cols: None,
            cell_resolution: 128,
            generate_labels: false,
        }
    }
}

pub struct ValidationSuite {
    name: String,
    nori_only: bool,
    config: ValidationConfig,
    scene_directory: PathBuf,
    render_directory: PathBuf,
    log_directory: PathBuf,
    scenes: Vec<Scene>,
    scene_labels: Vec<String>,
}

impl ValidationSuite {
    /// Create a suite using `validation.toml` (or defaults) for paths.
    pub fn new(name: &str, nori_only: bool) -> Result<Self> {
        Self::with_config(name, nori_only, ValidationConfig::load())
    }

    pub fn with_config(name: &str, nori_only: bool, config: ValidationConfig) -> Result<Self> {
        let directory = config.output_root.join(name);
        let scene_directory = directory.join("scenes");
        let render_directory = directory.join("renders");
        let log_directory = directory.join("logs");
        for dir in [&directory, &scene_directory, &render_directory, &log_directory] {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        info!("Created validation suite: {}", name);

        Ok(Self {
            name: name.to_string(),
            nori_only,
            config,
            scene_directory,
            render_directory,
            log_directory,
            scenes: Vec::new(),
            scene_labels: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn register_scene(&mut self, scene: &Scene) -> Result<()> {
        self.register_labeled_scene(scene, "")
    }

    /// Snapshot a scene into the suite: the copy gets an index-suffixed
    /// name, its Nori document is written out and (unless `nori_only`)
    /// translated to the Mitsuba dialect alongside.
    pub fn register_labeled_scene(&mut self, scene: &Scene, label: &str) -> Result<()> {
        let mut scene = scene.clone();
        let index = self.scenes.len();
        let instance_name = format!("{}_{}", scene.name, index);

        let nori_path = self.scene_directory.join(format!("{}_nori.xml", instance_name));
        let document = scene
            .generate()
            .with_context(|| format!("failed to generate scene {}", instance_name))?;
        fs::write(&nori_path, document)
            .with_context(|| format!("failed to write {}", nori_path.display()))?;

        if !self.nori_only {
            let mitsuba_path = self
                .scene_directory
                .join(format!("{}_mitsuba.xml", instance_name));
            convert_scene_file(&nori_path, Some(&mitsuba_path))
                .with_context(|| format!("failed to translate scene {}", instance_name))?;
        }

        scene.name = instance_name;
        info!("Generated scene {}", scene.name);
        self.scenes.push(scene);
        self.scene_labels.push(label.to_string());
        Ok(())
    }

    /// Render every registered scene with Nori, and with Mitsuba unless
    /// the suite is `nori_only`. Each render leaves a log file describing
    /// the scene settings and output names.
    pub fn render(&self) -> Result<()> {
        for scene in &self.scenes {
            info!("Rendering scene {}", scene.name);
            self.render_nori(scene)?;
            self.write_log(scene, "nori")?;

            if !self.nori_only {
                self.render_mitsuba(scene)?;
                self.write_log(scene, "mitsuba")?;
            }
        }
        Ok(())
    }

    fn render_nori(&self, scene: &Scene) -> Result<()> {
        let name = format!("{}_nori", scene.name);
        let scene_path = self.scene_directory.join(format!("{}.xml", name));

        let output = Command::new(&self.config.nori_executable)
            .arg("-b")
            .arg(&scene_path)
            .output()
            .with_context(|| {
                format!(
                    "failed to run {}",
                    self.config.nori_executable.display()
                )
            })?;
        if !output.status.success() {
            error!("Error rendering: {}", String::from_utf8_lossy(&output.stderr));
            bail!("nori render of {} failed", scene.name);
        }

        // Nori drops its outputs next to the scene file.
        for extension in ["png", "exr"] {
            let from = self.scene_directory.join(format!("{}.{}", name, extension));
            let to = self.render_directory.join(format!("{}.{}", name, extension));
            fs::rename(&from, &to)
                .with_context(|| format!("missing render output {}", from.display()))?;
        }
        Ok(())
    }

    fn render_mitsuba(&self, scene: &Scene) -> Result<()> {
        let name = format!("{}_mitsuba", scene.name);
        let scene_path = self.scene_directory.join(format!("{}.xml", name));
        let exr_path = self.render_directory.join(format!("{}.exr", name));

        let output = Command::new(&self.config.mitsuba_executable)
            .arg("-o")
            .arg(&exr_path)
            .arg(&scene_path)
            .output()
            .with_context(|| {
                format!(
                    "failed to run {}",
                    self.config.mitsuba_executable.display()
                )
            })?;
        if !output.status.success() {
            error!("Error rendering: {}", String::from_utf8_lossy(&output.stderr));
            bail!("mitsuba render of {} failed", scene.name);
        }

        // Mitsuba only writes the EXR; derive the preview PNG from it.
        let radiance = exr::read_exr(&exr_path)?;
        let png_path = self.render_directory.join(format!("{}.png", name));
        DynamicImage::ImageRgb32F(radiance)
            .to_rgb8()
            .save(&png_path)
            .with_context(|| format!("failed to write {}", png_path.display()))?;
        Ok(())
    }

    fn write_log(&self, scene: &Scene, renderer: &str) -> Result<()> {
        let path = self
            .log_directory
            .join(format!("{}_{}.log", scene.name, renderer));
        let mut log = fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;

        let (width, height) = scene.resolution();
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        writeln!(log, "Scene name: {}", scene.name)?;
        writeln!(log, "Renderer: {}", renderer)?;
        if renderer == "mitsuba" {
            writeln!(log, "Integrator: Mitsuba equivalent of {}", scene.integrator())?;
        } else {
            writeln!(log, "Integrator: {}", scene.integrator())?;
        }
        writeln!(log, "Sampler: {}", scene.sampler_kind())?;
        writeln!(log, "Resolution: {} x {}", width, height)?;
        writeln!(log, "SPP: {}", scene.spp())?;
        writeln!(
            log,
            "Renders: {}_{}.png, {}_{}.exr",
            scene.name, renderer, scene.name, renderer
        )?;
        writeln!(log, "Rendered at {}", timestamp)?;
        Ok(())
    }

    /// Compose the per-renderer comparison grids from the rendered cells.
    pub fn make_grid(&self, options: &GridOptions) -> Result<()> {
        let layout = grid_layout(self.scenes.len(), options.rows, options.cols);
        info!(
            "Composing {}x{} grid {} from {} scenes",
            layout.rows,
            layout.cols,
            options.name,
            self.scenes.len()
        );

        let renderers: &[&str] = if self.nori_only {
            &["nori"]
        } else {
            &["nori", "mitsuba"]
        };
        for renderer in renderers {
            let pngs: Vec<PathBuf> = self
                .scenes
                .iter()
                .map(|s| self.render_directory.join(format!("{}_{}.png", s.name, renderer)))
                .collect();
            let exrs: Vec<PathBuf> = self
                .scenes
                .iter()
                .map(|s| self.render_directory.join(format!("{}_{}.exr", s.name, renderer)))
                .collect();

            compose_png_grid(
                &pngs,
                layout,
                options.cell_resolution,
                &self
                    .render_directory
                    .join(format!("{}_{}.png", options.name, renderer)),
            )?;
            compose_exr_grid(
                &exrs,
                layout,
                options.cell_resolution,
                &self
                    .render_directory
                    .join(format!("{}_{}.exr", options.name, renderer)),
            )?;
        }

        if options.generate_labels {
            self.write_labels(&options.name)?;
        }
        Ok(())
    }

    fn write_labels(&self, grid_name: &str) -> Result<()> {
        let path = self
            .render_directory
            .join(format!("{}_labels.txt", grid_name));
        let mut file = fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        for (i, label) in self.scene_labels.iter().enumerate() {
            writeln!(file, "{}: {}", i, label)?;
        }
        Ok(())
    }
}
