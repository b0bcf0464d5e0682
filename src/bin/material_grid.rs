// Sweep the preview material across a color range and grid the renders.

use anyhow::Result;

use nori_validate::scene::{make_mat_prev_scene, make_material};
use nori_validate::utils::color::{color_range, color_to_str};
use nori_validate::utils::logging::init_logging;
use nori_validate::validation::{GridOptions, ValidationSuite};

fn main() -> Result<()> {
    init_logging();

    let mut scene = make_mat_prev_scene("mat_prev");
    scene.set_spp(128);
    scene.set_resolution(128, 128);

    let mut val = ValidationSuite::new("material_grid", true)?;

    for color in color_range([1.0, 0.25, 0.0], [0.9, 0.03, 0.2], 7) {
        let material = make_material("diffuse", &[("albedo", color.into())]);
        scene.set_bsdf("material_preview", material)?;
        val.register_labeled_scene(&scene, &color_to_str(color))?;
    }

    val.render()?;
    val.make_grid(&GridOptions {
        generate_labels: true,
        ..Default::default()
    })
}
