// Render a customized box room with both renderers.

use anyhow::Result;

use nori_validate::scene::{make_cbox_scene, make_material, CboxColors};
use nori_validate::utils::logging::init_logging;
use nori_validate::validation::ValidationSuite;

fn main() -> Result<()> {
    init_logging();

    let mut val = ValidationSuite::new("cbox_demo", false)?;

    let mut cbox = make_cbox_scene(
        "custom_cbox",
        CboxColors {
            main_walls: [0.5, 0.5, 0.5],
            left_wall: [0.15, 0.2, 1.0],
            right_wall: [0.95, 0.4, 0.0],
            emitter: [5.0, 5.0, 5.0],
            cuboid: [1.0, 0.0, 0.2],
            ..Default::default()
        },
    );
    cbox.set_quality("m")?;

    let mirror = make_material("mirror", &[]);
    cbox.set_bsdf("ball", mirror)?;

    val.register_scene(&cbox)?;
    val.render()
}
