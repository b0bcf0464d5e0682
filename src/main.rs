use std::env;
use std::path::Path;
use std::process;

use anyhow::Result;
use tracing::info;

use nori_validate::convert::convert_scene_file;
use nori_validate::utils::logging::init_logging;

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.len() > 2 {
        eprintln!("Usage: scene-convert <nori_file> [<mitsuba_file>]");
        process::exit(1);
    }

    let output = convert_scene_file(Path::new(&args[0]), args.get(1).map(Path::new))?;
    info!("Saved Mitsuba scene to {}", output.display());
    Ok(())
}
