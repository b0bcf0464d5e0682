// nori-validate: validation harness for the Nori educational renderer
// Build scenes once, render them twice, compare the results

pub mod config;
pub mod convert;
pub mod scene;
pub mod utils;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::ValidationConfig;
pub use convert::{convert_scene_file, translate_scene, ConvertError, ConvertResult};
pub use scene::{
    make_cbox_scene, make_mat_prev_scene, make_material, CboxColors, MaterialValue, Scene,
    SceneError, SceneResult, TagNode,
};
pub use validation::{GridOptions, ValidationSuite};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
