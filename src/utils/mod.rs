pub mod color;
pub mod logging;

pub use color::{color_range, color_range_oklab, color_to_str, oklab_to_rgb, rgb_to_oklab, Rgb};
