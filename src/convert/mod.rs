//! Nori → Mitsuba scene translation
//!
//! Nori and Mitsuba describe scenes in near-identical XML shapes but with
//! different vocabularies. This module reads a Nori document, rebuilds the
//! integrator/sensor/film/sampler block the way Mitsuba expects it, and
//! rewrites the remaining elements through fixed lookup tables.

mod maps;
mod translate;

pub use translate::{convert_scene_file, translate_scene};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("malformed scene document: {reason}")]
    MalformedDocument { reason: String },

    #[error("scene parse failed: {source}")]
    Parse {
        #[from]
        source: roxmltree::Error,
    },

    #[error("scene serialization failed: {source}")]
    Serialize {
        #[from]
        source: crate::scene::SceneError,
    },

    #[error("scene file io failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type ConvertResult<T> = Result<T, ConvertError>;
