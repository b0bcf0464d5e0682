//! Scene description building
//!
//! In-memory model for Nori scene documents: a generic tag tree, a scene
//! document with intention-revealing mutators on top of it, typed material
//! construction, and factories for the standard validation rigs.

pub mod builders;
pub mod material;
pub mod model;
pub mod tag;

// Re-export main types for convenience
pub use builders::{make_cbox_scene, make_mat_prev_scene, CboxColors};
pub use material::{make_material, MaterialValue};
pub use model::{Camera, Sampler, Scene};
pub use tag::{serialize_document, TagNode};

// Error types
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("object already exists in scene: {name}")]
    DuplicateObject { name: String },

    #[error("object does not exist in scene: {name}")]
    ObjectNotFound { name: String },

    #[error("quality preset not recognized: {quality}")]
    UnknownQuality { quality: String },

    #[error("scene serialization failed: {source}")]
    Serialize {
        #[from]
        source: quick_xml::Error,
    },
}

pub type SceneResult<T> = Result<T, SceneError>;
