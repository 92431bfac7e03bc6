use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The material's vertex buffer carries more than positions.
    #[error("material \"{material}\" has unsupported vertex layout {layout}")]
    UnsupportedLayout { material: String, layout: String },

    /// The material's vertex buffer does not split into whole triangles.
    #[error("material \"{material}\" has {count} vertex components, not a multiple of 9")]
    MalformedVertexCount { material: String, count: usize },

    #[error("invalid {option} override \"{value}\"")]
    InvalidOverrideValue { option: &'static str, value: String },

    #[error("failed to load mesh: {0}")]
    Load(#[from] tobj::LoadError),

    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
