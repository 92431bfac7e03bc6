#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::too_many_lines,
    clippy::wildcard_imports
)]

mod core;
mod error;
mod primitives;
mod scene;

pub use crate::core::{
    parse_color_override, parse_reflectiveness_override, EmissionOptions, Shading,
    ShadingVariant, SurfaceAttributes, DEFAULT_SENTINEL,
};
pub use crate::error::{Error, Result};
pub use crate::primitives::{
    triangulate, MaterialBlock, MeshModel, Triangle, Triangles, VertexLayout, DEFAULT_MATERIAL,
};
pub use crate::scene::{EmitSummary, Records, SceneConverter, SceneRecord, ShadedTriangle};
