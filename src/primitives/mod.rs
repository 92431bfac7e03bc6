mod mesh;
mod triangle;

pub use mesh::*;
pub use triangle::*;
