mod material;
mod options;

pub use material::*;
pub use options::*;
