pub mod artifact;
pub mod conversion;
pub mod index;
pub mod model;
mod raw;

pub use artifact::*;
pub use conversion::*;
pub use index::*;
pub use model::*;
