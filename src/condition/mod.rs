pub mod model;
pub mod operator;
pub mod trace;
pub mod value;

pub use model::*;
pub use operator::*;
pub use trace::*;
pub use value::*;
