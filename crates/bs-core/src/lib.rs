pub mod defaults;
pub mod error;
pub mod geometry;
pub mod types;
pub mod value;

pub use error::BlockSeqError;
pub use geometry::*;
pub use types::*;
pub use value::*;
