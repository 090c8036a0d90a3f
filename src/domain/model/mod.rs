pub mod component;
pub mod outcome;

pub use component::*;
pub use outcome::*;
