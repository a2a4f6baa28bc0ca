pub mod class;
pub mod prediction;
pub mod sample;

pub use class::*;
pub use prediction::*;
pub use sample::*;
