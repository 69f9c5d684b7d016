pub mod fakes;
pub mod strategies;

pub use fakes::*;
