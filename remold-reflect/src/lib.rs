#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod accessors;
mod assigned;
mod builder;
mod cache;
mod error;

pub use accessors::ModelAccessors;
pub use builder::{Builder, FieldRef};
pub use cache::accessors_for;
pub use error::BuilderError;
