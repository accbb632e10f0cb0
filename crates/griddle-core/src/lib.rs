#[macro_use]
mod error;
pub use error::Error;

pub mod config;
pub mod driver;
pub mod fixture;
pub mod hash;
pub mod schema;
pub mod value;

pub use schema::Registry;
pub use value::{ScalarType, Value};

/// A Result type alias that uses Griddle's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
