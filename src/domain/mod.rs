//! Domain Layer
//!
//! Entities, value objects, errors and ports. No I/O lives here.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;

pub use entities::{GeoResult, UNKNOWN};
pub use errors::{InitError, LookupError};
pub use value_objects::DatabaseType;
