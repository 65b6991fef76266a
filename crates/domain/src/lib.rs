//! Domain layer for tempwindow
//!
//! Temperature samples, ordered series and the time window used to slice
//! them, plus the location and timezone value objects they are fetched for.
//! This layer does no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
