//! Domain entities

mod series;

pub use series::{Sample, Series};
