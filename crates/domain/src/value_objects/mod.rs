//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod time_point;
mod time_window;
mod timezone;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use time_point::TimePoint;
pub use time_window::{DEFAULT_WINDOW_HOURS, TimeWindow};
pub use timezone::Timezone;
