//! Presentation-layer services for Fieldwatch
//!
//! The state surface the views bind to: the mutable site list with its
//! loading/error state, a read-only handle over the weather sync
//! engine, precipitation ordering, and display formatting for the
//! three cache states.

pub mod display;
pub mod site_service;
pub mod sort;
pub mod weather_service;

pub use site_service::SiteService;
pub use sort::sort_by_precipitation;
pub use weather_service::WeatherService;
