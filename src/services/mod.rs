//! Collaborator seams: what the service needs from the transit operator, the
//! weather provider and the router, independent of who provides it.
//!
//! Concrete clients live under `crate::infra`.

pub mod models;
pub mod routing_api;
pub mod stop_locator;
pub mod transit_api;
pub mod weather_api;

pub use models::{
    Direction, EntityRecord, LatLng, LineRecord, Ride, StopRecord, Transit, VillageRecord,
    WeatherReport,
};
pub use routing_api::{RouteInterpolator, TravelMode};
pub use stop_locator::{RequestStopCache, StopLocator};
pub use transit_api::TransitApi;
pub use weather_api::WeatherApi;
