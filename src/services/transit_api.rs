//! Trait for the regional transit operator's open data API.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ApiError;
use crate::services::models::{
    Direction, EntityRecord, LineRecord, Ride, StopRecord, VillageRecord,
};

/// Abstraction over the transit operator (De Lijn in production).
#[async_trait]
pub trait TransitApi: Send + Sync {
    /// All entities (regions) of the operator.
    async fn entities(&self) -> Result<Vec<EntityRecord>, ApiError>;

    /// All villages (municipalities), names as the operator spells them.
    async fn villages(&self) -> Result<Vec<VillageRecord>, ApiError>;

    /// Every stop of the operator.
    async fn stops(&self) -> Result<Vec<StopRecord>, ApiError>;

    /// Every line of the operator.
    async fn lines(&self) -> Result<Vec<LineRecord>, ApiError>;

    /// Rides of a line in one direction, in the order the operator lists them.
    ///
    /// With `date` the timetable of that day is requested; without it the
    /// operator picks the current service day.
    async fn schedule(
        &self,
        entity: u32,
        line: u32,
        direction: Direction,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Ride>, ApiError>;

    /// Details of a single stop.
    async fn stop(&self, entity: u32, stop: u32) -> Result<StopRecord, ApiError>;
}
