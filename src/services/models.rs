//! Typed records handed across the collaborator traits.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// A geographic coordinate. Serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl Serialize for LatLng {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lat, self.lng].serialize(serializer)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Line direction as De Lijn spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Outbound.
    Heen,
    /// Return.
    Terug,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Heen => "HEEN",
            Direction::Terug => "TERUG",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HEEN" => Ok(Direction::Heen),
            "TERUG" => Ok(Direction::Terug),
            other => Err(ApiError::BadRequest(format!(
                "Direction can only be 'HEEN' or 'TERUG', got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub number: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VillageRecord {
    pub id: i64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StopRecord {
    pub number: u32,
    pub entity_number: Option<u32>,
    pub village: Option<String>,
    pub description: String,
    pub position: Option<LatLng>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineRecord {
    pub number: u32,
    pub entity_number: u32,
    pub description: String,
    pub transport_type: String,
    pub service_type: String,
}

/// One scheduled stop visit within a [`Ride`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transit {
    pub stop_number: u32,
    /// Derived from the record's own link; `None` when the link is missing or
    /// does not end in `/{entity}/{stop}`.
    pub entity_number: Option<u32>,
    /// Timetable time, operator-local. `None` when the stop has no timetable
    /// entry on this ride.
    pub scheduled: Option<NaiveDateTime>,
}

/// One scheduled trip of a line, transits in timetable order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ride {
    pub transits: Vec<Transit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// Cloudiness in percent.
    pub clouds: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    pub wind_speed: f64,
    pub description: String,
    /// Degrees Celsius.
    pub temperature: f64,
}
