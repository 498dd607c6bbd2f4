//! Response bodies and the reshaping from operator records into them.

use serde::Serialize;

use crate::format::village_name;
use crate::services::{
    EntityRecord, LatLng, LineRecord, StopRecord, VillageRecord, WeatherReport,
};

#[derive(Debug, Serialize, PartialEq)]
pub struct Entity {
    pub number: u32,
    pub name: String,
}

impl From<EntityRecord> for Entity {
    fn from(e: EntityRecord) -> Self {
        Entity {
            number: e.number,
            name: e.description,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Village {
    pub id: i64,
    pub name: String,
}

/// Drops placeholder villages (negative id) and title-cases the rest.
pub fn villages(records: Vec<VillageRecord>) -> Vec<Village> {
    records
        .into_iter()
        .filter(|v| v.id >= 0)
        .map(|v| Village {
            id: v.id,
            name: village_name(&v.description),
        })
        .collect()
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub number: u32,
    pub village_name: Option<String>,
    pub desc: String,
    pub latlng: Option<LatLng>,
}

impl From<StopRecord> for Stop {
    fn from(s: StopRecord) -> Self {
        Stop {
            number: s.number,
            village_name: s.village,
            desc: s.description,
            latlng: s.position,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub number: u32,
    pub entity_number: u32,
    pub desc: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub service_type: String,
}

impl From<LineRecord> for Line {
    fn from(l: LineRecord) -> Self {
        Line {
            number: l.number,
            entity_number: l.entity_number,
            desc: l.description,
            kind: l.transport_type.to_lowercase(),
            service_type: l.service_type.to_lowercase(),
        }
    }
}

/// A stop as served in a line's stop list; always has a coordinate.
#[derive(Debug, Serialize, PartialEq)]
pub struct LineStop {
    pub number: u32,
    pub desc: String,
    pub village: Option<String>,
    pub latlng: LatLng,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct LineStops {
    pub stops: Vec<LineStop>,
    pub route: Vec<LatLng>,
}

impl LineStops {
    pub fn new(stops: Vec<LineStop>) -> Self {
        let route = stops.iter().map(|s| s.latlng).collect();
        LineStops { stops, route }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Weather {
    pub clouds: f64,
    pub humidity: f64,
    pub windspeed: f64,
    pub desc: String,
    pub temp: f64,
}

impl From<WeatherReport> for Weather {
    fn from(w: WeatherReport) -> Self {
        Weather {
            clouds: w.clouds,
            humidity: w.humidity,
            windspeed: w.wind_speed,
            desc: w.description,
            temp: w.temperature,
        }
    }
}
