//! Wire format of the De Lijn Kern Open Data API.
//!
//! Only the fields the service uses are declared. Numeric identifiers arrive
//! as JSON numbers on some endpoints and as numeric strings on others, so
//! they go through [`flexible`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

use crate::format::entity_from_link;
use crate::services::{
    EntityRecord, LatLng, LineRecord, Ride, StopRecord, Transit, VillageRecord,
};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

fn flexible<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + FromStr,
    <T as TryFrom<i64>>::Error: Display,
    <T as FromStr>::Err: Display,
{
    use serde::de::Error;
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => T::try_from(n).map_err(D::Error::custom),
        NumberOrText::Text(s) => s.trim().parse().map_err(D::Error::custom),
    }
}

fn flexible_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + FromStr,
    <T as TryFrom<i64>>::Error: Display,
    <T as FromStr>::Err: Display,
{
    use serde::de::Error;
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => T::try_from(n).map(Some).map_err(D::Error::custom),
        Some(NumberOrText::Text(s)) => s.trim().parse().map(Some).map_err(D::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GeoCoordinate> for LatLng {
    fn from(c: GeoCoordinate) -> Self {
        LatLng::new(c.latitude, c.longitude)
    }
}

#[derive(Debug, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EntitiesEnvelope {
    #[serde(rename = "entiteiten")]
    pub entities: Vec<Entity>,
}

#[derive(Debug, Deserialize)]
pub struct Entity {
    #[serde(rename = "entiteitnummer", deserialize_with = "flexible")]
    pub number: u32,
    #[serde(rename = "omschrijving")]
    pub description: String,
}

impl From<Entity> for EntityRecord {
    fn from(e: Entity) -> Self {
        EntityRecord {
            number: e.number,
            description: e.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VillagesEnvelope {
    #[serde(rename = "gemeenten")]
    pub villages: Vec<Village>,
}

#[derive(Debug, Deserialize)]
pub struct Village {
    #[serde(rename = "gemeentenummer", deserialize_with = "flexible")]
    pub id: i64,
    #[serde(rename = "omschrijving")]
    pub description: String,
}

impl From<Village> for VillageRecord {
    fn from(v: Village) -> Self {
        VillageRecord {
            id: v.id,
            description: v.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StopsEnvelope {
    #[serde(rename = "haltes")]
    pub stops: Vec<Stop>,
}

/// A stop, both in the `/haltes` listing and from `/haltes/{entity}/{stop}`.
#[derive(Debug, Deserialize)]
pub struct Stop {
    #[serde(rename = "haltenummer", deserialize_with = "flexible")]
    pub number: u32,
    #[serde(rename = "entiteitnummer", default, deserialize_with = "flexible_opt")]
    pub entity_number: Option<u32>,
    #[serde(rename = "omschrijving")]
    pub description: String,
    #[serde(rename = "omschrijvingGemeente", default)]
    pub village: Option<String>,
    #[serde(rename = "geoCoordinaat", default)]
    pub coordinate: Option<GeoCoordinate>,
}

impl From<Stop> for StopRecord {
    fn from(s: Stop) -> Self {
        StopRecord {
            number: s.number,
            entity_number: s.entity_number,
            village: s.village,
            description: s.description,
            position: s.coordinate.map(LatLng::from),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LinesEnvelope {
    #[serde(rename = "lijnen")]
    pub lines: Vec<Line>,
}

#[derive(Debug, Deserialize)]
pub struct Line {
    #[serde(rename = "lijnnummer", deserialize_with = "flexible")]
    pub number: u32,
    #[serde(rename = "entiteitnummer", deserialize_with = "flexible")]
    pub entity_number: u32,
    #[serde(rename = "omschrijving")]
    pub description: String,
    #[serde(rename = "vervoertype")]
    pub transport_type: String,
    #[serde(rename = "bedieningtype")]
    pub service_type: String,
}

impl From<Line> for LineRecord {
    fn from(l: Line) -> Self {
        LineRecord {
            number: l.number,
            entity_number: l.entity_number,
            description: l.description,
            transport_type: l.transport_type,
            service_type: l.service_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScheduleEnvelope {
    #[serde(rename = "ritDoorkomsten", default)]
    pub rides: Vec<RideTransits>,
}

#[derive(Debug, Deserialize)]
pub struct RideTransits {
    #[serde(rename = "doorkomsten", default)]
    pub transits: Vec<ScheduledTransit>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduledTransit {
    #[serde(rename = "haltenummer", deserialize_with = "flexible")]
    pub stop_number: u32,
    #[serde(rename = "dienstregelingTijdstip", default)]
    pub scheduled: Option<NaiveDateTime>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl From<ScheduledTransit> for Transit {
    fn from(t: ScheduledTransit) -> Self {
        let entity_number = t
            .links
            .first()
            .and_then(|link| link.url.as_deref())
            .and_then(entity_from_link);
        Transit {
            stop_number: t.stop_number,
            entity_number,
            scheduled: t.scheduled,
        }
    }
}

impl From<RideTransits> for Ride {
    fn from(r: RideTransits) -> Self {
        Ride {
            transits: r.transits.into_iter().map(Transit::from).collect(),
        }
    }
}
