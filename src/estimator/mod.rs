//! Vehicle position estimation from timetable data.
//!
//! A vehicle is assumed to be somewhere between the last stop it was
//! scheduled to pass and the next one. How far along is the elapsed share of
//! the scheduled time between the two, mapped onto the router's polyline
//! between the two stops.

mod fraction;
mod polyline;

pub use fraction::elapsed_fraction;
pub use polyline::point_at_fraction;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::services::{LatLng, Ride, RouteInterpolator, StopLocator, Transit, TravelMode};

/// What to do with an elapsed fraction outside `[0, 1]`, which happens when
/// the schedule and the clock disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutOfRangePolicy {
    /// Give no estimate for the vehicle.
    #[default]
    Discard,
    /// Snap the vehicle to the nearer of the two stops.
    Clamp,
}

impl OutOfRangePolicy {
    pub fn apply(self, fraction: f64) -> Option<f64> {
        if (0.0..=1.0).contains(&fraction) {
            return Some(fraction);
        }
        match self {
            OutOfRangePolicy::Discard => None,
            OutOfRangePolicy::Clamp if fraction.is_nan() => None,
            OutOfRangePolicy::Clamp => Some(fraction.clamp(0.0, 1.0)),
        }
    }
}

/// The two scheduled stops a vehicle is between.
#[derive(Debug, PartialEq)]
pub struct Segment<'a> {
    pub last: &'a Transit,
    pub last_time: NaiveDateTime,
    pub next: &'a Transit,
    pub next_time: NaiveDateTime,
}

/// Finds the segment of `ride` that contains `now`.
///
/// Transits without a scheduled time are skipped. The first timestamped
/// transit always starts as `last`, so a ride that has not started yet yields
/// a segment with `now` before `last_time`. Returns `None` when no timestamped
/// transit lies after `now`.
pub fn find_segment(ride: &Ride, now: NaiveDateTime) -> Option<Segment<'_>> {
    let mut timed = ride
        .transits
        .iter()
        .filter_map(|t| t.scheduled.map(|time| (t, time)));

    let (mut last, mut last_time) = timed.next()?;
    for (transit, time) in timed {
        if time > now {
            return Some(Segment {
                last,
                last_time,
                next: transit,
                next_time: time,
            });
        }
        last = transit;
        last_time = time;
    }
    None
}

/// Estimates where the vehicle serving `ride` is at `now`.
///
/// `Ok(None)` means the ride has finished, has too little timetable data, or
/// the elapsed fraction was rejected by `policy`. Stop lookup and routing
/// failures are returned as errors.
pub async fn estimate_position(
    ride: &Ride,
    now: NaiveDateTime,
    policy: OutOfRangePolicy,
    locator: &dyn StopLocator,
    router: &dyn RouteInterpolator,
) -> Result<Option<LatLng>, ApiError> {
    let Some(segment) = find_segment(ride, now) else {
        return Ok(None);
    };

    let raw = elapsed_fraction(segment.last_time, segment.next_time, now);
    let Some(fraction) = policy.apply(raw) else {
        debug!(
            fraction = raw,
            last_stop = segment.last.stop_number,
            next_stop = segment.next.stop_number,
            "Elapsed fraction outside [0, 1], no estimate"
        );
        return Ok(None);
    };

    let from = locate(locator, segment.last).await?;
    let to = locate(locator, segment.next).await?;

    let polyline = router.route(from, to, TravelMode::Bus).await?;
    point_at_fraction(&polyline, fraction)
        .map(Some)
        .ok_or_else(|| ApiError::upstream("TomTom", format!("empty route between {from} and {to}")))
}

async fn locate(locator: &dyn StopLocator, transit: &Transit) -> Result<LatLng, ApiError> {
    let entity = transit.entity_number.ok_or_else(|| {
        ApiError::Inconsistency(format!(
            "Cannot derive the entity number of stop {}",
            transit.stop_number
        ))
    })?;
    locator.locate(entity, transit.stop_number).await
}

/// Estimates every ride in turn and keeps the positions that could be
/// determined, in ride order. A failing ride is logged and skipped.
pub async fn estimate_vehicles(
    rides: &[Ride],
    now: NaiveDateTime,
    policy: OutOfRangePolicy,
    locator: &dyn StopLocator,
    router: &dyn RouteInterpolator,
) -> Vec<LatLng> {
    let mut positions = Vec::new();
    for (index, ride) in rides.iter().enumerate() {
        match estimate_position(ride, now, policy, locator, router).await {
            Ok(Some(position)) => positions.push(position),
            Ok(None) => {}
            Err(e) => warn!(ride = index, error = %e, "Skipping vehicle, position estimate failed"),
        }
    }
    positions
}
