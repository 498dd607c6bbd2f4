use serde::Deserialize;

use crate::services::LatLng;

/// Subset of a TomTom `calculateRoute` JSON response.
#[derive(Debug, Deserialize)]
pub struct CalculateRouteResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
pub struct Leg {
    #[serde(default)]
    pub points: Vec<Point>,
}

#[derive(Debug, Deserialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl CalculateRouteResponse {
    /// Points of the first leg of the first route.
    pub fn into_polyline(self) -> Option<Vec<LatLng>> {
        let leg = self.routes.into_iter().next()?.legs.into_iter().next()?;
        Some(
            leg.points
                .into_iter()
                .map(|p| LatLng::new(p.latitude, p.longitude))
                .collect(),
        )
    }
}
