use async_trait::async_trait;

use crate::error::ApiError;
use crate::services::models::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Bus,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Bus => "bus",
        }
    }
}

/// Produces the polyline a vehicle would follow between two coordinates.
#[async_trait]
pub trait RouteInterpolator: Send + Sync {
    /// Ordered points from `from` to `to`. May be empty if the router has
    /// nothing to offer; callers decide what that means.
    async fn route(
        &self,
        from: LatLng,
        to: LatLng,
        mode: TravelMode,
    ) -> Result<Vec<LatLng>, ApiError>;
}
