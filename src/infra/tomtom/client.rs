use anyhow::Result;
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, instrument};

use super::models::CalculateRouteResponse;
use crate::config::Config;
use crate::error::ApiError;
use crate::fetch::auth::UrlParam;
use crate::fetch::{BasicClient, HttpClient, fetch_json};
use crate::services::{LatLng, RouteInterpolator, TravelMode};

const SERVICE: &str = "TomTom";

pub struct TomTomClient<C> {
    http: C,
    base: Url,
}

impl TomTomClient<UrlParam<BasicClient>> {
    /// Production client: `key` query parameter, configured timeouts.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = UrlParam::new(
            BasicClient::new(&config.http)?,
            "key",
            config.tomtom.api_key.as_str(),
        );
        Self::new(http, &config.tomtom.base_url)
    }
}

impl<C: HttpClient> TomTomClient<C> {
    pub fn new(http: C, base_url: &str) -> Result<Self> {
        Ok(Self {
            http,
            base: crate::infra::base_url(base_url)?,
        })
    }

    fn route_url(&self, from: LatLng, to: LatLng, mode: TravelMode) -> Result<Url, ApiError> {
        let mut url = self
            .base
            .join(&format!("calculateRoute/{from}:{to}/json"))
            .map_err(|e| ApiError::Inconsistency(format!("cannot build routing URL: {e}")))?;
        url.query_pairs_mut().append_pair("travelMode", mode.as_str());
        Ok(url)
    }
}

#[async_trait]
impl<C: HttpClient> RouteInterpolator for TomTomClient<C> {
    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    async fn route(&self, from: LatLng, to: LatLng, mode: TravelMode) -> Result<Vec<LatLng>, ApiError> {
        let raw: CalculateRouteResponse = fetch_json(&self.http, SERVICE, self.route_url(from, to, mode)?).await?;
        let polyline = raw
            .into_polyline()
            .ok_or_else(|| ApiError::upstream(SERVICE, format!("no route between {from} and {to}")))?;
        debug!(points = polyline.len(), "Route fetched");
        Ok(polyline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offline;

    #[async_trait]
    impl HttpClient for Offline {
        async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            unimplemented!("no network in unit tests")
        }
    }

    #[test]
    fn test_route_url() {
        let client = TomTomClient::new(Offline, "https://api.tomtom.com/routing/1").unwrap();
        let url = client
            .route_url(LatLng::new(51.05, 3.72), LatLng::new(51.06, 3.7), TravelMode::Bus)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.tomtom.com/routing/1/calculateRoute/51.05,3.72:51.06,3.7/json?travelMode=bus"
        );
    }
}
