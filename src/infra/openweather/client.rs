use anyhow::Result;
use async_trait::async_trait;
use reqwest::Url;
use tracing::instrument;

use super::models::CurrentWeather;
use crate::config::Config;
use crate::error::ApiError;
use crate::fetch::auth::UrlParam;
use crate::fetch::{BasicClient, HttpClient, fetch_json};
use crate::services::{WeatherApi, WeatherReport};

const SERVICE: &str = "OpenWeatherMap";

pub struct OpenWeatherClient<C> {
    http: C,
    base: Url,
}

impl OpenWeatherClient<UrlParam<BasicClient>> {
    /// Production client: `appid` query parameter, configured timeouts.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = UrlParam::new(
            BasicClient::new(&config.http)?,
            "appid",
            config.weather.api_key.as_str(),
        );
        Self::new(http, &config.weather.base_url)
    }
}

impl<C: HttpClient> OpenWeatherClient<C> {
    pub fn new(http: C, base_url: &str) -> Result<Self> {
        Ok(Self {
            http,
            base: crate::infra::base_url(base_url)?,
        })
    }

    fn current_url(&self, lat: f64, lon: f64) -> Result<Url, ApiError> {
        let mut url = self
            .base
            .join("weather")
            .map_err(|e| ApiError::Inconsistency(format!("cannot build weather URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("lat", &lat.to_string())
            .append_pair("lon", &lon.to_string())
            .append_pair("units", "metric");
        Ok(url)
    }
}

#[async_trait]
impl<C: HttpClient> WeatherApi for OpenWeatherClient<C> {
    #[instrument(skip(self))]
    async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReport, ApiError> {
        let raw: CurrentWeather = fetch_json(&self.http, SERVICE, self.current_url(lat, lon)?).await?;
        raw.into_report()
            .ok_or_else(|| ApiError::upstream(SERVICE, format!("no weather description for ({lat}, {lon})")))
    }
}
