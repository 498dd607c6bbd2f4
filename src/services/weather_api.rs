use async_trait::async_trait;

use crate::error::ApiError;
use crate::services::models::WeatherReport;

/// Current weather conditions by coordinate.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReport, ApiError>;
}
