use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Url;
use tracing::{debug, instrument};

use super::models::{
    EntitiesEnvelope, LinesEnvelope, ScheduleEnvelope, Stop, StopsEnvelope, VillagesEnvelope,
};
use crate::config::{Config, UpstreamConfig};
use crate::error::ApiError;
use crate::fetch::auth::ApiKey;
use crate::fetch::{BasicClient, HttpClient, fetch_json};
use crate::services::{
    Direction, EntityRecord, LineRecord, Ride, StopRecord, TransitApi, VillageRecord,
};

const SERVICE: &str = "De Lijn";

/// Client for the De Lijn Kern Open Data API.
pub struct DeLijnClient<C> {
    http: C,
    base: Url,
}

impl DeLijnClient<ApiKey<BasicClient>> {
    /// Production client: subscription key header, configured timeouts.
    pub fn from_config(config: &Config) -> Result<Self> {
        let UpstreamConfig { base_url, api_key } = &config.de_lijn;
        let http = ApiKey::subscription_key(BasicClient::new(&config.http)?, api_key)
            .context("DE_LIJN_API_KEY is not a valid header value")?;
        Self::new(http, base_url)
    }
}

impl<C: HttpClient> DeLijnClient<C> {
    pub fn new(http: C, base_url: &str) -> Result<Self> {
        Ok(Self {
            http,
            base: crate::infra::base_url(base_url)?,
        })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Inconsistency(format!("cannot build De Lijn URL for {path}: {e}")))
    }
}

#[async_trait]
impl<C: HttpClient> TransitApi for DeLijnClient<C> {
    #[instrument(skip(self))]
    async fn entities(&self) -> Result<Vec<EntityRecord>, ApiError> {
        let envelope: EntitiesEnvelope = fetch_json(&self.http, SERVICE, self.url("entiteiten")?).await?;
        debug!(count = envelope.entities.len(), "Entities fetched");
        Ok(envelope.entities.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn villages(&self) -> Result<Vec<VillageRecord>, ApiError> {
        let envelope: VillagesEnvelope = fetch_json(&self.http, SERVICE, self.url("gemeenten")?).await?;
        debug!(count = envelope.villages.len(), "Villages fetched");
        Ok(envelope.villages.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn stops(&self) -> Result<Vec<StopRecord>, ApiError> {
        let envelope: StopsEnvelope = fetch_json(&self.http, SERVICE, self.url("haltes")?).await?;
        debug!(count = envelope.stops.len(), "Stops fetched");
        Ok(envelope.stops.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn lines(&self) -> Result<Vec<LineRecord>, ApiError> {
        let envelope: LinesEnvelope = fetch_json(&self.http, SERVICE, self.url("lijnen")?).await?;
        debug!(count = envelope.lines.len(), "Lines fetched");
        Ok(envelope.lines.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, direction), fields(direction = %direction))]
    async fn schedule(
        &self,
        entity: u32,
        line: u32,
        direction: Direction,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Ride>, ApiError> {
        let mut url = self.url(&format!(
            "lijnen/{entity}/{line}/lijnrichtingen/{direction}/dienstregelingen"
        ))?;
        if let Some(date) = date {
            url.query_pairs_mut()
                .append_pair("datum", &date.format("%Y-%m-%d").to_string());
        }

        let envelope: ScheduleEnvelope = fetch_json(&self.http, SERVICE, url).await?;
        debug!(rides = envelope.rides.len(), "Schedule fetched");
        Ok(envelope.rides.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn stop(&self, entity: u32, stop: u32) -> Result<StopRecord, ApiError> {
        let raw: Stop = fetch_json(&self.http, SERVICE, self.url(&format!("haltes/{entity}/{stop}"))?).await?;
        Ok(raw.into())
    }
}
