//! Stop number → coordinate resolution.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::trace;

use crate::error::ApiError;
use crate::services::models::LatLng;
use crate::services::transit_api::TransitApi;

/// Maps an (entity, stop number) pair to the stop's coordinate.
#[async_trait]
pub trait StopLocator: Send + Sync {
    async fn locate(&self, entity: u32, stop: u32) -> Result<LatLng, ApiError>;
}

/// A [`StopLocator`] over a [`TransitApi`] that remembers every coordinate it
/// resolved. Build one per request and drop it with the request.
pub struct RequestStopCache<'a> {
    api: &'a dyn TransitApi,
    seen: Mutex<HashMap<(u32, u32), LatLng>>,
}

impl<'a> RequestStopCache<'a> {
    pub fn new(api: &'a dyn TransitApi) -> Self {
        Self {
            api,
            seen: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, key: (u32, u32)) -> Option<LatLng> {
        self.seen.lock().ok()?.get(&key).copied()
    }

    fn remember(&self, key: (u32, u32), position: LatLng) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.insert(key, position);
        }
    }
}

#[async_trait]
impl StopLocator for RequestStopCache<'_> {
    async fn locate(&self, entity: u32, stop: u32) -> Result<LatLng, ApiError> {
        let key = (entity, stop);
        if let Some(position) = self.cached(key) {
            trace!(entity, stop, "Stop position served from request cache");
            return Ok(position);
        }

        let record = self.api.stop(entity, stop).await?;
        let position = record.position.ok_or_else(|| {
            ApiError::upstream(
                "De Lijn",
                format!("stop {stop} of entity {entity} has no coordinates"),
            )
        })?;

        self.remember(key, position);
        Ok(position)
    }
}
