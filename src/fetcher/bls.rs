// reqwest-backed source for the BLS public timeseries API
use crate::fetcher::envelope::Envelope;
use crate::fetcher::traits::SeriesSource;
use crate::model::{FetchError, SeriesRequest};

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct RequestBody<'a> {
    seriesid: &'a [String],
    startyear: String,
    endyear: String,
}

pub struct BlsClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl BlsClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("grocery-cards/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    async fn post(&self, body: &RequestBody<'_>) -> Result<Envelope, FetchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        let envelope = response.json::<Envelope>().await?;
        Ok(envelope)
    }
}

#[async_trait::async_trait]
impl SeriesSource for BlsClient {
    async fn fetch(&self, req: &SeriesRequest) -> Result<Envelope, FetchError> {
        let body = RequestBody {
            seriesid: &req.series_ids,
            startyear: req.start_year.to_string(),
            endyear: req.end_year.to_string(),
        };
        info!(
            "POST {} ({} series, {}-{})",
            self.endpoint,
            req.series_ids.len(),
            req.start_year,
            req.end_year
        );

        match timeout(self.timeout, self.post(&body)).await {
            Ok(Ok(envelope)) => Ok(envelope),
            Ok(Err(e)) => {
                warn!("Series request failed: {}", e);
                Err(e)
            }
            Err(_) => {
                warn!("Series request timed out after {:?}", self.timeout);
                Err(FetchError::Timeout(self.timeout))
            }
        }
    }
}
