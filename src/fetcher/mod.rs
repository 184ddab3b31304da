pub mod bls;
pub mod envelope;
pub mod traits;

pub use bls::BlsClient;
pub use traits::SeriesSource;

use crate::model::{FetchError, PriceRecord, SeriesCatalog, SeriesRequest};
use crate::normalizer::normalize_all;
use tracing::{info, warn};

/// Fetches the latest prices for every series in the catalog.
///
/// Returns `Ok(None)` when the source answered but rejected the request; the
/// rejection is logged and callers fall back to placeholder content. Transport
/// failures and timeouts are returned as errors.
pub async fn fetch_prices(
    source: &dyn SeriesSource,
    catalog: &SeriesCatalog,
    start_year: i32,
    end_year: i32,
) -> Result<Option<Vec<PriceRecord>>, FetchError> {
    if catalog.is_empty() {
        return Err(FetchError::InvalidRequest("no series requested".into()));
    }
    if start_year > end_year {
        return Err(FetchError::InvalidRequest(format!(
            "start year {start_year} is after end year {end_year}"
        )));
    }

    let request = SeriesRequest {
        series_ids: catalog.ids(),
        start_year,
        end_year,
    };
    let envelope = source.fetch(&request).await?;

    if !envelope.succeeded() {
        warn!("BLS API error: {}", envelope.diagnostic());
        return Ok(None);
    }

    let results = envelope
        .results
        .ok_or_else(|| FetchError::InvalidResponse("successful response without Results".into()))?;
    let records = normalize_all(&results.series, catalog);
    info!(
        "Received {} series, {} with prices",
        results.series.len(),
        records.len()
    );
    Ok(Some(records))
}
