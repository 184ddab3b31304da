use crate::fetcher::envelope::Envelope;
use crate::model::{FetchError, SeriesRequest};

/// Anything able to answer a batched series request with a response envelope.
#[async_trait::async_trait]
pub trait SeriesSource: Send + Sync {
    async fn fetch(&self, req: &SeriesRequest) -> Result<Envelope, FetchError>;
}
