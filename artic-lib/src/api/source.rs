//! The page source seam between the table controller and the HTTP client.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::query::Page;
use super::query::PageIndex;
use crate::ArticClient;
use crate::error::Error;

/// Something that can produce a page of artworks for a zero-based index.
///
/// [`ArticClient`] is the production implementation; tests substitute
/// canned pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the page at `index`.
    async fn fetch_page(&self, index: PageIndex) -> Result<Page, Error>;

    /// Fetches the page at `index`, giving up with [`Error::Cancelled`] as
    /// soon as `cancel` fires.
    async fn fetch_page_with_cancel(
        &self,
        index: PageIndex,
        cancel: CancellationToken,
    ) -> Result<Page, Error> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = self.fetch_page(index) => result,
        }
    }
}

#[async_trait]
impl PageSource for ArticClient {
    async fn fetch_page(&self, index: PageIndex) -> Result<Page, Error> {
        ArticClient::fetch_page(self, index).await
    }
}
