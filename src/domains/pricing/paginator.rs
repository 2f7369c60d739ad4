//! Bounded, sequential pagination over a [`PriceSource`].

use tracing::{debug, error, info, warn};

use super::client::PriceSource;
use super::error::PricingResult;
use super::filter::Filter;
use super::model::PriceRecord;

/// Default number of pages fetched per call.
pub const DEFAULT_MAX_PAGES: usize = 3;

/// Records accumulated over one or more pages.
#[derive(Debug, Clone, Default)]
pub struct Paged {
    pub records: Vec<PriceRecord>,
    pub pages_fetched: usize,
    /// A continuation link was left unfollowed (page cap or failed page).
    pub truncated: bool,
}

/// Fetch the first page and follow continuation links up to `max_pages`.
///
/// A failure on the first page is returned as an error. A failure on a
/// continuation page stops pagination and yields what was accumulated so
/// far, flagged as truncated.
pub async fn paginate(
    source: &dyn PriceSource,
    filter: &Filter,
    max_pages: usize,
) -> PricingResult<Paged> {
    let max_pages = max_pages.max(1);

    let first = source.first_page(filter, None).await?;
    let mut paged = Paged {
        records: first.items,
        pages_fetched: 1,
        truncated: false,
    };
    let mut next_link = first.next_page_link.filter(|l| !l.is_empty());

    while let Some(link) = next_link.take() {
        if paged.pages_fetched >= max_pages {
            warn!(
                "Page cap of {} reached with more results available; returning partial results",
                max_pages
            );
            paged.truncated = true;
            break;
        }

        info!("Getting additional page {}", paged.pages_fetched + 1);
        debug!("Continuation link: {}", link);

        match source.next_page(&link).await {
            Ok(page) => {
                paged.records.extend(page.items);
                paged.pages_fetched += 1;
                next_link = page.next_page_link.filter(|l| !l.is_empty());
            }
            Err(e) => {
                error!("Error getting additional page: {}", e);
                paged.truncated = true;
                break;
            }
        }
    }

    debug!(
        "Fetched {} records across {} page(s)",
        paged.records.len(),
        paged.pages_fetched
    );
    Ok(paged)
}

/// Fetch a single page of at most `top` records, without following links.
pub async fn sample(source: &dyn PriceSource, filter: &Filter, top: u32) -> PricingResult<Paged> {
    let page = source.first_page(filter, Some(top)).await?;
    let truncated = page.next_link().is_some();

    Ok(Paged {
        records: page.items,
        pages_fetched: 1,
        truncated,
    })
}
