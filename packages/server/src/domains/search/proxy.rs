//! Pagination driver for one city-scoped sub-query.
//!
//! The registry caps each response at [`PAGE_LIMIT`] records and has no
//! "next page" token, so the proxy walks `skip` forward by a fixed stride
//! until the registry runs dry, returns a short page, or the record cap is
//! reached.
//!
//! ```text
//! skip=0    ──► 200 records ─┐
//! skip=200  ──► 200 records ─┤ accumulate
//! skip=400  ──►  37 records ─┘ short page: stop
//! ```
//!
//! There is no timeout on the loop; a stalled registry stalls the request.

use std::sync::Arc;

use npi_registry::{normalize_record, NormalizedRow, RawRecord, Registry, RegistryQuery, PAGE_LIMIT};
use tracing::{debug, info, warn};

use super::{SearchError, SearchRequest};

/// Hard cap on records gathered for a single sub-query.
pub const MAX_RECORDS: usize = 1200;

/// Why a pagination loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A page came back empty
    Exhausted,
    /// A page came back with fewer than `PAGE_LIMIT` records
    ShortPage,
    /// The cumulative count reached `MAX_RECORDS`
    RecordCap,
}

/// Server-side search unit: registry pagination plus normalization.
///
/// Holds no per-request state, so one instance serves concurrent requests.
pub struct SearchProxy {
    registry: Arc<dyn Registry>,
    max_records: usize,
}

impl SearchProxy {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            max_records: MAX_RECORDS,
        }
    }

    /// Validate, paginate and normalize one sub-query.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<NormalizedRow>, SearchError> {
        if !request.has_criteria() {
            return Err(SearchError::Validation);
        }

        let query = request.to_registry_query();
        let (records, reason) = self.collect_records(&query).await?;

        info!(
            city = query.city.as_deref().unwrap_or_default(),
            state = query.state.as_deref().unwrap_or_default(),
            count = records.len(),
            ?reason,
            "Sub-query complete"
        );

        Ok(records.iter().map(normalize_record).collect())
    }

    /// Drain the registry for `query`.
    ///
    /// `skip` advances by exactly `PAGE_LIMIT` after every call, whatever the
    /// page size, because that is how the registry indexes pages. Any page
    /// failure aborts the whole loop and discards what was gathered.
    pub async fn collect_records(
        &self,
        query: &RegistryQuery,
    ) -> Result<(Vec<RawRecord>, StopReason), SearchError> {
        let mut records: Vec<RawRecord> = Vec::new();
        let mut skip = 0;

        let reason = loop {
            let page = match self.registry.fetch_page(query, skip).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(error = %e, skip, discarded = records.len(), "Registry page fetch failed");
                    return Err(SearchError::UpstreamUnavailable(e));
                }
            };

            let page_len = page.len();
            debug!(skip, page_len, total = records.len() + page_len, "Registry page received");

            if page_len == 0 {
                break StopReason::Exhausted;
            }

            records.extend(page);
            skip += PAGE_LIMIT;

            if page_len < PAGE_LIMIT {
                break StopReason::ShortPage;
            }
            if records.len() >= self.max_records {
                break StopReason::RecordCap;
            }
        };

        Ok((records, reason))
    }
}
