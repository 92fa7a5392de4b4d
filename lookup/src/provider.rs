//! Search providers.
//!
//! A [`SearchProvider`] receives the live search text and a
//! [`SearchCompletion`]. It may answer synchronously, later from another task
//! or thread, several times, or never. Only an answer to the most recently
//! issued query is applied by the lookup; everything else is dropped.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Weak};

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use tokio::runtime::Handle;

use crate::error::LookupError;
use crate::lookup::Shared;
use crate::record::ResultRecord;

/// Caller-supplied lookup invoked on every edit of the search field.
pub trait SearchProvider: Send + Sync {
    /// Start a search for `query` and report back through `completion`.
    fn search(&self, query: &str, completion: SearchCompletion);
}

impl<F> SearchProvider for F
where
    F: Fn(&str, SearchCompletion) + Send + Sync,
{
    fn search(&self, query: &str, completion: SearchCompletion) {
        self(query, completion)
    }
}

// -----------------------------------------------------------------------------
// Completion handle
// -----------------------------------------------------------------------------

/// Reply channel handed to a provider for one issued search.
///
/// Carries the sequence number the search was issued under. Cloning is cheap;
/// the handle holds the lookup weakly, so replies for a dropped lookup vanish.
#[derive(Clone)]
pub struct SearchCompletion {
    target: Weak<Shared>,
    seq: u64,
    query: String,
}

impl SearchCompletion {
    pub(crate) fn new(target: &Arc<Shared>, seq: u64, query: &str) -> Self {
        Self {
            target: Arc::downgrade(target),
            seq,
            query: query.to_string(),
        }
    }

    /// The query this search was issued for.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Sequence number the search was issued under.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Deliver results, echoing the query they answer.
    ///
    /// Returns `true` if the lookup accepted them as the current result set.
    pub fn complete(&self, echoed_query: impl Into<String>, results: Vec<ResultRecord>) -> bool {
        match self.target.upgrade() {
            Some(shared) => Shared::apply_results(&shared, self.seq, &echoed_query.into(), results),
            None => {
                log::debug!("SearchCompletion seq={} dropped: lookup is gone", self.seq);
                false
            }
        }
    }
}

impl std::fmt::Debug for SearchCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCompletion")
            .field("seq", &self.seq)
            .field("query", &self.query)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Async adapter
// -----------------------------------------------------------------------------

type LookupFuture = Pin<Box<dyn Future<Output = Vec<ResultRecord>> + Send>>;
type LookupFn = Arc<dyn Fn(String) -> LookupFuture + Send + Sync>;

/// Provider that runs an async lookup on a tokio runtime.
///
/// Each search spawns a task; earlier tasks are not cancelled. The task echoes
/// its own query on completion, so slow answers to old queries are discarded
/// by the lookup.
///
/// ```ignore
/// let provider = AsyncSearch::new(|query| async move {
///     client.find_cities(&query).await.unwrap_or_default()
/// })?;
/// ```
#[derive(Clone)]
pub struct AsyncSearch {
    handle: Handle,
    lookup: LookupFn,
}

impl AsyncSearch {
    /// Wrap an async lookup, capturing the current tokio runtime.
    pub fn new<F, Fut>(lookup: F) -> Result<Self, LookupError>
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Vec<ResultRecord>> + Send + 'static,
    {
        let handle = Handle::try_current().map_err(|_| LookupError::NoRuntime)?;
        Ok(Self::with_handle(handle, lookup))
    }

    /// Wrap an async lookup that runs on the given runtime.
    pub fn with_handle<F, Fut>(handle: Handle, lookup: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Vec<ResultRecord>> + Send + 'static,
    {
        Self {
            handle,
            lookup: Arc::new(move |query| Box::pin(lookup(query))),
        }
    }
}

impl SearchProvider for AsyncSearch {
    fn search(&self, query: &str, completion: SearchCompletion) {
        let pending = (self.lookup)(query.to_string());
        let echoed = query.to_string();
        self.handle.spawn(async move {
            let results = pending.await;
            completion.complete(echoed, results);
        });
    }
}

// -----------------------------------------------------------------------------
// In-memory catalog
// -----------------------------------------------------------------------------

/// Provider that fuzzy-matches a fixed list of records by their label.
///
/// Best matches come first; equal scores keep catalog order. An empty query
/// matches nothing. Answers synchronously.
#[derive(Debug, Clone, Default)]
pub struct CatalogSearch {
    records: Arc<Vec<ResultRecord>>,
    limit: Option<usize>,
}

impl CatalogSearch {
    /// Create a catalog over `records`.
    pub fn new(records: Vec<ResultRecord>) -> Self {
        Self {
            records: Arc::new(records),
            limit: None,
        }
    }

    /// Cap the number of results per query.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records matching `query`, best first.
    pub fn find(&self, query: &str) -> Vec<ResultRecord> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );

        let mut buf = Vec::new();
        let mut scored: Vec<(u32, usize)> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let haystack = Utf32Str::new(&record.display, &mut buf);
                pattern
                    .score(haystack, &mut matcher)
                    .map(|score| (score, index))
            })
            .collect();

        // Stable sort keeps catalog order among equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let limit = self.limit.unwrap_or(usize::MAX);
        scored
            .into_iter()
            .take(limit)
            .map(|(_, index)| self.records[index].clone())
            .collect()
    }
}

impl SearchProvider for CatalogSearch {
    fn search(&self, query: &str, completion: SearchCompletion) {
        let results = self.find(query);
        log::debug!(
            "CatalogSearch query={:?} matched {} of {}",
            query,
            results.len(),
            self.records.len()
        );
        completion.complete(query, results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CatalogSearch {
        CatalogSearch::new(vec![
            ResultRecord::new(1, "Alpha"),
            ResultRecord::new(2, "Abacus"),
            ResultRecord::new(3, "Banana"),
            ResultRecord::new(4, "abcdef"),
        ])
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        assert!(catalog().find("").is_empty());
        assert!(catalog().find("   ").is_empty());
    }

    #[test]
    fn test_fuzzy_match_is_case_insensitive() {
        let ids: Vec<String> = catalog()
            .find("ABC")
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        assert!(ids.contains(&"4".to_string()));
        assert!(!ids.contains(&"3".to_string()));
    }

    #[test]
    fn test_no_matches() {
        assert!(catalog().find("xyz").is_empty());
    }

    #[test]
    fn test_limit_caps_results() {
        let results = catalog().with_limit(1).find("a");
        assert_eq!(results.len(), 1);
    }
}
