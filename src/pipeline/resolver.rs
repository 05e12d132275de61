//! Reference resolution - turning foreign ids into display labels.
//!
//! A [`ReferenceResolver`] reads a whole reference collection (all stations,
//! all member statuses, all products) page by page and builds a fresh
//! [`LookupTable`] from it on every cycle. Soft-deleted rows never enter the
//! table, so a reference to one resolves to the fallback label.

use super::Reference;
use super::fetcher::{FetchState, Fetched, QueryFuture};
use super::paginator::PageWindow;
use crate::errors::{Error, Result};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Label used when a lookup table is missing altogether.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Upper bound on requests per lookup cycle.
pub const MAX_REFERENCE_PAGES: u64 = 1_000;

/// Foreign id to display label, with a fallback for misses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    labels: HashMap<i64, String>,
    fallback: String,
}

impl LookupTable {
    /// Builds a table from active records only.
    pub fn from_records<R: Reference>(records: &[R], fallback: impl Into<String>) -> Self {
        let labels = records
            .iter()
            .filter(|record| !record.is_deleted())
            .map(|record| (record.record_id(), record.label()))
            .collect();

        Self {
            labels,
            fallback: fallback.into(),
        }
    }

    /// The label for `id`, or the fallback label.
    #[must_use]
    pub fn resolve(&self, id: i64) -> &str {
        self.labels.get(&id).map_or(self.fallback.as_str(), String::as_str)
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// The lookup tables available to one assembly pass, with the generation
/// each table was built at.
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    tables: HashMap<&'static str, (u64, Arc<LookupTable>)>,
}

impl Lookups {
    pub fn insert(&mut self, name: &'static str, generation: u64, table: Arc<LookupTable>) {
        self.tables.insert(name, (generation, table));
    }

    #[must_use]
    pub fn table(&self, name: &str) -> Option<&LookupTable> {
        self.tables.get(name).map(|(_, table)| table.as_ref())
    }

    /// Resolves `id` through the named table; a missing table yields [`UNKNOWN_LABEL`].
    #[must_use]
    pub fn resolve(&self, name: &str, id: i64) -> &str {
        self.table(name).map_or(UNKNOWN_LABEL, |table| table.resolve(id))
    }

    /// `(name, generation)` pairs in name order, used as a memo key.
    #[must_use]
    pub fn generations(&self) -> Vec<(&'static str, u64)> {
        let mut generations: Vec<_> = self
            .tables
            .iter()
            .map(|(name, (generation, _))| (*name, *generation))
            .collect();
        generations.sort_unstable();
        generations
    }
}

type LookupQuery = Arc<dyn Fn(u64) -> QueryFuture<LookupTable> + Send + Sync>;

async fn read_all<R, F, Fut>(name: &'static str, page_size: u64, query: &F) -> Result<Vec<R>>
where
    F: Fn(PageWindow) -> Fut,
    Fut: Future<Output = Result<Fetched<R>>>,
{
    let mut records = Vec::new();
    let mut window = PageWindow::first(page_size);

    loop {
        let fetched = query(window).await?;
        let received = u64::try_from(fetched.records.len()).unwrap_or(u64::MAX);
        records.extend(fetched.records);
        let loaded = u64::try_from(records.len()).unwrap_or(u64::MAX);

        let exhausted = received == 0
            || fetched
                .total
                .map_or(received < window.page_size, |total| loaded >= total);
        if exhausted {
            break;
        }
        if window.current_page >= MAX_REFERENCE_PAGES {
            warn!(
                lookup = name,
                loaded,
                total = ?fetched.total,
                "Reference collection exceeds the page limit, remaining rows use the fallback label"
            );
            break;
        }
        window = PageWindow::new(window.current_page + 1, window.page_size);
    }

    debug!(lookup = name, pages = window.current_page, rows = records.len(), "Reference collection read");
    Ok(records)
}

/// Fetches a reference collection and keeps the lookup table built from it.
pub struct ReferenceResolver {
    name: &'static str,
    page_size: u64,
    query: LookupQuery,
    state: FetchState<Arc<LookupTable>>,
    generation: u64,
}

impl ReferenceResolver {
    /// `query` is called with successive windows of `page_size` rows until the
    /// collection is exhausted: the reported total is reached, or, for sources
    /// without a total, a short page comes back.
    pub fn new<R, F, Fut>(
        name: &'static str,
        fallback: impl Into<String>,
        page_size: u64,
        query: F,
    ) -> Self
    where
        R: Reference + Send + 'static,
        F: Fn(PageWindow) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Fetched<R>>> + Send + 'static,
    {
        let fallback: String = fallback.into();
        let query = Arc::new(query);
        let lookup: LookupQuery = Arc::new(move |page_size| -> QueryFuture<LookupTable> {
            let query = Arc::clone(&query);
            let fallback = fallback.clone();
            Box::pin(async move {
                let records = read_all(name, page_size, query.as_ref()).await?;
                Ok(LookupTable::from_records(&records, fallback))
            })
        });

        Self {
            name,
            page_size,
            query: lookup,
            state: FetchState::Idle,
            generation: 0,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Rebuilds the table from a fresh fetch. Returns `true` on success.
    pub async fn fetch(&mut self) -> bool {
        self.state = FetchState::Loading;
        match (self.query)(self.page_size).await {
            Ok(table) => {
                debug!(lookup = self.name, entries = table.len(), "Lookup table built");
                self.generation += 1;
                self.state = FetchState::Ready(Arc::new(table));
                true
            }
            Err(e) => {
                warn!(lookup = self.name, "Reference fetch failed: {}", e);
                self.state = FetchState::Failed(Arc::new(e));
                false
            }
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FetchState<Arc<LookupTable>> {
        &self.state
    }

    #[must_use]
    pub fn table(&self) -> Option<&Arc<LookupTable>> {
        self.state.data()
    }

    #[must_use]
    pub fn error(&self) -> Option<&Arc<Error>> {
        self.state.error()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
