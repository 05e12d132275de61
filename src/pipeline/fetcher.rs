//! Remote collection fetcher.
//!
//! Wraps one ledger list call behind a stored query so the same request can be
//! re-issued on demand (after a mutation, a page change, or a manual retry).
//! A failed fetch is recorded, never retried automatically.

use super::paginator::PageWindow;
use crate::errors::{Error, Result};
use crate::ledger::Listing;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Future returned by stored ledger queries.
pub type QueryFuture<T> = BoxFuture<'static, Result<T>>;

type Query<R, P> = Arc<dyn Fn(PageWindow, P) -> QueryFuture<Fetched<R>> + Send + Sync>;

/// Raw records from one fetch plus the source's total, when it reports one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<R> {
    pub records: Vec<R>,
    pub total: Option<u64>,
}

impl<R> Fetched<R> {
    /// Records from a call that reports no total count.
    #[must_use]
    pub const fn unpaged(records: Vec<R>) -> Self {
        Self {
            records,
            total: None,
        }
    }
}

impl<R> From<Listing<R>> for Fetched<R> {
    fn from(listing: Listing<R>) -> Self {
        Self {
            records: listing.records,
            total: Some(listing.total),
        }
    }
}

/// Lifecycle of one remote read.
#[derive(Debug, Clone)]
pub enum FetchState<T> {
    /// Never requested
    Idle,
    /// Parameters unresolved; no request was issued
    Disabled,
    Loading,
    Failed(Arc<Error>),
    Ready(T),
}

impl<T> FetchState<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&Arc<Error>> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// A re-runnable list query and the state of its latest run.
///
/// `P` is the filter the query needs. While it is `None` the collection is
/// disabled: [`fetch`](Self::fetch) records [`FetchState::Disabled`] instead of
/// issuing a request with a placeholder value.
pub struct RemoteCollection<R, P = ()> {
    name: &'static str,
    query: Query<R, P>,
    params: Option<P>,
    window: PageWindow,
    state: FetchState<Arc<Fetched<R>>>,
    generation: u64,
    requests: u64,
}

impl<R> RemoteCollection<R, ()>
where
    R: Send + Sync + 'static,
{
    /// An unfiltered collection, enabled from the start.
    pub fn new<F, Fut>(name: &'static str, window: PageWindow, query: F) -> Self
    where
        F: Fn(PageWindow) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Fetched<R>>> + Send + 'static,
    {
        let mut collection = Self::filtered(name, window, move |window, ()| query(window));
        collection.params = Some(());
        collection
    }
}

impl<R, P> RemoteCollection<R, P>
where
    R: Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
{
    /// A filtered collection; disabled until [`set_params`](Self::set_params) supplies a filter.
    pub fn filtered<F, Fut>(name: &'static str, window: PageWindow, query: F) -> Self
    where
        F: Fn(PageWindow, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Fetched<R>>> + Send + 'static,
    {
        Self {
            name,
            query: Arc::new(move |window, params| -> QueryFuture<Fetched<R>> {
                Box::pin(query(window, params))
            }),
            params: None,
            window,
            state: FetchState::Idle,
            generation: 0,
            requests: 0,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn set_params(&mut self, params: Option<P>) {
        self.params = params;
    }

    #[must_use]
    pub const fn params(&self) -> Option<&P> {
        self.params.as_ref()
    }

    pub fn set_window(&mut self, window: PageWindow) {
        self.window = window;
    }

    #[must_use]
    pub const fn window(&self) -> PageWindow {
        self.window
    }

    /// Issues the query once and records the outcome. Returns `true` on success.
    pub async fn fetch(&mut self) -> bool {
        let Some(params) = self.params.clone() else {
            debug!(collection = self.name, "Fetch disabled until parameters resolve");
            self.state = FetchState::Disabled;
            return false;
        };

        self.state = FetchState::Loading;
        self.requests += 1;
        debug!(
            collection = self.name,
            page = self.window.current_page,
            page_size = self.window.page_size,
            "Fetching collection"
        );

        match (self.query)(self.window, params).await {
            Ok(fetched) => {
                debug!(
                    collection = self.name,
                    records = fetched.records.len(),
                    total = ?fetched.total,
                    "Collection fetched"
                );
                self.generation += 1;
                self.state = FetchState::Ready(Arc::new(fetched));
                true
            }
            Err(e) => {
                warn!(collection = self.name, "Fetch failed: {}", e);
                self.state = FetchState::Failed(Arc::new(e));
                false
            }
        }
    }

    /// Records a failure that happened before the query could run, such as a
    /// failed lookup of the filter parameters.
    pub fn fail(&mut self, error: Error) {
        warn!(collection = self.name, "Parameters failed to resolve: {}", error);
        self.state = FetchState::Failed(Arc::new(error));
    }

    /// Manually re-runs the query with the current window and parameters.
    pub async fn refetch(&mut self) -> bool {
        debug!(collection = self.name, "Refetch requested");
        self.fetch().await
    }

    #[must_use]
    pub const fn state(&self) -> &FetchState<Arc<Fetched<R>>> {
        &self.state
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    #[must_use]
    pub fn error(&self) -> Option<&Arc<Error>> {
        self.state.error()
    }

    #[must_use]
    pub fn data(&self) -> Option<&Arc<Fetched<R>>> {
        self.state.data()
    }

    /// Bumped on every successful fetch; used as the memo key for assembly.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of requests actually sent to the source.
    #[must_use]
    pub const fn requests(&self) -> u64 {
        self.requests
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    fn numbers(window: PageWindow) -> Fetched<u64> {
        let start = window.offset();
        Fetched {
            records: (start..start + window.page_size).collect(),
            total: Some(100),
        }
    }

    #[tokio::test]
    async fn test_fetch_passes_window_and_bumps_generation() {
        let mut collection = RemoteCollection::new("numbers", PageWindow::new(2, 5), |window| async move {
            Ok(numbers(window))
        });

        assert!(matches!(collection.state(), FetchState::Idle));
        assert!(collection.fetch().await);

        let data = collection.data().unwrap();
        assert_eq!(data.records, vec![5, 6, 7, 8, 9]);
        assert_eq!(data.total, Some(100));
        assert_eq!(collection.generation(), 1);

        collection.refetch().await;
        assert_eq!(collection.generation(), 2);
        assert_eq!(collection.requests(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_exposes_error_without_retry() {
        let calls = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&calls);
        let mut collection = RemoteCollection::new("broken", PageWindow::first(10), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move {
                Err::<Fetched<u64>, _>(Error::Config {
                    message: "revert".to_string(),
                })
            }
        });

        assert!(!collection.fetch().await);
        assert!(collection.error().is_some());
        assert!(collection.data().is_none());
        assert_eq!(collection.generation(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unresolved_params_disable_the_fetch() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let mut collection =
            RemoteCollection::filtered("by_station", PageWindow::first(10), move |_, station: i64| {
                flag.store(true, Ordering::SeqCst);
                async move { Ok(Fetched::unpaged(vec![station])) }
            });

        assert!(!collection.fetch().await);
        assert!(matches!(collection.state(), FetchState::Disabled));
        assert!(!called.load(Ordering::SeqCst));
        assert_eq!(collection.requests(), 0);

        collection.set_params(Some(7));
        assert!(collection.fetch().await);
        assert_eq!(collection.data().unwrap().records, vec![7]);
    }
}
