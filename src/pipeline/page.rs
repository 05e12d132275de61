//! One list screen: fetcher, resolvers, assembler, paginator and mutation
//! dispatcher wired together.
//!
//! [`ListPage::load`] awaits the primary collection and every reference
//! resolver concurrently; rows are assembled only once all of them are ready.
//! [`ListPage::view_state`] reduces the stage states to a single render branch.

use super::SoftDelete;
use super::assembler::Assembler;
use super::fetcher::{FetchState, RemoteCollection};
use super::mutation::{
    MutationAction, MutationDispatcher, MutationIntent, SubmitOutcome, apply_to_ledger,
};
use super::paginator::{PaginationMode, Paginator};
use super::resolver::{Lookups, ReferenceResolver};
use crate::config::session::Session;
use crate::errors::{Error, Result};
use crate::ledger::Ledger;
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, instrument};

/// What a list should render. Exactly one branch applies at a time.
#[derive(Debug, Clone)]
pub enum ViewState<V> {
    /// A fetch has not finished yet
    Loading,
    /// Filter parameters are unresolved, so nothing was requested
    Unavailable,
    /// A fetch failed; offer a retry
    Failed(Arc<Error>),
    /// Every fetch succeeded and there are no active rows
    Empty,
    Populated { rows: Vec<V> },
}

impl<V> ViewState<V> {
    #[must_use]
    pub fn rows(&self) -> &[V] {
        match self {
            Self::Populated { rows } => rows,
            _ => &[],
        }
    }
}

pub struct ListPage<R, V, P = ()> {
    name: &'static str,
    collection: RemoteCollection<R, P>,
    resolvers: Vec<ReferenceResolver>,
    assembler: Assembler<R, V>,
    paginator: Paginator,
    mode: PaginationMode,
    dispatcher: MutationDispatcher,
}

impl<R, V, P> ListPage<R, V, P>
where
    R: SoftDelete + Send + Sync + 'static,
    V: Clone,
    P: Clone + Send + Sync + 'static,
{
    /// In server mode the collection is asked for one page at a time; in client
    /// mode it keeps the window it was built with and is sliced locally.
    pub fn new(
        name: &'static str,
        mut collection: RemoteCollection<R, P>,
        assembler: Assembler<R, V>,
        mode: PaginationMode,
        page_size: u64,
    ) -> Self {
        let paginator = Paginator::new(page_size);
        if mode == PaginationMode::Server {
            collection.set_window(paginator.window());
        }

        Self {
            name,
            collection,
            resolvers: Vec::new(),
            assembler,
            paginator,
            mode,
            dispatcher: MutationDispatcher::new(),
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: ReferenceResolver) -> Self {
        self.resolvers.push(resolver);
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn mode(&self) -> PaginationMode {
        self.mode
    }

    #[must_use]
    pub const fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    #[must_use]
    pub const fn collection(&self) -> &RemoteCollection<R, P> {
        &self.collection
    }

    #[must_use]
    pub const fn dispatcher(&self) -> &MutationDispatcher {
        &self.dispatcher
    }

    /// Supplies (or withdraws) the filter the collection needs.
    pub fn set_params(&mut self, params: Option<P>) {
        self.collection.set_params(params);
    }

    /// Puts the page into its failed state without issuing a request.
    pub fn fail(&mut self, error: Error) {
        self.collection.set_params(None);
        self.collection.fail(error);
    }

    /// Fetches the collection and all reference collections concurrently.
    #[instrument(skip(self), fields(page = self.name))]
    pub async fn load(&mut self) {
        let collection = self.collection.fetch();
        let lookups = join_all(self.resolvers.iter_mut().map(|resolver| resolver.fetch()));
        let (fetched, resolved) = futures::join!(collection, lookups);
        debug!(
            fetched,
            resolved = resolved.iter().filter(|ok| **ok).count(),
            resolvers = resolved.len(),
            "Page inputs loaded"
        );

        self.sync_total().await;
    }

    /// Manual retry after a failed load.
    pub async fn retry(&mut self) {
        self.load().await;
    }

    /// Re-runs only the primary collection, e.g. after a mutation.
    pub async fn refetch(&mut self) {
        self.collection.refetch().await;
        self.sync_total().await;
    }

    /// Updates the paginator from the latest fetch. When the current page fell
    /// off the end in server mode, the clamped page is fetched once more.
    async fn sync_total(&mut self) {
        let Some(total) = self.total_items() else {
            return;
        };
        self.paginator.set_total(total);

        if self.mode == PaginationMode::Server && self.paginator.window() != self.collection.window() {
            self.collection.set_window(self.paginator.window());
            self.collection.fetch().await;
            if let Some(total) = self.total_items() {
                self.paginator.set_total(total);
            }
        }
    }

    fn total_items(&mut self) -> Option<u64> {
        match self.mode {
            PaginationMode::Server => {
                let fetched = self.collection.data()?;
                Some(
                    fetched
                        .total
                        .unwrap_or_else(|| u64::try_from(fetched.records.len()).unwrap_or(u64::MAX)),
                )
            }
            PaginationMode::Client => {
                if self.collection.data().is_none() {
                    return None;
                }
                let rows = self.rows();
                Some(u64::try_from(rows.len()).unwrap_or(u64::MAX))
            }
        }
    }

    fn lookups(&self) -> Option<Lookups> {
        let mut lookups = Lookups::default();
        for resolver in &self.resolvers {
            lookups.insert(resolver.name(), resolver.generation(), Arc::clone(resolver.table()?));
        }
        Some(lookups)
    }

    /// All assembled rows of the latest fetch (one page in server mode, the
    /// whole window in client mode). Empty until every input is ready.
    pub fn rows(&mut self) -> Arc<Vec<V>> {
        let lookups = self.lookups();
        let generation = self.collection.generation();
        let source = self
            .collection
            .data()
            .map(|fetched| (generation, fetched.records.as_slice()));
        self.assembler.view(source, lookups.as_ref())
    }

    /// Rows on the current page.
    pub fn visible_rows(&mut self) -> Vec<V> {
        let rows = self.rows();
        match self.mode {
            PaginationMode::Server => (*rows).clone(),
            PaginationMode::Client => self.paginator.slice(rows.as_slice()).to_vec(),
        }
    }

    pub fn view_state(&mut self) -> ViewState<V> {
        match self.collection.state() {
            FetchState::Idle | FetchState::Loading => return ViewState::Loading,
            FetchState::Disabled => return ViewState::Unavailable,
            FetchState::Failed(error) => return ViewState::Failed(Arc::clone(error)),
            FetchState::Ready(_) => {}
        }

        for resolver in &self.resolvers {
            match resolver.state() {
                FetchState::Failed(error) => return ViewState::Failed(Arc::clone(error)),
                FetchState::Ready(_) => {}
                _ => return ViewState::Loading,
            }
        }

        let rows = self.visible_rows();
        if rows.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Populated { rows }
        }
    }

    /// Moves to `page`; in server mode the new window is fetched.
    pub async fn go_to_page(&mut self, page: u64) -> u64 {
        let selected = self.paginator.go_to(page);
        if self.mode == PaginationMode::Server && self.paginator.window() != self.collection.window() {
            self.collection.set_window(self.paginator.window());
            self.refetch().await;
        }
        selected
    }

    pub async fn next_page(&mut self) -> u64 {
        self.go_to_page(self.paginator.current_page().saturating_add(1))
            .await
    }

    pub async fn previous_page(&mut self) -> u64 {
        self.go_to_page(self.paginator.current_page().saturating_sub(1))
            .await
    }

    /// Changes rows per page and returns to page 1.
    pub async fn set_page_size(&mut self, page_size: u64) {
        self.paginator.set_page_size(page_size);
        if self.mode == PaginationMode::Server {
            self.collection.set_window(self.paginator.window());
            self.refetch().await;
        } else if let Some(total) = self.total_items() {
            self.paginator.set_total(total);
        }
    }

    /// Opens a confirmation for one row.
    ///
    /// # Errors
    /// [`Error::MutationInProgress`] while another submission is in flight.
    pub fn open(&self, intent: MutationIntent) -> Result<()> {
        self.dispatcher.open(intent)
    }

    /// # Errors
    /// [`Error::MutationInProgress`] once the call has been dispatched.
    pub fn cancel(&self) -> Result<()> {
        self.dispatcher.cancel()
    }

    /// Submits `action` through `call` and refetches the collection when the
    /// ledger acknowledges it.
    pub async fn submit<F, Fut>(&mut self, action: MutationAction, call: F) -> SubmitOutcome
    where
        F: FnOnce(MutationIntent, MutationAction) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let outcome = self.dispatcher.submit(action, call).await;
        if outcome.is_completed() {
            self.refetch().await;
        }
        outcome
    }

    /// Submits `action` for the pending intent to `ledger` on behalf of `session`.
    pub async fn submit_to_ledger(
        &mut self,
        ledger: &dyn Ledger,
        session: &Session,
        action: MutationAction,
    ) -> SubmitOutcome {
        self.submit(action, |intent, action| async move {
            apply_to_ledger(ledger, session, &intent, &action).await
        })
        .await
    }
}
