//! Concrete dashboard lists built on the [`crate::pipeline`].
//!
//! Each submodule defines the display row for one ledger collection, how a raw
//! record becomes that row, and a constructor wiring the page to a [`Ledger`].
//! Growable collections page on the ledger side; reference collections used
//! for lookups are read in full, `reference_window` rows per request.

pub mod asset;
pub mod jam_kerja;
pub mod member;
pub mod penerimaan;
pub mod rencana;
pub mod spbu;

use crate::ledger::Ledger;
use crate::pipeline::fetcher::Fetched;
use crate::pipeline::paginator::PageWindow;
use crate::pipeline::resolver::ReferenceResolver;
use std::sync::Arc;

/// Lookup name for station labels.
pub const SPBU_LOOKUP: &str = "spbu";
/// Lookup name for member status labels.
pub const STATUS_LOOKUP: &str = "status_member";
/// Lookup name for product labels.
pub const PRODUK_LOOKUP: &str = "produk";

/// Station id to station name.
pub fn spbu_resolver(ledger: &Arc<dyn Ledger>, window: u64) -> ReferenceResolver {
    let ledger = Arc::clone(ledger);
    ReferenceResolver::new(SPBU_LOOKUP, "Unknown SPBU", window, move |page: PageWindow| {
        let ledger = Arc::clone(&ledger);
        async move {
            ledger
                .get_all_spbu(page.offset(), page.limit())
                .await
                .map(Fetched::from)
        }
    })
}

/// Member status id to status name.
pub fn status_resolver(ledger: &Arc<dyn Ledger>, window: u64) -> ReferenceResolver {
    let ledger = Arc::clone(ledger);
    ReferenceResolver::new(STATUS_LOOKUP, "Unknown Status", window, move |page: PageWindow| {
        let ledger = Arc::clone(&ledger);
        async move {
            ledger
                .get_all_status_member(page.offset(), page.limit())
                .await
                .map(Fetched::unpaged)
        }
    })
}

/// Product id to product name.
pub fn produk_resolver(ledger: &Arc<dyn Ledger>, window: u64) -> ReferenceResolver {
    let ledger = Arc::clone(ledger);
    ReferenceResolver::new(PRODUK_LOOKUP, "Unknown Produk", window, move |page: PageWindow| {
        let ledger = Arc::clone(&ledger);
        async move {
            ledger
                .get_all_produk(page.offset(), page.limit())
                .await
                .map(Fetched::unpaged)
        }
    })
}

/// Formats an optional cell value, `-` when absent.
pub(crate) fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}
