//! Procurement plans (rencana pembelian) of the operator's station.
//!
//! The list is scoped to the SPBU of the member bound to the session wallet.
//! Until that lookup succeeds the page stays disabled instead of querying a
//! placeholder station. Plans are filtered by workflow stage and can be
//! approved or rejected with a note.

use super::{PRODUK_LOOKUP, SPBU_LOOKUP, or_dash, produk_resolver, spbu_resolver};
use crate::config::DisplayConfig;
use crate::config::session::Session;
use crate::entities::rencana_pembelian;
use crate::errors::Result;
use crate::ledger::{EntityKind, EntityRef, Ledger, ProcurementStatus};
use crate::pipeline::assembler::Assembler;
use crate::pipeline::detail::{DetailState, load_detail};
use crate::pipeline::encoding::{decode_amount, format_rupiah, timestamp_to_datetime};
use crate::pipeline::fetcher::{Fetched, RemoteCollection};
use crate::pipeline::mutation::MutationIntent;
use crate::pipeline::page::ListPage;
use crate::pipeline::paginator::{PageWindow, PaginationMode};
use crate::pipeline::resolver::Lookups;
use crate::report::TableRow;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Station and workflow stage a procurement list is filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RencanaFilter {
    pub spbu_id: i64,
    pub status: ProcurementStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RencanaRow {
    pub id: i64,
    pub kode: String,
    pub spbu_name: String,
    pub produk: String,
    pub jumlah_liter: i64,
    pub total_harga: Decimal,
    pub pajak: Decimal,
    /// `None` for a stage code this build does not know
    pub status: Option<ProcurementStatus>,
    pub konfirmasi: Option<bool>,
    pub catatan: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl RencanaRow {
    #[must_use]
    pub fn build(record: &rencana_pembelian::Model, lookups: &Lookups) -> Self {
        Self {
            id: record.id,
            kode: record.kode.clone(),
            spbu_name: lookups.resolve(SPBU_LOOKUP, record.spbu_id).to_string(),
            produk: lookups.resolve(PRODUK_LOOKUP, record.produk_id).to_string(),
            jumlah_liter: record.jumlah_liter,
            total_harga: decode_amount(record.total_harga),
            pajak: decode_amount(record.pajak),
            status: ProcurementStatus::from_wire(record.status),
            konfirmasi: record.konfirmasi,
            catatan: record.catatan.clone(),
            created_at: timestamp_to_datetime(record.created_at),
        }
    }

    /// Price including tax.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        self.total_harga.saturating_add(self.pajak)
    }

    /// Intent for approving or rejecting this plan.
    #[must_use]
    pub fn review_intent(&self) -> MutationIntent {
        MutationIntent::new(
            EntityRef::new(EntityKind::RencanaPembelian, self.id),
            self.kode.clone(),
        )
    }

    #[must_use]
    pub fn delete_intent(&self) -> MutationIntent {
        self.review_intent()
    }
}

fn konfirmasi_label(konfirmasi: Option<bool>) -> &'static str {
    match konfirmasi {
        None => "Menunggu",
        Some(true) => "Disetujui",
        Some(false) => "Ditolak",
    }
}

impl TableRow for RencanaRow {
    fn headers() -> &'static [&'static str] {
        &[
            "Kode",
            "SPBU",
            "Produk",
            "Liter",
            "Total",
            "Pajak",
            "Status",
            "Konfirmasi",
            "Catatan",
        ]
    }

    fn cells(&self) -> Vec<String> {
        let catatan = if self.catatan.is_empty() {
            None
        } else {
            Some(self.catatan.as_str())
        };

        vec![
            self.kode.clone(),
            self.spbu_name.clone(),
            self.produk.clone(),
            self.jumlah_liter.to_string(),
            format_rupiah(self.total_harga),
            format_rupiah(self.pajak),
            or_dash(self.status),
            konfirmasi_label(self.konfirmasi).to_string(),
            or_dash(catatan),
        ]
    }
}

pub type RencanaPage = ListPage<rencana_pembelian::Model, RencanaRow, RencanaFilter>;

/// Procurement list; disabled until [`ListPage::set_params`] receives a filter.
pub fn page(ledger: &Arc<dyn Ledger>, display: DisplayConfig) -> RencanaPage {
    let source = Arc::clone(ledger);
    let collection = RemoteCollection::filtered(
        "rencana_pembelian",
        PageWindow::first(display.page_size),
        move |window: PageWindow, filter: RencanaFilter| {
            let ledger = Arc::clone(&source);
            async move {
                let records = ledger.get_rencana_by_status(
                    window.offset(),
                    window.limit(),
                    filter.spbu_id,
                    filter.status,
                );
                let total = ledger.count_rencana_by_status(filter.spbu_id, filter.status);
                futures::try_join!(records, total).map(|(records, total)| Fetched {
                    records,
                    total: Some(total),
                })
            }
        },
    );

    ListPage::new(
        "rencana_pembelian",
        collection,
        Assembler::new(RencanaRow::build),
        PaginationMode::Server,
        display.page_size,
    )
    .with_resolver(spbu_resolver(ledger, display.reference_window))
    .with_resolver(produk_resolver(ledger, display.reference_window))
}

/// The station the session's member works at, if the session has a bound member.
///
/// # Errors
/// Propagates ledger errors from the member lookup.
#[instrument(skip(ledger, session))]
pub async fn resolve_scope(ledger: &dyn Ledger, session: &Session) -> Result<Option<i64>> {
    let Some(account) = session.account() else {
        debug!("No connected account, procurement scope unresolved");
        return Ok(None);
    };

    let member = ledger.get_member_by_wallet(account).await?;
    let scope = member.filter(|m| !m.deleted).map(|m| m.spbu_id);
    debug!(account = %account, spbu_id = ?scope, "Resolved procurement scope");
    Ok(scope)
}

/// Filter for `status` within the session's station, or `None` while unresolved.
///
/// # Errors
/// Propagates ledger errors from the member lookup.
pub async fn resolve_filter(
    ledger: &dyn Ledger,
    session: &Session,
    status: ProcurementStatus,
) -> Result<Option<RencanaFilter>> {
    Ok(resolve_scope(ledger, session)
        .await?
        .map(|spbu_id| RencanaFilter { spbu_id, status }))
}

/// Resolves the session's scope, then loads `page` at `status`.
///
/// A failed scope lookup becomes the page's failed state, so it renders with a
/// retry affordance like any other fetch error. Calling this again is the
/// retry. Returns the resolved station, if any.
pub async fn load_for_session(
    page: &mut RencanaPage,
    ledger: &dyn Ledger,
    session: &Session,
    status: ProcurementStatus,
) -> Option<i64> {
    match resolve_filter(ledger, session, status).await {
        Ok(filter) => {
            page.set_params(filter);
            page.load().await;
            filter.map(|f| f.spbu_id)
        }
        Err(e) => {
            page.fail(e);
            None
        }
    }
}

/// Plan counts per workflow stage for one station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcurementSummary {
    pub spbu_id: i64,
    pub counts: Vec<(ProcurementStatus, u64)>,
}

impl ProcurementSummary {
    #[must_use]
    pub fn count(&self, status: ProcurementStatus) -> u64 {
        self.counts
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, count)| *count)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

/// Counts active plans at every stage concurrently.
///
/// # Errors
/// Fails if any count call fails.
pub async fn procurement_summary(ledger: &dyn Ledger, spbu_id: i64) -> Result<ProcurementSummary> {
    let counts = try_join_all(
        ProcurementStatus::ALL
            .iter()
            .map(|status| ledger.count_rencana_by_status(spbu_id, *status)),
    )
    .await?;

    Ok(ProcurementSummary {
        spbu_id,
        counts: ProcurementStatus::ALL.into_iter().zip(counts).collect(),
    })
}

/// Loads one plan for its detail view.
pub async fn detail(ledger: &dyn Ledger, id: i64) -> DetailState<rencana_pembelian::Model> {
    load_detail(ledger.get_rencana(id)).await
}
