//! Fuel receiving list.

use super::{PRODUK_LOOKUP, SPBU_LOOKUP, or_dash, produk_resolver, spbu_resolver};
use crate::config::DisplayConfig;
use crate::entities::penerimaan;
use crate::ledger::{EntityKind, EntityRef, Ledger};
use crate::pipeline::assembler::Assembler;
use crate::pipeline::encoding::timestamp_to_datetime;
use crate::pipeline::fetcher::{Fetched, RemoteCollection};
use crate::pipeline::mutation::MutationIntent;
use crate::pipeline::page::ListPage;
use crate::pipeline::paginator::{PageWindow, PaginationMode};
use crate::pipeline::resolver::Lookups;
use crate::report::TableRow;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenerimaanRow {
    pub id: i64,
    pub rencana_id: i64,
    pub produk: String,
    pub spbu_name: String,
    pub jumlah_liter: i64,
    pub diterima_at: Option<DateTime<Utc>>,
}

impl PenerimaanRow {
    #[must_use]
    pub fn build(record: &penerimaan::Model, lookups: &Lookups) -> Self {
        Self {
            id: record.id,
            rencana_id: record.rencana_pembelian_id,
            produk: lookups.resolve(PRODUK_LOOKUP, record.produk_id).to_string(),
            spbu_name: lookups.resolve(SPBU_LOOKUP, record.spbu_id).to_string(),
            jumlah_liter: record.jumlah_liter,
            diterima_at: timestamp_to_datetime(record.diterima_at),
        }
    }

    #[must_use]
    pub fn delete_intent(&self) -> MutationIntent {
        MutationIntent::new(
            EntityRef::new(EntityKind::Penerimaan, self.id),
            format!("Penerimaan #{}", self.id),
        )
    }
}

impl TableRow for PenerimaanRow {
    fn headers() -> &'static [&'static str] {
        &["ID", "Rencana", "Produk", "SPBU", "Liter", "Diterima"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.rencana_id.to_string(),
            self.produk.clone(),
            self.spbu_name.clone(),
            self.jumlah_liter.to_string(),
            or_dash(self.diterima_at.map(|at| at.format("%Y-%m-%d %H:%M"))),
        ]
    }
}

pub type PenerimaanPage = ListPage<penerimaan::Model, PenerimaanRow>;

pub fn page(ledger: &Arc<dyn Ledger>, display: DisplayConfig) -> PenerimaanPage {
    let source = Arc::clone(ledger);
    let collection = RemoteCollection::new(
        "penerimaan",
        PageWindow::first(display.page_size),
        move |window: PageWindow| {
            let ledger = Arc::clone(&source);
            async move {
                ledger
                    .get_all_penerimaan(window.offset(), window.limit())
                    .await
                    .map(Fetched::from)
            }
        },
    );

    ListPage::new(
        "penerimaan",
        collection,
        Assembler::new(PenerimaanRow::build),
        PaginationMode::Server,
        display.page_size,
    )
    .with_resolver(spbu_resolver(ledger, display.reference_window))
    .with_resolver(produk_resolver(ledger, display.reference_window))
}
