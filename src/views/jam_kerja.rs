//! Work shift list.
//!
//! Shifts are a small per-station configuration set, so the whole collection
//! is fetched in one reference window, ordered by `urutan` and sliced locally.
//! A ledger holding more shifts than the window is logged, never silently cut.

use super::{SPBU_LOOKUP, spbu_resolver};
use crate::config::DisplayConfig;
use crate::entities::jam_kerja;
use crate::ledger::{EntityKind, EntityRef, Ledger};
use crate::pipeline::assembler::Assembler;
use crate::pipeline::encoding::format_time;
use crate::pipeline::fetcher::{Fetched, RemoteCollection};
use crate::pipeline::mutation::MutationIntent;
use crate::pipeline::page::ListPage;
use crate::pipeline::paginator::{PageWindow, PaginationMode};
use crate::pipeline::resolver::Lookups;
use crate::report::TableRow;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JamKerjaRow {
    pub id: i64,
    pub nama: String,
    pub spbu_name: String,
    /// `HH:MM`
    pub mulai: String,
    /// `HH:MM`
    pub selesai: String,
    pub urutan: i32,
}

impl JamKerjaRow {
    #[must_use]
    pub fn build(record: &jam_kerja::Model, lookups: &Lookups) -> Self {
        Self {
            id: record.id,
            nama: record.nama.clone(),
            spbu_name: lookups.resolve(SPBU_LOOKUP, record.spbu_id).to_string(),
            mulai: format_time(record.jam_mulai),
            selesai: format_time(record.jam_selesai),
            urutan: record.urutan,
        }
    }

    #[must_use]
    pub fn delete_intent(&self) -> MutationIntent {
        MutationIntent::new(EntityRef::new(EntityKind::JamKerja, self.id), self.nama.clone())
    }
}

impl TableRow for JamKerjaRow {
    fn headers() -> &'static [&'static str] {
        &["Urutan", "Nama", "SPBU", "Mulai", "Selesai"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.urutan.to_string(),
            self.nama.clone(),
            self.spbu_name.clone(),
            self.mulai.clone(),
            self.selesai.clone(),
        ]
    }
}

pub type JamKerjaPage = ListPage<jam_kerja::Model, JamKerjaRow>;

pub fn page(ledger: &Arc<dyn Ledger>, display: DisplayConfig) -> JamKerjaPage {
    let source = Arc::clone(ledger);
    let collection = RemoteCollection::new(
        "jam_kerja",
        PageWindow::first(display.reference_window),
        move |window: PageWindow| {
            let ledger = Arc::clone(&source);
            async move {
                let listing = ledger.get_all_jam_kerja(0, window.limit()).await;
                if let Ok(listing) = &listing {
                    if listing.total > window.limit() {
                        warn!(
                            total = listing.total,
                            window = window.limit(),
                            "Shift list exceeds the reference window; later shifts are not shown"
                        );
                    }
                }
                listing.map(|listing| Fetched::unpaged(listing.records))
            }
        },
    );

    ListPage::new(
        "jam_kerja",
        collection,
        Assembler::new(JamKerjaRow::build).sorted_by(|a, b| a.urutan.cmp(&b.urutan)),
        PaginationMode::Client,
        display.page_size,
    )
    .with_resolver(spbu_resolver(ledger, display.reference_window))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Result;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_shifts_are_sorted_and_formatted() -> Result<()> {
        let ledger = setup_test_ledger().await?;
        let station = create_test_spbu(&ledger, "SPBU A").await?;
        create_test_jam_kerja(&ledger, station.id, "Shift Malam", 1320, 1439, 3).await?;
        create_test_jam_kerja(&ledger, station.id, "Shift Pagi", 0, 75, 1).await?;
        create_test_jam_kerja(&ledger, station.id, "Shift Siang", 480, 960, 2).await?;
        let shared: Arc<dyn Ledger> = Arc::new(ledger);

        let mut page = page(&shared, DisplayConfig::default());
        page.load().await;
        let rows = page.visible_rows();

        let names: Vec<&str> = rows.iter().map(|row| row.nama.as_str()).collect();
        assert_eq!(names, vec!["Shift Pagi", "Shift Siang", "Shift Malam"]);
        assert_eq!(rows[0].mulai, "00:00");
        assert_eq!(rows[0].selesai, "01:15");
        assert_eq!(rows[2].selesai, "23:59");
        assert_eq!(rows[0].spbu_name, "SPBU A");
        Ok(())
    }

    #[tokio::test]
    async fn test_shifts_paginate_locally() -> Result<()> {
        let ledger = setup_test_ledger().await?;
        let station = create_test_spbu(&ledger, "SPBU A").await?;
        for i in 1..=23 {
            create_test_jam_kerja(&ledger, station.id, &format!("Shift {i:02}"), 0, 60, i).await?;
        }
        let shared: Arc<dyn Ledger> = Arc::new(ledger);

        let mut page = page(&shared, DisplayConfig::default());
        page.load().await;
        assert_eq!(page.paginator().total_pages(), 3);

        page.go_to_page(3).await;
        let urutan: Vec<i32> = page.visible_rows().iter().map(|row| row.urutan).collect();
        assert_eq!(urutan, vec![21, 22, 23]);
        assert_eq!(page.collection().requests(), 1);
        Ok(())
    }
}
