//! Station asset list.

use super::{SPBU_LOOKUP, spbu_resolver};
use crate::config::DisplayConfig;
use crate::entities::asset;
use crate::ledger::{EntityKind, EntityRef, Ledger};
use crate::pipeline::assembler::Assembler;
use crate::pipeline::encoding::{decode_amount, format_rupiah};
use crate::pipeline::fetcher::{Fetched, RemoteCollection};
use crate::pipeline::mutation::MutationIntent;
use crate::pipeline::page::ListPage;
use crate::pipeline::paginator::{PageWindow, PaginationMode};
use crate::pipeline::resolver::Lookups;
use crate::report::TableRow;
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRow {
    pub id: i64,
    pub nama: String,
    pub spbu_name: String,
    pub jumlah: i64,
    /// Value per unit
    pub nilai: Decimal,
    /// `nilai * jumlah`
    pub total_nilai: Decimal,
}

impl AssetRow {
    #[must_use]
    pub fn build(record: &asset::Model, lookups: &Lookups) -> Self {
        let nilai = decode_amount(record.nilai);
        Self {
            id: record.id,
            nama: record.nama.clone(),
            spbu_name: lookups.resolve(SPBU_LOOKUP, record.spbu_id).to_string(),
            jumlah: record.jumlah,
            nilai,
            total_nilai: nilai.saturating_mul(Decimal::from(record.jumlah)),
        }
    }

    #[must_use]
    pub fn delete_intent(&self) -> MutationIntent {
        MutationIntent::new(EntityRef::new(EntityKind::Asset, self.id), self.nama.clone())
    }
}

impl TableRow for AssetRow {
    fn headers() -> &'static [&'static str] {
        &["ID", "Nama", "SPBU", "Jumlah", "Nilai", "Total"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.nama.clone(),
            self.spbu_name.clone(),
            self.jumlah.to_string(),
            format_rupiah(self.nilai),
            format_rupiah(self.total_nilai),
        ]
    }
}

pub type AssetPage = ListPage<asset::Model, AssetRow>;

pub fn page(ledger: &Arc<dyn Ledger>, display: DisplayConfig) -> AssetPage {
    let source = Arc::clone(ledger);
    let collection = RemoteCollection::new(
        "asset",
        PageWindow::first(display.page_size),
        move |window: PageWindow| {
            let ledger = Arc::clone(&source);
            async move {
                ledger
                    .get_all_assets(window.offset(), window.limit())
                    .await
                    .map(Fetched::from)
            }
        },
    );

    ListPage::new(
        "asset",
        collection,
        Assembler::new(AssetRow::build),
        PaginationMode::Server,
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
    use std::str::FromStr;

    #[tokio::test]
    async fn test_asset_values_are_decoded() -> Result<()> {
        let ledger = setup_test_ledger().await?;
        let station = create_test_spbu(&ledger, "SPBU A").await?;
        create_test_asset(&ledger, station.id, "Dispenser", 4, 12_500_000_050).await?;
        let shared: Arc<dyn Ledger> = Arc::new(ledger);

        let mut page = page(&shared, DisplayConfig::default());
        page.load().await;
        let rows = page.visible_rows();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].nilai, Decimal::from_str("125000000.50").unwrap());
        assert_eq!(rows[0].total_nilai, Decimal::from_str("500000002.00").unwrap());
        assert_eq!(rows[0].cells()[4], "Rp 125.000.000,50");
        Ok(())
    }
}
