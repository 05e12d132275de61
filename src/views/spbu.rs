//! Fuel station list and detail.

use crate::config::DisplayConfig;
use crate::entities::spbu;
use crate::ledger::{EntityKind, EntityRef, Ledger};
use crate::pipeline::assembler::Assembler;
use crate::pipeline::detail::{DetailState, load_detail};
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
pub struct SpbuRow {
    pub id: i64,
    pub kode: String,
    pub nama: String,
    pub alamat: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl SpbuRow {
    #[must_use]
    pub fn from_record(record: &spbu::Model) -> Self {
        Self {
            id: record.id,
            kode: record.kode.clone(),
            nama: record.nama.clone(),
            alamat: record.alamat.clone(),
            created_at: timestamp_to_datetime(record.created_at),
        }
    }

    #[must_use]
    pub fn delete_intent(&self) -> MutationIntent {
        MutationIntent::new(EntityRef::new(EntityKind::Spbu, self.id), self.nama.clone())
    }
}

impl TableRow for SpbuRow {
    fn headers() -> &'static [&'static str] {
        &["ID", "Kode", "Nama", "Alamat", "Dibuat"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.kode.clone(),
            self.nama.clone(),
            self.alamat.clone(),
            super::or_dash(self.created_at.map(|at| at.format("%Y-%m-%d"))),
        ]
    }
}

pub type SpbuPage = ListPage<spbu::Model, SpbuRow>;

/// Station list paged on the ledger side.
pub fn page(ledger: &Arc<dyn Ledger>, display: DisplayConfig) -> SpbuPage {
    let ledger = Arc::clone(ledger);
    let collection = RemoteCollection::new(
        "spbu",
        PageWindow::first(display.page_size),
        move |window: PageWindow| {
            let ledger = Arc::clone(&ledger);
            async move {
                ledger
                    .get_all_spbu(window.offset(), window.limit())
                    .await
                    .map(Fetched::from)
            }
        },
    );

    ListPage::new(
        "spbu",
        collection,
        Assembler::new(|record: &spbu::Model, _: &Lookups| SpbuRow::from_record(record)),
        PaginationMode::Server,
        display.page_size,
    )
}

/// Loads one station for its detail view.
pub async fn detail(ledger: &dyn Ledger, id: i64) -> DetailState<SpbuRow> {
    load_detail(ledger.get_spbu(id))
        .await
        .map(|record| SpbuRow::from_record(&record))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Result;
    use crate::pipeline::mutation::MutationAction;
    use crate::pipeline::page::ViewState;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_spbu_page_lists_active_stations() -> Result<()> {
        let ledger = setup_test_ledger().await?;
        for i in 1..=12 {
            create_test_spbu(&ledger, &format!("SPBU {i:02}")).await?;
        }
        let shared: Arc<dyn Ledger> = Arc::new(ledger);

        let mut page = page(&shared, DisplayConfig::default());
        page.load().await;

        let state = page.view_state();
        assert_eq!(state.rows().len(), 10);
        assert_eq!(state.rows()[0].nama, "SPBU 01");
        assert!(state.rows()[0].created_at.is_some());
        assert_eq!(page.paginator().total_pages(), 2);

        page.next_page().await;
        assert_eq!(page.visible_rows().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_from_page_refetches() -> Result<()> {
        let ledger = setup_test_ledger().await?;
        let admin = admin_session(&ledger).await?;
        create_test_spbu(&ledger, "SPBU A").await?;
        create_test_spbu(&ledger, "SPBU B").await?;
        let shared: Arc<dyn Ledger> = Arc::new(ledger);

        let mut page = page(&shared, DisplayConfig::default());
        page.load().await;
        let target = page.visible_rows()[0].clone();

        page.open(target.delete_intent())?;
        let outcome = page
            .submit_to_ledger(shared.as_ref(), &admin, MutationAction::Delete)
            .await;

        assert!(outcome.is_completed());
        let names: Vec<String> = page.visible_rows().into_iter().map(|row| row.nama).collect();
        assert_eq!(names, vec!["SPBU B".to_string()]);

        assert!(detail(shared.as_ref(), target.id).await.is_not_found());
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_ledger_renders_empty_state() -> Result<()> {
        let shared: Arc<dyn Ledger> = Arc::new(setup_test_ledger().await?);
        let mut page = page(&shared, DisplayConfig::default());
        page.load().await;
        assert!(matches!(page.view_state(), ViewState::Empty));
        Ok(())
    }
}
