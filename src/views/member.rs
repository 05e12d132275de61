//! Member (KTP) list.

use super::{SPBU_LOOKUP, STATUS_LOOKUP, or_dash, spbu_resolver, status_resolver};
use crate::config::DisplayConfig;
use crate::entities::member;
use crate::ledger::{EntityKind, EntityRef, Ledger};
use crate::pipeline::assembler::Assembler;
use crate::pipeline::encoding::{Gender, WalletAddress, timestamp_to_datetime};
use crate::pipeline::fetcher::{Fetched, RemoteCollection};
use crate::pipeline::mutation::MutationIntent;
use crate::pipeline::page::ListPage;
use crate::pipeline::paginator::{PageWindow, PaginationMode};
use crate::pipeline::resolver::Lookups;
use crate::report::TableRow;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub id: i64,
    pub nama: String,
    pub nik: String,
    pub gender: Gender,
    pub spbu_name: String,
    pub status: String,
    /// `None` when the member has no bound wallet
    pub wallet: Option<WalletAddress>,
    pub created_at: Option<DateTime<Utc>>,
}

impl MemberRow {
    #[must_use]
    pub fn build(record: &member::Model, lookups: &Lookups) -> Self {
        Self {
            id: record.id,
            nama: record.nama.clone(),
            nik: record.nik.clone(),
            gender: Gender::from_wire(record.gender),
            spbu_name: lookups.resolve(SPBU_LOOKUP, record.spbu_id).to_string(),
            status: lookups
                .resolve(STATUS_LOOKUP, record.status_member_id)
                .to_string(),
            wallet: WalletAddress::from_wire(&record.wallet),
            created_at: timestamp_to_datetime(record.created_at),
        }
    }

    #[must_use]
    pub fn delete_intent(&self) -> MutationIntent {
        MutationIntent::new(EntityRef::new(EntityKind::Member, self.id), self.nama.clone())
    }
}

impl TableRow for MemberRow {
    fn headers() -> &'static [&'static str] {
        &["ID", "Nama", "NIK", "Jenis Kelamin", "SPBU", "Status", "Wallet"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.nama.clone(),
            self.nik.clone(),
            self.gender.to_string(),
            self.spbu_name.clone(),
            self.status.clone(),
            or_dash(self.wallet.as_ref().map(WalletAddress::short)),
        ]
    }
}

pub type MemberPage = ListPage<member::Model, MemberRow>;

pub fn page(ledger: &Arc<dyn Ledger>, display: DisplayConfig) -> MemberPage {
    let source = Arc::clone(ledger);
    let collection = RemoteCollection::new(
        "member",
        PageWindow::first(display.page_size),
        move |window: PageWindow| {
            let ledger = Arc::clone(&source);
            async move {
                ledger
                    .get_all_members(window.offset(), window.limit())
                    .await
                    .map(Fetched::from)
            }
        },
    );

    ListPage::new(
        "member",
        collection,
        Assembler::new(MemberRow::build),
        PaginationMode::Server,
        display.page_size,
    )
    .with_resolver(spbu_resolver(ledger, display.reference_window))
    .with_resolver(status_resolver(ledger, display.reference_window))
}
