//! List-view data pipeline.
//!
//! Every dashboard list goes through the same stages: a [`fetcher`] pulls a
//! window of raw ledger records, [`resolver`]s build id-to-label tables from
//! auxiliary collections, the [`assembler`] joins and decodes them into display
//! rows, the [`paginator`] picks the visible slice and the [`mutation`]
//! dispatcher submits delete/approve/reject actions and triggers a refetch.
//! [`page::ListPage`] wires the stages together for one screen.

pub mod assembler;
pub mod detail;
pub mod encoding;
pub mod fetcher;
pub mod mutation;
pub mod page;
pub mod paginator;
pub mod resolver;

use crate::entities::{
    asset, jam_kerja, member, penerimaan, produk, rencana_pembelian, spbu, status_member,
};

/// A ledger record carrying an id and a soft-delete flag.
pub trait SoftDelete {
    fn record_id(&self) -> i64;

    fn is_deleted(&self) -> bool;
}

/// A record that can label foreign references to it.
pub trait Reference: SoftDelete {
    fn label(&self) -> String;
}

macro_rules! impl_soft_delete {
    ($($model:ty),+ $(,)?) => {
        $(
            impl SoftDelete for $model {
                fn record_id(&self) -> i64 {
                    self.id
                }

                fn is_deleted(&self) -> bool {
                    self.deleted
                }
            }
        )+
    };
}

impl_soft_delete!(
    spbu::Model,
    member::Model,
    status_member::Model,
    jam_kerja::Model,
    produk::Model,
    asset::Model,
    rencana_pembelian::Model,
    penerimaan::Model,
);

impl Reference for spbu::Model {
    fn label(&self) -> String {
        self.nama.clone()
    }
}

impl Reference for status_member::Model {
    fn label(&self) -> String {
        self.nama.clone()
    }
}

impl Reference for produk::Model {
    fn label(&self) -> String {
        self.nama.clone()
    }
}
