//! Ledger boundary - the external record source the dashboard reads and writes.
//!
//! The dashboard never owns authoritative state. Every list, lookup and mutation
//! goes through [`Ledger`], whose methods mirror the remote procedures of the
//! SPBU contract: paged lists returning a total count, bounded reference
//! windows, a filtered list with a paired count, single-record lookups,
//! delete/confirm mutations and a role check.

pub mod seed;
pub mod sql;

use crate::{
    config::session::Session,
    entities::{
        asset, jam_kerja, member, penerimaan, produk, rencana_pembelian, spbu, status_member,
    },
    errors::Result,
    pipeline::encoding::WalletAddress,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use sql::SqlLedger;

/// One window of a paged collection plus the source's count of active records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<R> {
    pub records: Vec<R>,
    pub total: u64,
}

impl<R> Listing<R> {
    #[must_use]
    pub const fn new(records: Vec<R>, total: u64) -> Self {
        Self { records, total }
    }
}

/// Workflow stage of a procurement plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProcurementStatus {
    Rencana,
    Pembayaran,
    Ms2,
    Delivery,
    Penerimaan,
}

impl ProcurementStatus {
    /// All stages in workflow order.
    pub const ALL: [Self; 5] = [
        Self::Rencana,
        Self::Pembayaran,
        Self::Ms2,
        Self::Delivery,
        Self::Penerimaan,
    ];

    #[must_use]
    pub const fn from_wire(value: i16) -> Option<Self> {
        match value {
            0 => Some(Self::Rencana),
            1 => Some(Self::Pembayaran),
            2 => Some(Self::Ms2),
            3 => Some(Self::Delivery),
            4 => Some(Self::Penerimaan),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_wire(self) -> i16 {
        match self {
            Self::Rencana => 0,
            Self::Pembayaran => 1,
            Self::Ms2 => 2,
            Self::Delivery => 3,
            Self::Penerimaan => 4,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rencana => "Rencana",
            Self::Pembayaran => "Pembayaran",
            Self::Ms2 => "MS2",
            Self::Delivery => "Delivery",
            Self::Penerimaan => "Penerimaan",
        }
    }
}

impl fmt::Display for ProcurementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Access role checked before mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Operator,
    Viewer,
}

impl Role {
    #[must_use]
    pub const fn from_wire(value: i16) -> Option<Self> {
        match value {
            0 => Some(Self::Admin),
            1 => Some(Self::Operator),
            2 => Some(Self::Viewer),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_wire(self) -> i16 {
        match self {
            Self::Admin => 0,
            Self::Operator => 1,
            Self::Viewer => 2,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Operator => "operator",
            Self::Viewer => "viewer",
        }
    }
}

/// Record collections that support deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Spbu,
    Member,
    StatusMember,
    JamKerja,
    Produk,
    Asset,
    RencanaPembelian,
    Penerimaan,
}

impl EntityKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spbu => "SPBU",
            Self::Member => "Member",
            Self::StatusMember => "StatusMember",
            Self::JamKerja => "JamKerja",
            Self::Produk => "Produk",
            Self::Asset => "Asset",
            Self::RencanaPembelian => "RencanaPembelian",
            Self::Penerimaan => "Penerimaan",
        }
    }
}

/// Identifies one record for a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
}

impl EntityRef {
    #[must_use]
    pub const fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }
}

/// Remote procedures exposed by the SPBU ledger.
///
/// Implementations must be cheap to share behind an `Arc`; page queries clone
/// the handle into each request future.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn get_all_spbu(&self, offset: u64, limit: u64) -> Result<Listing<spbu::Model>>;

    async fn get_spbu(&self, id: i64) -> Result<Option<spbu::Model>>;

    async fn get_all_members(&self, offset: u64, limit: u64) -> Result<Listing<member::Model>>;

    /// Looks up the member bound to a wallet address.
    async fn get_member_by_wallet(&self, wallet: &WalletAddress)
    -> Result<Option<member::Model>>;

    async fn get_all_status_member(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<status_member::Model>>;

    async fn get_all_jam_kerja(&self, offset: u64, limit: u64)
    -> Result<Listing<jam_kerja::Model>>;

    async fn get_all_produk(&self, offset: u64, limit: u64) -> Result<Vec<produk::Model>>;

    async fn get_all_assets(&self, offset: u64, limit: u64) -> Result<Listing<asset::Model>>;

    async fn get_all_penerimaan(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Listing<penerimaan::Model>>;

    /// Procurement plans of one SPBU at one workflow stage.
    async fn get_rencana_by_status(
        &self,
        offset: u64,
        limit: u64,
        spbu_id: i64,
        status: ProcurementStatus,
    ) -> Result<Vec<rencana_pembelian::Model>>;

    async fn count_rencana_by_status(&self, spbu_id: i64, status: ProcurementStatus)
    -> Result<u64>;

    async fn get_rencana(&self, id: i64) -> Result<Option<rencana_pembelian::Model>>;

    /// Soft-deletes a record.
    async fn delete(&self, session: &Session, target: EntityRef) -> Result<()>;

    /// Approves or rejects a procurement plan at its current stage.
    async fn confirm_rencana(
        &self,
        session: &Session,
        id: i64,
        approve: bool,
        note: &str,
    ) -> Result<()>;

    async fn has_role(&self, role: Role, account: &WalletAddress) -> Result<bool>;
}
