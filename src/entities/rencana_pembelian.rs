//! Rencana pembelian entity - a fuel procurement plan and its workflow state.
//!
//! `status` is the small-integer encoding of
//! [`ProcurementStatus`](crate::ledger::ProcurementStatus). `konfirmasi` is
//! `None` until the plan has been approved or rejected at its current stage.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Procurement plan ledger record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rencana_pembelian")]
pub struct Model {
    /// Unique identifier for the plan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-facing plan code (e.g. "RP-2024-001")
    pub kode: String,
    /// Ordering SPBU
    pub spbu_id: i64,
    /// Ordered product
    pub produk_id: i64,
    /// Ordered volume in litres
    pub jumlah_liter: i64,
    /// Total price, fixed-point x100
    pub total_harga: i64,
    /// Tax, fixed-point x100
    pub pajak: i64,
    /// Workflow stage
    pub status: i16,
    /// Approval decision at the current stage
    pub konfirmasi: Option<bool>,
    /// Note attached to the last approval or rejection
    pub catatan: String,
    /// Unix seconds
    pub created_at: i64,
    /// Unix seconds
    pub updated_at: i64,
    /// Soft delete flag
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
