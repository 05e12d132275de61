//! Penerimaan entity - a stock receiving record closing a procurement plan.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock receiving ledger record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "penerimaan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Procurement plan being received
    pub rencana_pembelian_id: i64,
    pub spbu_id: i64,
    pub produk_id: i64,
    /// Received volume in litres
    pub jumlah_liter: i64,
    /// Unix seconds when the delivery was received
    pub diterima_at: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
