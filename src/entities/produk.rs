//! Produk entity - a fuel product with its unit price.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fuel product ledger record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "produk")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product name (e.g. "Pertalite")
    pub nama: String,
    /// Price per litre, fixed-point x100
    pub harga: i64,
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
