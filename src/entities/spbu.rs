//! SPBU entity - a fuel station site, the tenant dimension most records are scoped to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SPBU ledger record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "spbu")]
pub struct Model {
    /// Unique identifier for the station
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Station number as printed on the signage (e.g. "34-17107")
    pub kode: String,
    /// Display name of the station
    pub nama: String,
    /// Street address
    pub alamat: String,
    /// Unix seconds
    pub created_at: i64,
    /// Unix seconds
    pub updated_at: i64,
    /// Soft delete flag
    pub deleted: bool,
}

/// SPBU records are referenced by id only; the ledger enforces no foreign keys.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
