//! Asset entity - equipment owned by an SPBU (dispensers, tanks, generators).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Asset ledger record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nama: String,
    pub spbu_id: i64,
    /// Unit count
    pub jumlah: i64,
    /// Book value per unit, fixed-point x100
    pub nilai: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
