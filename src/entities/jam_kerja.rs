//! Jam kerja entity - a work shift definition for one SPBU.
//!
//! Shift boundaries are stored as minutes since midnight; `urutan` is the
//! display order of the shift within its station.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Work shift ledger record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jam_kerja")]
pub struct Model {
    /// Unique identifier for the shift
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Shift name (e.g. "Shift Pagi")
    pub nama: String,
    /// SPBU the shift belongs to
    pub spbu_id: i64,
    /// Start, minutes since midnight
    pub jam_mulai: i32,
    /// End, minutes since midnight
    pub jam_selesai: i32,
    /// Display order, ascending
    pub urutan: i32,
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
