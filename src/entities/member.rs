//! Member entity - a staff identity record (KTP) attached to one SPBU.
//!
//! `gender` is a small-integer enum, `wallet` is a 40-hex address where the
//! all-zero address means "no wallet bound".

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member (KTP) ledger record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ktp")]
pub struct Model {
    /// Unique identifier for the member
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name as on the identity card
    pub nama: String,
    /// National identity number
    pub nik: String,
    /// 0 = male, 1 = female
    pub gender: i16,
    /// SPBU the member works at
    pub spbu_id: i64,
    /// `StatusMember` id
    pub status_member_id: i64,
    /// Bound wallet address
    pub wallet: String,
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
