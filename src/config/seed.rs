//! Seed records loaded from `spbu.toml`.
//!
//! A fresh local ledger is populated from these sections so list pages have
//! reference data (stations, member statuses, products) and at least one
//! account holding a role. Seeding is idempotent; see
//! [`crate::ledger::seed`].

use crate::ledger::Role;
use rust_decimal::Decimal;
use serde::Deserialize;

/// All seed sections of the configuration file.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct SeedData {
    #[serde(default)]
    pub spbu: Vec<SpbuSeed>,
    #[serde(default)]
    pub status_member: Vec<StatusMemberSeed>,
    #[serde(default)]
    pub produk: Vec<ProdukSeed>,
    #[serde(default)]
    pub member: Vec<MemberSeed>,
    #[serde(default)]
    pub jam_kerja: Vec<JamKerjaSeed>,
    #[serde(default)]
    pub role_grants: Vec<RoleGrantSeed>,
}

/// A fuel station, keyed by its station number
#[derive(Debug, Deserialize, Clone)]
pub struct SpbuSeed {
    pub kode: String,
    pub nama: String,
    #[serde(default)]
    pub alamat: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatusMemberSeed {
    pub nama: String,
}

/// A fuel product; `harga` is the price per litre in Rupiah
#[derive(Debug, Deserialize, Clone)]
pub struct ProdukSeed {
    pub nama: String,
    pub harga: Decimal,
}

/// A member, referencing its station by `kode` and its status by name
#[derive(Debug, Deserialize, Clone)]
pub struct MemberSeed {
    pub nama: String,
    pub nik: String,
    /// 0 = male, 1 = female
    #[serde(default)]
    pub gender: i16,
    pub spbu: String,
    pub status: String,
    #[serde(default)]
    pub wallet: Option<String>,
}

/// A shift; times are `HH:MM`
#[derive(Debug, Deserialize, Clone)]
pub struct JamKerjaSeed {
    pub nama: String,
    pub spbu: String,
    pub mulai: String,
    pub selesai: String,
    #[serde(default)]
    pub urutan: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoleGrantSeed {
    pub role: Role,
    pub account: String,
}
