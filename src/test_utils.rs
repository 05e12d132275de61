//! Shared test utilities for the SPBU console.
//!
//! Sets up an in-memory ledger and creates records with sensible defaults,
//! always stored in their wire encoding.
#![allow(clippy::expect_used)]

use crate::{
    config::session::Session,
    entities::{
        asset, jam_kerja, member, penerimaan, produk, rencana_pembelian, role_grant, spbu,
        status_member,
    },
    errors::Result,
    ledger::{ProcurementStatus, Role, SqlLedger},
    pipeline::encoding::{WalletAddress, now_seconds},
};
use sea_orm::{Set, prelude::*, sea_query::Expr};
use std::sync::atomic::{AtomicU64, Ordering};

/// Wallet used for operator sessions in tests.
pub const OPERATOR_WALLET: &str = "0x1111111111111111111111111111111111111111";
/// Wallet used for admin sessions in tests.
pub const ADMIN_WALLET: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

static PLAN_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` ledger with all tables initialized.
/// This is the standard setup for ledger-backed tests.
pub async fn setup_test_ledger() -> Result<SqlLedger> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(SqlLedger::new(db))
}

/// A session connected as `wallet`.
pub fn test_session(wallet: &str) -> Session {
    Session::new(WalletAddress::parse(wallet).expect("test wallets are valid"))
}

/// Grants `role` to `wallet`.
pub async fn grant_role(ledger: &SqlLedger, role: Role, wallet: &str) -> Result<()> {
    role_grant::ActiveModel {
        role: Set(role.to_wire()),
        account: Set(WalletAddress::parse(wallet)?.as_str().to_string()),
        ..Default::default()
    }
    .insert(ledger.connection())
    .await?;
    Ok(())
}

/// A session for [`ADMIN_WALLET`] holding [`Role::Admin`].
pub async fn admin_session(ledger: &SqlLedger) -> Result<Session> {
    grant_role(ledger, Role::Admin, ADMIN_WALLET).await?;
    Ok(test_session(ADMIN_WALLET))
}

/// Flips the soft-delete flag directly, bypassing role checks.
pub async fn mark_deleted<E>(
    ledger: &SqlLedger,
    id_column: E::Column,
    deleted: E::Column,
    id: i64,
) -> Result<()>
where
    E: EntityTrait,
{
    E::update_many()
        .col_expr(deleted, Expr::value(true))
        .filter(id_column.eq(id))
        .exec(ledger.connection())
        .await?;
    Ok(())
}

/// Creates a station; `kode` is derived from the name.
pub async fn create_test_spbu(ledger: &SqlLedger, nama: &str) -> Result<spbu::Model> {
    let now = now_seconds();
    let model = spbu::ActiveModel {
        kode: Set(format!("34-{}", nama.to_uppercase().replace(' ', "-"))),
        nama: Set(nama.to_string()),
        alamat: Set("Jl. Raya No. 1".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted: Set(false),
        ..Default::default()
    }
    .insert(ledger.connection())
    .await?;
    Ok(model)
}

pub async fn create_test_status(ledger: &SqlLedger, nama: &str) -> Result<status_member::Model> {
    let now = now_seconds();
    let model = status_member::ActiveModel {
        nama: Set(nama.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted: Set(false),
        ..Default::default()
    }
    .insert(ledger.connection())
    .await?;
    Ok(model)
}

/// Creates a product; `harga` is the x100 wire value.
pub async fn create_test_produk(ledger: &SqlLedger, nama: &str, harga: i64) -> Result<produk::Model> {
    let now = now_seconds();
    let model = produk::ActiveModel {
        nama: Set(nama.to_string()),
        harga: Set(harga),
        created_at: Set(now),
        updated_at: Set(now),
        deleted: Set(false),
        ..Default::default()
    }
    .insert(ledger.connection())
    .await?;
    Ok(model)
}

/// Creates a member.
///
/// # Defaults
/// * `gender`: 0 (laki-laki)
/// * `nik`: derived from the name
pub async fn create_test_member(
    ledger: &SqlLedger,
    nama: &str,
    spbu_id: i64,
    status_member_id: i64,
    wallet: &str,
) -> Result<member::Model> {
    let now = now_seconds();
    let model = member::ActiveModel {
        nama: Set(nama.to_string()),
        nik: Set(format!("3171-{}", nama.to_lowercase())),
        gender: Set(0),
        spbu_id: Set(spbu_id),
        status_member_id: Set(status_member_id),
        wallet: Set(wallet.to_lowercase()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted: Set(false),
        ..Default::default()
    }
    .insert(ledger.connection())
    .await?;
    Ok(model)
}

/// Creates a shift; times are minutes since midnight.
pub async fn create_test_jam_kerja(
    ledger: &SqlLedger,
    spbu_id: i64,
    nama: &str,
    jam_mulai: i32,
    jam_selesai: i32,
    urutan: i32,
) -> Result<jam_kerja::Model> {
    let now = now_seconds();
    let model = jam_kerja::ActiveModel {
        nama: Set(nama.to_string()),
        spbu_id: Set(spbu_id),
        jam_mulai: Set(jam_mulai),
        jam_selesai: Set(jam_selesai),
        urutan: Set(urutan),
        created_at: Set(now),
        updated_at: Set(now),
        deleted: Set(false),
        ..Default::default()
    }
    .insert(ledger.connection())
    .await?;
    Ok(model)
}

/// Creates an asset; `nilai` is the x100 wire value per unit.
pub async fn create_test_asset(
    ledger: &SqlLedger,
    spbu_id: i64,
    nama: &str,
    jumlah: i64,
    nilai: i64,
) -> Result<asset::Model> {
    let now = now_seconds();
    let model = asset::ActiveModel {
        nama: Set(nama.to_string()),
        spbu_id: Set(spbu_id),
        jumlah: Set(jumlah),
        nilai: Set(nilai),
        created_at: Set(now),
        updated_at: Set(now),
        deleted: Set(false),
        ..Default::default()
    }
    .insert(ledger.connection())
    .await?;
    Ok(model)
}

/// Creates a procurement plan for 8000 litres.
///
/// # Defaults
/// * `total_harga`: 80,000,000.00
/// * `pajak`: 8,800,000.00
/// * `konfirmasi`: none yet
pub async fn create_test_rencana(
    ledger: &SqlLedger,
    spbu_id: i64,
    produk_id: i64,
    status: ProcurementStatus,
) -> Result<rencana_pembelian::Model> {
    let now = now_seconds();
    let number = PLAN_COUNTER.fetch_add(1, Ordering::Relaxed);
    let model = rencana_pembelian::ActiveModel {
        kode: Set(format!("RP-{number:04}")),
        spbu_id: Set(spbu_id),
        produk_id: Set(produk_id),
        jumlah_liter: Set(8_000),
        total_harga: Set(8_000_000_000),
        pajak: Set(880_000_000),
        status: Set(status.to_wire()),
        konfirmasi: Set(None),
        catatan: Set(String::new()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted: Set(false),
        ..Default::default()
    }
    .insert(ledger.connection())
    .await?;
    Ok(model)
}

/// Records the delivery of `plan` at `diterima_at` (Unix seconds).
pub async fn create_test_penerimaan(
    ledger: &SqlLedger,
    plan: &rencana_pembelian::Model,
    diterima_at: i64,
) -> Result<penerimaan::Model> {
    let now = now_seconds();
    let model = penerimaan::ActiveModel {
        rencana_pembelian_id: Set(plan.id),
        spbu_id: Set(plan.spbu_id),
        produk_id: Set(plan.produk_id),
        jumlah_liter: Set(plan.jumlah_liter),
        diterima_at: Set(diterima_at),
        created_at: Set(now),
        updated_at: Set(now),
        deleted: Set(false),
        ..Default::default()
    }
    .insert(ledger.connection())
    .await?;
    Ok(model)
}
