//! Populates an empty local ledger from configuration seed data.
//!
//! Every section is idempotent: a station is matched by `kode`, statuses and
//! products by name, members by NIK, shifts by (station, name) and role grants
//! by (role, account). Existing rows are left untouched.

use crate::{
    config::seed::SeedData,
    entities::{
        JamKerja, Member, Produk, RoleGrant, Spbu, StatusMember, jam_kerja, member, produk,
        role_grant, spbu, status_member,
    },
    errors::{Error, Result},
    pipeline::encoding::{WalletAddress, ZERO_ADDRESS, encode_amount, now_seconds, parse_time},
};
use sea_orm::{Set, prelude::*};
use tracing::{debug, info};

/// Counts of rows inserted by one seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub spbu: usize,
    pub status_member: usize,
    pub produk: usize,
    pub member: usize,
    pub jam_kerja: usize,
    pub role_grants: usize,
}

impl SeedReport {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.spbu + self.status_member + self.produk + self.member + self.jam_kerja + self.role_grants
    }
}

async fn spbu_id_by_kode(db: &DatabaseConnection, kode: &str) -> Result<i64> {
    Spbu::find()
        .filter(spbu::Column::Kode.eq(kode))
        .filter(spbu::Column::Deleted.eq(false))
        .one(db)
        .await?
        .map(|station| station.id)
        .ok_or_else(|| Error::Config {
            message: format!("Seed references unknown SPBU kode {kode}"),
        })
}

async fn status_id_by_name(db: &DatabaseConnection, nama: &str) -> Result<i64> {
    StatusMember::find()
        .filter(status_member::Column::Nama.eq(nama))
        .filter(status_member::Column::Deleted.eq(false))
        .one(db)
        .await?
        .map(|status| status.id)
        .ok_or_else(|| Error::Config {
            message: format!("Seed references unknown member status {nama}"),
        })
}

/// Inserts every seed record that is not already present.
///
/// # Errors
/// Returns an error if a seed references an unknown station or status, carries
/// a malformed time, price or wallet, or a database operation fails.
#[allow(clippy::too_many_lines)]
pub async fn seed_ledger(db: &DatabaseConnection, seed: &SeedData) -> Result<SeedReport> {
    let mut report = SeedReport::default();
    let now = now_seconds();

    for entry in &seed.spbu {
        let exists = Spbu::find()
            .filter(spbu::Column::Kode.eq(entry.kode.as_str()))
            .one(db)
            .await?
            .is_some();
        if exists {
            debug!("SPBU {} already present, skipping", entry.kode);
            continue;
        }
        spbu::ActiveModel {
            kode: Set(entry.kode.clone()),
            nama: Set(entry.nama.clone()),
            alamat: Set(entry.alamat.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted: Set(false),
            ..Default::default()
        }
        .insert(db)
        .await?;
        report.spbu += 1;
    }

    for entry in &seed.status_member {
        let exists = StatusMember::find()
            .filter(status_member::Column::Nama.eq(entry.nama.as_str()))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }
        status_member::ActiveModel {
            nama: Set(entry.nama.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted: Set(false),
            ..Default::default()
        }
        .insert(db)
        .await?;
        report.status_member += 1;
    }

    for entry in &seed.produk {
        let exists = Produk::find()
            .filter(produk::Column::Nama.eq(entry.nama.as_str()))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }
        produk::ActiveModel {
            nama: Set(entry.nama.clone()),
            harga: Set(encode_amount(entry.harga)?),
            created_at: Set(now),
            updated_at: Set(now),
            deleted: Set(false),
            ..Default::default()
        }
        .insert(db)
        .await?;
        report.produk += 1;
    }

    for entry in &seed.member {
        let exists = Member::find()
            .filter(member::Column::Nik.eq(entry.nik.as_str()))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }
        let wallet = match entry.wallet.as_deref() {
            Some(raw) => WalletAddress::parse(raw)?.to_string(),
            None => ZERO_ADDRESS.to_string(),
        };
        member::ActiveModel {
            nama: Set(entry.nama.clone()),
            nik: Set(entry.nik.clone()),
            gender: Set(entry.gender),
            spbu_id: Set(spbu_id_by_kode(db, &entry.spbu).await?),
            status_member_id: Set(status_id_by_name(db, &entry.status).await?),
            wallet: Set(wallet),
            created_at: Set(now),
            updated_at: Set(now),
            deleted: Set(false),
            ..Default::default()
        }
        .insert(db)
        .await?;
        report.member += 1;
    }

    for entry in &seed.jam_kerja {
        let spbu_id = spbu_id_by_kode(db, &entry.spbu).await?;
        let exists = JamKerja::find()
            .filter(jam_kerja::Column::SpbuId.eq(spbu_id))
            .filter(jam_kerja::Column::Nama.eq(entry.nama.as_str()))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }
        jam_kerja::ActiveModel {
            nama: Set(entry.nama.clone()),
            spbu_id: Set(spbu_id),
            jam_mulai: Set(parse_time(&entry.mulai)?),
            jam_selesai: Set(parse_time(&entry.selesai)?),
            urutan: Set(entry.urutan),
            created_at: Set(now),
            updated_at: Set(now),
            deleted: Set(false),
            ..Default::default()
        }
        .insert(db)
        .await?;
        report.jam_kerja += 1;
    }

    for entry in &seed.role_grants {
        let account = WalletAddress::parse(&entry.account)?;
        let exists = RoleGrant::find()
            .filter(role_grant::Column::Role.eq(entry.role.to_wire()))
            .filter(role_grant::Column::Account.eq(account.as_str()))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }
        role_grant::ActiveModel {
            role: Set(entry.role.to_wire()),
            account: Set(account.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        report.role_grants += 1;
    }

    info!(inserted = report.total(), "Ledger seeding finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::ledger::{Ledger, Role};
    use crate::test_utils::setup_test_ledger;

    const SEED: &str = r#"
        [[spbu]]
        kode = "34-17107"
        nama = "SPBU Cikini"

        [[status_member]]
        nama = "Tetap"

        [[produk]]
        nama = "Pertalite"
        harga = 10000.0

        [[member]]
        nama = "Budi"
        nik = "3171000000000001"
        gender = 0
        spbu = "34-17107"
        status = "Tetap"
        wallet = "0x2222222222222222222222222222222222222222"

        [[member]]
        nama = "Sari"
        nik = "3171000000000002"
        gender = 1
        spbu = "34-17107"
        status = "Tetap"

        [[jam_kerja]]
        nama = "Shift Pagi"
        spbu = "34-17107"
        mulai = "06:00"
        selesai = "14:00"
        urutan = 1

        [[role_grants]]
        role = "admin"
        account = "0x1111111111111111111111111111111111111111"
    "#;

    #[tokio::test]
    async fn test_seed_inserts_everything_once() -> Result<()> {
        let ledger = setup_test_ledger().await?;
        let config = parse_config(SEED)?;

        let first = seed_ledger(ledger.connection(), &config.seed).await?;
        assert_eq!(first.spbu, 1);
        assert_eq!(first.member, 2);
        assert_eq!(first.total(), 7);

        let second = seed_ledger(ledger.connection(), &config.seed).await?;
        assert_eq!(second.total(), 0);

        let produk = ledger.get_all_produk(0, 100).await?;
        assert_eq!(produk[0].harga, 1_000_000);

        let shifts = ledger.get_all_jam_kerja(0, 10).await?;
        assert_eq!(shifts.records[0].jam_mulai, 360);
        assert_eq!(shifts.records[0].jam_selesai, 840);

        let members = ledger.get_all_members(0, 10).await?;
        assert_eq!(members.records[1].wallet, ZERO_ADDRESS);

        let admin = WalletAddress::parse("0x1111111111111111111111111111111111111111")?;
        assert!(ledger.has_role(Role::Admin, &admin).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_rejects_unknown_station_reference() -> Result<()> {
        let ledger = setup_test_ledger().await?;
        let config = parse_config(
            r#"
            [[status_member]]
            nama = "Tetap"

            [[member]]
            nama = "Budi"
            nik = "1"
            spbu = "00-00000"
            status = "Tetap"
            "#,
        )?;

        let result = seed_ledger(ledger.connection(), &config.seed).await;
        assert!(matches!(result, Err(Error::Config { .. })));
        Ok(())
    }
}
