//! SQLite-backed ledger.
//!
//! Stores records in their wire encoding and answers the [`Ledger`] call shapes
//! with SeaORM queries. Lists and counts only ever include active (non-deleted)
//! rows; single-record lookups return soft-deleted rows as-is so detail views
//! can tell "deleted" apart from "never existed".

use super::{EntityKind, EntityRef, Ledger, Listing, ProcurementStatus, Role};
use crate::{
    config::session::Session,
    entities::{
        Asset, JamKerja, Member, Penerimaan, Produk, RencanaPembelian, RoleGrant, Spbu,
        StatusMember, asset, jam_kerja, member, penerimaan, produk, rencana_pembelian,
        role_grant, spbu, status_member,
    },
    errors::{Error, Result},
    pipeline::encoding::{WalletAddress, now_seconds},
};
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Set, prelude::*};
use tracing::{debug, info, instrument};

/// [`Ledger`] implementation over a SeaORM connection.
#[derive(Debug, Clone)]
pub struct SqlLedger {
    db: DatabaseConnection,
}

impl SqlLedger {
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Underlying connection, used for seeding and fixtures.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Fails with [`Error::Unauthorized`] unless the session account holds one of `roles`.
    async fn require_any_role(&self, session: &Session, roles: &[Role]) -> Result<()> {
        let account = session.require_account()?;
        for role in roles {
            if self.has_role(*role, account).await? {
                return Ok(());
            }
        }

        Err(Error::Unauthorized {
            account: account.to_string(),
            role: roles.first().map_or("none", |role| role.label()),
        })
    }
}

/// Fetches one offset/limit window of active rows, ordered by id, plus the active count.
async fn active_page<E>(
    db: &DatabaseConnection,
    id: E::Column,
    deleted: E::Column,
    offset: u64,
    limit: u64,
) -> Result<Listing<E::Model>>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let query = E::find().filter(deleted.eq(false));
    let total = query.clone().count(db).await?;
    let records = query
        .order_by_asc(id)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?;

    debug!(
        offset,
        limit,
        total,
        returned = records.len(),
        "Fetched ledger page"
    );
    Ok(Listing::new(records, total))
}

/// Flips the soft-delete flag on one active row. Returns whether a row changed.
async fn soft_delete<E>(
    db: &DatabaseConnection,
    id_column: E::Column,
    deleted: E::Column,
    updated_at: E::Column,
    id: i64,
) -> Result<bool>
where
    E: EntityTrait,
{
    let result = E::update_many()
        .col_expr(deleted, Expr::value(true))
        .col_expr(updated_at, Expr::value(now_seconds()))
        .filter(id_column.eq(id))
        .filter(deleted.eq(false))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

#[async_trait]
impl Ledger for SqlLedger {
    #[instrument(skip(self))]
    async fn get_all_spbu(&self, offset: u64, limit: u64) -> Result<Listing<spbu::Model>> {
        active_page::<Spbu>(&self.db, spbu::Column::Id, spbu::Column::Deleted, offset, limit).await
    }

    #[instrument(skip(self))]
    async fn get_spbu(&self, id: i64) -> Result<Option<spbu::Model>> {
        Spbu::find_by_id(id).one(&self.db).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    async fn get_all_members(&self, offset: u64, limit: u64) -> Result<Listing<member::Model>> {
        active_page::<Member>(
            &self.db,
            member::Column::Id,
            member::Column::Deleted,
            offset,
            limit,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_member_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<member::Model>> {
        Member::find()
            .filter(member::Column::Wallet.eq(wallet.as_str()))
            .filter(member::Column::Deleted.eq(false))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    async fn get_all_status_member(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<status_member::Model>> {
        let listing = active_page::<StatusMember>(
            &self.db,
            status_member::Column::Id,
            status_member::Column::Deleted,
            offset,
            limit,
        )
        .await?;
        Ok(listing.records)
    }

    #[instrument(skip(self))]
    async fn get_all_jam_kerja(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Listing<jam_kerja::Model>> {
        active_page::<JamKerja>(
            &self.db,
            jam_kerja::Column::Id,
            jam_kerja::Column::Deleted,
            offset,
            limit,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_all_produk(&self, offset: u64, limit: u64) -> Result<Vec<produk::Model>> {
        let listing = active_page::<Produk>(
            &self.db,
            produk::Column::Id,
            produk::Column::Deleted,
            offset,
            limit,
        )
        .await?;
        Ok(listing.records)
    }

    #[instrument(skip(self))]
    async fn get_all_assets(&self, offset: u64, limit: u64) -> Result<Listing<asset::Model>> {
        active_page::<Asset>(&self.db, asset::Column::Id, asset::Column::Deleted, offset, limit)
            .await
    }

    #[instrument(skip(self))]
    async fn get_all_penerimaan(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Listing<penerimaan::Model>> {
        active_page::<Penerimaan>(
            &self.db,
            penerimaan::Column::Id,
            penerimaan::Column::Deleted,
            offset,
            limit,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_rencana_by_status(
        &self,
        offset: u64,
        limit: u64,
        spbu_id: i64,
        status: ProcurementStatus,
    ) -> Result<Vec<rencana_pembelian::Model>> {
        RencanaPembelian::find()
            .filter(rencana_pembelian::Column::SpbuId.eq(spbu_id))
            .filter(rencana_pembelian::Column::Status.eq(status.to_wire()))
            .filter(rencana_pembelian::Column::Deleted.eq(false))
            .order_by_desc(rencana_pembelian::Column::CreatedAt)
            .order_by_desc(rencana_pembelian::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    async fn count_rencana_by_status(
        &self,
        spbu_id: i64,
        status: ProcurementStatus,
    ) -> Result<u64> {
        RencanaPembelian::find()
            .filter(rencana_pembelian::Column::SpbuId.eq(spbu_id))
            .filter(rencana_pembelian::Column::Status.eq(status.to_wire()))
            .filter(rencana_pembelian::Column::Deleted.eq(false))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    async fn get_rencana(&self, id: i64) -> Result<Option<rencana_pembelian::Model>> {
        RencanaPembelian::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self, session))]
    async fn delete(&self, session: &Session, target: EntityRef) -> Result<()> {
        self.require_any_role(session, &[Role::Admin]).await?;

        let db = &self.db;
        let id = target.id;
        let changed = match target.kind {
            EntityKind::Spbu => {
                soft_delete::<Spbu>(db, spbu::Column::Id, spbu::Column::Deleted, spbu::Column::UpdatedAt, id)
                    .await?
            }
            EntityKind::Member => {
                soft_delete::<Member>(
                    db,
                    member::Column::Id,
                    member::Column::Deleted,
                    member::Column::UpdatedAt,
                    id,
                )
                .await?
            }
            EntityKind::StatusMember => {
                soft_delete::<StatusMember>(
                    db,
                    status_member::Column::Id,
                    status_member::Column::Deleted,
                    status_member::Column::UpdatedAt,
                    id,
                )
                .await?
            }
            EntityKind::JamKerja => {
                soft_delete::<JamKerja>(
                    db,
                    jam_kerja::Column::Id,
                    jam_kerja::Column::Deleted,
                    jam_kerja::Column::UpdatedAt,
                    id,
                )
                .await?
            }
            EntityKind::Produk => {
                soft_delete::<Produk>(
                    db,
                    produk::Column::Id,
                    produk::Column::Deleted,
                    produk::Column::UpdatedAt,
                    id,
                )
                .await?
            }
            EntityKind::Asset => {
                soft_delete::<Asset>(
                    db,
                    asset::Column::Id,
                    asset::Column::Deleted,
                    asset::Column::UpdatedAt,
                    id,
                )
                .await?
            }
            EntityKind::RencanaPembelian => {
                soft_delete::<RencanaPembelian>(
                    db,
                    rencana_pembelian::Column::Id,
                    rencana_pembelian::Column::Deleted,
                    rencana_pembelian::Column::UpdatedAt,
                    id,
                )
                .await?
            }
            EntityKind::Penerimaan => {
                soft_delete::<Penerimaan>(
                    db,
                    penerimaan::Column::Id,
                    penerimaan::Column::Deleted,
                    penerimaan::Column::UpdatedAt,
                    id,
                )
                .await?
            }
        };

        if !changed {
            return Err(Error::not_found(target.kind.label(), id));
        }

        info!(kind = target.kind.label(), id, "Soft-deleted ledger record");
        Ok(())
    }

    #[instrument(skip(self, session, note))]
    async fn confirm_rencana(
        &self,
        session: &Session,
        id: i64,
        approve: bool,
        note: &str,
    ) -> Result<()> {
        self.require_any_role(session, &[Role::Operator, Role::Admin])
            .await?;

        let plan = RencanaPembelian::find_by_id(id)
            .one(&self.db)
            .await?
            .filter(|plan| !plan.deleted)
            .ok_or_else(|| Error::not_found(EntityKind::RencanaPembelian.label(), id))?;

        let mut active: rencana_pembelian::ActiveModel = plan.into();
        active.konfirmasi = Set(Some(approve));
        active.catatan = Set(note.trim().to_string());
        active.updated_at = Set(now_seconds());
        active.update(&self.db).await?;

        info!(id, approve, "Recorded procurement confirmation");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn has_role(&self, role: Role, account: &WalletAddress) -> Result<bool> {
        let grants = RoleGrant::find()
            .filter(role_grant::Column::Role.eq(role.to_wire()))
            .filter(role_grant::Column::Account.eq(account.as_str()))
            .count(&self.db)
            .await?;
        Ok(grants > 0)
    }
}
