//! Ledger database connection for the local SPBU ledger.
//!
//! Opens the SQLite database named by `DATABASE_URL` and creates all tables
//! from the entity definitions with `Schema::create_table_from_entity`, so the
//! schema always matches the Rust structs.

use crate::entities::{
    Asset, JamKerja, Member, Penerimaan, Produk, RencanaPembelian, RoleGrant, Spbu, StatusMember,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::debug;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/spbu_ledger.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the ledger database named by `DATABASE_URL`.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to ledger database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates every ledger table that does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Spbu).await?;
    create_table(db, &schema, StatusMember).await?;
    create_table(db, &schema, Member).await?;
    create_table(db, &schema, JamKerja).await?;
    create_table(db, &schema, Produk).await?;
    create_table(db, &schema, Asset).await?;
    create_table(db, &schema, RencanaPembelian).await?;
    create_table(db, &schema, Penerimaan).await?;
    create_table(db, &schema, RoleGrant).await?;

    Ok(())
}
