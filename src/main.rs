use dotenvy::dotenv;
use spbu_console::{
    config::{self, database, session::Session},
    errors::Result,
    ledger::{Ledger, ProcurementStatus, SqlLedger, seed},
    pipeline::{SoftDelete, page::ListPage},
    report::{self, TableRow},
    views,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Loads one list page and prints it.
async fn show<R, V, P>(title: &str, page: &mut ListPage<R, V, P>)
where
    R: SoftDelete + Send + Sync + 'static,
    V: TableRow + Clone,
    P: Clone + Send + Sync + 'static,
{
    page.load().await;
    let state = page.view_state();
    println!("{}", report::render_page(title, &state, page.paginator()));
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();

    // 3. Load spbu.toml
    let app_config = config::load_app_configuration()?;
    let display = app_config.display;

    // 4. Open the ledger and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to ledger database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Seed reference data on a fresh ledger
    let seeded = seed::seed_ledger(&db, &app_config.seed)
        .await
        .inspect_err(|e| error!("Failed to seed ledger: {}", e))?;
    info!(rows = seeded.total(), "Ledger seeding finished");

    // 6. Connected account, from SPBU_ACCOUNT
    let session = Session::from_env()?;
    match session.account() {
        Some(account) => info!(account = %account, "Session connected"),
        None => warn!("No SPBU_ACCOUNT set, procurement views stay unavailable"),
    }

    let ledger: Arc<dyn Ledger> = Arc::new(SqlLedger::new(db));

    // 7. Render the list views
    show("SPBU", &mut views::spbu::page(&ledger, display)).await;
    show("Member", &mut views::member::page(&ledger, display)).await;
    show("Jam Kerja", &mut views::jam_kerja::page(&ledger, display)).await;
    show("Asset", &mut views::asset::page(&ledger, display)).await;
    show("Penerimaan", &mut views::penerimaan::page(&ledger, display)).await;

    // 8. Procurement, scoped to the session's station; read failures render in place
    let mut rencana = views::rencana::page(&ledger, display);
    let scope = views::rencana::load_for_session(
        &mut rencana,
        ledger.as_ref(),
        &session,
        ProcurementStatus::Rencana,
    )
    .await;
    let state = rencana.view_state();
    println!(
        "{}",
        report::render_page("Rencana Pembelian", &state, rencana.paginator())
    );

    if let Some(spbu_id) = scope {
        let rendered = match views::rencana::procurement_summary(ledger.as_ref(), spbu_id).await {
            Ok(summary) => report::render_summary(&summary),
            Err(e) => report::render_failure(&report::summary_title(spbu_id), &e),
        };
        println!("{rendered}");
    }

    Ok(())
}
