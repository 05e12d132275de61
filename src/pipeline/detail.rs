//! Single-record detail views.
//!
//! A missing or soft-deleted record is a terminal [`DetailState::NotFound`]
//! state with a way back to the list, not an error.

use super::SoftDelete;
use crate::errors::{Error, Result};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub enum DetailState<T> {
    Loading,
    Failed(Arc<Error>),
    NotFound,
    Found(T),
}

impl<T> DetailState<T> {
    #[must_use]
    pub const fn found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Maps the found record into a display value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailState<U> {
        match self {
            Self::Loading => DetailState::Loading,
            Self::Failed(error) => DetailState::Failed(error),
            Self::NotFound => DetailState::NotFound,
            Self::Found(value) => DetailState::Found(f(value)),
        }
    }
}

/// Interprets a single-record lookup result.
pub fn detail_from<R: SoftDelete>(result: Result<Option<R>>) -> DetailState<R> {
    match result {
        Ok(Some(record)) if !record.is_deleted() => DetailState::Found(record),
        Ok(Some(record)) => {
            debug!(id = record.record_id(), "Detail record is soft-deleted");
            DetailState::NotFound
        }
        Ok(None) => DetailState::NotFound,
        Err(e) => {
            warn!("Detail fetch failed: {}", e);
            DetailState::Failed(Arc::new(e))
        }
    }
}

/// Runs one single-record lookup and interprets its result.
pub async fn load_detail<R, Fut>(lookup: Fut) -> DetailState<R>
where
    R: SoftDelete,
    Fut: Future<Output = Result<Option<R>>>,
{
    detail_from(lookup.await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{EntityKind, EntityRef, Ledger};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_active_record_is_found() -> Result<()> {
        let ledger = setup_test_ledger().await?;
        let station = create_test_spbu(&ledger, "SPBU A").await?;

        let state = load_detail(ledger.get_spbu(station.id)).await;
        assert_eq!(state.found().map(|s| s.nama.as_str()), Some("SPBU A"));
        Ok(())
    }

    #[tokio::test]
    async fn test_deleted_and_missing_records_are_not_found() -> Result<()> {
        let ledger = setup_test_ledger().await?;
        let admin = admin_session(&ledger).await?;
        let station = create_test_spbu(&ledger, "SPBU A").await?;
        ledger
            .delete(&admin, EntityRef::new(EntityKind::Spbu, station.id))
            .await?;

        assert!(load_detail(ledger.get_spbu(station.id)).await.is_not_found());
        assert!(load_detail(ledger.get_spbu(404)).await.is_not_found());
        Ok(())
    }

    #[test]
    fn test_lookup_error_is_failed_state() {
        let state = detail_from::<crate::entities::spbu::Model>(Err(Error::Config {
            message: "node offline".to_string(),
        }));
        assert!(matches!(state, DetailState::Failed(_)));
    }

    #[test]
    fn test_map_keeps_terminal_states() {
        let state: DetailState<i64> = DetailState::NotFound;
        assert!(state.map(|v| v * 2).is_not_found());

        let found = DetailState::Found(21).map(|v| v * 2);
        assert_eq!(found.found(), Some(&42));
    }
}
