//! Mutation dispatcher.
//!
//! Tracks the record a user is about to act on and submits exactly one
//! state-changing ledger call for it:
//!
//! ```text
//! Idle --open--> Confirming --submit--> Submitting --ok--> Idle (refetch)
//!                    ^                      |
//!                    +-------- err ---------+
//! ```
//!
//! The state sits behind a mutex so a dispatcher shared between handlers
//! still lets only one submission through at a time.

use crate::config::session::Session;
use crate::errors::{Error, Result};
use crate::ledger::{EntityKind, EntityRef, Ledger};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// The row selected for a pending action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationIntent {
    pub target: EntityRef,
    /// Display label shown in the confirmation prompt
    pub label: String,
}

impl MutationIntent {
    pub fn new(target: EntityRef, label: impl Into<String>) -> Self {
        Self {
            target,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationAction {
    Delete,
    Approve { note: String },
    Reject { note: String },
}

impl MutationAction {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Approve { .. } => "approve",
            Self::Reject { .. } => "reject",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Confirming {
        intent: MutationIntent,
        /// Error from the last failed submission, if any
        error: Option<Arc<Error>>,
    },
    Submitting {
        intent: MutationIntent,
        action: MutationAction,
    },
}

/// Result of one [`MutationDispatcher::submit`] call.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Acknowledged by the ledger; the intent was cleared.
    Completed,
    /// Another submission was in flight; nothing was sent.
    Ignored,
    /// The call failed or there was no intent; any intent is kept for retry.
    Failed(Arc<Error>),
}

impl SubmitOutcome {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Debug, Default)]
pub struct MutationDispatcher {
    state: Mutex<MutationState>,
}

impl MutationDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MutationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Selects `intent` for confirmation, replacing any earlier selection.
    ///
    /// # Errors
    /// [`Error::MutationInProgress`] while a submission is in flight.
    pub fn open(&self, intent: MutationIntent) -> Result<()> {
        let mut state = self.lock();
        if matches!(*state, MutationState::Submitting { .. }) {
            return Err(Error::MutationInProgress);
        }
        debug!(kind = intent.target.kind.label(), id = intent.target.id, "Mutation intent opened");
        *state = MutationState::Confirming {
            intent,
            error: None,
        };
        Ok(())
    }

    /// Clears the pending intent.
    ///
    /// # Errors
    /// [`Error::MutationInProgress`] once the call has been dispatched.
    pub fn cancel(&self) -> Result<()> {
        let mut state = self.lock();
        if matches!(*state, MutationState::Submitting { .. }) {
            return Err(Error::MutationInProgress);
        }
        *state = MutationState::Idle;
        Ok(())
    }

    /// Submits `action` for the pending intent through `call`.
    ///
    /// `call` runs at most once per accepted submission. While a submission is
    /// in flight further calls return [`SubmitOutcome::Ignored`] immediately.
    pub async fn submit<F, Fut>(&self, action: MutationAction, call: F) -> SubmitOutcome
    where
        F: FnOnce(MutationIntent, MutationAction) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let intent = {
            let mut state = self.lock();
            let intent = match &*state {
                MutationState::Submitting { .. } => {
                    debug!("Submission ignored, another is in flight");
                    return SubmitOutcome::Ignored;
                }
                MutationState::Idle => return SubmitOutcome::Failed(Arc::new(Error::NoIntent)),
                MutationState::Confirming { intent, .. } => intent.clone(),
            };
            *state = MutationState::Submitting {
                intent: intent.clone(),
                action: action.clone(),
            };
            intent
        };

        let kind = intent.target.kind.label();
        let id = intent.target.id;
        let verb = action.label();

        match call(intent.clone(), action).await {
            Ok(()) => {
                *self.lock() = MutationState::Idle;
                info!(kind, id, action = verb, "Mutation acknowledged");
                SubmitOutcome::Completed
            }
            Err(e) => {
                warn!(kind, id, action = verb, "Mutation failed: {}", e);
                let error = Arc::new(e);
                *self.lock() = MutationState::Confirming {
                    intent,
                    error: Some(Arc::clone(&error)),
                };
                SubmitOutcome::Failed(error)
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> MutationState {
        self.lock().clone()
    }

    /// Busy flag for the acting control.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(*self.lock(), MutationState::Submitting { .. })
    }

    #[must_use]
    pub fn intent(&self) -> Option<MutationIntent> {
        match &*self.lock() {
            MutationState::Idle => None,
            MutationState::Confirming { intent, .. } | MutationState::Submitting { intent, .. } => {
                Some(intent.clone())
            }
        }
    }

    /// Error shown next to the action control after a failed submission.
    #[must_use]
    pub fn error(&self) -> Option<Arc<Error>> {
        match &*self.lock() {
            MutationState::Confirming { error, .. } => error.clone(),
            _ => None,
        }
    }
}

/// Sends `action` on `intent` to the ledger.
///
/// # Errors
/// Approve and reject only apply to procurement plans; other kinds fail with
/// [`Error::UnsupportedAction`]. Ledger errors are passed through.
pub async fn apply_to_ledger(
    ledger: &dyn Ledger,
    session: &Session,
    intent: &MutationIntent,
    action: &MutationAction,
) -> Result<()> {
    let target = intent.target;
    match action {
        MutationAction::Delete => ledger.delete(session, target).await,
        MutationAction::Approve { note } | MutationAction::Reject { note } => {
            if target.kind != EntityKind::RencanaPembelian {
                return Err(Error::UnsupportedAction {
                    action: action.label(),
                    kind: target.kind.label(),
                });
            }
            let approve = matches!(action, MutationAction::Approve { .. });
            ledger
                .confirm_rencana(session, target.id, approve, note)
                .await
        }
    }
}
