//! Connected-account session.
//!
//! The wallet account the dashboard acts as is carried in an explicit
//! [`Session`] value passed to every ledger call that depends on it, instead of
//! being read from ambient state. It is loaded from `SPBU_ACCOUNT` in the
//! environment (usually via `.env`).

use crate::errors::{Error, Result};
use crate::pipeline::encoding::WalletAddress;

/// Environment variable holding the connected wallet address.
pub const ACCOUNT_ENV: &str = "SPBU_ACCOUNT";

/// The account on whose behalf reads and mutations are issued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    account: Option<WalletAddress>,
}

impl Session {
    #[must_use]
    pub const fn new(account: WalletAddress) -> Self {
        Self {
            account: Some(account),
        }
    }

    /// A session with no connected wallet. Reads still work; mutations are refused.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { account: None }
    }

    /// Builds a session from `SPBU_ACCOUNT`. A missing variable yields an
    /// anonymous session; a malformed address is a configuration error.
    pub fn from_env() -> Result<Self> {
        match std::env::var(ACCOUNT_ENV) {
            Ok(value) if value.trim().is_empty() => Ok(Self::anonymous()),
            Ok(value) => WalletAddress::parse(&value).map(Self::new),
            Err(std::env::VarError::NotPresent) => Ok(Self::anonymous()),
            Err(e) => Err(Error::EnvVar(e)),
        }
    }

    #[must_use]
    pub const fn account(&self) -> Option<&WalletAddress> {
        self.account.as_ref()
    }

    /// The connected account, or [`Error::Unauthorized`] when none is connected.
    pub fn require_account(&self) -> Result<&WalletAddress> {
        self.account.as_ref().ok_or_else(|| Error::Unauthorized {
            account: "anonymous".to_string(),
            role: "connected account",
        })
    }
}
