//! Login bookkeeping against a remote account document store.
//!
//! The identity provider and document store live outside this crate.
//! They are reached through [`AccountStore`]; the one event this crate
//! emits is "first successful login for user X", via [`LoginNotifier`].

use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable user identifier from the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors from the remote account store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("account store unavailable: {0}")]
    Unavailable(String),
}

/// What the store holds for a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountRecord {
    /// No document for the user.
    Missing,
    /// A document exists; `login_count` is absent if the field is missing.
    Present { login_count: Option<u64> },
}

/// Result of recording a login.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// No document existed; the first-login notification fired.
    FirstLogin,
    /// The stored count was incremented.
    Returning { login_count: u64 },
    /// A document existed without a count; the count was reset to 1
    /// and no notification fired.
    Repaired,
}

/// Remote document store holding per-user login counts.
pub trait AccountStore {
    fn fetch(&self, user: &UserId) -> Result<AccountRecord, AccountError>;

    /// Write the login count, creating the document if needed.
    fn store_login_count(&mut self, user: &UserId, login_count: u64) -> Result<(), AccountError>;
}

/// Receiver of the first-login event (e.g. a push-notification trigger).
pub trait LoginNotifier {
    fn first_login(&mut self, user: &UserId);
}

/// Updates login counts and fires the first-login event at most once
/// per user document.
#[derive(Debug)]
pub struct LoginBookkeeper<A, N> {
    store: A,
    notifier: N,
}

impl<A: AccountStore, N: LoginNotifier> LoginBookkeeper<A, N> {
    #[must_use]
    pub fn new(store: A, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// Record a successful login for `user`.
    ///
    /// The notification fires only after the count has been written, so a
    /// failed write leaves the next login eligible to retry it.
    pub fn record_login(&mut self, user: &UserId) -> Result<LoginOutcome, AccountError> {
        match self.store.fetch(user)? {
            AccountRecord::Missing => {
                self.store.store_login_count(user, 1)?;
                self.notifier.first_login(user);
                info!("First login for {}", user);
                Ok(LoginOutcome::FirstLogin)
            }
            AccountRecord::Present {
                login_count: Some(count),
            } => {
                let login_count = count.saturating_add(1);
                self.store.store_login_count(user, login_count)?;
                Ok(LoginOutcome::Returning { login_count })
            }
            AccountRecord::Present { login_count: None } => {
                warn!("Account document for {} has no login count; resetting to 1", user);
                self.store.store_login_count(user, 1)?;
                Ok(LoginOutcome::Repaired)
            }
        }
    }

    pub fn store(&self) -> &A {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

/// In-process account store for tests and offline use.
#[derive(Clone, Debug, Default)]
pub struct MemoryAccountStore {
    documents: FxHashMap<UserId, Option<u64>>,
}

impl MemoryAccountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document with no login count field.
    pub fn insert_without_count(&mut self, user: UserId) {
        self.documents.insert(user, None);
    }

    #[must_use]
    pub fn login_count(&self, user: &UserId) -> Option<u64> {
        self.documents.get(user).copied().flatten()
    }
}

impl AccountStore for MemoryAccountStore {
    fn fetch(&self, user: &UserId) -> Result<AccountRecord, AccountError> {
        Ok(match self.documents.get(user) {
            None => AccountRecord::Missing,
            Some(&login_count) => AccountRecord::Present { login_count },
        })
    }

    fn store_login_count(&mut self, user: &UserId, login_count: u64) -> Result<(), AccountError> {
        self.documents.insert(user.clone(), Some(login_count));
        Ok(())
    }
}

/// Notifier that remembers who it was told about.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    pub notified: Vec<UserId>,
}

impl LoginNotifier for RecordingNotifier {
    fn first_login(&mut self, user: &UserId) {
        self.notified.push(user.clone());
    }
}
