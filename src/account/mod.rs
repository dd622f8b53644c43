//! Account boundary: login counting and the first-login event.

pub mod bookkeeper;

pub use bookkeeper::{
    AccountError, AccountRecord, AccountStore, LoginBookkeeper, LoginNotifier, LoginOutcome,
    MemoryAccountStore, RecordingNotifier, UserId,
};
