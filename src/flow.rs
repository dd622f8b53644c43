//! The reading flow coordinator: deck, spread table, router and session
//! factory wired from one [`FlowConfig`].

use std::sync::Arc;

use log::info;
use thiserror::Error;

use crate::cards::{Deck, DeckError};
use crate::core::{ConfigError, FlowConfig, ShuffleRng};
use crate::gate::{InfoScreenGate, JsonFileStore, LocalClock, StoreError};
use crate::navigation::ReadingRouter;
use crate::reading::{ReadingSession, SpreadTable};

/// Errors from opening a reading flow.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// No store path is configured and the platform has no data directory.
    #[error("no location for the info-screen store")]
    NoStorePath,
}

/// Process-level coordinator for one installation.
#[derive(Debug)]
pub struct ReadingFlow {
    deck: Arc<Deck>,
    table: Arc<SpreadTable>,
    rng: ShuffleRng,
    router: ReadingRouter<JsonFileStore, LocalClock>,
}

impl ReadingFlow {
    /// Load the deck, open the store and build the router.
    pub fn open(config: &FlowConfig) -> Result<Self, FlowError> {
        let deck = match &config.deck_path {
            Some(path) => Arc::new(Deck::load(path)?),
            None => Deck::standard(),
        };
        let store_path = config.resolved_store_path().ok_or(FlowError::NoStorePath)?;
        let store = JsonFileStore::open(store_path)?;
        let rng = match config.seed {
            Some(seed) => ShuffleRng::new(seed),
            None => ShuffleRng::from_entropy(),
        };

        info!("Reading flow ready: {} cards, seed {}", deck.len(), rng.seed());
        Ok(Self::with_parts(deck, SpreadTable::standard(), rng, store))
    }

    /// Like [`ReadingFlow::open`], reading the config file and environment first.
    pub fn open_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, FlowError> {
        let config = FlowConfig::load(path)?.apply_env()?;
        Self::open(&config)
    }

    /// Assemble a flow from prebuilt parts.
    #[must_use]
    pub fn with_parts(
        deck: Arc<Deck>,
        table: Arc<SpreadTable>,
        rng: ShuffleRng,
        store: JsonFileStore,
    ) -> Self {
        let gate = InfoScreenGate::new(store, LocalClock);
        let router = ReadingRouter::new(gate, Arc::clone(&table));
        Self {
            deck,
            table,
            rng,
            router,
        }
    }

    /// Start a reading session with its own forked shuffle stream.
    pub fn new_session(&mut self) -> ReadingSession {
        ReadingSession::new(
            Arc::clone(&self.deck),
            Arc::clone(&self.table),
            self.rng.fork(),
        )
    }

    /// The shared deck.
    pub fn deck(&self) -> &Arc<Deck> {
        &self.deck
    }

    /// The shared spread table.
    pub fn table(&self) -> &Arc<SpreadTable> {
        &self.table
    }

    /// Router over the installation's info-screen store.
    pub fn router(&self) -> &ReadingRouter<JsonFileStore, LocalClock> {
        &self.router
    }

    /// Mutable router, for proceeding from info screens.
    pub fn router_mut(&mut self) -> &mut ReadingRouter<JsonFileStore, LocalClock> {
        &mut self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Destination;
    use std::fs;

    #[test]
    fn test_open_with_defaults_and_temp_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = FlowConfig::default()
            .with_store_path(dir.path().join("records.json"))
            .with_seed(1);

        let mut flow = ReadingFlow::open(&config).unwrap();
        assert_eq!(flow.deck().len(), 78);

        let key = "GÜNLÜK KART".into();
        assert_eq!(flow.router().open(&key), Destination::Info(key.clone()));
        flow.router_mut().proceed_from_info(&key).unwrap();
        assert_eq!(flow.router().open(&key), Destination::Detail(key.clone()));
    }

    #[test]
    fn test_sessions_are_independent_streams() {
        let dir = tempfile::tempdir().unwrap();
        let config = FlowConfig::default()
            .with_store_path(dir.path().join("records.json"))
            .with_seed(1);
        let mut flow = ReadingFlow::open(&config).unwrap();

        let key = "KELTİK HAÇI".into();
        let mut a = flow.new_session();
        let mut b = flow.new_session();
        assert_ne!(a.draw(&key).unwrap(), b.draw(&key).unwrap());
    }

    #[test]
    fn test_seeded_flows_reproduce() {
        let dir = tempfile::tempdir().unwrap();
        let config = FlowConfig::default()
            .with_store_path(dir.path().join("records.json"))
            .with_seed(77);

        let key = "DETAYLI İLİŞKİ AÇILIMI".into();
        let hand_a = ReadingFlow::open(&config).unwrap().new_session().draw(&key).unwrap().clone();
        let hand_b = ReadingFlow::open(&config).unwrap().new_session().draw(&key).unwrap().clone();
        assert_eq!(hand_a, hand_b);
    }

    #[test]
    fn test_missing_deck_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = FlowConfig::default()
            .with_deck_path(dir.path().join("missing.json"))
            .with_store_path(dir.path().join("records.json"));

        assert!(matches!(
            ReadingFlow::open(&config),
            Err(FlowError::Deck(DeckError::Io { .. }))
        ));
    }

    #[test]
    fn test_custom_deck_file() {
        let dir = tempfile::tempdir().unwrap();
        let deck_path = dir.path().join("deck.json");
        fs::write(
            &deck_path,
            r#"{"a": {"name": "A", "suit": "major"}, "b": {"name": "B", "suit": "cups"}}"#,
        )
        .unwrap();
        let config = FlowConfig::default()
            .with_deck_path(&deck_path)
            .with_store_path(dir.path().join("records.json"));

        let mut flow = ReadingFlow::open(&config).unwrap();
        assert_eq!(flow.deck().len(), 2);

        // Spreads larger than the deck report an error instead of a short hand
        let mut session = flow.new_session();
        assert!(session.draw(&"İLİŞKİ AÇILIMI".into()).is_err());
        assert_eq!(session.draw(&"GÜNLÜK KART".into()).unwrap().len(), 1);
    }

    #[test]
    fn test_bad_store_record_still_opens() {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("records.json");
        let today = chrono::Local::now().date_naive();
        fs::write(
            &store_path,
            format!(r#"{{"AŞK AÇILIMI": "{today}", "FİNANSAL DURUM": "garbage"}}"#),
        )
        .unwrap();
        let config = FlowConfig::default().with_store_path(&store_path).with_seed(3);

        let mut flow = ReadingFlow::open(&config).unwrap();

        // The readable sibling keeps its record, the bad one fails safe
        let love = "AŞK AÇILIMI".into();
        let finance = "FİNANSAL DURUM".into();
        assert!(!flow.router().gate().should_show(&love));
        assert!(flow.router().gate().should_show(&finance));
        assert_eq!(flow.router().open(&finance), Destination::Info(finance.clone()));

        assert_eq!(flow.new_session().draw(&finance).unwrap().len(), 6);
    }

    #[test]
    fn test_unparsable_store_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("records.json");
        fs::write(&store_path, "not json").unwrap();
        let config = FlowConfig::default().with_store_path(&store_path);

        let flow = ReadingFlow::open(&config).unwrap();
        assert!(flow.router().gate().store().is_empty());
        assert!(flow.router().gate().should_show(&"GÜNLÜK KART".into()));
    }
}
