//! Name-keyed registries for games, bot transports and stupid strategies

use arena_core::{ArenaError, Result};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::address::BotAddress;
use crate::bot::{Bot, Strategy};
use crate::game::Game;

/// Builds a fresh game from a seed for its random source
pub type GameFactory = Box<dyn Fn(u64) -> Box<dyn Game> + Send + Sync>;

/// Builds a bot from a parsed address and a seed for its random source
pub type BotConstructor = Box<dyn Fn(&BotAddress, u64) -> Result<Box<dyn Bot>> + Send + Sync>;

/// Registry of playable games
#[derive(Default)]
pub struct GameRegistry {
    factories: BTreeMap<String, GameFactory>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a game factory, replacing any previous one with that name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(u64) -> Box<dyn Game> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.insert(name.clone(), Box::new(factory)).is_some() {
            warn!("Game {:?} registered twice, keeping the latest", name);
        }
    }

    /// Create a game by name
    pub fn create(&self, name: &str, seed: u64) -> Result<Box<dyn Game>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ArenaError::UnknownGame(name.to_string()))?;
        debug!("Creating game {:?}", name);
        Ok(factory(seed))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered game names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

/// Registry mapping an address scheme to a transport constructor
#[derive(Default)]
pub struct BotResolver {
    constructors: HashMap<String, BotConstructor>,
}

impl BotResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, scheme: impl Into<String>, constructor: F)
    where
        F: Fn(&BotAddress, u64) -> Result<Box<dyn Bot>> + Send + Sync + 'static,
    {
        self.constructors.insert(scheme.into(), Box::new(constructor));
    }

    /// Parse `raw` and build the matching bot
    pub fn resolve(&self, raw: &str, game: &str, seed: u64) -> Result<Box<dyn Bot>> {
        let address = BotAddress::parse(raw, game)?;
        let constructor =
            self.constructors
                .get(&address.scheme)
                .ok_or_else(|| ArenaError::UnknownScheme {
                    scheme: address.scheme.clone(),
                    path: address.path.clone(),
                })?;
        debug!("Resolving bot {}", address);
        constructor(&address, seed)
    }

    /// Registered schemes, sorted
    pub fn schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        schemes.sort_unstable();
        schemes
    }
}

/// Stupid strategies keyed by game name
#[derive(Default, Clone)]
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, game: impl Into<String>, strategy: impl Strategy + 'static) {
        self.strategies.insert(game.into(), Arc::new(strategy));
    }

    pub fn get(&self, game: &str) -> Result<Arc<dyn Strategy>> {
        self.strategies
            .get(game)
            .cloned()
            .ok_or_else(|| ArenaError::UnknownStrategy(game.to_string()))
    }
}
