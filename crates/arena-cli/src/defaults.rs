//! The arena with every built-in game, strategy and transport

use arena_bots::{HttpBotConfig, register_transports};
use arena_engine::{Arena, BotResolver, GameRegistry, StrategyRegistry};
use arena_games::{register_games, register_strategies};

/// Built-in arena with default HTTP bot settings
pub fn default_arena() -> Arena {
    default_arena_with(HttpBotConfig::default())
}

pub fn default_arena_with(http: HttpBotConfig) -> Arena {
    let mut games = GameRegistry::new();
    register_games(&mut games);

    let mut strategies = StrategyRegistry::new();
    register_strategies(&mut strategies);

    let mut bots = BotResolver::new();
    register_transports(&mut bots, strategies, http);

    Arena::new(games, bots)
}
