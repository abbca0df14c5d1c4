//! Reference games for the bot arena
//!
//! Every game implements `arena_engine::Game`. Grid games are `BoardRules`
//! plugged into the engine's shared turn loop; the others drive their own
//! loop over `Seats`.

pub mod coinflip;
pub mod connectfour;
pub mod grid;
pub mod russianbullet;
pub mod tictactoe;

pub use coinflip::Coinflip;
pub use connectfour::Connectfour;
pub use russianbullet::Russianbullet;
pub use tictactoe::Tictactoe;

use arena_engine::{BoardGame, Game, GameRegistry, StrategyRegistry};

/// Register every game under its name
pub fn register_games(registry: &mut GameRegistry) {
    registry.register(coinflip::NAME, |seed| Box::new(Coinflip::new(seed)) as Box<dyn Game>);
    registry.register(connectfour::NAME, |_seed| {
        Box::new(BoardGame::new(Connectfour::new())) as Box<dyn Game>
    });
    registry.register(russianbullet::NAME, |seed| {
        Box::new(Russianbullet::new(seed)) as Box<dyn Game>
    });
    registry.register(tictactoe::NAME, |_seed| {
        Box::new(BoardGame::new(Tictactoe::new())) as Box<dyn Game>
    });
}

/// Register the stupid strategy of every game
pub fn register_strategies(registry: &mut StrategyRegistry) {
    registry.register(coinflip::NAME, coinflip::StupidCoinflip);
    registry.register(connectfour::NAME, connectfour::StupidConnectfour);
    registry.register(russianbullet::NAME, russianbullet::StupidRussianbullet);
    registry.register(tictactoe::NAME, tictactoe::StupidTictactoe);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names() {
        let mut registry = GameRegistry::new();
        register_games(&mut registry);
        assert_eq!(
            registry.names(),
            vec!["coinflip", "connectfour", "russianbullet", "tictactoe"]
        );
        for name in registry.names() {
            let game = registry.create(name, 0).unwrap();
            assert_eq!(game.name(), name);
            assert_eq!(game.required_bots(), 2);
        }
    }

    #[test]
    fn test_every_game_has_a_strategy() {
        let mut games = GameRegistry::new();
        register_games(&mut games);
        let mut strategies = StrategyRegistry::new();
        register_strategies(&mut strategies);
        for name in games.names() {
            assert!(strategies.get(name).is_ok(), "no strategy for {}", name);
        }
    }
}
