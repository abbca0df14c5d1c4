//! Bot transports for the bot arena
//!
//! This crate provides:
//! - `StupidBot`: in-process bot driven by a fixed strategy
//! - `FileBot`: external executable, one process per question
//! - `HttpBot`: remote bot over HTTP or HTTPS, GET or POST
//! - `register_transports` binding every address scheme to its transport

pub mod file;
pub mod http;
pub mod stupid;

pub use file::FileBot;
pub use http::{HttpBot, HttpBotConfig, HttpMethod};
pub use stupid::StupidBot;

use arena_engine::address::STUPID_SCHEME;
use arena_engine::{Bot, BotAddress, BotResolver, StrategyRegistry};

/// HTTP schemes: (scheme, method, protocol)
const HTTP_SCHEMES: [(&str, HttpMethod, &str); 6] = [
    ("http", HttpMethod::Post, "http"),
    ("http+post", HttpMethod::Post, "http"),
    ("http+get", HttpMethod::Get, "http"),
    ("https", HttpMethod::Post, "https"),
    ("https+post", HttpMethod::Post, "https"),
    ("https+get", HttpMethod::Get, "https"),
];

/// Bind `file`, `http(s)[+get|+post]` and `stupid` to their transports
pub fn register_transports(
    resolver: &mut BotResolver,
    strategies: StrategyRegistry,
    http: HttpBotConfig,
) {
    resolver.register("file", |addr: &BotAddress, _seed| {
        Ok(Box::new(FileBot::new(&addr.path)) as Box<dyn Bot>)
    });

    for (scheme, method, proto) in HTTP_SCHEMES {
        let config = http.clone();
        resolver.register(scheme, move |addr: &BotAddress, _seed| {
            let bot = HttpBot::with_config(&addr.path, method, proto, &config)?.named(addr.to_string());
            Ok(Box::new(bot) as Box<dyn Bot>)
        });
    }

    resolver.register(STUPID_SCHEME, move |addr: &BotAddress, seed| {
        let strategy = strategies.get(&addr.path)?;
        Ok(Box::new(StupidBot::new(&addr.path, strategy, seed)) as Box<dyn Bot>)
    });
}
