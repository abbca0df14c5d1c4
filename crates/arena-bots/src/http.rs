//! HTTP(S) bot transport
//!
//! POST sends the question as a JSON body, GET sends it as the `message`
//! query parameter. Either way the response body is the reply JSON.

use arena_core::message::deserialize;
use arena_core::{ArenaError, Question, Reply, Result};
use arena_engine::Bot;
use async_trait::async_trait;
use std::fmt;
use tracing::debug;

/// Configuration for HTTP bots
#[derive(Debug, Clone)]
pub struct HttpBotConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for HttpBotConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("bot-arena/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Where the question goes on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// Bot behind an HTTP endpoint
pub struct HttpBot {
    path: String,
    name: String,
    url: String,
    method: HttpMethod,
    client: reqwest::Client,
}

impl HttpBot {
    pub fn new(path: &str, method: HttpMethod, proto: &str) -> Result<Self> {
        Self::with_config(path, method, proto, &HttpBotConfig::default())
    }

    /// `proto` is `http` or `https`; the URL is `<proto>://<path>`
    pub fn with_config(
        path: &str,
        method: HttpMethod,
        proto: &str,
        config: &HttpBotConfig,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ArenaError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        let name = match method {
            HttpMethod::Get => format!("{}+get://{}", proto, path),
            HttpMethod::Post => format!("{}://{}", proto, path),
        };

        Ok(Self {
            path: path.to_string(),
            name,
            url: format!("{}://{}", proto, path),
            method,
            client,
        })
    }

    /// Override the display name, e.g. with the full `http+post://` address
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }
}

#[async_trait]
impl Bot for HttpBot {
    async fn send_message(&mut self, question: &Question) -> Result<Reply> {
        let request = match self.method {
            HttpMethod::Post => self.client.post(&self.url).json(question),
            HttpMethod::Get => {
                let message = serde_json::to_string(question)?;
                self.client.get(&self.url).query(&[("message", message)])
            }
        };

        debug!("{} {}", self.method, self.url);
        let response = request
            .send()
            .await
            .map_err(|e| ArenaError::Transport(format!("{} {} failed: {}", self.method, self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArenaError::Transport(format!(
                "{} {} returned {}",
                self.method, self.url, status
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            ArenaError::Transport(format!("Failed to read body from {}: {}", self.url, e))
        })?;
        debug!("{} replied {}", self.url, String::from_utf8_lossy(&body));

        let reply = deserialize(&body)?;
        Ok(reply)
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn name(&self) -> &str {
        &self.name
    }
}
