//! HTTP driver
//!
//! - `GET /` small index page
//! - `GET /games` registered game names
//! - `POST /run` form fields `game`, `bot1`, `bot2` and optional `seed`;
//!   answers the match's step records, or 404 when the match cannot be set up

use anyhow::Result;
use arena_core::ArenaError;
use arena_engine::{Arena, run_match};
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::MATCH_ID;
use crate::config::ServerConfig;
use crate::printer::RecordCollector;

const INDEX_HTML: &str = r#"<html>
  <head>
    <title>Bot Arena</title>
  </head>
  <body>
    <h1>Bot Arena</h1>
    <form method="post" action="/run">
      <input name="game" placeholder="tictactoe">
      <input name="bot1" placeholder="stupid">
      <input name="bot2" placeholder="http://localhost:8080/bot">
      <button type="submit">Run</button>
    </form>
  </body>
</html>
"#;

/// Form fields of `POST /run`
#[derive(Debug, Default, Deserialize)]
pub struct RunForm {
    pub game: Option<String>,
    pub bot1: Option<String>,
    pub bot2: Option<String>,
    pub seed: Option<String>,
}

#[derive(Debug, Serialize)]
struct GamesResponse {
    games: Vec<String>,
}

/// Body of every 404 answer
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    detail: String,
}

fn not_found(error: &str, detail: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: error.to_string(),
        detail: detail.into(),
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// Build the driver's router
pub fn router(arena: Arc<Arena>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/games", get(list_games))
        .route("/run", post(run))
        .with_state(arena)
}

/// Listen on `config.bind_addr()` until the process is stopped
pub async fn serve(config: ServerConfig, arena: Arc<Arena>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(arena)).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn list_games(State(arena): State<Arc<Arena>>) -> Json<GamesResponse> {
    let games = arena.games().names().into_iter().map(String::from).collect();
    Json(GamesResponse { games })
}

fn filled(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

async fn run(
    State(arena): State<Arc<Arena>>,
    form: std::result::Result<Form<RunForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => return not_found("Missing parameters", rejection.body_text()),
    };

    let (Some(game_name), Some(bot1), Some(bot2)) =
        (filled(form.game), filled(form.bot1), filled(form.bot2))
    else {
        return not_found("Missing parameters", "game, bot1 and bot2 are required");
    };

    let seed = match filled(form.seed) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(seed) => seed,
            Err(e) => return not_found("Invalid parameters", format!("seed {:?}: {}", raw, e)),
        },
        None => rand::random(),
    };

    let bot_paths = [bot1, bot2];
    let game = match arena.prepare(&game_name, &bot_paths, seed) {
        Ok(game) => game,
        Err(e @ ArenaError::UnknownGame(_)) => return not_found("No such game", e.to_string()),
        Err(e @ ArenaError::ArgCount { .. }) => {
            return not_found("Invalid parameters", e.to_string());
        }
        Err(e) => return not_found("bot registering error", e.to_string()),
    };

    match run_match(game, MATCH_ID, RecordCollector::new()).await {
        Ok(report) => {
            let document = report.consumer.into_document(report.game.ascii_output());
            (StatusCode::OK, Json(document)).into_response()
        }
        Err(e) => {
            error!("Match {} could not complete: {}", MATCH_ID, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "match failed".to_string(),
                    detail: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
