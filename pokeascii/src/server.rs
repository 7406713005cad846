// ABOUTME: HTTP server exposing rendered sprites over tiny_http
// ABOUTME: Routes /pokemon/all, /pokemon/{name}, and /health to the async PokeAPI client

use anyhow::{anyhow, Result};
use pokeapi_sdk::{BoundedFetcher, PokeClient, PokeError, SpriteVariant};
use std::io::Cursor;
use tiny_http::{Header, Response, Server, StatusCode};
use tokio::runtime::Handle;
use url::Url;

use crate::ascii::AsciiRenderer;
use crate::constants::routes;
use crate::output::{summarize, JsonFormatter, OutputFormat};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";
const INTERNAL_ERROR: &str = "Internal server error occurred";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Health,
    All { limit: Option<u32> },
    Creature(String),
    NotFound,
}

/// Match a request target (path plus optional query) to a route.
pub fn route(target: &str) -> Route {
    let Ok(url) = Url::parse("http://localhost").and_then(|base| base.join(target)) else {
        return Route::NotFound;
    };

    match url.path() {
        routes::HEALTH => Route::Health,
        routes::ALL => Route::All {
            limit: url
                .query_pairs()
                .find(|(key, _)| key == "limit")
                .and_then(|(_, value)| value.parse::<u32>().ok())
                .filter(|limit| *limit > 0),
        },
        path => match path.strip_prefix(routes::CREATURE_PREFIX) {
            Some(name) if !name.is_empty() && !name.contains('/') => {
                Route::Creature(name.to_string())
            }
            _ => Route::NotFound,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN,
            body: body.into().into_bytes(),
        }
    }

    pub fn json(body: String) -> Self {
        Self {
            status: 200,
            content_type: APPLICATION_JSON,
            body: body.into_bytes(),
        }
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body).with_status_code(StatusCode(self.status));
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], self.content_type.as_bytes()) {
            response.add_header(header);
        }
        response
    }
}

/// Request handling state shared by every connection.
#[derive(Debug, Clone)]
pub struct App {
    client: PokeClient,
    fetcher: BoundedFetcher,
    renderer: AsciiRenderer,
    list_limit: Option<u32>,
}

impl App {
    pub fn new(
        client: PokeClient,
        fetcher: BoundedFetcher,
        renderer: AsciiRenderer,
        list_limit: Option<u32>,
    ) -> Self {
        Self {
            client,
            fetcher,
            renderer,
            list_limit,
        }
    }

    pub async fn handle(&self, method: &str, target: &str) -> Reply {
        if !method.eq_ignore_ascii_case("GET") {
            return Reply::text(405, "Method not allowed");
        }

        match route(target) {
            Route::Health => Reply::text(200, "ok"),
            Route::All { limit } => self.all(limit.or(self.list_limit)).await,
            Route::Creature(name) => self.creature(&name).await,
            Route::NotFound => Reply::text(404, "Not found"),
        }
    }

    async fn creature(&self, name: &str) -> Reply {
        let record = match self.client.fetch_record(name).await {
            Ok(record) => record,
            Err(e) => return error_reply(e),
        };
        let sprite = match self.client.fetch_sprite(&record, SpriteVariant::Front).await {
            Ok(sprite) => sprite,
            Err(e) => return error_reply(e),
        };

        let mut body = Vec::new();
        match self.renderer.render(&sprite, &mut body) {
            Ok(()) => Reply {
                status: 200,
                content_type: TEXT_PLAIN,
                body,
            },
            Err(e) => {
                log::error!("Failed to render {}: {:#}", record.name, e);
                Reply::text(500, INTERNAL_ERROR)
            }
        }
    }

    async fn all(&self, limit: Option<u32>) -> Reply {
        let creatures = match self.client.list_creatures(&self.fetcher, limit).await {
            Ok(creatures) => creatures,
            Err(e) => return error_reply(e),
        };

        let summaries = summarize(&creatures, &self.renderer);
        match JsonFormatter::new(false).format_creatures(&summaries) {
            Ok(body) => Reply::json(body),
            Err(e) => {
                log::error!("Failed to encode creature list: {:#}", e);
                Reply::text(500, INTERNAL_ERROR)
            }
        }
    }
}

fn error_reply(error: PokeError) -> Reply {
    if error.is_not_found() {
        Reply::text(404, error.to_string())
    } else {
        log::error!("Upstream request failed: {}", error);
        Reply::text(500, INTERNAL_ERROR)
    }
}

/// Bind `addr` and serve until the listener fails. Blocks the calling
/// thread; each request is handled as a task on `runtime`.
pub fn serve(app: App, addr: &str, runtime: Handle) -> Result<()> {
    let server =
        Server::http(addr).map_err(|e| anyhow!("Failed to start server on {}: {}", addr, e))?;
    log::info!("Webserver started at http://{}", addr);

    for request in server.incoming_requests() {
        let app = app.clone();
        let method = request.method().to_string();
        let target = request.url().to_string();

        runtime.spawn(async move {
            let reply = app.handle(&method, &target).await;
            log::debug!("{} {} -> {}", method, target, reply.status);

            let sent = tokio::task::spawn_blocking(move || request.respond(reply.into_response()));
            match sent.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => log::warn!("Failed to send response for {}: {}", target, e),
                Err(e) => log::error!("Response task for {} failed: {}", target, e),
            }
        });
    }

    Ok(())
}
