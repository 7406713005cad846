// ABOUTME: PokeAPI SDK library providing an async client for creature records and sprites
// ABOUTME: Includes error taxonomy, retry policy, PNG decoding, and the bounded batch fetcher

use reqwest::StatusCode;
use std::sync::Arc;

pub mod builder;
pub mod constants;
pub mod error;
pub mod fetcher;
pub mod retry;
pub mod sprite;
pub mod types;

#[cfg(test)]
mod test_helpers;

pub use builder::PokeClientConfig;
pub use error::{PokeError, Resource};
pub use fetcher::{BoundedFetcher, Cancellation, RecordSource};
pub use retry::RetryConfig;
pub use types::{Creature, CreatureList, CreatureRecord, ListEntry, SpriteVariant, Sprites};

pub use image::DynamicImage;

pub type Result<T> = std::result::Result<T, PokeError>;

use crate::constants::urls::{CREATURE_LIST_PATH, CREATURE_PATH};
use crate::retry::retry_with_backoff;

#[derive(Debug, Clone)]
pub struct PokeClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl PokeClient {
    /// Client for the given API host with default timeout and retry policy.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub(crate) fn from_config(config: PokeClientConfig) -> Result<Self> {
        let base_url = builder::normalize_base_url(&config.base_url)?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| PokeError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            retry: config.retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a single creature record by name or numeric id.
    pub async fn fetch_record(&self, name: &str) -> Result<CreatureRecord> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(PokeError::not_found(Resource::Creature, name));
        }

        let url = format!("{}{}{}", self.base_url, CREATURE_PATH, name);
        retry_with_backoff(&self.retry, || self.record_once(&url, &name)).await
    }

    async fn record_once(&self, url: &str, name: &str) -> Result<CreatureRecord> {
        let response = self.get(url).await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(PokeError::not_found(Resource::Creature, name)),
            status => Err(PokeError::Status(status.as_u16())),
        }
    }

    /// Download and decode one of the record's sprites.
    pub async fn fetch_sprite(
        &self,
        record: &CreatureRecord,
        variant: SpriteVariant,
    ) -> Result<DynamicImage> {
        let url = record
            .sprites
            .url(variant)
            .ok_or_else(|| PokeError::not_found(Resource::Sprite, &record.name))?;

        retry_with_backoff(&self.retry, || self.sprite_once(url, &record.name)).await
    }

    async fn sprite_once(&self, url: &str, name: &str) -> Result<DynamicImage> {
        let response = self.get(url).await?;

        match response.status() {
            StatusCode::OK => {
                let bytes = response.bytes().await?;
                sprite::decode_png(&bytes)
            }
            StatusCode::NOT_FOUND => Err(PokeError::not_found(Resource::Sprite, name)),
            status => Err(PokeError::Status(status.as_u16())),
        }
    }

    /// Fetch the creature index. `limit` is forwarded to the upstream
    /// endpoint, which otherwise returns its default page of 20.
    pub async fn fetch_list(&self, limit: Option<u32>) -> Result<CreatureList> {
        let mut url = format!("{}{}", self.base_url, CREATURE_LIST_PATH);
        if let Some(limit) = limit {
            url.push_str(&format!("?limit={}", limit));
        }

        retry_with_backoff(&self.retry, || self.list_once(&url)).await
    }

    async fn list_once(&self, url: &str) -> Result<CreatureList> {
        let response = self.get(url).await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(PokeError::not_found(Resource::List, "all")),
            status => Err(PokeError::Status(status.as_u16())),
        }
    }

    /// Record plus decoded front sprite. Stops between the two requests if
    /// `cancel` has been tripped.
    pub async fn fetch_creature(&self, name: &str, cancel: &Cancellation) -> Result<Creature> {
        let record = self.fetch_record(name).await?;
        if cancel.is_cancelled() {
            return Err(PokeError::Cancelled);
        }

        let sprite = self.fetch_sprite(&record, SpriteVariant::Front).await?;
        Ok(Creature { record, sprite })
    }

    /// Fetch the index and hydrate every entry through `fetcher`.
    /// The returned order is not the index order.
    pub async fn list_creatures(
        &self,
        fetcher: &BoundedFetcher,
        limit: Option<u32>,
    ) -> Result<Vec<Creature>> {
        let list = self.fetch_list(limit).await?;
        log::debug!("Hydrating {} creatures", list.results.len());

        fetcher
            .fetch_all(Arc::new(self.clone()), list.names())
            .await
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        log::debug!("GET {}", url);
        Ok(self.client.get(url).send().await?)
    }
}

#[async_trait::async_trait]
impl RecordSource for PokeClient {
    type Output = Creature;
    type Error = PokeError;

    async fn fetch(&self, id: &str, cancel: &Cancellation) -> Result<Creature> {
        self.fetch_creature(id, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use image::GenericImageView;
    use mockito::Matcher;
    use std::collections::HashSet;
    use std::time::Duration;

    fn test_client(url: &str) -> PokeClient {
        PokeClient::builder()
            .base_url(url)
            .retry(RetryConfig::none())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_creation() {
        assert!(PokeClient::new("https://pokeapi.co").is_ok());
        assert!(PokeClient::new("pokeapi.co").is_err());
    }

    #[tokio::test]
    async fn test_fetch_record_internal_server_error() {
        let mut server = mock_pokeapi_server().await;
        let mock = server
            .mock("GET", "/api/v2/pokemon/pikachu")
            .with_status(500)
            .create_async()
            .await;

        let err = test_client(&server.url())
            .fetch_record("pikachu")
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(!err.is_not_found(), "expected generic error, got {:?}", err);
        assert!(matches!(err, PokeError::Status(500)));
    }

    #[tokio::test]
    async fn test_fetch_record_not_found() {
        let mut server = mock_pokeapi_server().await;
        let mock = server
            .mock("GET", "/api/v2/pokemon/pikachu")
            .with_status(404)
            .create_async()
            .await;

        let err = test_client(&server.url())
            .fetch_record("pikachu")
            .await
            .unwrap_err();

        mock.assert_async().await;
        match err {
            PokeError::NotFound { resource, id } => {
                assert_eq!(resource, Resource::Creature);
                assert_eq!(id, "pikachu");
            }
            other => panic!("Expected not found error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_record_success_normalizes_name() {
        let mut server = mock_pokeapi_server().await;
        let body = mock_creature_response(&server.url(), 25, "pikachu");
        let mock = server
            .mock("GET", "/api/v2/pokemon/pikachu")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let record = test_client(&server.url())
            .fetch_record("  Pikachu ")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(record.id, 25);
        assert_eq!(record.name, "pikachu");
        assert!(record.sprites.url(SpriteVariant::Front).is_some());
    }

    #[tokio::test]
    async fn test_fetch_record_malformed_json() {
        let mut server = mock_pokeapi_server().await;
        let _mock = server
            .mock("GET", "/api/v2/pokemon/eevee")
            .with_status(200)
            .with_body("{\"id\": \"not a number\"")
            .create_async()
            .await;

        let err = test_client(&server.url())
            .fetch_record("eevee")
            .await
            .unwrap_err();

        assert!(matches!(err, PokeError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_retryable_status_is_retried() {
        let mut server = mock_pokeapi_server().await;
        let mock = server
            .mock("GET", "/api/v2/pokemon/mew")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let client = PokeClient::builder()
            .base_url(server.url())
            .retry(RetryConfig {
                max_retries: 2,
                initial_delay: Duration::from_millis(1),
                max_delay: Duration::from_millis(2),
                backoff_multiplier: 2.0,
            })
            .build()
            .unwrap();

        let err = client.fetch_record("mew").await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, PokeError::Status(503)));
    }

    #[tokio::test]
    async fn test_fetch_sprite_decodes_png() {
        let mut server = mock_pokeapi_server().await;
        let record: CreatureRecord =
            serde_json::from_value(mock_creature_response(&server.url(), 1, "bulbasaur"))
                .unwrap();
        let mock = server
            .mock("GET", "/sprites/1.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(png_bytes(&sample_sprite()))
            .create_async()
            .await;

        let sprite = test_client(&server.url())
            .fetch_sprite(&record, SpriteVariant::Front)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(sprite.dimensions(), (4, 4));
    }

    #[tokio::test]
    async fn test_fetch_sprite_not_found_and_missing_variant() {
        let mut server = mock_pokeapi_server().await;
        let record: CreatureRecord =
            serde_json::from_value(mock_creature_response(&server.url(), 1, "bulbasaur"))
                .unwrap();
        let _mock = server
            .mock("GET", "/sprites/back/1.png")
            .with_status(404)
            .create_async()
            .await;
        let client = test_client(&server.url());

        let err = client
            .fetch_sprite(&record, SpriteVariant::Back)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PokeError::NotFound {
                resource: Resource::Sprite,
                ..
            }
        ));

        // front_shiny is null in the fixture, so no request is made
        let err = client
            .fetch_sprite(&record, SpriteVariant::Shiny)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_fetch_sprite_rejects_non_png_body() {
        let mut server = mock_pokeapi_server().await;
        let record: CreatureRecord =
            serde_json::from_value(mock_creature_response(&server.url(), 7, "squirtle"))
                .unwrap();
        let _mock = server
            .mock("GET", "/sprites/7.png")
            .with_status(200)
            .with_body("<html>Not an image</html>")
            .create_async()
            .await;

        let err = test_client(&server.url())
            .fetch_sprite(&record, SpriteVariant::Front)
            .await
            .unwrap_err();

        assert!(matches!(err, PokeError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_list_forwards_limit() {
        let mut server = mock_pokeapi_server().await;
        let body = mock_list_response(&server.url(), &["bulbasaur", "ivysaur", "venusaur"]);
        let mock = server
            .mock("GET", "/api/v2/pokemon")
            .match_query(Matcher::UrlEncoded("limit".into(), "3".into()))
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let list = test_client(&server.url())
            .fetch_list(Some(3))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(list.names(), vec!["bulbasaur", "ivysaur", "venusaur"]);
    }

    #[tokio::test]
    async fn test_fetch_list_not_found() {
        let mut server = mock_pokeapi_server().await;
        let _mock = server
            .mock("GET", "/api/v2/pokemon")
            .with_status(404)
            .create_async()
            .await;

        let err = test_client(&server.url())
            .fetch_list(None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PokeError::NotFound {
                resource: Resource::List,
                ..
            }
        ));
    }

    async fn mock_creature(
        server: &mut mockito::ServerGuard,
        id: u32,
        name: &str,
    ) -> Vec<mockito::Mock> {
        let body = mock_creature_response(&server.url(), id, name);
        let record = server
            .mock("GET", format!("/api/v2/pokemon/{}", name).as_str())
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;
        let sprite = server
            .mock("GET", format!("/sprites/{}.png", id).as_str())
            .with_status(200)
            .with_body(png_bytes(&sample_sprite()))
            .create_async()
            .await;
        vec![record, sprite]
    }

    #[tokio::test]
    async fn test_list_creatures_hydrates_every_entry() {
        let mut server = mock_pokeapi_server().await;
        let names = ["bulbasaur", "ivysaur", "venusaur", "charmander"];
        let list = mock_list_response(&server.url(), &names);
        let mut mocks = vec![
            server
                .mock("GET", "/api/v2/pokemon")
                .with_status(200)
                .with_body(list.to_string())
                .create_async()
                .await,
        ];
        for (i, name) in names.iter().enumerate() {
            mocks.extend(mock_creature(&mut server, i as u32 + 1, name).await);
        }

        let creatures = test_client(&server.url())
            .list_creatures(&BoundedFetcher::new(2), None)
            .await
            .unwrap();

        let got: HashSet<String> = creatures.iter().map(|c| c.record.name.clone()).collect();
        let expected: HashSet<String> = names.iter().map(|n| n.to_string()).collect();
        assert_eq!(got, expected);
        assert!(creatures.iter().all(|c| c.sprite.dimensions() == (4, 4)));
    }

    #[tokio::test]
    async fn test_list_creatures_propagates_not_found() {
        let mut server = mock_pokeapi_server().await;
        let list = mock_list_response(&server.url(), &["bulbasaur", "missingno"]);
        let _list_mock = server
            .mock("GET", "/api/v2/pokemon")
            .with_status(200)
            .with_body(list.to_string())
            .create_async()
            .await;
        let _bulbasaur_mocks = mock_creature(&mut server, 1, "bulbasaur").await;
        let _missing_mock = server
            .mock("GET", "/api/v2/pokemon/missingno")
            .with_status(404)
            .create_async()
            .await;

        let err = test_client(&server.url())
            .list_creatures(&BoundedFetcher::default(), None)
            .await
            .unwrap_err();

        match err {
            PokeError::NotFound { resource, id } => {
                assert_eq!(resource, Resource::Creature);
                assert_eq!(id, "missingno");
            }
            other => panic!("Expected not found error, got {:?}", other),
        }
    }
}
