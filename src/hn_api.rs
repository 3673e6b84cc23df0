use crate::error::FetchError;
use crate::item::{Item, StoryId};

/// Thin wrapper around the two Hacker News endpoints. Every call reads the whole body
/// before returning so the connection is back in the pool before the next request.
#[derive(Debug, Clone)]
pub(crate) struct Client {
    http: reqwest::Client,
    top_stories_url: String,
    item_base_url: String,
}

impl Client {
    pub(crate) fn new(config: &crate::config::Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            top_stories_url: config.top_stories_url.clone(),
            item_base_url: config.item_base_url.clone(),
        }
    }

    pub(crate) async fn fetch_top_stories_body(&self) -> Result<String, FetchError> {
        let response = self
            .http
            .get(&self.top_stories_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(FetchError::ListingTransport)?;

        response.text().await.map_err(FetchError::ListingTransport)
    }

    pub(crate) async fn get_top_story_ids(&self, count: usize) -> Result<Vec<StoryId>, FetchError> {
        let body = self.fetch_top_stories_body().await?;
        let ids = select_story_ids(&body, count)?;

        tracing::info!(num_ids = ids.len(), ids =? ids, "Got top story ids");

        Ok(ids)
    }

    pub(crate) fn item_url(&self, id: StoryId) -> String {
        format!("{}/{}.json?print=pretty", self.item_base_url, id)
    }

    pub(crate) async fn fetch_item(&self, id: StoryId) -> Result<Item, FetchError> {
        let url = self.item_url(id);

        let body = async {
            self.http
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await
        }
        .await
        .map_err(|source| FetchError::ItemTransport { id, source })?;

        decode_item(id, &body)
    }
}

/// Splits the listing body on everything that is not a letter or digit and parses the
/// first `count` tokens. Order is kept as returned by the API.
pub(crate) fn select_story_ids(body: &str, count: usize) -> Result<Vec<StoryId>, FetchError> {
    let tokens: Vec<&str> = body
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .take(count)
        .collect();

    if tokens.len() < count {
        return Err(FetchError::InsufficientIds {
            expected: count,
            found: tokens.len(),
        });
    }

    tokens
        .into_iter()
        .map(|token| {
            token.parse().map_err(|source| FetchError::InvalidId {
                token: token.to_string(),
                source,
            })
        })
        .collect()
}

// The API answers `null` for ids it does not know.
fn decode_item(id: StoryId, body: &str) -> Result<Item, FetchError> {
    serde_json::from_str::<Option<Item>>(body)
        .map_err(|source| FetchError::ItemDecode { id, source })?
        .ok_or(FetchError::MissingItem { id })
}
