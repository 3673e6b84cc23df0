use crate::item::StoryId;

/// Failures of the listing and item requests.
#[derive(Debug, thiserror::Error)]
pub(crate) enum FetchError {
    #[error("failed to fetch the top stories list")]
    ListingTransport(#[source] reqwest::Error),

    #[error("expected at least {expected} story ids, the listing only had {found}")]
    InsufficientIds { expected: usize, found: usize },

    #[error("story id `{token}` is not a valid number")]
    InvalidId {
        token: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("failed to fetch item {id}")]
    ItemTransport {
        id: StoryId,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode item {id}")]
    ItemDecode {
        id: StoryId,
        #[source]
        source: serde_json::Error,
    },

    #[error("item {id} does not exist")]
    MissingItem { id: StoryId },
}
