pub(crate) type StoryId = u64;

/// One item as returned by the item endpoint. Missing fields fall back to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub(crate) struct Item {
    pub(crate) by: String,
    pub(crate) id: StoryId,
    pub(crate) score: i64,
    pub(crate) title: String,
    pub(crate) url: Option<String>,

    // Unix epoch seconds.
    pub(crate) time: i64,
}
