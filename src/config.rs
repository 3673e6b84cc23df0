use anyhow::Context;

pub(crate) const TOP_STORIES_URL: &str =
    "https://hacker-news.firebaseio.com/v0/topstories.json?print=pretty";
pub(crate) const ITEM_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0/item";

pub(crate) const NUM_STORIES: usize = 10;
pub(crate) const DEFAULT_THROTTLE: std::time::Duration = std::time::Duration::from_millis(10);

/// What the runner does when a single item cannot be fetched or decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OnItemError {
    /// Log the failure, remember it and carry on with the next id.
    #[default]
    Skip,
    /// Stop the whole run with the error.
    Abort,
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) top_stories_url: String,
    pub(crate) item_base_url: String,
    pub(crate) num_stories: usize,

    pub(crate) throttle: std::time::Duration,
    pub(crate) on_item_error: OnItemError,

    pub(crate) log_to_console: bool,
    pub(crate) log_dir: Option<std::path::PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_stories_url: TOP_STORIES_URL.to_string(),
            item_base_url: ITEM_BASE_URL.to_string(),
            num_stories: NUM_STORIES,
            throttle: DEFAULT_THROTTLE,
            on_item_error: OnItemError::default(),
            log_to_console: false,
            log_dir: None,
        }
    }
}

impl Config {
    /// Loads an optional `.env` file and reads overrides from the process environment.
    pub(crate) fn from_env() -> anyhow::Result<Self> {
        check_dotenv(dotenvy::dotenv())?;

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(ms) = lookup("HN_TOP10_THROTTLE_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .with_context(|| format!("HN_TOP10_THROTTLE_MS is not a number: {ms}"))?;
            config.throttle = std::time::Duration::from_millis(ms);
        }

        if let Some(policy) = lookup("HN_TOP10_ON_ITEM_ERROR") {
            config.on_item_error = <OnItemError as clap::ValueEnum>::from_str(policy.trim(), true)
                .map_err(|e| anyhow::anyhow!(e))
                .context("Invalid HN_TOP10_ON_ITEM_ERROR")?;
        }

        if let Some(flag) = lookup("HN_TOP10_LOG_TO_CONSOLE") {
            config.log_to_console = flag
                .trim()
                .parse()
                .with_context(|| format!("HN_TOP10_LOG_TO_CONSOLE is not a bool: {flag}"))?;
        }

        config.log_dir = lookup("HN_TOP10_LOG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(std::path::PathBuf::from);

        Ok(config)
    }
}

// A missing .env file is fine, everything has a default. A broken one is not.
fn check_dotenv<T>(result: Result<T, dotenvy::Error>) -> anyhow::Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).context("Failed to load .env file"),
    }
}
