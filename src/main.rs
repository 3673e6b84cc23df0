use anyhow::Context;
use tracing_subscriber::util::SubscriberInitExt;

pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod hn_api;
pub(crate) mod item;
pub(crate) mod report;

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "false")]
    #[arg(help = "Log to console (stderr)")]
    log_to_console: bool,

    #[arg(long)]
    #[arg(help = "Write daily rolling JSON logs into this directory")]
    log_dir: Option<std::path::PathBuf>,

    #[arg(long)]
    #[arg(help = "Delay between two item requests in milliseconds [default: 10]")]
    throttle_ms: Option<u64>,

    #[arg(long, value_enum)]
    #[arg(help = "What to do when a single story cannot be fetched [default: skip]")]
    on_item_error: Option<config::OnItemError>,
}

impl Args {
    fn apply(&self, mut config: config::Config) -> config::Config {
        config.log_to_console |= self.log_to_console;

        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
        if let Some(ms) = self.throttle_ms {
            config.throttle = std::time::Duration::from_millis(ms);
        }
        if let Some(policy) = self.on_item_error {
            config.on_item_error = policy;
        }

        config
    }
}

#[derive(Debug)]
struct RunSummary {
    printed: usize,
    failed: Vec<(item::StoryId, error::FetchError)>,
    timing: report::Timing,
}

/// Fetches the top story ids, then every story one after the other with a pause in
/// between, writing one line per story and the timing summary to `out`.
async fn run(
    config: &config::Config,
    client: &hn_api::Client,
    out: &mut impl std::io::Write,
) -> anyhow::Result<RunSummary> {
    let start = std::time::Instant::now();

    report::write_banner(out).context("Failed to write banner")?;

    let ids = client.get_top_story_ids(config.num_stories).await?;

    let mut printed = 0;
    let mut failed = Vec::new();
    let mut throttled_items = 0;

    for id in ids {
        match client.fetch_item(id).await {
            Ok(item) => {
                tracing::info!(
                    id = item.id,
                    by = item.by,
                    title = item.title,
                    score = item.score,
                    url =? item.url,
                    "Got story"
                );
                report::write_item(out, &item).context("Failed to write story")?;
                printed += 1;
            }
            Err(e) => match config.on_item_error {
                config::OnItemError::Abort => return Err(e.into()),
                config::OnItemError::Skip => {
                    tracing::warn!(id, error =? e, "Skipping story");
                    failed.push((id, e));
                }
            },
        }

        // The API does not like being hammered, keep the requests spaced out.
        tokio::time::sleep(config.throttle).await;
        throttled_items += 1;
    }

    let timing = report::Timing {
        elapsed: start.elapsed(),
        throttled_items,
        delay: config.throttle,
    };
    report::write_summary(out, &timing).context("Failed to write summary")?;

    Ok(RunSummary {
        printed,
        failed,
        timing,
    })
}

fn init_tracing(
    config: &config::Config,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;

    let mut layers: Vec<Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>> = Vec::new();
    let mut guard = None;

    if let Some(dir) = &config.log_dir {
        let file_appender = tracing_appender::rolling::daily(dir, "hn_top10.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .json()
                .with_filter(tracing::level_filters::LevelFilter::INFO)
                .boxed(),
        );
    }

    // Stdout carries the stories, logs go to stderr.
    if config.log_to_console {
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing::level_filters::LevelFilter::INFO)
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).init();

    guard
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    use clap::Parser;
    let args = Args::parse();

    let config = match config::Config::from_env() {
        Ok(config) => args.apply(config),
        Err(e) => {
            eprintln!("error: {e:#}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let _guard = init_tracing(&config);

    tracing::info!(config =? config, args =? args, "Starting hn-top10");

    let client = hn_api::Client::new(&config);

    match run(&config, &client, &mut std::io::stdout()).await {
        Ok(summary) if summary.failed.is_empty() => {
            tracing::info!(
                printed = summary.printed,
                net =? summary.timing.net(),
                throttle =? summary.timing.throttle(),
                "hn-top10 finished"
            );
            std::process::ExitCode::SUCCESS
        }
        Ok(summary) => {
            tracing::warn!(
                printed = summary.printed,
                num_failed = summary.failed.len(),
                net =? summary.timing.net(),
                "hn-top10 finished with skipped stories"
            );
            eprintln!(
                "error: {} of {} stories could not be fetched",
                summary.failed.len(),
                summary.printed + summary.failed.len()
            );
            for (id, e) in summary.failed {
                eprintln!("- {id}: {:#}", anyhow::Error::from(e));
            }
            std::process::ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error =? e, "Error when fetching top stories");
            eprintln!("error: {e:#}");
            std::process::ExitCode::FAILURE
        }
    }
}
