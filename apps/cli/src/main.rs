use std::{
    future::Future,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use ytstats_core::{
    ApiConfig, DEFAULT_CHANNEL_ID, DEFAULT_STATS_CONCURRENCY, PlaylistAggregator, SortKey,
    StatsError, VideoRecord, YoutubeClient, assemble_and_sort, default_export_dir, format_count,
    format_table, save_xlsx,
};

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

/// CLI wrapper for SortKey (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliSortKey {
    #[default]
    Views,
    Likes,
}

impl From<CliSortKey> for SortKey {
    fn from(cli: CliSortKey) -> Self {
        match cli {
            CliSortKey::Views => SortKey::Views,
            CliSortKey::Likes => SortKey::Likes,
        }
    }
}

#[derive(Parser)]
#[command(name = "ytstats")]
#[command(about = "List a YouTube channel's uploads with view and like counts")]
struct Cli {
    /// YouTube channel ID (look one up at https://seostudio.tools/vi/youtube-channel-id)
    #[arg(default_value = DEFAULT_CHANNEL_ID)]
    channel_id: String,

    /// Column to sort by, highest first
    #[arg(short, long, default_value = "views")]
    sort: CliSortKey,

    /// Write the table to youtube_stats_<channel_id>.xlsx
    #[arg(short, long)]
    export: bool,

    /// Directory for the exported spreadsheet. Defaults to the download directory.
    #[arg(short, long, requires = "export")]
    output_dir: Option<PathBuf>,

    /// YouTube Data API key
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Statistics requests in flight at once
    #[arg(short, long, default_value_t = DEFAULT_STATS_CONCURRENCY)]
    concurrency: usize,

    /// Print debug logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Run one stage behind a spinner; the spinner is cleared either way.
async fn step<T>(
    msg: &str,
    fut: impl Future<Output = Result<T, StatsError>>,
) -> Result<(T, Duration), StatsError> {
    let spinner = create_spinner(msg);
    let start = Instant::now();
    let result = fut.await;
    spinner.finish_and_clear();
    result.map(|value| (value, start.elapsed()))
}

fn done(msg: impl std::fmt::Display, elapsed: Duration) {
    println!(
        "{} {} {}",
        style("✓").green().bold(),
        msg,
        style(format!("[{}]", format_duration(elapsed))).dim()
    );
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli, config: ApiConfig) -> Result<(), StatsError> {
    let channel_id = cli.channel_id.trim().to_string();
    let sort_key: SortKey = cli.sort.into();
    let aggregator = PlaylistAggregator::new(YoutubeClient::new(config.clone()), config);
    let no_videos = || StatsError::NoVideosFound {
        channel_id: channel_id.clone(),
    };

    let total_start = Instant::now();

    // Step 1: Resolve the uploads playlist
    let (playlist_id, elapsed) = step(
        "Resolving uploads playlist...",
        aggregator.resolve_uploads_playlist(&channel_id),
    )
    .await?;
    done(
        format!("Uploads playlist: {}", style(&playlist_id).dim()),
        elapsed,
    );

    // Step 2: Page through the playlist
    let (items, elapsed) = step(
        "Listing uploaded videos...",
        aggregator.list_playlist_items(&playlist_id),
    )
    .await?;
    if items.is_empty() {
        return Err(no_videos());
    }
    done(format!("Listed {} videos", style(items.len()).yellow()), elapsed);

    // Step 3: Statistics per video
    let listed = items.len();
    let (records, elapsed) = step(
        &format!("Fetching statistics for {} videos...", listed),
        aggregator.fetch_records(items),
    )
    .await?;
    if records.is_empty() {
        return Err(no_videos());
    }
    let skipped = listed - records.len();
    let skipped_note = if skipped > 0 {
        style(format!("({} without statistics skipped)", skipped))
            .dim()
            .to_string()
    } else {
        String::new()
    };
    done(
        format!(
            "Statistics: {} views, {} likes {}",
            style(format_count(records.iter().map(VideoRecord::view_count).sum())).yellow(),
            style(format_count(records.iter().map(VideoRecord::like_count).sum())).yellow(),
            skipped_note
        ),
        elapsed,
    );

    let records = assemble_and_sort(records, sort_key);

    println!(
        "\n{} {}\n",
        style("Total time:").dim(),
        style(format_duration(total_start.elapsed())).cyan().bold()
    );

    if cli.export {
        let dir = cli.output_dir.unwrap_or_else(default_export_dir);
        let path = save_xlsx(&records, &dir, &channel_id).await?;
        println!(
            "{} {}\n",
            style("Saved:").dim(),
            style(path.display()).cyan()
        );
    }

    println!(
        "{} {}",
        style("Sorted by").dim(),
        style(sort_key.name()).bold()
    );
    println!("{}", style("─".repeat(60)).dim());
    print!("{}", format_table(&records));

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    println!(
        "\n{}  {}\n",
        style("ytstats").cyan().bold(),
        style("YouTube Channel Video Stats").dim()
    );

    // Validate API key early
    let config = match ApiConfig::from_key(cli.api_key.clone()) {
        Ok(config) => config.with_stats_concurrency(cli.concurrency),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, config).await {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
