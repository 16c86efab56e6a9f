use anyhow::{Context, Result};
use clap::Parser;
use shared::config::parse_channel_list;
use shared::{fallback, Config, DataSource, FeedData, FeedFetcher, RedditClient};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fetch-posts")]
#[command(about = "Fetch hot posts and their top comments from a list of subreddits")]
struct Args {
    /// Comma-separated subreddits to fetch (defaults to the built-in list)
    #[arg(short, long)]
    channels: Option<String>,

    /// Directory to write reddit_posts.json and posts_summary.txt into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip the courtesy pauses between requests
    #[arg(long)]
    no_delay: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;

    if let Some(channels) = args.channels {
        config.channels = parse_channel_list(&channels);
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if args.no_delay {
        config = config.without_delays();
    }
    config.validate()?;

    println!("🌐 Reddit Posts & Comments Fetcher");
    println!("{}", "=".repeat(50));
    println!("📡 Fetching posts and comments from {} subreddits...\n", config.channels.len());

    let (result, source) = match RedditClient::new(&config.user_agent) {
        Ok(client) => {
            FeedFetcher::new(client, &config)
                .run_with_fallback(&config.channels)
                .await
        }
        Err(e) => {
            warn!(error = %e, "could not set up HTTP client, using fallback data");
            println!("❌ Error: {:#}", e);
            (fallback::fallback_result(), DataSource::Fallback)
        }
    };

    match source {
        DataSource::Live => {
            println!("\n📊 Successfully fetched {} posts!", result.posts.len());
            println!("💬 Got comments for {} posts", result.comments.len());
        }
        DataSource::Fallback => {
            println!("\n⚠ Nothing could be fetched. Using built-in fallback posts.");
        }
    }

    let data = FeedData::new(config.channels.clone(), result, source);

    let feed_path =
        shared::save_feed(&data, &config.output_dir).context("Failed to save posts JSON")?;
    println!("✅ Posts and comments saved to {}", feed_path.display());

    let summary_path =
        shared::save_summary(&data, &config.output_dir).context("Failed to save summary")?;
    println!("📄 Summary saved to {}", summary_path.display());

    println!("\n🎉 Done! {} posts ready.", data.total_posts);

    Ok(())
}
