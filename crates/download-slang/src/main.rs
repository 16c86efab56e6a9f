use anyhow::{Context, Result};
use clap::Parser;
use shared::slang::extract_terms;
use shared::{fallback, Config, SlangData, SlangDownloader, SlangEntry};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "download-slang")]
#[command(about = "Download the Gen Z slang dataset and save it as JSON")]
struct Args {
    /// CSV dataset to download (defaults to the Hugging Face slang dataset)
    #[arg(short, long)]
    url: Option<String>,

    /// Directory to write slang_data.json and slang_terms.txt into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

async fn fetch_entries(config: &Config) -> Result<Vec<SlangEntry>> {
    let downloader = SlangDownloader::new(&config.user_agent)?;
    let csv = downloader.download(&config.slang_dataset_url).await?;
    let entries = extract_terms(&csv)?;

    if entries.is_empty() {
        anyhow::bail!("Dataset contained no usable slang terms");
    }

    Ok(entries)
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

    if let Some(url) = args.url {
        config.slang_dataset_url = url;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    config.validate_user_agent()?;

    println!("🚀 Gen Z Slang Dataset Downloader");
    println!("{}", "=".repeat(50));
    println!("📚 Downloading {}...", config.slang_dataset_url);

    let entries = match fetch_entries(&config).await {
        Ok(entries) => {
            println!("✓ Processed {} slang terms", entries.len());
            entries
        }
        Err(e) => {
            warn!(error = %e, "slang download failed, using fallback list");
            println!("❌ Error downloading dataset: {:#}", e);
            println!("\nUsing built-in slang list instead...");
            fallback::fallback_slang()
        }
    };

    let sample: Vec<&str> = entries.iter().take(10).map(|e| e.slang.as_str()).collect();
    println!("Sample terms: {}", sample.join(", "));

    let data = SlangData::new(entries);

    let json_path =
        shared::save_slang(&data, &config.output_dir).context("Failed to save slang JSON")?;
    println!("\n✅ Slang data saved to {}", json_path.display());
    println!("📊 Total terms saved: {}", data.total_terms);

    let terms_path = shared::save_slang_terms(&data, &config.output_dir)
        .context("Failed to save slang terms list")?;
    println!("📝 Terms list saved to {}", terms_path.display());

    Ok(())
}
