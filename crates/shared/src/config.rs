use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "https://www.reddit.com";

/// Reddit rejects empty and library-default agents, so a browser-like agent is the default.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

pub const DEFAULT_SLANG_DATASET_URL: &str =
    "https://huggingface.co/datasets/MLBtrio/genz-slang-dataset/resolve/main/all_slangs.csv";

pub const DEFAULT_CHANNELS: &[&str] = &[
    "science",
    "survival",
    "onebag",
    "xxfitness",
    "rustyrails",
    "blurrypicturesofcats",
    "scams",
    "dbz",
    "cartalkuk",
    "sales",
    "accidentalwesanderson",
    "worldbuilding",
    "aww",
    "pics",
    "cozyplaces",
    "malelivingspaces",
    "evilbuildings",
    "askreddit",
    "todayilearned",
    "explainlikeimfive",
    "changemyview",
    "unpopularopinion",
    "showerthoughts",
    "futurology",
    "cogsci",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub user_agent: String,
    pub channels: Vec<String>,
    pub output_dir: PathBuf,
    /// Pause after each item's comment fetch.
    pub item_delay: Duration,
    /// Pause after each channel.
    pub channel_delay: Duration,
    pub slang_dataset_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            channels: DEFAULT_CHANNELS.iter().map(|c| c.to_string()).collect(),
            output_dir: PathBuf::from("."),
            item_delay: Duration::from_secs(2),
            channel_delay: Duration::from_secs(1),
            slang_dataset_url: DEFAULT_SLANG_DATASET_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        let mut config = Self::default();

        if let Ok(host) = env::var("FEED_HOST") {
            config.host = host.trim_end_matches('/').to_string();
        }

        if let Ok(user_agent) = env::var("FEED_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Ok(channels) = env::var("FEED_CHANNELS") {
            config.channels = parse_channel_list(&channels);
        }

        if let Ok(dir) = env::var("FEED_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        if let Ok(ms) = env::var("FEED_ITEM_DELAY_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .with_context(|| format!("FEED_ITEM_DELAY_MS is not a number: {}", ms))?;
            config.item_delay = Duration::from_millis(ms);
        }

        if let Ok(ms) = env::var("FEED_CHANNEL_DELAY_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .with_context(|| format!("FEED_CHANNEL_DELAY_MS is not a number: {}", ms))?;
            config.channel_delay = Duration::from_millis(ms);
        }

        if let Ok(url) = env::var("SLANG_DATASET_URL") {
            config.slang_dataset_url = url;
        }

        Ok(config)
    }

    /// Check the settings the feed fetcher needs. Call after CLI overrides are applied.
    pub fn validate(&self) -> Result<()> {
        self.validate_user_agent()?;
        if self.channels.is_empty() {
            anyhow::bail!("No channels configured. Set FEED_CHANNELS or pass --channels");
        }
        Ok(())
    }

    pub fn validate_user_agent(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            anyhow::bail!(
                "FEED_USER_AGENT is empty.\n\n\
                Reddit rejects requests without a user agent. Unset the variable to use the default, \
                or set it to something descriptive like:\n  \
                FEED_USER_AGENT=feed-harvest/0.1 (by u/your_name)"
            );
        }
        Ok(())
    }

    /// Turns off both courtesy delays.
    pub fn without_delays(mut self) -> Self {
        self.item_delay = Duration::ZERO;
        self.channel_delay = Duration::ZERO;
        self
    }

    fn try_load_dotenv() {
        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/feed-harvest/.env
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("feed-harvest").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }
    }
}

/// Splits a comma-separated channel list, dropping blanks and any `r/` prefix.
pub fn parse_channel_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim())
        .map(|c| c.strip_prefix("r/").unwrap_or(c))
        .filter(|c| !c.is_empty())
        .map(|c| c.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_list() {
        let channels = parse_channel_list(" science, r/Pics ,,aww ");
        assert_eq!(channels, vec!["science", "pics", "aww"]);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.channels.len(), 25);
        assert_eq!(config.channels[0], "science");
        assert_eq!(config.channels[24], "cogsci");
    }

    #[test]
    fn test_empty_user_agent_is_rejected() {
        let config = Config {
            user_agent: "   ".to_string(),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("FEED_USER_AGENT"));
    }

    #[test]
    fn test_from_env_leaves_channel_check_to_caller() {
        std::env::set_var("FEED_CHANNELS", "");
        let config = Config::from_env();
        std::env::remove_var("FEED_CHANNELS");

        let mut config = config.unwrap();
        assert!(config.channels.is_empty());
        assert!(config.validate().is_err());

        config.channels = parse_channel_list("science,aww");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_channels_still_allow_user_agent_check() {
        let config = Config {
            channels: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate_user_agent().is_ok());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_without_delays() {
        let config = Config::default().without_delays();
        assert_eq!(config.item_delay, Duration::ZERO);
        assert_eq!(config.channel_delay, Duration::ZERO);
    }
}
