use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Anything that can answer a GET with a JSON body.
///
/// Non-2xx answers are errors.
#[async_trait]
pub trait JsonSource: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value>;
}

#[async_trait]
impl<T: JsonSource + ?Sized> JsonSource for Arc<T> {
    async fn get_json(&self, url: &str) -> Result<Value> {
        (**self).get_json(url).await
    }
}

pub struct RedditClient {
    client: Client,
}

impl RedditClient {
    pub fn new(user_agent: &str) -> Result<Self> {
        if user_agent.trim().is_empty() {
            anyhow::bail!("A non-empty user agent is required for Reddit requests");
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl JsonSource for RedditClient {
    async fn get_json(&self, url: &str) -> Result<Value> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send HTTP request")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP error: {}", status);
        }

        response
            .json::<Value>()
            .await
            .context("Failed to parse JSON response")
    }
}

pub fn listing_url(host: &str, subreddit: &str, limit: u32) -> String {
    format!(
        "{}/r/{}/hot.json?limit={}",
        host,
        urlencoding::encode(subreddit),
        limit
    )
}

pub fn comments_url(host: &str, permalink: &str) -> String {
    format!("{}{}.json", host, permalink.trim_end_matches('/'))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingData {
    pub children: Vec<Thing>,
}

/// One listing entry; `data` stays untyped until its kind is known.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Thing {
    pub kind: String,
    pub data: Value,
}

impl Listing {
    /// Reads `data.children`, treating any other shape as an empty listing.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawPost {
    pub id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub created_utc: Option<f64>,
    pub ups: Option<i64>,
    pub num_comments: Option<u64>,
    pub selftext: Option<String>,
    pub url: Option<String>,
    pub permalink: Option<String>,
    pub removed_by_category: Option<Value>,
    pub preview: Option<Value>,
}

impl RawPost {
    pub fn is_removed(&self) -> bool {
        let removed = match &self.removed_by_category {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        };
        removed || self.title.as_deref() == Some("[deleted]")
    }
}

pub const COMMENT_KIND: &str = "t1";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawComment {
    pub id: Option<String>,
    pub author: Option<String>,
    pub body: Option<String>,
    pub ups: Option<i64>,
    pub created_utc: Option<f64>,
}
