use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::fallback;
use crate::models::{Comment, DataSource, FetchResult, Post};
use crate::normalize::{
    classify_post, clean_text, extract_image, is_deletion_marker, normalize_time, truncate_chars,
    COMMENT_TEXT_LIMIT, POST_TEXT_LIMIT,
};
use crate::reddit::{
    comments_url, listing_url, JsonSource, Listing, RawComment, RawPost, COMMENT_KIND,
};

/// How many posts to ask Reddit for per subreddit
pub const LISTING_LIMIT: u32 = 10;
/// How many of those get turned into posts (each costs a comment request)
pub const POSTS_PER_CHANNEL: usize = 3;
pub const COMMENTS_PER_POST: usize = 5;
/// Comments this short or shorter are dropped
pub const MIN_COMMENT_LEN: usize = 10;

pub struct FeedFetcher<S> {
    source: S,
    host: String,
    item_delay: Duration,
    channel_delay: Duration,
}

impl<S: JsonSource> FeedFetcher<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            host: config.host.clone(),
            item_delay: config.item_delay,
            channel_delay: config.channel_delay,
        }
    }

    /// Fetch every channel in order. Failing channels contribute nothing.
    pub async fn run(&self, channels: &[String]) -> FetchResult {
        let mut result = FetchResult::default();

        for channel in channels {
            println!("📡 Fetching from r/{}...", channel);

            match self.fetch_channel(channel, LISTING_LIMIT, &mut result).await {
                Ok(added) => info!(channel = %channel, added, "channel done"),
                Err(e) => {
                    warn!(channel = %channel, error = %e, "skipping channel");
                    println!("   ❌ Error fetching r/{}: {:#}", channel, e);
                }
            }

            pause(self.channel_delay).await;
        }

        result
    }

    /// Like [`run`](Self::run), but swaps in the built-in dataset when nothing came back.
    pub async fn run_with_fallback(&self, channels: &[String]) -> (FetchResult, DataSource) {
        let result = self.run(channels).await;

        if result.is_empty() {
            warn!("no posts fetched from any channel, using fallback data");
            return (fallback::fallback_result(), DataSource::Fallback);
        }

        (result, DataSource::Live)
    }

    /// Fetch one subreddit's hot listing and append its posts to `result`.
    ///
    /// Returns how many posts were added.
    pub async fn fetch_channel(
        &self,
        channel: &str,
        limit: u32,
        result: &mut FetchResult,
    ) -> Result<usize> {
        let url = listing_url(&self.host, channel, limit);
        let body = self
            .source
            .get_json(&url)
            .await
            .with_context(|| format!("Failed to fetch r/{}", channel))?;

        let listing = Listing::from_value(body);
        let mut added = 0;

        for thing in listing.data.children.into_iter().take(POSTS_PER_CHANNEL) {
            let raw: RawPost = match serde_json::from_value(thing.data) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(channel, error = %e, "skipping malformed post");
                    continue;
                }
            };

            if raw.is_removed() {
                continue;
            }

            let post = self.build_post(result.next_id(), channel, &raw, Utc::now());
            println!("   ✅ {}...", truncate_chars(&post.title, 60));

            let comments = match (&post.reddit_id, raw.permalink.as_deref()) {
                (Some(_), Some(permalink)) if !permalink.is_empty() => {
                    println!("   💬 Fetching comments...");
                    let comments = self.fetch_subitems(permalink).await;
                    if comments.is_empty() {
                        println!("   💬 No comments found");
                    } else {
                        println!("   💬 Got {} comments", comments.len());
                    }
                    comments
                }
                _ => Vec::new(),
            };

            result.push(post, comments);
            added += 1;

            pause(self.item_delay).await;
        }

        Ok(added)
    }

    /// Fetch the top comments under a permalink. Never fails; errors become an empty list.
    pub async fn fetch_subitems(&self, permalink: &str) -> Vec<Comment> {
        match self.try_fetch_subitems(permalink).await {
            Ok(comments) => comments,
            Err(e) => {
                warn!(permalink, error = %e, "failed to fetch comments");
                println!("     ❌ Error fetching comments: {:#}", e);
                Vec::new()
            }
        }
    }

    async fn try_fetch_subitems(&self, permalink: &str) -> Result<Vec<Comment>> {
        let url = comments_url(&self.host, permalink);
        let body = self.source.get_json(&url).await?;

        // Reddit answers with [post listing, comment listing]
        let comment_listing = match body {
            serde_json::Value::Array(mut parts) if parts.len() >= 2 => parts.swap_remove(1),
            _ => anyhow::bail!("Unexpected comment payload for {}", permalink),
        };

        let now = Utc::now();
        let comments = Listing::from_value(comment_listing)
            .data
            .children
            .into_iter()
            .filter(|thing| thing.kind == COMMENT_KIND)
            .filter_map(|thing| serde_json::from_value::<RawComment>(thing.data).ok())
            .filter_map(|raw| build_comment(raw, now))
            .take(COMMENTS_PER_POST)
            .collect();

        Ok(comments)
    }

    fn build_post(&self, id: u32, channel: &str, raw: &RawPost, now: DateTime<Utc>) -> Post {
        let text = clean_text(raw.selftext.as_deref().unwrap_or_default(), POST_TEXT_LIMIT);
        let url = raw.url.clone().unwrap_or_default();
        let permalink = raw.permalink.clone().unwrap_or_default();

        Post {
            id,
            subreddit: channel.to_string(),
            title: raw.title.clone().unwrap_or_default(),
            author: raw
                .author
                .clone()
                .unwrap_or_else(|| "unknown_user".to_string()),
            time: normalize_time(raw.created_utc, now),
            upvotes: raw.ups.unwrap_or(0),
            comments: raw.num_comments.unwrap_or(0),
            post_type: classify_post(&text, &url, &permalink),
            image: extract_image(&url, raw.preview.as_ref()),
            text,
            url: (!url.is_empty()).then_some(url),
            reddit_id: raw.id.clone().filter(|id| !id.is_empty()),
            reddit_permalink: (!permalink.is_empty())
                .then(|| format!("https://reddit.com{}", permalink)),
        }
    }
}

fn build_comment(raw: RawComment, now: DateTime<Utc>) -> Option<Comment> {
    let body = raw.body?;
    if is_deletion_marker(&body) {
        return None;
    }

    let text = clean_text(&body, COMMENT_TEXT_LIMIT);
    if text.chars().count() <= MIN_COMMENT_LEN {
        return None;
    }

    Some(Comment {
        author: raw.author.unwrap_or_else(|| "unknown_user".to_string()),
        text,
        upvotes: raw.ups.unwrap_or(0).max(1),
        time: normalize_time(raw.created_utc, now),
        reddit_id: raw.id,
    })
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
