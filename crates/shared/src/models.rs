use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a post presents its content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Text,
    Image,
    Link,
}

/// A normalized post, numbered in fetch order across the whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u32,
    pub subreddit: String,
    pub title: String,
    pub author: String,
    pub time: String,
    pub upvotes: i64,
    pub comments: u64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reddit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reddit_permalink: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub upvotes: i64,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reddit_id: Option<String>,
}

/// Comments keyed by the owning post's sequence id
pub type CommentMap = BTreeMap<u32, Vec<Comment>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
}

/// Everything a run collected, before it is written out
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    pub posts: Vec<Post>,
    pub comments: CommentMap,
}

impl FetchResult {
    /// The id the next accepted post will receive.
    pub fn next_id(&self) -> u32 {
        self.posts.len() as u32 + 1
    }

    pub fn push(&mut self, post: Post, comments: Vec<Comment>) {
        if !comments.is_empty() {
            self.comments.insert(post.id, comments);
        }
        self.posts.push(post);
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn comments_for(&self, post_id: u32) -> &[Comment] {
        self.comments
            .get(&post_id)
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }
}

/// Complete feed document for serialization
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedData {
    pub total_posts: usize,
    pub fetch_date: String,
    pub subreddits: Vec<String>,
    pub posts: Vec<Post>,
    pub comments: CommentMap,
    pub source: DataSource,
}

impl FeedData {
    pub fn new(subreddits: Vec<String>, result: FetchResult, source: DataSource) -> Self {
        Self {
            total_posts: result.posts.len(),
            fetch_date: chrono::Local::now().to_rfc3339(),
            subreddits,
            posts: result.posts,
            comments: result.comments,
            source,
        }
    }

    pub fn comments_for(&self, post_id: u32) -> &[Comment] {
        self.comments
            .get(&post_id)
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlangEntry {
    pub slang: String,
    pub meaning: String,
}

/// Slang dataset document for serialization
#[derive(Debug, Serialize, Deserialize)]
pub struct SlangData {
    pub total_terms: usize,
    pub terms: Vec<String>,
    /// Term to meaning, in first-seen order
    pub meanings: serde_json::Map<String, serde_json::Value>,
    pub full_data: Vec<SlangEntry>,
}

impl SlangData {
    pub fn new(entries: Vec<SlangEntry>) -> Self {
        let terms: Vec<String> = entries.iter().map(|e| e.slang.clone()).collect();
        let mut meanings = serde_json::Map::new();
        for entry in &entries {
            meanings.insert(
                entry.slang.clone(),
                serde_json::Value::String(entry.meaning.clone()),
            );
        }

        Self {
            total_terms: terms.len(),
            terms,
            meanings,
            full_data: entries,
        }
    }
}
