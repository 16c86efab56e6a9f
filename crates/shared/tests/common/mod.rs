#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use shared::{Config, JsonSource};
use std::collections::HashMap;
use std::sync::Mutex;

pub const HOST: &str = "https://reddit.test";

/// Canned answers keyed by URL. Unknown URLs answer 404.
#[derive(Default)]
pub struct FakeSource {
    responses: HashMap<String, Result<Value, u16>>,
    requested: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, url: impl Into<String>, body: Value) -> Self {
        self.responses.insert(url.into(), Ok(body));
        self
    }

    pub fn status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), Err(status));
        self
    }

    pub fn listing(self, channel: &str, posts: Vec<Value>) -> Self {
        let children: Vec<Value> = posts
            .into_iter()
            .map(|data| json!({"kind": "t3", "data": data}))
            .collect();
        self.json(
            listing_url(channel),
            json!({"kind": "Listing", "data": {"children": children, "after": null}}),
        )
    }

    pub fn comments(self, permalink: &str, comments: Vec<Value>) -> Self {
        let url = format!("{}{}.json", HOST, permalink.trim_end_matches('/'));
        self.json(
            url,
            json!([
                {"kind": "Listing", "data": {"children": []}},
                {"kind": "Listing", "data": {"children": comments}}
            ]),
        )
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonSource for FakeSource {
    async fn get_json(&self, url: &str) -> Result<Value> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => anyhow::bail!("HTTP error: {}", status),
            None => anyhow::bail!("HTTP error: 404"),
        }
    }
}

pub fn listing_url(channel: &str) -> String {
    format!("{}/r/{}/hot.json?limit=10", HOST, channel)
}

pub fn test_config(channels: &[&str]) -> Config {
    Config {
        host: HOST.to_string(),
        channels: channels.iter().map(|c| c.to_string()).collect(),
        ..Config::default()
    }
    .without_delays()
}

pub fn raw_post(id: &str, channel: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "author": "poster",
        "created_utc": 1_600_000_000.0,
        "ups": 42,
        "num_comments": 7,
        "selftext": "",
        "url": format!("https://example.com/{}", id),
        "permalink": permalink(channel, id),
        "removed_by_category": null
    })
}

pub fn permalink(channel: &str, id: &str) -> String {
    format!("/r/{}/comments/{}/title/", channel, id)
}

pub fn raw_comment(id: &str, body: &str, ups: i64) -> Value {
    json!({
        "kind": "t1",
        "data": {
            "id": id,
            "author": "commenter",
            "body": body,
            "ups": ups,
            "created_utc": 1_600_000_000.0
        }
    })
}
