use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{FeedData, SlangData};

pub const FEED_FILE: &str = "reddit_posts.json";
pub const SUMMARY_FILE: &str = "posts_summary.txt";
pub const SLANG_FILE: &str = "slang_data.json";
pub const SLANG_TERMS_FILE: &str = "slang_terms.txt";

/// Posts listed in the sample-comment section of the summary
const SAMPLE_POSTS: usize = 3;
const SAMPLE_COMMENTS_PER_POST: usize = 2;

fn write_json<T: serde::Serialize>(value: &T, dir: &Path, filename: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    let filepath = dir.join(filename);

    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    fs::write(&filepath, json)
        .with_context(|| format!("Failed to write {}", filepath.display()))?;

    Ok(filepath)
}

fn write_text(content: &str, dir: &Path, filename: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    let filepath = dir.join(filename);

    fs::write(&filepath, content)
        .with_context(|| format!("Failed to write {}", filepath.display()))?;

    Ok(filepath)
}

pub fn save_feed(data: &FeedData, dir: &Path) -> Result<PathBuf> {
    write_json(data, dir, FEED_FILE)
}

/// Load a feed document written by [`save_feed`]
pub fn load_feed(filepath: &Path) -> Result<FeedData> {
    let content = fs::read_to_string(filepath)
        .with_context(|| format!("Failed to read feed file: {}", filepath.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse feed JSON from {}", filepath.display()))
}

pub fn generate_summary(data: &FeedData) -> String {
    let mut out = String::new();
    let with_comments = data.comments.values().filter(|c| !c.is_empty()).count();

    out.push_str("Reddit Posts & Comments Summary\n");
    out.push_str("===============================\n\n");
    out.push_str(&format!("Total posts: {}\n", data.posts.len()));
    out.push_str(&format!("Posts with comments: {}\n", with_comments));
    out.push_str(&format!("Subreddits: {}\n", data.subreddits.join(", ")));
    out.push_str(&format!(
        "Fetched: {}\n\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str("Posts Overview:\n");
    out.push_str("===============\n");
    for post in &data.posts {
        out.push_str(&format!(
            "r/{} - {}... ({} comments)\n",
            post.subreddit,
            title_prefix(&post.title, 80),
            data.comments_for(post.id).len()
        ));
    }

    out.push_str("\nSample Comments:\n");
    out.push_str("================\n");
    for (post_id, comments) in data.comments.iter().take(SAMPLE_POSTS) {
        let Some(post) = data.posts.iter().find(|p| p.id == *post_id) else {
            continue;
        };
        out.push_str(&format!("\nPost: {}...\n", title_prefix(&post.title, 60)));
        for (i, comment) in comments.iter().take(SAMPLE_COMMENTS_PER_POST).enumerate() {
            out.push_str(&format!(
                "  Comment {}: {}...\n",
                i + 1,
                title_prefix(&comment.text, 100)
            ));
        }
    }

    out
}

// The summary always appends its own "...", so cut without a marker
fn title_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

pub fn save_summary(data: &FeedData, dir: &Path) -> Result<PathBuf> {
    write_text(&generate_summary(data), dir, SUMMARY_FILE)
}

pub fn save_slang(data: &SlangData, dir: &Path) -> Result<PathBuf> {
    write_json(data, dir, SLANG_FILE)
}

/// One term per line
pub fn save_slang_terms(data: &SlangData, dir: &Path) -> Result<PathBuf> {
    let mut content = String::new();
    for term in &data.terms {
        content.push_str(term);
        content.push('\n');
    }
    write_text(&content, dir, SLANG_TERMS_FILE)
}
