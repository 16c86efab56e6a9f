use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use crate::models::SlangEntry;

/// Columns that may hold the slang term, in order of preference
pub const TERM_COLUMNS: &[&str] = &["slang", "term", "word", "phrase"];
/// Columns that may hold the meaning, in order of preference
pub const MEANING_COLUMNS: &[&str] = &["meaning", "definition", "explanation", "description"];

pub struct SlangDownloader {
    client: Client,
}

impl SlangDownloader {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub async fn download(&self, url: &str) -> Result<String> {
        debug!(%url, "downloading slang dataset");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to download slang dataset")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Dataset host returned error: {}", status);
        }

        response
            .text()
            .await
            .context("Failed to read slang dataset body")
    }
}

/// Parse CSV text into rows of fields. Handles quoted fields, doubled quotes and embedded newlines.
pub fn parse_csv(input: &str) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.trim_start_matches('\u{feff}').chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        anyhow::bail!("Unterminated quoted field in CSV");
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    // Blank lines come through as a single empty field
    rows.retain(|r| !(r.len() == 1 && r[0].trim().is_empty()));

    Ok(rows)
}

/// Pull `(term, meaning)` pairs out of a CSV using the first usable candidate column for each.
pub fn extract_terms(csv: &str) -> Result<Vec<SlangEntry>> {
    let rows = parse_csv(csv)?;
    let (header, records) = rows.split_first().context("Slang dataset is empty")?;

    let header: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
    debug!(columns = ?header, "slang dataset columns");

    let term_columns = column_indices(&header, TERM_COLUMNS);
    let meaning_columns = column_indices(&header, MEANING_COLUMNS);

    if term_columns.is_empty() || meaning_columns.is_empty() {
        anyhow::bail!(
            "Slang dataset has no recognizable term/meaning columns (found: {})",
            header.join(", ")
        );
    }

    let entries = records
        .iter()
        .filter_map(|record| {
            let slang = first_value(record, &term_columns)?.to_lowercase();
            let meaning = first_value(record, &meaning_columns)?.to_string();
            Some(SlangEntry { slang, meaning })
        })
        .collect();

    Ok(entries)
}

fn column_indices(header: &[String], candidates: &[&str]) -> Vec<usize> {
    candidates
        .iter()
        .filter_map(|name| header.iter().position(|h| h == name))
        .collect()
}

fn first_value<'a>(record: &'a [String], columns: &[usize]) -> Option<&'a str> {
    columns
        .iter()
        .filter_map(|&i| record.get(i))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}
