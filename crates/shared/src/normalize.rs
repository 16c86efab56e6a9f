use chrono::{DateTime, Utc};
use rand::Rng;

use crate::models::PostType;

pub const POST_TEXT_LIMIT: usize = 500;
pub const COMMENT_TEXT_LIMIT: usize = 300;

const DELETION_MARKERS: &[&str] = &["[deleted]", "[removed]"];
const IMAGE_SUFFIXES: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

pub fn is_deletion_marker(text: &str) -> bool {
    DELETION_MARKERS.contains(&text.trim())
}

const ENTITIES: &[(&str, &str)] = &[
    ("&gt;", ">"),
    ("&lt;", "<"),
    ("&quot;", "\""),
    ("&amp;", "&"),
];

/// Strip markdown emphasis, unescape entities, collapse whitespace and cap the length.
///
/// Anything carrying a deletion marker, before or after cleanup, comes back empty.
pub fn clean_text(text: &str, max_len: usize) -> String {
    if text.trim().is_empty() || contains_deletion_marker(text) {
        return String::new();
    }

    let stripped = text.replace('*', "");

    // Reddit double-escapes some bodies ("&amp;lt;"), so decode until nothing changes
    let mut decoded = decode_entities(&stripped);
    loop {
        let next = decode_entities(&decoded);
        if next == decoded {
            break;
        }
        decoded = next;
    }

    let collapsed = decoded.split_whitespace().collect::<Vec<_>>().join(" ");

    // "[remo*ved]" only becomes a marker once the asterisk is gone
    if contains_deletion_marker(&collapsed) {
        return String::new();
    }

    truncate_chars(&collapsed, max_len)
}

fn contains_deletion_marker(text: &str) -> bool {
    DELETION_MARKERS.iter().any(|m| text.contains(m))
}

/// One left-to-right pass; an `&` produced by `&amp;` is not re-read in the same pass.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, replacement)) => {
                out.push_str(replacement);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Cut to `max_len` characters, marking the cut with "...".
pub fn truncate_chars(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Render an epoch timestamp as "N days ago" / "N hours ago" / "N minutes ago" / "just now".
///
/// Missing or unusable timestamps get a made-up "N hours ago" so the field is never blank.
pub fn normalize_time(created_utc: Option<f64>, now: DateTime<Utc>) -> String {
    let created = created_utc
        .filter(|ts| ts.is_finite() && *ts > 0.0)
        .and_then(|ts| DateTime::from_timestamp(ts as i64, 0));

    match created {
        Some(created) => relative_time(now.signed_duration_since(created)),
        None => placeholder_time(),
    }
}

pub fn relative_time(elapsed: chrono::Duration) -> String {
    if elapsed.num_days() >= 1 {
        format!("{} days ago", elapsed.num_days())
    } else if elapsed.num_hours() >= 1 {
        format!("{} hours ago", elapsed.num_hours())
    } else if elapsed.num_minutes() >= 1 {
        format!("{} minutes ago", elapsed.num_minutes())
    } else {
        "just now".to_string()
    }
}

fn placeholder_time() -> String {
    format!("{} hours ago", rand::rng().random_range(1..=12))
}

/// True when the URL's path ends in a known image extension.
pub fn has_image_suffix(url: &str) -> bool {
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_lowercase(),
    };

    IMAGE_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

pub fn classify_post(text: &str, url: &str, permalink: &str) -> PostType {
    if !text.is_empty() {
        PostType::Text
    } else if has_image_suffix(url) {
        PostType::Image
    } else if !url.is_empty() && !points_at_permalink(url, permalink) {
        PostType::Link
    } else {
        PostType::Text
    }
}

// Self posts link back to their own comment page, either relative or on a reddit host
fn points_at_permalink(url: &str, permalink: &str) -> bool {
    let permalink = permalink.trim_end_matches('/');
    if permalink.is_empty() {
        return false;
    }

    match url::Url::parse(url) {
        Ok(parsed) => {
            let on_reddit = parsed
                .host_str()
                .is_some_and(|host| host == "reddit.com" || host.ends_with(".reddit.com"));
            on_reddit && parsed.path().trim_end_matches('/') == permalink
        }
        Err(_) => url.trim_end_matches('/') == permalink,
    }
}

/// Direct image URL, or the first preview image's source.
pub fn extract_image(url: &str, preview: Option<&serde_json::Value>) -> Option<String> {
    if has_image_suffix(url) {
        return Some(url.to_string());
    }

    preview?
        .pointer("/images/0/source/url")?
        .as_str()
        .map(|src| src.replace("&amp;", "&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn is_placeholder(s: &str) -> bool {
        s.strip_suffix(" hours ago")
            .and_then(|n| n.parse::<u32>().ok())
            .is_some_and(|n| (1..=12).contains(&n))
    }

    #[test]
    fn test_clean_text_strips_markup_and_entities() {
        let cleaned = clean_text("**Bold**  and *italic*\n\n&gt; quoted &lt;tag&gt; &amp; more", 500);
        assert_eq!(cleaned, "Bold and italic > quoted <tag> & more");
    }

    #[test]
    fn test_clean_text_deletion_markers() {
        assert_eq!(clean_text("[deleted]", 500), "");
        assert_eq!(clean_text("[removed]", 300), "");
        assert_eq!(clean_text("text was [removed] by mods", 300), "");
        assert_eq!(clean_text("", 300), "");
        assert_eq!(clean_text(" \n\t ", 300), "");
    }

    #[test]
    fn test_clean_text_decodes_nested_entities() {
        assert_eq!(clean_text("use &amp;lt;br&amp;gt; tags", 500), "use <br> tags");
        assert_eq!(clean_text("&amp;amp;amp; layered", 500), "& layered");
        assert_eq!(clean_text("fish & chips &notanentity;", 500), "fish & chips &notanentity;");
    }

    #[test]
    fn test_clean_text_markers_hidden_by_markup() {
        assert_eq!(clean_text("reply [remo*ved] lol", 300), "");
        assert_eq!(clean_text("[**deleted**]", 300), "");
    }

    #[test]
    fn test_decode_entities_single_pass() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("a&gt;b&lt;c&quot;"), "a>b<c\"");
    }

    #[test]
    fn test_clean_text_truncates_with_ellipsis() {
        let long = "a".repeat(320);
        let cleaned = clean_text(&long, COMMENT_TEXT_LIMIT);
        assert_eq!(cleaned.chars().count(), 303);
        assert!(cleaned.ends_with("..."));

        let exact = "b".repeat(300);
        assert_eq!(clean_text(&exact, COMMENT_TEXT_LIMIT), exact);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 3), "ééé...");
    }

    #[test]
    fn test_clean_text_is_idempotent() {
        let inputs = [
            "plain sentence",
            "**markdown**   with\nnewlines",
            "a &amp; b &gt; c",
            "ünïcödé   text\twith tabs",
            "use &amp;lt;br&amp;gt; tags",
            "&amp;amp;amp; layered",
            "reply [remo*ved] lol",
            "[**deleted**]",
            "fish & chips &notanentity;",
        ];
        for input in inputs {
            let once = clean_text(input, POST_TEXT_LIMIT);
            assert_eq!(clean_text(&once, POST_TEXT_LIMIT), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_relative_time_buckets() {
        assert_eq!(relative_time(Duration::seconds(0)), "just now");
        assert_eq!(relative_time(Duration::seconds(59)), "just now");
        assert_eq!(relative_time(Duration::seconds(60)), "1 minutes ago");
        assert_eq!(relative_time(Duration::minutes(59)), "59 minutes ago");
        assert_eq!(relative_time(Duration::hours(1)), "1 hours ago");
        assert_eq!(relative_time(Duration::hours(23)), "23 hours ago");
        assert_eq!(relative_time(Duration::days(1)), "1 days ago");
        assert_eq!(relative_time(Duration::days(40)), "40 days ago");
        assert_eq!(relative_time(Duration::seconds(-30)), "just now");
    }

    #[test]
    fn test_relative_time_gets_coarser() {
        fn rank(s: &str) -> u8 {
            if s == "just now" {
                0
            } else if s.ends_with("minutes ago") {
                1
            } else if s.ends_with("hours ago") {
                2
            } else {
                3
            }
        }

        let mut last = 0;
        for secs in (0..5 * 86_400).step_by(1_777) {
            let r = rank(&relative_time(Duration::seconds(secs)));
            assert!(r >= last, "went finer at {}s", secs);
            last = r;
        }
    }

    #[test]
    fn test_normalize_time_from_epoch() {
        let ts = (now() - Duration::hours(3)).timestamp() as f64;
        assert_eq!(normalize_time(Some(ts), now()), "3 hours ago");
    }

    #[test]
    fn test_normalize_time_placeholder() {
        for bad in [None, Some(0.0), Some(-5.0), Some(f64::NAN), Some(f64::INFINITY)] {
            let s = normalize_time(bad, now());
            assert!(is_placeholder(&s), "{:?} gave {}", bad, s);
        }
    }

    #[test]
    fn test_classify_text_post() {
        assert_eq!(classify_post("hello", "", ""), PostType::Text);
    }

    #[test]
    fn test_classify_image_post() {
        assert_eq!(classify_post("", "http://x.com/cat.jpg", ""), PostType::Image);
        assert_eq!(
            classify_post("", "https://i.redd.it/abc.PNG?width=640", "/r/pics/comments/abc/"),
            PostType::Image
        );
    }

    #[test]
    fn test_classify_link_and_self_posts() {
        let permalink = "/r/demo/comments/abc/title/";
        assert_eq!(
            classify_post("", "https://example.com/article", permalink),
            PostType::Link
        );
        assert_eq!(
            classify_post("", "https://www.reddit.com/r/demo/comments/abc/title/", permalink),
            PostType::Text
        );
        assert_eq!(classify_post("", "", permalink), PostType::Text);
        assert_eq!(classify_post("", permalink, permalink), PostType::Text);
        assert_eq!(
            classify_post("", "https://old.reddit.com/r/demo/comments/abc/title", permalink),
            PostType::Text
        );
    }

    #[test]
    fn test_classify_foreign_host_with_permalink_path_is_link() {
        let permalink = "/r/demo/comments/abc/title/";
        assert_eq!(
            classify_post("", "https://example.com/r/demo/comments/abc/title/", permalink),
            PostType::Link
        );
    }

    #[test]
    fn test_extract_image_direct_url() {
        assert_eq!(
            extract_image("http://x.com/cat.jpg", None),
            Some("http://x.com/cat.jpg".to_string())
        );
    }

    #[test]
    fn test_extract_image_from_preview() {
        let preview = json!({
            "images": [{"source": {"url": "https://preview.redd.it/a.jpg?width=1&amp;s=abc"}}]
        });
        assert_eq!(
            extract_image("https://example.com/page", Some(&preview)),
            Some("https://preview.redd.it/a.jpg?width=1&s=abc".to_string())
        );
    }

    #[test]
    fn test_extract_image_malformed_preview() {
        assert_eq!(extract_image("", Some(&json!({"images": []}))), None);
        assert_eq!(extract_image("", Some(&json!({"images": "nope"}))), None);
        assert_eq!(extract_image("https://example.com", None), None);
    }
}
