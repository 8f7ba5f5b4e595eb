/// Post text normalization
/// Strips links, mentions, hashtags and non-ASCII runs from post content
use once_cell::sync::Lazy;
use regex::Regex;

/// Links: `http` up to the next whitespace
static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S*").expect("Failed to compile url regex"));

/// Mentions: `@` followed by word characters
static MENTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@\w+").expect("Failed to compile mention regex"));

/// Hashtags: `#` followed by letters, digits or underscores
static HASHTAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[A-Za-z0-9_]+").expect("Failed to compile hashtag regex"));

/// Any run of characters outside the ASCII range (emoji, dashes, accents)
static NON_ASCII_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\x00-\x7F]+").expect("Failed to compile non-ascii regex"));

static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

/// Normalize post text for analysis
///
/// Missing text becomes an empty string. The output is ASCII only, carries no
/// links, mentions or hashtags, and has single spaces with no padding.
///
/// # Examples
///
/// ```
/// use pulse_pipeline::text::clean_text;
/// let cleaned = clean_text(Some("Tried this pasta recipe — yum! #food @chef https://t.co/x"));
/// assert_eq!(cleaned, "Tried this pasta recipe yum!");
/// assert_eq!(clean_text(None), "");
/// ```
pub fn clean_text(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let text = URL_REGEX.replace_all(text, "");
    let text = MENTION_REGEX.replace_all(&text, "");
    let text = HASHTAG_REGEX.replace_all(&text, "");
    let text = NON_ASCII_REGEX.replace_all(&text, " ");
    let text = WHITESPACE_REGEX.replace_all(&text, " ");

    text.trim().to_string()
}
