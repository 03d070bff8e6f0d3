//! Keyword highlighting with per-keyword colours and frequency statistics.
//!
//! The output is raw markup. Input text is not escaped; callers decide the
//! rendering context.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Highlight colours, assigned to keywords in list order and reused
/// modulo its length.
pub const PALETTE: [&str; 10] = [
    "#FF5733", "#33FF57", "#3357FF", "#F033FF", "#FF33A1", "#33FFF6", "#FFD833", "#33FF96",
    "#8333FF", "#FF9633",
];

const STATS_HEADING: &str = "إحصاءات الكلمات المفتاحية:";

/// A run of word characters, or a single non-word non-space character.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|[^\w\s]").expect("Invalid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
struct KeywordEntry {
    lowered: String,
    canonical: String,
    color: &'static str,
}

/// Lowercase keyword to colour, built fresh for each highlight call.
#[derive(Debug, Clone, Default)]
pub struct KeywordColorMap {
    entries: Vec<KeywordEntry>,
}

impl KeywordColorMap {
    /// Each distinct keyword keeps the colour of its first position in
    /// `keywords` and the spelling it had there.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let mut entries: Vec<KeywordEntry> = Vec::with_capacity(keywords.len());

        for (index, keyword) in keywords.iter().enumerate() {
            let canonical = keyword.as_ref();
            let lowered = canonical.to_lowercase();
            if entries.iter().any(|entry| entry.lowered == lowered) {
                continue;
            }
            entries.push(KeywordEntry {
                lowered,
                canonical: canonical.to_string(),
                color: PALETTE[index % PALETTE.len()],
            });
        }

        Self { entries }
    }

    pub fn color_for(&self, keyword: &str) -> Option<&'static str> {
        self.lookup(&keyword.to_lowercase()).map(|entry| entry.color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, lowered: &str) -> Option<&KeywordEntry> {
        self.entries.iter().find(|entry| entry.lowered == lowered)
    }
}

/// Occurrences of one keyword in the highlighted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordStat {
    pub keyword: String,
    pub color: &'static str,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlighted {
    /// The text with every match wrapped in a `<mark>`.
    pub body: String,
    /// `None` when highlighting was skipped for empty input.
    pub stats: Option<Vec<KeywordStat>>,
}

impl Highlighted {
    fn passthrough(text: &str) -> Self {
        Self {
            body: text.to_string(),
            stats: None,
        }
    }

    pub fn total_matches(&self) -> u64 {
        self.stats
            .as_deref()
            .map(|stats| stats.iter().map(|stat| stat.count).sum())
            .unwrap_or(0)
    }

    /// Body followed by the statistics block.
    pub fn render(&self) -> String {
        let Some(stats) = &self.stats else {
            return self.body.clone();
        };

        let mut out = self.body.clone();
        out.push_str("<div class=\"keyword-stats\"><h3>");
        out.push_str(STATS_HEADING);
        out.push_str("</h3><ul>");
        for stat in stats {
            out.push_str(&format!(
                "<li><span style=\"background-color: {}; padding: 2px 5px; border-radius: 3px;\">{}</span>: ظهرت {} مرات</li>",
                stat.color, stat.keyword, stat.count
            ));
        }
        out.push_str("</ul></div>");
        out
    }
}

impl fmt::Display for Highlighted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Wraps every case-insensitive keyword match in `text` and counts matches
/// per keyword in order of first appearance.
pub fn highlight<S: AsRef<str>>(text: &str, keywords: &[S]) -> Highlighted {
    if text.is_empty() || keywords.is_empty() {
        return Highlighted::passthrough(text);
    }

    let colors = KeywordColorMap::new(keywords);
    let mut body = String::with_capacity(text.len());
    let mut stats: Vec<KeywordStat> = Vec::new();
    let mut cursor = 0;

    for token in TOKEN_PATTERN.find_iter(text) {
        body.push_str(&text[cursor..token.start()]);
        cursor = token.end();

        let word = token.as_str();
        let Some(entry) = colors.lookup(&word.to_lowercase()) else {
            body.push_str(word);
            continue;
        };

        body.push_str(&format!(
            "<mark style=\"background-color: {}\">{}</mark>",
            entry.color, word
        ));

        match stats.iter_mut().find(|stat| stat.keyword == entry.canonical) {
            Some(stat) => stat.count += 1,
            None => stats.push(KeywordStat {
                keyword: entry.canonical.clone(),
                color: entry.color,
                count: 1,
            }),
        }
    }
    body.push_str(&text[cursor..]);

    Highlighted {
        body,
        stats: Some(stats),
    }
}
