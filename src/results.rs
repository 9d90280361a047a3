use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structured content extracted from a single page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// Text of the `<title>` element (empty if the page has none)
    pub title: String,

    /// Text of every h1/h2/h3 in document order
    pub headings: Vec<String>,

    /// Paragraph texts joined by a single space
    pub main_content: String,

    /// Anchor targets; `None` for anchors without an href
    pub links: Vec<Option<String>>,

    /// Content of `<meta name="description">` (empty if missing)
    pub meta_description: String,
}

/// A page taking part in a comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    /// URL of the page
    pub url: String,

    /// Externally supplied engagement metric. No range or unit is assumed.
    pub engagement: f64,

    /// Extracted content, absent when fetching or parsing failed
    pub content: Option<PageContent>,
}

impl PageInput {
    /// Create a new page input
    pub fn new(url: impl Into<String>, engagement: f64, content: Option<PageContent>) -> Self {
        Self {
            url: url.into(),
            engagement,
            content,
        }
    }
}

/// Headings present on only one side of a comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingChanges {
    pub unique_to_first: BTreeSet<String>,
    pub unique_to_second: BTreeSet<String>,
}

/// Structural and textual deltas between two pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferenceRecord {
    /// Ratcliff/Obershelp similarity ratio between the titles, in [0, 1]
    pub title_diff: f64,

    pub heading_changes: HeadingChanges,

    /// Character count of the first body minus the second
    pub content_length_diff: i64,

    /// Link count of the first page minus the second
    pub link_count_diff: i64,
}

/// Result of comparing one unordered page pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub page1_url: String,
    pub page2_url: String,

    /// TF-IDF cosine similarity of the two bodies, in [0, 1]
    pub content_similarity: f64,

    /// `engagement(page1) - engagement(page2)`
    pub engagement_difference: f64,

    pub key_differences: DifferenceRecord,
}
