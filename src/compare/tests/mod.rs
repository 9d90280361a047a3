
use crate::results::PageContent;

/// Builds a content record with the fields the comparison engine reads.
pub(super) fn content(title: &str, headings: &[&str], body: &str, links: &[&str]) -> PageContent {
    PageContent {
        title: title.to_string(),
        headings: headings.iter().map(|h| h.to_string()).collect(),
        main_content: body.to_string(),
        links: links.iter().map(|l| Some(l.to_string())).collect(),
        meta_description: String::new(),
    }
}
