pub mod html;

#[cfg(test)]
mod tests;

use crate::results::PageContent;

/// Turns raw markup into a content record, logging and discarding parse
/// failures.
pub fn extract_page_content(markup: &str, url: &str) -> Option<PageContent> {
    match html::parse(markup) {
        Ok(content) => Some(content),
        Err(e) => {
            ::log::error!("Error parsing {}: {}", url, e);
            None
        }
    }
}
