use crate::error::{Error, Result};
use crate::results::PageContent;
use scraper::{ElementRef, Html, Selector};

/// Parses HTML into a structured content record.
///
/// Headings are h1-h3 in document order, the body is every `<p>` joined by a
/// single space, and anchors without an href are kept as `None`.
pub fn parse(html: &str) -> Result<PageContent> {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&selector("title")?)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let headings = doc
        .select(&selector("h1, h2, h3")?)
        .map(element_text)
        .collect::<Vec<_>>();

    let main_content = doc
        .select(&selector("p")?)
        .map(element_text)
        .collect::<Vec<_>>()
        .join(" ");

    let links = doc
        .select(&selector("a")?)
        .map(|e| e.value().attr("href").map(|s| s.to_string()))
        .collect::<Vec<_>>();

    let meta_description = doc
        .select(&selector(r#"meta[name="description"]"#)?)
        .next()
        .and_then(|e| e.value().attr("content"))
        .unwrap_or_default()
        .to_string();

    ::log::debug!(
        "HTML parser found {} headings and {} links",
        headings.len(),
        links.len()
    );

    Ok(PageContent {
        title,
        headings,
        main_content,
        links,
        meta_description,
    })
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Parse(format!("invalid selector {css:?}: {e}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
