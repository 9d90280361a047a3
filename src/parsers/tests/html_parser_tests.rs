use crate::parsers::{extract_page_content, html};

#[cfg(test)]
mod tests {
    use super::*;

    const LANDING_PAGE: &str = r#"<html>
<head>
  <title>Spring Sale</title>
  <meta name="description" content="Save on everything">
</head>
<body>
  <h1>Big savings</h1>
  <p>Everything is on sale.</p>
  <h2>Free shipping</h2>
  <p>Orders ship <b>free</b> today.</p>
  <h4>Not collected</h4>
  <h3>Big savings</h3>
  <a href="/checkout">Buy</a>
  <a name="anchor">No target</a>
  <a href="https://example.com/terms">Terms</a>
</body>
</html>"#;

    #[test]
    fn test_title_and_meta_description() {
        let content = html::parse(LANDING_PAGE).unwrap();
        assert_eq!(content.title, "Spring Sale");
        assert_eq!(content.meta_description, "Save on everything");
    }

    #[test]
    fn test_headings_in_document_order() {
        let content = html::parse(LANDING_PAGE).unwrap();
        assert_eq!(
            content.headings,
            vec!["Big savings", "Free shipping", "Big savings"]
        );
    }

    #[test]
    fn test_paragraphs_joined_with_space() {
        let content = html::parse(LANDING_PAGE).unwrap();
        assert_eq!(
            content.main_content,
            "Everything is on sale. Orders ship free today."
        );
    }

    #[test]
    fn test_links_keep_anchors_without_href() {
        let content = html::parse(LANDING_PAGE).unwrap();
        assert_eq!(
            content.links,
            vec![
                Some("/checkout".to_string()),
                None,
                Some("https://example.com/terms".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_elements_default_to_empty() {
        let content = html::parse("<html><body><div>bare</div></body></html>").unwrap();
        assert_eq!(content.title, "");
        assert!(content.headings.is_empty());
        assert_eq!(content.main_content, "");
        assert!(content.links.is_empty());
        assert_eq!(content.meta_description, "");
    }

    #[test]
    fn test_meta_without_content_attribute() {
        let content =
            html::parse(r#"<html><head><meta name="description"></head></html>"#).unwrap();
        assert_eq!(content.meta_description, "");
    }

    #[test]
    fn test_extract_page_content() {
        let content = extract_page_content(LANDING_PAGE, "https://example.com").unwrap();
        assert_eq!(content.links.len(), 3);
    }
}
