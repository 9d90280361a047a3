use crate::compare::sequence::SequenceMatcher;
use crate::results::{DifferenceRecord, HeadingChanges, PageContent};
use std::collections::BTreeSet;

/// Extracts the structural and textual deltas between two pages.
///
/// Signed fields are always `first - second`.
pub fn key_differences(first: &PageContent, second: &PageContent) -> DifferenceRecord {
    DifferenceRecord {
        title_diff: SequenceMatcher::new(&first.title, &second.title).ratio(),
        heading_changes: heading_changes(&first.headings, &second.headings),
        content_length_diff: char_count(&first.main_content) - char_count(&second.main_content),
        link_count_diff: first.links.len() as i64 - second.links.len() as i64,
    }
}

/// Set difference of two heading lists in both directions. Order and
/// duplicates are discarded.
pub fn heading_changes(first: &[String], second: &[String]) -> HeadingChanges {
    let first: BTreeSet<&String> = first.iter().collect();
    let second: BTreeSet<&String> = second.iter().collect();

    HeadingChanges {
        unique_to_first: first.difference(&second).map(|h| (*h).clone()).collect(),
        unique_to_second: second.difference(&first).map(|h| (*h).clone()).collect(),
    }
}

fn char_count(text: &str) -> i64 {
    text.chars().count() as i64
}
