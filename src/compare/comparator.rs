use crate::compare::differences::key_differences;
use crate::compare::similarity::content_similarity;
use crate::error::{Error, Result};
use crate::results::{ComparisonRecord, PageContent, PageInput};

/// All unordered index pairs `(i, j)` with `i < j`, outer index ascending.
pub fn pair_indices(len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len).flat_map(move |i| (i + 1..len).map(move |j| (i, j)))
}

/// Compares every unordered pair of pages.
///
/// Pairs where either page has no content are skipped with a warning, so the
/// result holds `n * (n - 1) / 2` records for the `n` pages whose content is
/// present, in pair enumeration order.
pub fn compare(pages: &[PageInput]) -> Vec<ComparisonRecord> {
    let mut records = Vec::new();

    for (i, j) in pair_indices(pages.len()) {
        match compare_pair(&pages[i], &pages[j]) {
            Ok(record) => records.push(record),
            Err(e) => {
                ::log::warn!(
                    "Skipping comparison of {} and {}: {}",
                    pages[i].url,
                    pages[j].url,
                    e
                );
            }
        }
    }

    ::log::info!(
        "Produced {} comparison records from {} pages",
        records.len(),
        pages.len()
    );
    records
}

/// Compares every unordered pair of pages, rejecting the whole batch if any
/// page lacks content.
pub fn compare_strict(pages: &[PageInput]) -> Result<Vec<ComparisonRecord>> {
    if let Some(missing) = pages.iter().find(|p| p.content.is_none()) {
        return Err(Error::MissingContent {
            url: missing.url.clone(),
        });
    }

    pair_indices(pages.len())
        .map(|(i, j)| compare_pair(&pages[i], &pages[j]))
        .collect()
}

/// Builds the comparison record for a single ordered pair.
pub fn compare_pair(first: &PageInput, second: &PageInput) -> Result<ComparisonRecord> {
    let first_content = content_of(first)?;
    let second_content = content_of(second)?;

    ::log::debug!("Comparing {} with {}", first.url, second.url);

    Ok(ComparisonRecord {
        page1_url: first.url.clone(),
        page2_url: second.url.clone(),
        content_similarity: content_similarity(
            &first_content.main_content,
            &second_content.main_content,
        ),
        engagement_difference: first.engagement - second.engagement,
        key_differences: key_differences(first_content, second_content),
    })
}

fn content_of(page: &PageInput) -> Result<&PageContent> {
    page.content.as_ref().ok_or_else(|| Error::MissingContent {
        url: page.url.clone(),
    })
}
