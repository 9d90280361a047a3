use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

/// Terms are maximal runs of two or more letters, numbers or underscores,
/// matched after lowercasing. Combining marks are not word characters, so a
/// decomposed "cafe\u{301}" yields the term "cafe".
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]{2,}").expect("token pattern is a valid regex"));

/// Scores this close to 1.0 only differ from it by rounding in the dot product.
const UNIT_TOLERANCE: f64 = 8.0 * f64::EPSILON;

/// Computes the TF-IDF cosine similarity between two bodies of text.
///
/// The vector space is built from exactly these two documents, so IDF
/// weights (and therefore scores) are relative to the pair rather than to any
/// external corpus. IDF is smoothed: `ln((1 + n) / (1 + df)) + 1` with `n = 2`.
///
/// Returns 0.0 when either text is empty or when neither contains a term.
pub fn content_similarity(first: &str, second: &str) -> f64 {
    if first.is_empty() || second.is_empty() {
        ::log::debug!("Empty document, similarity defaults to 0");
        return 0.0;
    }

    let documents = [term_counts(first), term_counts(second)];
    let vocabulary: BTreeSet<&str> = documents
        .iter()
        .flat_map(|counts| counts.keys().map(String::as_str))
        .collect();

    if vocabulary.is_empty() {
        ::log::debug!("No extractable terms, similarity defaults to 0");
        return 0.0;
    }

    let corpus_size = documents.len() as f64;
    let idf: Vec<f64> = vocabulary
        .iter()
        .map(|term| {
            let df = documents.iter().filter(|d| d.contains_key(*term)).count() as f64;
            ((1.0 + corpus_size) / (1.0 + df)).ln() + 1.0
        })
        .collect();

    let rows: Vec<Vec<f64>> = documents
        .iter()
        .map(|counts| tfidf_vector(counts, &vocabulary, &idf))
        .collect();
    let score: f64 = rows[0].iter().zip(&rows[1]).map(|(x, y)| x * y).sum();

    if (1.0 - score).abs() <= UNIT_TOLERANCE {
        return 1.0;
    }
    score.clamp(0.0, 1.0)
}

fn term_counts(text: &str) -> HashMap<String, usize> {
    let lowered = text.to_lowercase();
    let mut counts = HashMap::new();
    for term in TOKEN_PATTERN.find_iter(&lowered) {
        *counts.entry(term.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

/// L2-normalized TF-IDF row. A document without terms stays a zero vector.
fn tfidf_vector(
    counts: &HashMap<String, usize>,
    vocabulary: &BTreeSet<&str>,
    idf: &[f64],
) -> Vec<f64> {
    let mut row: Vec<f64> = vocabulary
        .iter()
        .zip(idf)
        .map(|(term, weight)| counts.get(*term).copied().unwrap_or(0) as f64 * weight)
        .collect();

    let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in &mut row {
            *value /= norm;
        }
    }
    row
}
