use crate::config::PromptStyle;
use crate::error::Result;
use crate::results::ComparisonRecord;

const JSON_INSTRUCTIONS: &str = "\
Please provide insights on:
1. Key differences between high and low performing pages
2. Specific elements that contribute to higher engagement
3. Recommendations for improvement

Format the response as a JSON object with these keys:
'key_differences', 'success_factors', 'recommendations'";

const DETAILED_INSTRUCTIONS: &str = "\
Based on this data, please provide:
1. Main factors contributing to engagement differences
2. Specific elements that appear to drive higher engagement
3. Recommendations for improving lower-performing pages
4. Patterns or trends across all comparisons

Format the response as a JSON object with these keys:
'key_differences', 'success_factors', 'recommendations'";

/// Builds the prompt sent to the text-generation service.
pub fn build_prompt(comparisons: &[ComparisonRecord], style: PromptStyle) -> Result<String> {
    match style {
        PromptStyle::Json => json_prompt(comparisons),
        PromptStyle::Detailed => detailed_prompt(comparisons),
    }
}

fn json_prompt(comparisons: &[ComparisonRecord]) -> Result<String> {
    let data = serde_json::to_string_pretty(comparisons)?;
    Ok(format!(
        "Analyze the following landing page comparison data and identify key factors affecting engagement:\n{data}\n\n{JSON_INSTRUCTIONS}\n"
    ))
}

fn detailed_prompt(comparisons: &[ComparisonRecord]) -> Result<String> {
    let mut prompt = String::from(
        "Analyze the following landing page comparisons and explain the likely reasons for engagement differences:\n\nComparison Data:\n",
    );

    for comparison in comparisons {
        prompt.push_str(&format!(
            "\nPages being compared:\n{} vs {}\nContent Similarity: {:.2}\nEngagement Difference: {}\nKey Differences: {}\n",
            comparison.page1_url,
            comparison.page2_url,
            comparison.content_similarity,
            comparison.engagement_difference,
            serde_json::to_string_pretty(&comparison.key_differences)?,
        ));
    }

    prompt.push('\n');
    prompt.push_str(DETAILED_INSTRUCTIONS);
    prompt.push('\n');
    Ok(prompt)
}
