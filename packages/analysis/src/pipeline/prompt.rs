//! Prompt assembly from scraped content.

use super::extract::truncate_chars;
use super::prompts::ETHICS_PROMPT;
use crate::types::ScrapeResult;

/// Per-section character budgets so the prompt stays a predictable size
/// regardless of how much a site serves.
const MAX_MAIN_CONTENT_CHARS: usize = 5_000;
const MAX_SECTION_CHARS: usize = 2_000;
const MAX_METADATA_CHARS: usize = 1_000;

/// Turn an `additional_content` key into a section heading.
///
/// `privacy_content` becomes `Privacy Content`.
fn section_title(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the full analysis prompt for a scrape.
///
/// The instruction preamble comes first, followed by labeled content
/// sections. Each section is truncated independently so one oversized
/// page cannot crowd out the others.
pub fn build_prompt(scrape: &ScrapeResult) -> String {
    let mut sections = Vec::new();

    sections.push(format!("Website: {}", scrape.url));

    if let Some(title) = &scrape.title {
        sections.push(format!("Title: {}", title));
    }

    sections.push(format!(
        "Main content: {}",
        truncate_chars(scrape.content.clone(), MAX_MAIN_CONTENT_CHARS)
    ));

    for (key, content) in &scrape.additional_content {
        sections.push(format!(
            "{}: {}",
            section_title(key),
            truncate_chars(content.clone(), MAX_SECTION_CHARS)
        ));
    }

    if !scrape.metadata.is_empty() {
        let metadata = serde_json::to_string(&scrape.metadata).unwrap_or_default();
        sections.push(format!(
            "Metadata: {}",
            truncate_chars(metadata, MAX_METADATA_CHARS)
        ));
    }

    format!("{}\n\n{}", ETHICS_PROMPT, sections.join("\n\n"))
}
