//! Monthly overview and guidance written by the companion.

use crate::aggregate::monthly_keyword_ranking;
use crate::ai::prompts::{
    monthly_report_request, FAILED_REPORT_GUIDANCE, FAILED_REPORT_OVERVIEW,
    PARTIAL_REPORT_GUIDANCE, PARTIAL_REPORT_OVERVIEW, QUIET_MONTH_GUIDANCE, QUIET_MONTH_OVERVIEW,
};
use crate::ai::TextGenerator;
use crate::constants::PROMPT_KEYWORD_LIMIT;
use crate::journal_core::{DayEntry, MonthKey};
use crate::tarot::Deck;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// An overview of the month and numbered guidance for the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    pub overview: String,
    /// Numbered lines, `1. ...\n2. ...`.
    pub guidance: String,
}

impl MonthlyReport {
    fn fixed(overview: &str, guidance: &str) -> Self {
        Self {
            overview: overview.to_string(),
            guidance: guidance.to_string(),
        }
    }

    /// Guidance split into its numbered steps, numbers removed.
    pub fn guidance_steps(&self) -> Vec<String> {
        self.guidance
            .lines()
            .map(|line| {
                let line = line.trim();
                let without_number = line.trim_start_matches(|c: char| c.is_ascii_digit());
                match without_number.strip_prefix('.') {
                    Some(rest) if without_number.len() < line.len() => rest.trim(),
                    _ => line,
                }
            })
            .filter(|step| !step.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct RawReport {
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    guidance: Option<String>,
}

/// Removes Markdown code fences some models wrap around JSON.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Asks the companion for a report on a month summed up by `keywords`.
///
/// Never fails. An empty keyword list returns the quiet-month report without
/// calling the service; a failed call or unreadable answer returns a fixed
/// report; a missing field is filled in individually.
pub fn generate_monthly_report<G: TextGenerator + ?Sized>(
    ai: &G,
    keywords: &[String],
) -> MonthlyReport {
    if keywords.is_empty() {
        debug!("No keywords this month, returning the quiet-month report");
        return MonthlyReport::fixed(QUIET_MONTH_OVERVIEW, QUIET_MONTH_GUIDANCE);
    }

    let text = match ai.generate(&monthly_report_request(keywords)) {
        Ok(text) => text,
        Err(e) => {
            warn!("Monthly report request failed: {}", e);
            return MonthlyReport::fixed(FAILED_REPORT_OVERVIEW, FAILED_REPORT_GUIDANCE);
        }
    };

    match serde_json::from_str::<RawReport>(&strip_code_fences(&text)) {
        Ok(raw) => {
            info!("Generated monthly report from {} keywords", keywords.len());
            MonthlyReport {
                overview: non_blank(raw.overview)
                    .unwrap_or_else(|| PARTIAL_REPORT_OVERVIEW.to_string()),
                guidance: non_blank(raw.guidance)
                    .unwrap_or_else(|| PARTIAL_REPORT_GUIDANCE.to_string()),
            }
        }
        Err(e) => {
            warn!("Unreadable monthly report: {}", e);
            MonthlyReport::fixed(FAILED_REPORT_OVERVIEW, FAILED_REPORT_GUIDANCE)
        }
    }
}

/// Ranks the month's keywords for the prompt and generates its report.
pub fn monthly_report_for<G: TextGenerator + ?Sized>(
    entries: &[DayEntry],
    deck: &Deck,
    ai: &G,
    month: MonthKey,
) -> (Vec<String>, MonthlyReport) {
    let keywords = monthly_keyword_ranking(entries, deck, month, PROMPT_KEYWORD_LIMIT);
    let report = generate_monthly_report(ai, &keywords);
    (keywords, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::ScriptedGenerator;

    fn keywords() -> Vec<String> {
        vec!["hope".to_string(), "rest".to_string()]
    }

    #[test]
    fn test_empty_keywords_short_circuit() {
        let ai = ScriptedGenerator::replying(&["{}"]);
        let report = generate_monthly_report(&ai, &[]);
        assert_eq!(report.overview, QUIET_MONTH_OVERVIEW);
        assert_eq!(ai.call_count(), 0);
    }

    #[test]
    fn test_parses_fenced_json() {
        let ai = ScriptedGenerator::replying(&[
            "```json\n{\"overview\": \"A month of soft light.\", \"guidance\": \"1. Walk.\\n2. Rest.\\n3. Write.\"}\n```",
        ]);
        let report = generate_monthly_report(&ai, &keywords());
        assert_eq!(report.overview, "A month of soft light.");
        assert_eq!(report.guidance_steps(), vec!["Walk.", "Rest.", "Write."]);
        assert!(ai.requests.borrow()[0].json_response);
    }

    #[test]
    fn test_missing_field_is_filled() {
        let ai = ScriptedGenerator::replying(&[r#"{"overview": "Calm."}"#]);
        let report = generate_monthly_report(&ai, &keywords());
        assert_eq!(report.overview, "Calm.");
        assert_eq!(report.guidance, PARTIAL_REPORT_GUIDANCE);
    }

    #[test]
    fn test_failures_use_fixed_report() {
        let failing = ScriptedGenerator::failing();
        assert_eq!(
            generate_monthly_report(&failing, &keywords()).overview,
            FAILED_REPORT_OVERVIEW
        );

        let garbled = ScriptedGenerator::replying(&["not json at all"]);
        assert_eq!(
            generate_monthly_report(&garbled, &keywords()).guidance,
            FAILED_REPORT_GUIDANCE
        );
    }

    #[test]
    fn test_guidance_steps_keep_unnumbered_lines() {
        let report = MonthlyReport::fixed("o", "1. Breathe deeply.\nStay close to water\n\n3. 10 minutes outside");
        assert_eq!(
            report.guidance_steps(),
            vec!["Breathe deeply.", "Stay close to water", "10 minutes outside"]
        );
    }

    #[test]
    fn test_monthly_report_for_empty_month() {
        let ai = ScriptedGenerator::failing();
        let (keywords, report) =
            monthly_report_for(&[], &Deck::builtin(), &ai, MonthKey::new(2024, 3).unwrap());
        assert!(keywords.is_empty());
        assert_eq!(report.overview, QUIET_MONTH_OVERVIEW);
        assert_eq!(ai.call_count(), 0);
    }
}
