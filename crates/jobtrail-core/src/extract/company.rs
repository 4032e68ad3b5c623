//! Company extraction.

use std::sync::Arc;

use tracing::debug;

use super::ExtractionContext;
use super::cascade::{Bounds, Cascade, Cleanup};
use crate::config::ExtractionRules;
use crate::error::Result;
use crate::record::UNKNOWN_COMPANY;

const PLATFORM_BOUNDS: Bounds = Bounds::exclusive(1, 100);
const GENERIC_BOUNDS: Bounds = Bounds::exclusive(1, 50);
const BODY_BOUNDS: Bounds = Bounds::exclusive(1, 50);

/// Tiered company extractor.
///
/// Tiers, first hit wins:
/// 1. job-board subject templates (trailing platform tags stripped)
/// 2. generic subject patterns
/// 3. the word before "team", when the subject carries the team phrase
/// 4. body patterns, line by line
#[derive(Debug, Clone)]
pub struct CompanyExtractor {
    platform: Cascade,
    generic: Cascade,
    team_phrase: String,
    body: Cascade,
}

impl CompanyExtractor {
    pub(crate) fn new(rules: &ExtractionRules) -> Result<Self> {
        let suffixes: Arc<[String]> = Arc::from(rules.platform_suffixes.clone());

        let platform = Cascade::compile(
            rules
                .company_platform_patterns
                .iter()
                .map(|p| (p.as_str(), Cleanup::StripSuffixes(Arc::clone(&suffixes)))),
            PLATFORM_BOUNDS,
        )?;
        let generic = Cascade::compile(
            rules
                .company_generic_patterns
                .iter()
                .map(|p| (p.as_str(), Cleanup::Trim)),
            GENERIC_BOUNDS,
        )?;
        let body = Cascade::compile(
            rules
                .company_body_patterns
                .iter()
                .map(|p| (p.as_str(), Cleanup::Trim)),
            BODY_BOUNDS,
        )?;

        Ok(Self {
            platform,
            generic,
            team_phrase: rules.company_team_phrase.to_lowercase(),
            body,
        })
    }

    pub(crate) fn extract(&self, ctx: &ExtractionContext<'_>) -> String {
        if let Some((rule, company)) = self.platform.first_match(ctx.subject) {
            debug!(tier = "platform", rule, %company, "Company matched");
            return company;
        }

        if let Some((rule, company)) = self.generic.first_match(ctx.subject) {
            debug!(tier = "generic", rule, %company, "Company matched");
            return company;
        }

        if let Some(company) = self.word_before_team(ctx) {
            debug!(tier = "team", %company, "Company matched");
            return company;
        }

        if let Some((rule, company)) = self.body.first_match_in_lines(ctx.lines().iter().copied()) {
            debug!(tier = "body", rule, %company, "Company matched");
            return company;
        }

        UNKNOWN_COMPANY.to_string()
    }

    fn word_before_team(&self, ctx: &ExtractionContext<'_>) -> Option<String> {
        if self.team_phrase.is_empty() || !ctx.subject_lower().contains(&self.team_phrase) {
            return None;
        }

        let words: Vec<&str> = ctx.subject.split_whitespace().collect();
        words
            .iter()
            .position(|w| w.eq_ignore_ascii_case("team"))
            .filter(|&i| i > 0)
            .map(|i| words[i - 1].to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn extract(subject: &str, body: &str) -> String {
        let extractor = CompanyExtractor::new(&ExtractionRules::default()).unwrap();
        extractor.extract(&ExtractionContext::new(subject, body))
    }

    #[test]
    fn test_platform_templates() {
        assert_eq!(extract("Your application was sent to Acme Corp", ""), "Acme Corp");
        assert_eq!(
            extract("Your application was sent to Acme Corp - LinkedIn", ""),
            "Acme Corp"
        );
        assert_eq!(
            extract("Application sent! Your profile is now at Globex", ""),
            "Globex"
        );
        assert_eq!(extract("Initech: Your application", ""), "Initech");
        assert_eq!(
            extract("Thank you for applying to Hooli for the Data role", ""),
            "Hooli"
        );
    }

    #[test]
    fn test_generic_patterns() {
        assert_eq!(extract("Message from Umbrella Careers", ""), "Umbrella");
        assert_eq!(extract("Interview invitation - Beta Inc", ""), "Interview invitation");
    }

    #[test]
    fn test_team_fallback() {
        // digits keep the generic patterns from matching "R2D2"
        assert_eq!(
            extract("Thank you for your application R2D2 Team", ""),
            "R2D2"
        );
    }

    #[test]
    fn test_body_fallback() {
        assert_eq!(
            extract("Application update 42", "Hello,\n\nBest regards from Initech team\n"),
            "Initech"
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(extract("Application update 42", "nothing useful"), UNKNOWN_COMPANY);
    }
}
