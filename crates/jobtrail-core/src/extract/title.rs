//! Position title extraction.

use tracing::debug;

use super::ExtractionContext;
use super::cascade::{Bounds, Cascade, Cleanup};
use super::filter::LocationFilter;
use crate::config::ExtractionRules;
use crate::error::Result;
use crate::record::UNKNOWN_POSITION;

const TITLE_BOUNDS: Bounds = Bounds::exclusive(1, 100);

/// Lines carrying this are application metadata, never a title.
const APPLIED_ON: &str = "applied on";

/// Tiered title extractor.
#[derive(Debug, Clone)]
pub struct TitleExtractor {
    patterns: Cascade,
    // (lower-cased needle, configured term)
    vocabulary: Vec<(String, String)>,
    marker: String,
    lookahead: usize,
    filter: LocationFilter,
}

impl TitleExtractor {
    pub(crate) fn new(rules: &ExtractionRules) -> Result<Self> {
        let patterns = Cascade::compile(
            rules.title_patterns.iter().map(|p| {
                let cleanup = if p.last_clause {
                    Cleanup::LastClause
                } else {
                    Cleanup::Trim
                };
                (p.pattern.as_str(), cleanup)
            }),
            TITLE_BOUNDS,
        )?;

        let vocabulary = rules
            .common_titles
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| (t.to_lowercase(), t.clone()))
            .collect();

        Ok(Self {
            patterns,
            vocabulary,
            marker: rules.structural_marker.to_lowercase(),
            lookahead: rules.structural_lookahead,
            filter: LocationFilter::new(&rules.location_tokens, &rules.date_tokens),
        })
    }

    pub(crate) fn extract(&self, ctx: &ExtractionContext<'_>) -> String {
        let not_a_place = |candidate: &str| !self.filter.looks_like_location_or_date(candidate);

        if let Some((rule, title)) = self.patterns.first_match_where(ctx.subject, not_a_place) {
            debug!(tier = "subject", rule, %title, "Title matched");
            return title;
        }

        if let Some(title) = self.vocabulary_hit(ctx) {
            debug!(tier = "vocabulary", %title, "Title matched");
            return title;
        }

        if let Some(title) = self.structural(ctx) {
            debug!(tier = "structural", %title, "Title matched");
            return title;
        }

        if let Some((rule, title)) = self
            .patterns
            .first_match_in_lines_where(ctx.lines().iter().copied(), not_a_place)
        {
            debug!(tier = "body", rule, %title, "Title matched");
            return title;
        }

        UNKNOWN_POSITION.to_string()
    }

    fn vocabulary_hit(&self, ctx: &ExtractionContext<'_>) -> Option<String> {
        self.vocabulary
            .iter()
            .find(|(needle, _)| ctx.subject_lower().contains(needle.as_str()))
            .map(|(_, display)| display.clone())
    }

    /// Job-board layout: the title sits a few lines below the marker line.
    fn structural(&self, ctx: &ExtractionContext<'_>) -> Option<String> {
        if self.marker.is_empty() {
            return None;
        }

        let lines = ctx.lines();
        let marker_at = lines
            .iter()
            .position(|line| line.to_lowercase().contains(&self.marker))?;

        lines[marker_at + 1..]
            .iter()
            .filter(|line| !line.is_empty())
            .take(self.lookahead)
            .find_map(|line| self.structural_candidate(line))
    }

    fn structural_candidate(&self, line: &str) -> Option<String> {
        if line.to_lowercase().contains(APPLIED_ON) {
            return None;
        }

        let mut candidate: String = line.chars().filter(|c| !matches!(c, '*' | '_')).collect();

        if let Some((head, _)) = candidate.split_once('·') {
            candidate = head.to_string();
        }
        if let Some((head, tail)) = candidate.split_once(" - ") {
            if !tail.to_lowercase().contains("developer") {
                candidate = head.to_string();
            }
        }

        let candidate = candidate.trim();
        (TITLE_BOUNDS.accepts(candidate) && !self.filter.looks_like_location_or_date(candidate))
            .then(|| candidate.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn extract(subject: &str, body: &str) -> String {
        let extractor = TitleExtractor::new(&ExtractionRules::default()).unwrap();
        extractor.extract(&ExtractionContext::new(subject, body))
    }

    #[test]
    fn test_subject_cascade() {
        assert_eq!(
            extract("Thank you for applying to Acme Corp for Software Engineer position", ""),
            "Software Engineer"
        );
        assert_eq!(
            extract("Update on your application for the Data Analyst role", ""),
            "Data Analyst"
        );
        assert_eq!(extract("Position: Platform Engineer at Globex", ""), "Platform Engineer");
    }

    #[test]
    fn test_vocabulary_in_priority_order() {
        assert_eq!(
            extract("Your Senior Software Engineer application", ""),
            "software engineer"
        );
        assert_eq!(extract("Application received: junior dev", ""), "junior");
    }

    #[test]
    fn test_structural_layout() {
        let body = "Your application was sent to Acme Corp\n\n\
                    **Staff Platform Engineer**\n\
                    Acme Corp · Toronto, ON\n\
                    Applied on January 6, 2025\n";
        assert_eq!(extract("Application update", body), "Staff Platform Engineer");
    }

    #[test]
    fn test_structural_skips_locations_and_dates() {
        let body = "Your application was sent to Acme Corp\n\
                    Toronto, ON\n\
                    Applied on January 6\n\
                    Cloud Platform Engineer · Acme Corp\n";
        assert_eq!(extract("Application update", body), "Cloud Platform Engineer");
    }

    #[test]
    fn test_structural_lookahead_limit() {
        let body = "Your application was sent to Acme Corp\n\
                    Toronto, ON\n\
                    Remote\n\
                    Seattle, WA\n\
                    Cloud Platform Engineer\n";
        assert_eq!(extract("Application update", body), UNKNOWN_POSITION);
    }

    #[test]
    fn test_structural_single_line_layout() {
        let body = "Your application was sent to Acme Corp\n\
                    Toronto, ON\n\
                    Cloud Platform Engineer\n";
        let rules = ExtractionRules {
            structural_lookahead: 1,
            ..ExtractionRules::default()
        };
        let next_line_only = TitleExtractor::new(&rules).unwrap();
        let ctx = ExtractionContext::new("Application update", body);
        assert_eq!(next_line_only.extract(&ctx), UNKNOWN_POSITION);
        assert_eq!(extract("Application update", body), "Cloud Platform Engineer");
    }

    #[test]
    fn test_structural_dash_handling() {
        let title = TitleExtractor::new(&ExtractionRules::default()).unwrap();
        assert_eq!(
            title.structural_candidate("Cloud Engineer - Acme Corp").as_deref(),
            Some("Cloud Engineer")
        );
        assert_eq!(
            title.structural_candidate("Rust - Backend Developer").as_deref(),
            Some("Rust - Backend Developer")
        );
        assert_eq!(title.structural_candidate("_Applied on_ Jan 5"), None);
        assert_eq!(title.structural_candidate("Toronto, ON"), None);
        assert_eq!(title.structural_candidate("**Summer Intern 2024**"), None);
        assert_eq!(title.structural_candidate("A"), None);
    }

    #[test]
    fn test_body_line_cascade() {
        assert_eq!(
            extract("Application update", "Hi,\nWe received your application for the QA Tester role.\n"),
            "QA Tester"
        );
    }

    #[test]
    fn test_pattern_tiers_skip_locations_and_dates() {
        assert_eq!(
            extract("Application update - Position: Toronto, ON", ""),
            UNKNOWN_POSITION
        );
        // the dated capture is refused, so the vocabulary tier answers
        assert_eq!(
            extract("Application update - Role: Summer Intern 2024", ""),
            "intern"
        );
        assert_eq!(
            extract("Application update", "Hello\nPosition: Toronto, ON\n"),
            UNKNOWN_POSITION
        );
        assert_eq!(
            extract("Application update", "Position: Remote\nRole: Site Reliability Engineer\n"),
            "Site Reliability Engineer"
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(extract("Application update", "nothing here"), UNKNOWN_POSITION);
        assert_eq!(extract("", ""), UNKNOWN_POSITION);
    }
}
