//! Rejects title candidates that are really locations or dates.

/// Location and date heuristics applied to every title candidate.
#[derive(Debug, Clone, Default)]
pub struct LocationFilter {
    location_tokens: Vec<String>,
    date_tokens: Vec<String>,
}

impl LocationFilter {
    /// Creates a filter; tokens are matched case-insensitively.
    #[must_use]
    pub fn new(location_tokens: &[String], date_tokens: &[String]) -> Self {
        Self {
            location_tokens: lowered(location_tokens),
            date_tokens: lowered(date_tokens),
        }
    }

    /// Returns true if the candidate reads like a location or a date.
    ///
    /// Matches "City, Region" shapes, any known location token, or any date token.
    #[must_use]
    pub fn looks_like_location_or_date(&self, candidate: &str) -> bool {
        let lower = candidate.to_lowercase();

        if lower.split(',').count() == 2 {
            return true;
        }

        self.location_tokens
            .iter()
            .chain(&self.date_tokens)
            .any(|token| lower.contains(token.as_str()))
    }
}

fn lowered(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| t.to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractionRules;

    fn filter() -> LocationFilter {
        let rules = ExtractionRules::default();
        LocationFilter::new(&rules.location_tokens, &rules.date_tokens)
    }

    #[test]
    fn test_locations() {
        let f = filter();
        assert!(f.looks_like_location_or_date("Toronto, ON"));
        assert!(f.looks_like_location_or_date("Springfield, IL"));
        assert!(f.looks_like_location_or_date("Remote"));
        assert!(f.looks_like_location_or_date("Greater Vancouver Area"));
    }

    #[test]
    fn test_dates() {
        let f = filter();
        assert!(f.looks_like_location_or_date("Applied on January 5"));
        assert!(f.looks_like_location_or_date("Jan 5 2025"));
    }

    #[test]
    fn test_titles_pass() {
        let f = filter();
        assert!(!f.looks_like_location_or_date("Software Engineer"));
        assert!(!f.looks_like_location_or_date("Data Analyst"));
        // three segments is not the "City, Region" shape
        assert!(!f.looks_like_location_or_date("Engineer, Platform, Infra"));
    }
}
