//! Ordered pattern cascades: first accepted capture wins.

use std::sync::Arc;

use regex::Regex;

use crate::error::{Error, Result};

/// Exclusive length window (in characters) a candidate must fall inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    min: usize,
    max: usize,
}

impl Bounds {
    /// Accepts lengths strictly between `min` and `max`.
    #[must_use]
    pub const fn exclusive(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Returns true if the candidate length is inside the window.
    #[must_use]
    pub fn accepts(&self, candidate: &str) -> bool {
        let len = candidate.chars().count();
        len > self.min && len < self.max
    }
}

/// Post-processing applied to a raw capture before the length check.
#[derive(Debug, Clone)]
pub enum Cleanup {
    /// Trim surrounding whitespace.
    Trim,
    /// Trim, then drop one trailing platform tag (case-insensitive).
    StripSuffixes(Arc<[String]>),
    /// Trim, then keep only the words after the last standalone "for".
    LastClause,
}

impl Cleanup {
    fn apply(&self, capture: &str) -> String {
        let capture = capture.trim();
        match self {
            Self::Trim => capture.to_string(),
            Self::StripSuffixes(suffixes) => suffixes
                .iter()
                .find_map(|suffix| strip_suffix_ignore_case(capture, suffix))
                .unwrap_or(capture)
                .trim()
                .to_string(),
            Self::LastClause => last_clause(capture),
        }
    }
}

#[derive(Debug, Clone)]
struct Rule {
    regex: Regex,
    cleanup: Cleanup,
}

/// A compiled, ordered list of patterns sharing one length window.
#[derive(Debug, Clone)]
pub struct Cascade {
    rules: Vec<Rule>,
    bounds: Bounds,
}

impl Cascade {
    /// Compiles patterns in order. Each must expose capture group 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if a pattern does not compile or has
    /// no capture group.
    pub fn compile<'a, I>(patterns: I, bounds: Bounds) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Cleanup)>,
    {
        let rules = patterns
            .into_iter()
            .map(|(source, cleanup)| {
                let regex =
                    Regex::new(source).map_err(|e| Error::invalid_pattern(source, e.to_string()))?;
                if regex.captures_len() < 2 {
                    return Err(Error::invalid_pattern(source, "no capture group"));
                }
                Ok(Rule { regex, cleanup })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules, bounds })
    }

    /// Number of rules in the cascade.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the cascade has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Tries each rule against `text`; returns the index of the winning rule
    /// and its cleaned capture.
    #[must_use]
    pub fn first_match(&self, text: &str) -> Option<(usize, String)> {
        self.first_match_where(text, |_| true)
    }

    /// Like [`Cascade::first_match`], but a capture must also pass `accept`.
    /// A rejected capture moves on to the next rule.
    #[must_use]
    pub fn first_match_where<F>(&self, text: &str, accept: F) -> Option<(usize, String)>
    where
        F: Fn(&str) -> bool,
    {
        self.rules.iter().enumerate().find_map(|(index, rule)| {
            let capture = rule.regex.captures(text)?.get(1)?;
            let candidate = rule.cleanup.apply(capture.as_str());
            (self.bounds.accepts(&candidate) && accept(&candidate)).then_some((index, candidate))
        })
    }

    /// Runs [`Cascade::first_match`] over each line in order.
    #[must_use]
    pub fn first_match_in_lines<'a, I>(&self, lines: I) -> Option<(usize, String)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.first_match_in_lines_where(lines, |_| true)
    }

    /// Runs [`Cascade::first_match_where`] over each line in order.
    #[must_use]
    pub fn first_match_in_lines_where<'a, I, F>(&self, lines: I, accept: F) -> Option<(usize, String)>
    where
        I: IntoIterator<Item = &'a str>,
        F: Fn(&str) -> bool,
    {
        lines
            .into_iter()
            .filter(|line| !line.is_empty())
            .find_map(|line| self.first_match_where(line, &accept))
    }
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = text.len().checked_sub(suffix.len())?;
    if !text.is_char_boundary(cut) {
        return None;
    }
    let (head, tail) = text.split_at(cut);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

/// "applying to Acme Corp for Software Engineer" → "Software Engineer".
fn last_clause(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    match words.iter().rposition(|w| w.eq_ignore_ascii_case("for")) {
        Some(i) if i + 1 < words.len() => words[i + 1..].join(" "),
        _ => text.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cascade(patterns: &[&str], bounds: Bounds) -> Cascade {
        Cascade::compile(patterns.iter().map(|p| (*p, Cleanup::Trim)), bounds).unwrap()
    }

    #[test]
    fn test_bounds_are_exclusive() {
        let bounds = Bounds::exclusive(1, 5);
        assert!(!bounds.accepts("a"));
        assert!(bounds.accepts("ab"));
        assert!(bounds.accepts("abcd"));
        assert!(!bounds.accepts("abcde"));
    }

    #[test]
    fn test_first_accepted_rule_wins() {
        let c = cascade(&[r"never (\d+)", r"x=(\w)", r"x=(\w+)"], Bounds::exclusive(1, 10));
        // rule 1 matches but "a" is too short, so rule 2 wins
        assert_eq!(c.first_match("x=abc"), Some((2, "abc".to_string())));
        assert_eq!(c.first_match("nothing"), None);
    }

    #[test]
    fn test_first_match_in_lines_is_line_major() {
        let c = cascade(&[r"a=(\w+)", r"b=(\w+)"], Bounds::exclusive(1, 10));
        let lines = ["", "b=first", "a=second"];
        assert_eq!(
            c.first_match_in_lines(lines),
            Some((1, "first".to_string()))
        );
    }

    #[test]
    fn test_rejected_capture_falls_through() {
        let c = cascade(&[r"city=(\w+)", r"job=(\w+)"], Bounds::exclusive(1, 20));
        let not_a_city = |candidate: &str| candidate != "Toronto";
        assert_eq!(
            c.first_match_where("city=Toronto job=Welder", not_a_city),
            Some((1, "Welder".to_string()))
        );
        assert_eq!(c.first_match_where("city=Toronto", not_a_city), None);
        assert_eq!(
            c.first_match_in_lines_where(["city=Toronto", "city=Ottawa"], not_a_city),
            Some((0, "Ottawa".to_string()))
        );
    }

    #[test]
    fn test_compile_rejects_bad_patterns() {
        let err = Cascade::compile([("(unclosed", Cleanup::Trim)], Bounds::exclusive(1, 2));
        assert!(matches!(err, Err(Error::InvalidPattern { .. })));

        let err = Cascade::compile([("no group", Cleanup::Trim)], Bounds::exclusive(1, 2));
        assert!(matches!(err, Err(Error::InvalidPattern { .. })));
    }

    #[test]
    fn test_strip_suffixes() {
        let cleanup = Cleanup::StripSuffixes(Arc::from(vec![" - LinkedIn".to_string()]));
        assert_eq!(cleanup.apply(" Acme Corp - linkedin "), "Acme Corp");
        assert_eq!(cleanup.apply("Acme Corp"), "Acme Corp");
        assert_eq!(cleanup.apply("Café"), "Café");
    }

    #[test]
    fn test_last_clause() {
        assert_eq!(
            last_clause("Thank you for applying to Acme Corp for Software Engineer"),
            "Software Engineer"
        );
        assert_eq!(last_clause("Data Analyst"), "Data Analyst");
        assert_eq!(last_clause("Looking for"), "Looking for");
        assert_eq!(last_clause("Platform"), "Platform");
    }
}
