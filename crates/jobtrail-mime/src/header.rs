//! MIME header handling.

use crate::encoding::decode_rfc2047;
use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset};

/// Header fields in arrival order. Lookups ignore ASCII case.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    fields: Vec<(String, String)>,
}

impl Headers {
    /// An empty header block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. Repeated names are kept.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Value of the first field called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values(name).next()
    }

    /// Values of every field called `name`, in arrival order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.values(name).collect()
    }

    fn values<'a, 'b>(&'a self, name: &'b str) -> impl Iterator<Item = &'a str> + use<'a, 'b> {
        self.fields
            .iter()
            .filter(move |(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Like [`get`](Self::get), with RFC 2047 encoded words decoded.
    ///
    /// A value with malformed encoded words is returned as-is.
    #[must_use]
    pub fn get_decoded(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(|raw| decode_rfc2047(raw).unwrap_or_else(|_| raw.to_string()))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the block has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reads a header block up to the first empty line.
    ///
    /// Folded lines (leading space or tab) are joined onto the field above
    /// with a single space. Logical lines without a colon are dropped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut logical: Vec<String> = Vec::new();

        for line in text.lines().take_while(|line| !line.is_empty()) {
            let folded = line.starts_with([' ', '\t']);
            match logical.last_mut() {
                _ if folded && line.trim().is_empty() => {}
                Some(previous) if folded => {
                    previous.push(' ');
                    previous.push_str(line.trim());
                }
                _ if folded => {}
                _ => logical.push(line.to_string()),
            }
        }

        let fields = logical
            .iter()
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .filter(|(name, _)| !name.is_empty())
            .collect();

        Self { fields }
    }
}

/// Parses an RFC 2822 `Date` header value.
///
/// Trailing comments such as `(UTC)` or `(PST)` are ignored.
///
/// # Errors
///
/// Returns an error if the value is not a valid RFC 2822 date.
pub fn parse_date(value: &str) -> Result<DateTime<FixedOffset>> {
    let mut trimmed = value.trim();
    if trimmed.ends_with(')') {
        if let Some(open) = trimmed.rfind('(') {
            trimmed = trimmed[..open].trim_end();
        }
    }

    DateTime::parse_from_rfc2822(trimmed).map_err(|e| Error::InvalidDate(format!("{value:?}: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_lookup_ignores_case() {
        let mut headers = Headers::new();
        headers.add("X-Mailer", "jobboard");
        assert_eq!(headers.get("x-mailer"), Some("jobboard"));
        assert_eq!(headers.get("X-MAILER"), Some("jobboard"));
    }

    #[test]
    fn test_values_borrow_from_headers_not_name() {
        let headers = Headers::parse("Subject: Offer letter\r\nReceived: a\r\nReceived: b\r\n");
        let (subject, received) = {
            let subject_name = String::from("subject");
            let received_name = String::from("RECEIVED");
            (headers.get(&subject_name), headers.get_all(&received_name))
        };
        assert_eq!(subject, Some("Offer letter"));
        assert_eq!(received, vec!["a", "b"]);
    }

    #[test]
    fn test_repeated_fields_keep_order() {
        let mut headers = Headers::new();
        headers.add("Received", "from a");
        headers.add("Received", "from b");
        assert_eq!(headers.get_all("received"), vec!["from a", "from b"]);
        assert!(headers.get_all("missing").is_empty());
    }

    #[test]
    fn test_headers_parse_with_folding() {
        let text = concat!(
            "From: jobs-noreply@linkedin.com\r\n",
            "Subject: Your application was sent to\r\n",
            " Acme Corp\r\n",
            " \r\n",
            "Content-Type: text/plain;\r\n",
            "\tcharset=utf-8\r\n",
            "\r\n",
            "Body: not a header\r\n"
        );

        let headers = Headers::parse(text);
        assert_eq!(headers.get("from"), Some("jobs-noreply@linkedin.com"));
        assert_eq!(
            headers.get("subject"),
            Some("Your application was sent to Acme Corp")
        );
        assert_eq!(headers.get("content-type"), Some("text/plain; charset=utf-8"));
        assert!(headers.get("body").is_none());
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_headers_get_decoded() {
        let mut headers = Headers::new();
        headers.add("Subject", "=?utf-8?Q?Application_received?=");
        assert_eq!(
            headers.get_decoded("subject").as_deref(),
            Some("Application received")
        );
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("Mon, 06 Jan 2025 15:04:05 -0700").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2025, 1, 6));
    }

    #[test]
    fn test_parse_date_with_comment() {
        let date = parse_date("Tue, 7 Jan 2025 09:00:00 +0000 (UTC)").unwrap();
        assert_eq!(date.day(), 7);
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("yesterday").is_err());
    }
}
