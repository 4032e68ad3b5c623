//! Raw and decoded message types.

use chrono::{DateTime, FixedOffset, NaiveDate};
use jobtrail_mime::{ContentType, Message, parse_date};
use tracing::debug;

/// A message as handed over by the mail-retrieval side, before any decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMessage {
    /// Subject line with encoded words already decoded.
    pub subject: String,
    /// Body bytes exactly as received (possibly multipart, possibly transfer-encoded).
    pub body: Vec<u8>,
    /// The top-level `Content-Type` header value, if any.
    pub content_type: Option<String>,
    /// Multipart boundary, if the content type declares one.
    pub boundary: Option<String>,
    /// The top-level `Content-Transfer-Encoding` header value, if any.
    pub transfer_encoding: Option<String>,
    /// Delivery timestamp from the `Date` header.
    pub date: Option<DateTime<FixedOffset>>,
}

impl RawMessage {
    /// Creates a single-part message with no content type.
    #[must_use]
    pub fn new(subject: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// Sets the content type, lifting the boundary parameter out of it.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        self.boundary = ContentType::parse(&content_type)
            .ok()
            .and_then(|ct| ct.boundary().map(ToString::to_string));
        self.content_type = Some(content_type);
        self
    }

    /// Sets the transfer encoding.
    #[must_use]
    pub fn with_transfer_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.transfer_encoding = Some(encoding.into());
        self
    }

    /// Sets the delivery timestamp.
    #[must_use]
    pub const fn with_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.date = Some(date);
        self
    }

    /// Builds a raw message from a complete RFC 822 message.
    ///
    /// Never fails: unreadable headers simply leave the fields empty.
    #[must_use]
    pub fn from_rfc822(raw: &[u8]) -> Self {
        let message = Message::parse(raw);

        let date = message.date().and_then(|value| match parse_date(value) {
            Ok(date) => Some(date),
            Err(e) => {
                debug!("Ignoring unparseable Date header: {e}");
                None
            }
        });

        let mut raw_message = Self {
            subject: message.subject().unwrap_or_default(),
            transfer_encoding: message
                .headers
                .get("content-transfer-encoding")
                .map(ToString::to_string),
            date,
            ..Self::default()
        };

        if let Some(content_type) = message.headers.get("content-type") {
            raw_message = raw_message.with_content_type(content_type);
        }
        raw_message.body = message.body;
        raw_message
    }

    /// The delivery date at day precision, in the sender's offset.
    #[must_use]
    pub fn delivery_date(&self) -> Option<NaiveDate> {
        self.date.map(|date| date.date_naive())
    }
}

/// Subject and plain-text body of one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedText {
    /// Subject line.
    pub subject: String,
    /// Best plain-text rendition of the body.
    pub plain_body: String,
}

impl DecodedText {
    /// Creates decoded text from its parts.
    #[must_use]
    pub fn new(subject: impl Into<String>, plain_body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            plain_body: plain_body.into(),
        }
    }
}
