//! Body decoding: one plain-text string per message.

use jobtrail_mime::encoding::decode_charset;
use jobtrail_mime::{ContentType, Part, TransferEncoding, multipart};
use tracing::{debug, warn};

use super::raw::{DecodedText, RawMessage};
use super::sanitize::sanitize_html;

/// Multipart nesting deeper than this is ignored.
const MAX_DEPTH: usize = 8;

/// Decodes subject and body of a message.
#[must_use]
pub fn decode(message: &RawMessage) -> DecodedText {
    DecodedText::new(message.subject.clone(), decode_body(message))
}

/// Produces the best plain-text rendition of a message body.
///
/// Multipart bodies prefer the first non-empty `text/plain` part and fall
/// back to the first `text/html` part (sanitized). Single-part bodies are returned as-is
/// after transfer and charset decoding. Never fails: undecodable parts are
/// skipped and a message with nothing usable yields an empty string.
#[must_use]
pub fn decode_body(message: &RawMessage) -> String {
    let content_type = match message.content_type.as_deref().map(ContentType::parse) {
        Some(Ok(ct)) => ct,
        Some(Err(e)) => {
            warn!("Unreadable Content-Type, treating body as plain text: {e}");
            ContentType::text_plain()
        }
        None => ContentType::text_plain(),
    };

    if !content_type.is_multipart() {
        return decode_single(message, &content_type);
    }

    let Some(boundary) = message
        .boundary
        .as_deref()
        .or_else(|| content_type.boundary())
    else {
        warn!("Multipart message without boundary, no body extracted");
        return String::new();
    };

    let mut candidates = Candidates::default();
    match multipart::split(&message.body, boundary) {
        Ok(parts) => candidates.collect(&parts, 0),
        Err(e) => warn!("Skipping unreadable multipart body: {e}"),
    }
    candidates.into_body()
}

fn decode_single(message: &RawMessage, content_type: &ContentType) -> String {
    let encoding = message
        .transfer_encoding
        .as_deref()
        .map_or(TransferEncoding::SevenBit, TransferEncoding::parse);

    match encoding.decode(&message.body) {
        Ok(bytes) => decode_charset(&bytes, content_type.charset()),
        Err(e) => {
            warn!("Body is not valid {encoding}, using raw bytes: {e}");
            String::from_utf8_lossy(&message.body).into_owned()
        }
    }
}

/// Body candidates gathered while walking the part tree in document order.
#[derive(Debug, Default)]
struct Candidates {
    plain: Option<String>,
    html: Option<String>,
}

impl Candidates {
    fn collect(&mut self, parts: &[Part], depth: usize) {
        for part in parts {
            // Non-empty plain text wins outright
            if self.plain.as_deref().is_some_and(|plain| !plain.is_empty()) {
                return;
            }

            let content_type = match part.content_type() {
                Ok(ct) => ct,
                Err(e) => {
                    warn!("Skipping part with unreadable Content-Type: {e}");
                    continue;
                }
            };

            if content_type.is_multipart() {
                self.descend(part, &content_type, depth);
            } else if content_type.is_text_plain() {
                if let Some(text) = Self::text_of(part) {
                    self.plain = Some(text);
                }
            } else if content_type.is_text_html() && self.html.is_none() {
                self.html = Self::text_of(part);
            } else {
                debug!(%content_type, "Ignoring non-text part");
            }
        }
    }

    fn descend(&mut self, part: &Part, content_type: &ContentType, depth: usize) {
        if depth + 1 >= MAX_DEPTH {
            warn!("Multipart nesting too deep, skipping part");
            return;
        }
        let Some(boundary) = content_type.boundary() else {
            warn!("Nested multipart part without boundary, skipping");
            return;
        };
        match multipart::split(&part.body, boundary) {
            Ok(children) => self.collect(&children, depth + 1),
            Err(e) => warn!("Skipping unreadable nested multipart: {e}"),
        }
    }

    fn text_of(part: &Part) -> Option<String> {
        match part.body_text() {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Skipping undecodable text part: {e}");
                None
            }
        }
    }

    fn into_body(self) -> String {
        match (self.plain, self.html) {
            (Some(plain), _) if !plain.is_empty() => plain,
            (_, Some(html)) => sanitize_html(&html),
            _ => String::new(),
        }
    }
}
