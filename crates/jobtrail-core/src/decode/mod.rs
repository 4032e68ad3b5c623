//! Message decoding: raw envelope and body bytes to plain text.
//!
//! - [`RawMessage`] is what the mail side hands over
//! - [`decode_body`] picks the best text rendition of a (multipart) body
//! - [`sanitize_html`] cleans the HTML fallback

mod body;
mod raw;
mod sanitize;

pub use body::{decode, decode_body};
pub use raw::{DecodedText, RawMessage};
pub use sanitize::sanitize_html;
