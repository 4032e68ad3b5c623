//! # jobtrail-mime
//!
//! MIME parsing primitives used to read job-application email.
//!
//! ## Features
//!
//! - **Message parsing**: Split an RFC 822 message into headers and body
//! - **Multipart**: Split multipart bodies on their boundary, including nested parts
//! - **Decoding**: Base64, Quoted-Printable, RFC 2047 encoded words, common charsets
//! - **Content types**: MIME content type and parameter parsing
//! - **Dates**: RFC 2822 `Date` header parsing
//!
//! ## Quick Start
//!
//! ```
//! use jobtrail_mime::Message;
//!
//! let raw = b"Subject: Your application was sent to Acme\r\n\
//!             Content-Type: text/plain\r\n\
//!             \r\n\
//!             Thanks for applying!";
//!
//! let message = Message::parse(raw);
//! assert_eq!(message.subject().as_deref(), Some("Your application was sent to Acme"));
//! assert_eq!(message.body_text().unwrap(), "Thanks for applying!");
//! ```
//!
//! ### Walking multipart bodies
//!
//! ```
//! use jobtrail_mime::{Message, multipart};
//!
//! let raw = b"Content-Type: multipart/alternative; boundary=b1\r\n\
//!             \r\n\
//!             --b1\r\n\
//!             Content-Type: text/plain\r\n\
//!             \r\n\
//!             plain\r\n\
//!             --b1--\r\n";
//!
//! let message = Message::parse(raw);
//! let content_type = message.content_type().unwrap();
//! let parts = multipart::split(&message.body, content_type.boundary().unwrap()).unwrap();
//! assert_eq!(parts.len(), 1);
//! assert!(parts[0].content_type().unwrap().is_text_plain());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod content_type;
mod error;
mod header;
mod message;

pub mod encoding;
pub mod multipart;

pub use content_type::ContentType;
pub use error::{Error, Result};
pub use header::{Headers, parse_date};
pub use message::{Message, Part, TransferEncoding};
