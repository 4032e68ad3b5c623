//! Errors raised while reading message structure.

/// Result alias used across this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Ways a message or one of its parts can fail to parse.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed `Content-Type` value.
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    /// Bad quoted-printable escape or RFC 2047 encoded word.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Base64 payload that does not decode.
    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// Multipart body declared without a usable boundary.
    #[error("Multipart body has no boundary")]
    MissingBoundary,

    /// Multipart body whose delimiters cannot be found.
    #[error("Malformed multipart body: {0}")]
    InvalidMultipart(String),

    /// `Date` header that is not RFC 2822.
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
