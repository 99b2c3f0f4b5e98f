//! Charset normalization for suggest endpoint bodies.
//!
//! Suggest endpoints are third-party services and often declare (or use)
//! something other than UTF-8. Detection order:
//!
//! 1. Byte-order mark (UTF-8, UTF-16LE, UTF-16BE)
//! 2. `charset` parameter of the `Content-Type` header
//! 3. RFC 4627 null-byte pattern of the first four bytes
//! 4. UTF-8

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

/// Error type for body decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharsetError {
    #[error("unknown charset {0:?}")]
    UnknownCharset(String),

    #[error("unsupported encoding {0}")]
    Unsupported(&'static str),

    #[error("malformed {0} byte sequence")]
    Malformed(&'static str),
}

/// Encoding implied by a JSON text's leading null bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sniffed {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

/// Decode `bytes` to a `String`, honouring a BOM, then `content_type`, then
/// the null-byte heuristic.
///
/// Malformed input is an error rather than being replaced with U+FFFD.
pub fn decode_body(content_type: Option<&str>, bytes: &[u8]) -> Result<String, CharsetError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (detect(content_type, bytes)?, bytes),
    };

    tracing::debug!(encoding = encoding.name(), bytes = body.len(), "decoding response body");

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or(CharsetError::Malformed(encoding.name()))
}

/// Encoding for a BOM-less body.
fn detect(content_type: Option<&str>, bytes: &[u8]) -> Result<&'static Encoding, CharsetError> {
    if let Some(label) = content_type.and_then(charset_param) {
        return Encoding::for_label(label.as_bytes()).ok_or_else(|| CharsetError::UnknownCharset(label.to_string()));
    }

    match sniff(bytes) {
        Sniffed::Utf8 => Ok(UTF_8),
        Sniffed::Utf16Le => Ok(UTF_16LE),
        Sniffed::Utf16Be => Ok(UTF_16BE),
        Sniffed::Utf32Le => Err(CharsetError::Unsupported("UTF-32LE")),
        Sniffed::Utf32Be => Err(CharsetError::Unsupported("UTF-32BE")),
    }
}

/// The `charset` parameter of a `Content-Type` value, unquoted.
fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then_some(value)
    })
}

/// RFC 4627 section 3: the first two characters of a JSON text are ASCII,
/// so the position of null bytes in the first four octets gives the encoding.
fn sniff(bytes: &[u8]) -> Sniffed {
    match bytes {
        [0, 0, 0, b, ..] if *b != 0 => Sniffed::Utf32Be,
        [a, 0, 0, 0, ..] if *a != 0 => Sniffed::Utf32Le,
        [0, a, ..] if *a != 0 => Sniffed::Utf16Be,
        [a, 0, ..] if *a != 0 => Sniffed::Utf16Le,
        _ => Sniffed::Utf8,
    }
}
