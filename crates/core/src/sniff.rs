//! Content type detection from leading bytes
//!
//! Follows the signature table of the WHATWG MIME sniffing algorithm as
//! implemented by common HTTP servers. Only the first [`SNIFF_LEN`] bytes
//! are examined.

use std::path::Path;

/// Maximum number of bytes examined
pub const SNIFF_LEN: usize = 512;

/// Fallback for unrecognized binary content
pub const OCTET_STREAM: &str = "application/octet-stream";

const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// HTML tags recognized after leading whitespace, matched case-insensitively
/// and required to be followed by a space or '>'.
const HTML_TAGS: &[&[u8]] = &[
    b"<!DOCTYPE HTML",
    b"<HTML",
    b"<HEAD",
    b"<SCRIPT",
    b"<IFRAME",
    b"<H1",
    b"<DIV",
    b"<FONT",
    b"<TABLE",
    b"<A",
    b"<STYLE",
    b"<TITLE",
    b"<B",
    b"<BODY",
    b"<BR",
    b"<P",
    b"<!--",
];

/// Exact prefix signatures, checked in order
const PREFIXES: &[(&[u8], &str)] = &[
    (b"%PDF-", "application/pdf"),
    (b"%!PS-Adobe-", "application/postscript"),
    (b"\xFE\xFF", "text/plain; charset=utf-16be"),
    (b"\xFF\xFE", "text/plain; charset=utf-16le"),
    (b"\xEF\xBB\xBF", TEXT_PLAIN_UTF8),
    (b"\x00\x00\x01\x00", "image/x-icon"),
    (b"\x00\x00\x02\x00", "image/x-icon"),
    (b"BM", "image/bmp"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"\x89PNG\x0D\x0A\x1A\x0A", "image/png"),
    (b"\xFF\xD8\xFF", "image/jpeg"),
    (b"OggS\x00", "application/ogg"),
    (b"ID3", "audio/mpeg"),
    (b"\x1F\x8B\x08", "application/x-gzip"),
    (b"PK\x03\x04", "application/zip"),
    (b"Rar!\x1A\x07\x00", "application/x-rar-compressed"),
    (b"Rar!\x1A\x07\x01\x00", "application/x-rar-compressed"),
    (b"\x00asm", "application/wasm"),
];

/// Detect the content type of `data` from its leading bytes
///
/// Always returns a valid MIME type; empty input is plain text.
pub fn detect_content_type(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(SNIFF_LEN)];

    let trimmed = skip_whitespace(data);
    if HTML_TAGS.iter().any(|tag| matches_html_tag(trimmed, tag)) {
        return "text/html; charset=utf-8";
    }
    if starts_with_ignore_case(trimmed, b"<?xml") {
        return "text/xml; charset=utf-8";
    }

    if let Some((_, mime)) = PREFIXES.iter().find(|(sig, _)| data.starts_with(sig)) {
        return *mime;
    }

    if data.len() >= 14 && &data[..4] == b"RIFF" && &data[8..14] == b"WEBPVP" {
        return "image/webp";
    }

    if data.iter().any(|&b| is_binary_byte(b)) {
        OCTET_STREAM
    } else {
        TEXT_PLAIN_UTF8
    }
}

/// Sniff `data`, falling back to the file extension of `path` for opaque binaries
pub fn content_type_for(data: &[u8], path: &Path) -> String {
    let sniffed = detect_content_type(data);
    if sniffed != OCTET_STREAM {
        return sniffed.to_string();
    }
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}

fn skip_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|&b| !matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' '))
        .unwrap_or(data.len());
    &data[start..]
}

fn starts_with_ignore_case(data: &[u8], prefix: &[u8]) -> bool {
    data.len() >= prefix.len() && data[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn matches_html_tag(data: &[u8], tag: &[u8]) -> bool {
    if !starts_with_ignore_case(data, tag) {
        return false;
    }
    matches!(data.get(tag.len()), Some(b' ') | Some(b'>'))
}

fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}
