//! `file://` URI helpers for `text/uri-list` clipboard payloads

use std::path::{Path, PathBuf};

const SCHEME: &str = "file://";

/// Bytes left unescaped in a path component
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~' | b'/')
}

/// Encode an absolute path as a `file://` URI
pub fn to_file_uri(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut uri = String::with_capacity(SCHEME.len() + raw.len());
    uri.push_str(SCHEME);
    for b in raw.bytes() {
        if is_unreserved(b) {
            uri.push(b as char);
        } else {
            uri.push_str(&format!("%{:02X}", b));
        }
    }
    uri
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_value(*bytes.get(i + 1)?)?;
            let lo = hex_value(*bytes.get(i + 2)?)?;
            out.push(hi << 4 | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Parse one `file://` URI into a path. Accepts an empty or `localhost` host.
pub fn parse_file_uri(uri: &str) -> Option<PathBuf> {
    let rest = uri.trim().strip_prefix(SCHEME)?;
    let path = match rest.find('/') {
        Some(0) => rest,
        Some(idx) if &rest[..idx] == "localhost" => &rest[idx..],
        _ => return None,
    };
    percent_decode(path).map(PathBuf::from)
}

/// Parse a `text/uri-list` payload and return its first file.
///
/// Every non-comment line must be a file URI; otherwise the payload is
/// treated as ordinary text and `None` is returned.
pub fn parse_uri_list(payload: &str) -> Option<PathBuf> {
    let mut first = None;
    for line in payload.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let path = parse_file_uri(line)?;
        first.get_or_insert(path);
    }
    first
}
