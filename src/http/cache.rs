//! Conditional request support
//!
//! `ETag` generation from file metadata and `If-None-Match` matching, plus
//! HTTP date formatting for `Last-Modified`.

use std::fs::Metadata;
use std::time::{SystemTime, UNIX_EPOCH};

/// `ETag` derived from file size and mtime, so it changes whenever the file
/// is rewritten without hashing the content.
pub fn file_etag(meta: &Metadata) -> String {
    let mtime = meta
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |d| d.as_secs());
    format!("\"{:x}-{mtime:x}\"", meta.len())
}

/// Check the client's `If-None-Match` header against the computed `ETag`.
///
/// Handles comma-separated lists and the `*` wildcard. Returns true when the
/// request should get a 304.
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client| {
        client.split(',').any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// RFC 7231 HTTP-date, e.g. `Tue, 25 Aug 2026 20:15:00 GMT`.
pub fn http_date(time: SystemTime) -> String {
    chrono::DateTime::<chrono::Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn etag_is_quoted_and_stable() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let meta = file.as_file().metadata().unwrap();
        let etag = file_etag(&meta);
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert_eq!(etag, file_etag(&meta));
    }

    #[test]
    fn etag_changes_with_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let before = file_etag(&file.as_file().metadata().unwrap());
        file.write_all(b"more bytes").unwrap();
        file.flush().unwrap();
        let after = file_etag(&file.as_file().metadata().unwrap());
        assert_ne!(before, after);
    }

    #[test]
    fn if_none_match_variants() {
        let etag = "\"42-abc\"";
        assert!(etag_matches(Some("\"42-abc\""), etag));
        assert!(etag_matches(Some("\"other\", \"42-abc\""), etag));
        assert!(etag_matches(Some("*"), etag));
        assert!(!etag_matches(Some("\"stale\""), etag));
        assert!(!etag_matches(None, etag));
    }

    #[test]
    fn http_date_format() {
        let date = http_date(UNIX_EPOCH);
        assert_eq!(date, "Thu, 01 Jan 1970 00:00:00 GMT");
    }
}
