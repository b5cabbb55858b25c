//! Directory listing generation
//!
//! Renders an HTML index for directories that have no index file: one entry
//! per name, directories marked with a trailing slash. Names are
//! HTML-escaped for display and percent-encoded in hrefs.

use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;

/// Render the listing for `dir`, titled with the request path.
pub async fn render_listing(dir: &Path, url_path: &str) -> std::io::Result<String> {
    let mut entries = Vec::new();
    let mut reader = fs::read_dir(dir).await?;
    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
        entries.push((name, is_dir));
    }
    entries.sort();

    let title = format!("Directory listing for {}", escape_html(url_path));
    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");
    html.push_str("<hr>\n<ul>\n");
    for (name, is_dir) in entries {
        let display = if is_dir { format!("{name}/") } else { name };
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            encode_href(&display),
            escape_html(&display)
        );
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode an href, leaving URL-safe characters and `/` intact
fn encode_href(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for b in input.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(char::from(b));
            }
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(
            escape_html("<b>&\"quoted\"</b>"),
            "&lt;b&gt;&amp;&quot;quoted&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain-name.txt"), "plain-name.txt");
    }

    #[test]
    fn encodes_href_reserved_bytes() {
        assert_eq!(encode_href("with space.txt"), "with%20space.txt");
        assert_eq!(encode_href("query?.txt"), "query%3F.txt");
        assert_eq!(encode_href("sub/"), "sub/");
    }

    #[tokio::test]
    async fn renders_sorted_entries_with_dir_suffix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), b"").unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();

        let html = render_listing(dir.path(), "/").await.unwrap();
        assert!(html.contains("Directory listing for /"));
        let a = html.find("<a href=\"a/\">a/</a>").unwrap();
        let b = html.find("<a href=\"b.txt\">b.txt</a>").unwrap();
        assert!(a < b);
    }

    #[tokio::test]
    async fn listing_escapes_entry_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a&b.txt"), b"").unwrap();

        let html = render_listing(dir.path(), "/").await.unwrap();
        assert!(html.contains("a&amp;b.txt"));
        assert!(html.contains("href=\"a%26b.txt\""));
    }
}
