//! Cursor-based pagination via the backend's `Link` response header.
//!
//! The catalog endpoint pages with opaque cursors: each response's `Link`
//! header carries URLs for adjacent pages, and the cursor rides in a
//! `cursor` query parameter.
//!
//! ## Header format
//!
//! Single next link:
//! ```text
//! <https://backend.example.com/api/products.json?limit=250&cursor=CURSOR>; rel="next"
//! ```
//!
//! Combined previous and next:
//! ```text
//! <https://backend.example.com/api/products.json?limit=250&cursor=PREV>; rel="previous",
//! <https://backend.example.com/api/products.json?limit=250&cursor=NEXT>; rel="next"
//! ```

/// Parses a `Link` header value and extracts the cursor for the next page.
///
/// Returns `None` if:
/// - `link_header` is `None` (no header was present),
/// - there is no `rel="next"` segment (last page reached),
/// - the URL in the next segment has no `cursor` query parameter.
#[must_use]
pub fn extract_next_cursor(link_header: Option<&str>) -> Option<String> {
    let header = link_header?;

    // Each comma-separated segment looks like `<URL>; rel="next"`, possibly
    // with leading whitespace.
    for segment in header.split(',') {
        let segment = segment.trim();

        if !segment.contains(r#"rel="next""#) {
            continue;
        }

        let url = extract_angle_bracket_url(segment)?;
        return extract_query_param(url, "cursor");
    }

    None
}

/// Extracts the URL between `<` and `>` in a link directive segment.
fn extract_angle_bracket_url(segment: &str) -> Option<&str> {
    let start = segment.find('<')? + 1;
    let end = segment.find('>')?;
    if start >= end {
        return None;
    }
    Some(&segment[start..end])
}

/// Extracts the value of a named query parameter from a URL string.
///
/// Does not decode percent-encoding: the backend's cursors are base64url
/// tokens with no characters that need it.
fn extract_query_param(url: &str, param: &str) -> Option<String> {
    let query_start = url.find('?')? + 1;
    let query = &url[query_start..];

    let needle = format!("{param}=");
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix(needle.as_str()) {
            // Trim any fragment anchor that might trail the value.
            let value = value.split('#').next().unwrap_or(value);
            if !value.is_empty() {
                return Some(value.to_owned());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_none_when_header_is_none() {
        assert!(extract_next_cursor(None).is_none());
    }

    #[test]
    fn returns_none_when_header_is_empty() {
        assert!(extract_next_cursor(Some("")).is_none());
    }

    #[test]
    fn extracts_cursor_from_single_next_link() {
        let header =
            r#"<https://shop.example.com/api/products.json?limit=250&cursor=eyJsYXN0X2lkIjo5fQ>; rel="next""#;
        let cursor = extract_next_cursor(Some(header));
        assert_eq!(cursor.as_deref(), Some("eyJsYXN0X2lkIjo5fQ"));
    }

    #[test]
    fn extracts_cursor_from_combined_prev_next_link() {
        let header = concat!(
            r#"<https://shop.example.com/api/products.json?limit=250&cursor=PREV_CURSOR>; rel="previous", "#,
            r#"<https://shop.example.com/api/products.json?limit=250&cursor=NEXT_CURSOR>; rel="next""#
        );
        let cursor = extract_next_cursor(Some(header));
        assert_eq!(cursor.as_deref(), Some("NEXT_CURSOR"));
    }

    #[test]
    fn returns_none_when_only_previous_link_present() {
        let header =
            r#"<https://shop.example.com/api/products.json?limit=250&cursor=PREV_CURSOR>; rel="previous""#;
        assert!(extract_next_cursor(Some(header)).is_none());
    }

    #[test]
    fn returns_none_when_no_cursor_in_next_url() {
        let header = r#"<https://shop.example.com/api/products.json?limit=250>; rel="next""#;
        assert!(extract_next_cursor(Some(header)).is_none());
    }

    #[test]
    fn handles_extra_whitespace_between_segments() {
        // Some HTTP implementations add extra spaces after the comma.
        let header = concat!(
            r#"<https://shop.example.com/api/products.json?limit=250&cursor=ABC>; rel="previous",   "#,
            r#"<https://shop.example.com/api/products.json?limit=250&cursor=XYZ>; rel="next""#
        );
        let cursor = extract_next_cursor(Some(header));
        assert_eq!(cursor.as_deref(), Some("XYZ"));
    }

    #[test]
    fn extracts_cursor_when_not_the_first_query_param() {
        let header =
            r#"<https://shop.example.com/api/products.json?limit=250&other=val&cursor=CUR123>; rel="next""#;
        let cursor = extract_next_cursor(Some(header));
        assert_eq!(cursor.as_deref(), Some("CUR123"));
    }

    #[test]
    fn extract_angle_bracket_url_happy_path() {
        let segment = r#"<https://example.com/foo?bar=baz>; rel="next""#;
        assert_eq!(
            extract_angle_bracket_url(segment),
            Some("https://example.com/foo?bar=baz")
        );
    }

    #[test]
    fn extract_angle_bracket_url_no_brackets_returns_none() {
        assert!(extract_angle_bracket_url("no brackets here").is_none());
    }

    #[test]
    fn extract_query_param_first_param() {
        assert_eq!(
            extract_query_param("https://x.com/api/products.json?cursor=ABC&limit=250", "cursor"),
            Some("ABC".to_owned())
        );
    }

    #[test]
    fn extract_query_param_missing_returns_none() {
        assert!(
            extract_query_param("https://x.com/api/products.json?limit=250", "cursor").is_none()
        );
    }
}
