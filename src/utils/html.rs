//! HTML helpers for page generation.

use std::borrow::Cow;

/// Characters that require escaping inside a quoted attribute value.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape an HTML attribute value.
///
/// Borrows when nothing needs escaping, so plain metadata values pass
/// through verbatim.
///
/// # Example
/// ```ignore
/// assert_eq!(escape_attr("Tom & Jerry"), "Tom &amp; Jerry");
/// assert_eq!(escape_attr("THE∪"), "THE∪"); // No allocation
/// ```
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("a \"quoted\" <b>"), "a &quot;quoted&quot; &lt;b&gt;");
        assert_eq!(escape_attr("it's"), "it&#39;s");
        assert_eq!(escape_attr("Tom & Jerry"), "Tom &amp; Jerry");
    }

    #[test]
    fn test_escape_attr_borrows_plain_values() {
        let value = "https://theu.example/og.png";
        assert!(matches!(escape_attr(value), Cow::Borrowed(_)));
        assert!(matches!(escape_attr("THE∪ ∞"), Cow::Borrowed(_)));
    }
}
