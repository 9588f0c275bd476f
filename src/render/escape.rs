/// Escape text content
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a double-quoted attribute value
pub fn escape_attr(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

const SCRIPT_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// Replace hrefs that would run script when followed
pub fn safe_href(href: &str) -> &str {
    let normalized: String = href
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    if href.is_empty() || SCRIPT_SCHEMES.iter().any(|s| normalized.starts_with(s)) {
        "#"
    } else {
        href
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape_html("<b>&\"</b>"), "&lt;b&gt;&amp;\"&lt;/b&gt;");
        assert_eq!(escape_attr("a\"b'c"), "a&quot;b&#x27;c");
    }

    #[test]
    fn test_safe_href() {
        assert_eq!(safe_href("https://example.com"), "https://example.com");
        assert_eq!(safe_href("/blog/first"), "/blog/first");
        assert_eq!(safe_href(""), "#");
        assert_eq!(safe_href("JavaScript:alert(1)"), "#");
        assert_eq!(safe_href(" java\tscript:alert(1)"), "#");
        assert_eq!(safe_href("data:text/html,x"), "#");
    }
}
