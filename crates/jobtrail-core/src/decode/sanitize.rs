//! HTML-to-text cleanup for the HTML fallback body.
//!
//! Line-oriented literal substitutions and a left-to-right tag scan; not a
//! general HTML parser.

/// Block tags rewritten before generic tag removal, so block boundaries
/// survive as line breaks.
const BLOCK_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("<br>", "\n"),
    ("<br/>", "\n"),
    ("<br />", "\n"),
    ("<p>", ""),
    ("</p>", "\n"),
    ("<div>", ""),
    ("</div>", "\n"),
];

/// Entities decoded after tag removal, an extension to plain tag stripping.
/// `&lt;` and `&gt;` stay encoded so decoding can never produce a new tag.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&amp;", "&"),
];

/// Converts HTML text into trimmed, non-empty plain-text lines.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let mut result: Vec<String> = Vec::new();

    for line in html.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut line = line.to_string();
        for (tag, replacement) in BLOCK_SUBSTITUTIONS {
            line = line.replace(tag, replacement);
        }

        for segment in line.split('\n') {
            let text = decode_entities(&strip_tags(segment));
            let text = text.trim();
            if !text.is_empty() {
                result.push(text.to_string());
            }
        }
    }

    result.join("\n")
}

/// Removes `<...>` spans left to right.
///
/// An unterminated `<` ends the scan and leaves the rest of the line alone.
fn strip_tags(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            break;
        };
        out.push_str(&rest[..start]);
        rest = &rest[start + len + 1..];
    }

    out.push_str(rest);
    out
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, ch)| acc.replace(entity, ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_tags_become_lines() {
        let html = "<div><p>Thank you for applying</p><p>Acme Corp</p></div>";
        assert_eq!(sanitize_html(html), "Thank you for applying\nAcme Corp");
    }

    #[test]
    fn test_br_variants() {
        assert_eq!(sanitize_html("a<br>b<br/>c<br />d"), "a\nb\nc\nd");
    }

    #[test]
    fn test_strips_attributes_and_inline_tags() {
        let html = r#"<td class="title"><a href="https://x.example/job">Data <b>Analyst</b></a></td>"#;
        assert_eq!(sanitize_html(html), "Data Analyst");
    }

    #[test]
    fn test_drops_blank_and_tag_only_lines() {
        let html = "\n   \n<html>\n<body>\n  Hello  \n</body>\n</html>\n";
        assert_eq!(sanitize_html(html), "Hello");
    }

    #[test]
    fn test_unterminated_tag_keeps_remainder() {
        assert_eq!(sanitize_html("<b>Score</b> 3 < 5 and more"), "Score 3 < 5 and more");
    }

    #[test]
    fn test_gt_before_lt_is_left_alone() {
        assert_eq!(sanitize_html("a > b"), "a > b");
    }

    #[test]
    fn test_entity_decoding_extension() {
        assert_eq!(
            sanitize_html("AT&amp;T&nbsp;careers &lt;b&gt;"),
            "AT&T careers &lt;b&gt;"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_html(""), "");
    }
}
