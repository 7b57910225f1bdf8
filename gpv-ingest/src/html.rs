//! Flatten fetched HTML into the line-oriented text the segmenter expects.

use anyhow::Result;
use regex::{Captures, Regex};

/// Approximate a browser's `innerText`: block elements and `<br>` become line
/// breaks, markup is dropped, entities are decoded and blank runs collapse.
pub fn html_to_text(html: &str) -> Result<String> {
    let script_re = Regex::new(r"(?is)<script\b.*?</script\s*>")?;
    let style_re = Regex::new(r"(?is)<style\b.*?</style\s*>")?;
    let comment_re = Regex::new(r"(?s)<!--.*?-->")?;
    let br_re = Regex::new(r"(?i)<br\s*/?>")?;
    let block_end_re =
        Regex::new(r"(?i)</(p|div|li|ul|ol|h[1-6]|tr|table|article|section|header|footer)\s*>")?;
    let tag_re = Regex::new(r"(?s)<[^>]*>")?;
    let numeric_entity_re = Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);")?;

    let text = script_re.replace_all(html, "");
    let text = style_re.replace_all(&text, "");
    let text = comment_re.replace_all(&text, "");
    let text = br_re.replace_all(&text, "\n");
    let text = block_end_re.replace_all(&text, "\n");
    let text = tag_re.replace_all(&text, "");

    let text = numeric_entity_re.replace_all(&text, |caps: &Captures| {
        let raw = &caps[1];
        let code = match raw.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => raw.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    let text = text
        .replace("&nbsp;", " ")
        .replace("&ndash;", "–")
        .replace("&mdash;", "—")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace('\u{a0}', " ");

    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    Ok(out.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_become_lines() {
        let html = r#"<html><head><style>p { color: red; }</style>
<script>var x = "<p>nope</p>";</script></head>
<body><article><h2>06 ГРУДНЯ ПО ЗАПОРІЗЬКІЙ ОБЛАСТІ ДІЯТИМУТЬ ГПВ</h2>
<p>1.1: 05:30&nbsp;&ndash; 10:30<br/>1.2: 08:00 &#8211; 09:00</p></article></body></html>"#;

        let text = html_to_text(html).unwrap();
        let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(
            lines,
            vec![
                "06 ГРУДНЯ ПО ЗАПОРІЗЬКІЙ ОБЛАСТІ ДІЯТИМУТЬ ГПВ",
                "1.1: 05:30 – 10:30",
                "1.2: 08:00 – 09:00",
            ]
        );
        assert!(!text.contains("nope"));
    }

    #[test]
    fn test_blank_runs_collapse() {
        let text = html_to_text("<div>a</div><div></div><div></div><div>b</div>").unwrap();
        assert_eq!(text, "a\n\nb");
    }
}
