// Presentation-only encoders. None of these are reversible by `decode`.

const MARKUP_ENTITIES: [(char, &str); 4] = [
    ('&', "&amp;"),
    ('>', "&gt;"),
    ('<', "&lt;"),
    ('"', "&quot;"),
];

/// Escape markup metacharacters for inclusion in an HTML document.
pub fn html_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match MARKUP_ENTITIES.iter().find(|(raw, _)| *raw == c) {
            Some((_, entity)) => out.push_str(entity),
            None => out.push(c),
        }
    }
    out
}

/// Escape text for embedding in script source.
/// ASCII letters pass through; every other UTF-16 unit becomes `\uXXXX`.
pub fn js_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for unit in text.encode_utf16() {
        if (u16::from(b'A')..=u16::from(b'Z')).contains(&unit)
            || (u16::from(b'a')..=u16::from(b'z')).contains(&unit)
        {
            // Letters are single-unit ASCII here.
            out.push(char::from(unit as u8));
        } else {
            out.push_str(&format!("\\u{unit:04X}"));
        }
    }
    out
}

/// Map a resource href to a URL the browser can load relative to a content page.
pub fn help_url(href: &str) -> String {
    if href.is_empty() {
        "about:blank".to_string()
    } else if href.starts_with("http:/") {
        href.to_string()
    } else if href.starts_with("file:/") {
        format!("../content/{href}")
    } else {
        format!("../content/help:{href}")
    }
}
