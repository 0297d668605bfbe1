use wset_store::codec::{help_url, html_encode, js_escape};

#[test]
fn golden_html_encode_replaces_metacharacters() {
    assert_eq!(
        html_encode(r#"<a href="x?a=1&b=2">"#),
        "&lt;a href=&quot;x?a=1&amp;b=2&quot;&gt;"
    );
}

#[test]
fn edge_html_encode_escapes_existing_entities() {
    // An ampersand that starts an entity-looking run is still escaped once.
    assert_eq!(html_encode("&lt;"), "&amp;lt;");
    assert_eq!(html_encode("no markup"), "no markup");
}

#[test]
fn golden_js_escape_keeps_letters_only() {
    assert_eq!(js_escape("ab C"), "ab\\u0020C");
    assert_eq!(js_escape("x1"), "x\\u0031");
    assert_eq!(js_escape("é"), "\\u00E9");
    assert_eq!(js_escape("'\""), "\\u0027\\u0022");
}

#[test]
fn js_escape_emits_surrogate_units_separately() {
    assert_eq!(js_escape("😀"), "\\uD83D\\uDE00");
}

#[test]
fn help_url_routes_by_scheme() {
    assert_eq!(help_url(""), "about:blank");
    assert_eq!(help_url("http://example.org/a.html"), "http://example.org/a.html");
    assert_eq!(help_url("file:/tmp/a.html"), "../content/file:/tmp/a.html");
    assert_eq!(
        help_url("/org.eclipse.help/doc.html"),
        "../content/help:/org.eclipse.help/doc.html"
    );
}
