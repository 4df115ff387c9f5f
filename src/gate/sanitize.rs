//! HTML escaping for free-text form fields.

/// Escape the characters `< > " ' /` as HTML entities, then trim surrounding
/// whitespace (including the U+FEFF byte order mark).
///
/// `&` is left alone, so running this over its own output changes nothing.
pub fn sanitize(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            _ => escaped.push(c),
        }
    }
    escaped.trim_matches(is_blank).to_string()
}

/// Unicode whitespace plus U+FEFF, which `char::is_whitespace` leaves out.
pub fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}
