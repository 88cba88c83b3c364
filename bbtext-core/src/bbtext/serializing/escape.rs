//! Escaping for serialized markup

/// Escape literal text so the lexer reads it back unchanged.
///
/// `[` could start a tag and `\` could start an escape; both get a backslash.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '[' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Make an attribute value safe inside double quotes.
///
/// `"`, `\` and line breaks get a backslash; the tag scanner removes it again.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '"' | '\\' | '\n' | '\r') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text() {
        assert_eq!(escape_text(r"[b]\n"), r"\[b]\\n");
        assert_eq!(escape_text("plain ] text"), "plain ] text");
    }

    #[test]
    fn escapes_attribute_values() {
        assert_eq!(escape_attribute("a\"b\nc"), "a\\\"b\\\nc");
        assert_eq!(escape_attribute(r"C:\dir %22"), r"C:\\dir %22");
    }
}
