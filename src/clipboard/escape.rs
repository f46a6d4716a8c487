//! Text transforms applied before a snippet is handed to the shell

/// Quote-safe form for embedding inside a single-quoted shell string
pub fn escape_for_shell(text: &str) -> String {
    text.replace('\'', r"'\''")
}

/// Inverse of [`escape_for_shell`]
pub fn unescape_shell(text: &str) -> String {
    text.replace(r"'\''", "'")
}

/// Replace every `&` that does not start a numeric entity with `&#38;`
pub fn escape_ampersands(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(i) = rest.find('&') {
        out.push_str(&rest[..i]);
        let after = &rest[i + 1..];
        if starts_with_numeric_entity(after) {
            out.push('&');
        } else {
            out.push_str("&#38;");
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

/// `#<digits>;` right after an ampersand
fn starts_with_numeric_entity(text: &str) -> bool {
    let Some(body) = text.strip_prefix('#') else {
        return false;
    };
    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && body[digits..].starts_with(';')
}

/// Replace each non-ASCII character with a `#:<codepoint>:#` placeholder
pub fn encode_extended(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            out.push_str(&format!("#:{}:#", u32::from(c)));
        }
    }
    out
}

/// Turn `#:<codepoint>:#` placeholders back into characters.
///
/// Placeholders that do not name a valid character are left as-is.
pub fn decode_extended(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("#:") {
        out.push_str(&rest[..start]);
        let body = &rest[start + 2..];
        let decoded = body.find(":#").and_then(|end| {
            let code = &body[..end];
            if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            code.parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .map(|c| (c, end))
        });
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &body[end + 2..];
            }
            None => {
                out.push_str("#:");
                rest = body;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Full transform from serialized XML to the text passed to the shell
pub fn prepare_payload(xml: &str) -> String {
    encode_extended(&escape_ampersands(&escape_for_shell(xml)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shell_escape_round_trip() {
        let text = r#"<Data>Don't "quote" me, it's 'fine'</Data>"#;
        let escaped = escape_for_shell(text);
        assert_eq!(escaped, r#"<Data>Don'\''t "quote" me, it'\''s '\''fine'\''</Data>"#);
        assert_eq!(unescape_shell(&escaped), text);
    }

    #[test]
    fn test_ampersands() {
        assert_eq!(escape_ampersands("a & b"), "a &#38; b");
        assert_eq!(escape_ampersands("&#38; kept"), "&#38; kept");
        assert_eq!(escape_ampersands("&amp;"), "&#38;amp;");
        assert_eq!(escape_ampersands("&#;"), "&#38;#;");
        assert_eq!(escape_ampersands("trailing &"), "trailing &#38;");
    }

    #[test]
    fn test_extended_characters() {
        assert_eq!(encode_extended("en-dash: \u{2013}"), "en-dash: #:8211:#");
        assert_eq!(decode_extended("en-dash: #:8211:#"), "en-dash: \u{2013}");
        assert_eq!(decode_extended("#:abc:# and #:"), "#:abc:# and #:");
    }

    #[test]
    fn test_prepare_payload() {
        let payload = prepare_payload("<Data>Tom's caf\u{e9} & bar</Data>");
        assert_eq!(payload, r"<Data>Tom'\''s caf#:233:# &#38; bar</Data>");
    }
}
