// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::borrow::Cow;

fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Replaces predefined and numeric entity references.
///
/// Unknown references are kept as is.
pub fn unescape(text: &str) -> Cow<str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let resolved = rest
            .find(';')
            .and_then(|semi| resolve_entity(&rest[1..semi]).map(|c| (c, semi)));

        match resolved {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

/// Escapes a text node content.
pub fn escape_text(text: &str) -> Cow<str> {
    if !text.contains(|c| matches!(c, '&' | '<' | '>')) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }

    Cow::Owned(out)
}

/// Escapes an attribute value that will be surrounded by `quote`.
pub fn escape_attribute(text: &str, quote: char) -> Cow<str> {
    if !text.contains(|c| c == '&' || c == '<' || c == quote) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' if quote == '"' => out.push_str("&quot;"),
            '\'' if quote == '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_unescape {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(unescape($text), $result);
            }
        )
    }

    test_unescape!(unescape_1, "text", "text");
    test_unescape!(unescape_2, "a &amp; b", "a & b");
    test_unescape!(unescape_3, "&lt;&gt;&quot;&apos;", "<>\"'");
    test_unescape!(unescape_4, "&#65;&#x42;", "AB");
    test_unescape!(unescape_5, "&nbsp; &", "&nbsp; &");
    test_unescape!(unescape_6, "&#xZZ;", "&#xZZ;");

    #[test]
    fn escape_1() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_attribute("say \"hi\"", '"'), "say &quot;hi&quot;");
        assert_eq!(escape_attribute("say \"hi\"", '\''), "say \"hi\"");
        assert_eq!(escape_attribute("it's", '\''), "it&apos;s");
    }
}
