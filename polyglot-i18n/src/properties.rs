//! Reader and writer for Java-style `.properties` files

use crate::error::DocumentError;

/// Parse `.properties` text into ordered key/value pairs.
///
/// Supports `#` and `!` comments, `=`, `:` or whitespace separators,
/// backslash line continuations and the usual escapes including `\uXXXX`.
pub fn parse(raw: &str) -> Result<Vec<(String, String)>, DocumentError> {
    let mut entries = Vec::new();
    let mut lines = raw.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let line_no = index + 1;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = String::from(trimmed);
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = split_key_value(&logical);
        let key = unescape(key).map_err(|message| DocumentError::InvalidProperties {
            line: line_no,
            message,
        })?;
        let value = unescape(value).map_err(|message| DocumentError::InvalidProperties {
            line: line_no,
            message,
        })?;
        entries.push((key, value));
    }

    Ok(entries)
}

/// Render entries as `key=value` lines, each terminated by a newline.
///
/// Keys and values are escaped so that [`parse`] reads back exactly the
/// same entries: one physical line per entry, whatever the text contains.
pub fn serialize<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut content = String::new();
    for (key, value) in entries {
        escape_into(&mut content, key, true);
        content.push('=');
        escape_into(&mut content, value, false);
        content.push('\n');
    }
    content
}

/// Keys also escape separators and all whitespace. Values only escape
/// leading whitespace, which the reader would otherwise skip.
fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{c}' => out.push_str("\\f"),
            '#' | '!' if i == 0 && is_key => {
                out.push('\\');
                out.push(c);
            }
            '=' | ':' if is_key => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            _ => out.push(c),
        }
    }
}

/// An odd number of trailing backslashes continues the line
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split at the first unescaped separator. Whitespace around the separator
/// is skipped, and a whitespace separator may be followed by one `=` or `:`.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches([' ', '\t', '\u{c}']);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches([' ', '\t', '\u{c}']);
    }
    (key, rest)
}

fn unescape(text: &str) -> Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .ok_or_else(|| format!("malformed \\u escape '\\u{}'", hex))?;
                let decoded = char::from_u32(code)
                    .ok_or_else(|| format!("invalid code point U+{:04X}", code))?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}
