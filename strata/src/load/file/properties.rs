//! Parser for `name = value` properties text.
//!
//! Lines starting with `#` or `!` are comments. The key ends at the first
//! unescaped `=`, `:` or whitespace; the separator and surrounding
//! whitespace are skipped. A line ending in an odd number of backslashes
//! continues on the next line, whose leading whitespace is dropped. Keys and
//! values understand the escapes `\t`, `\n`, `\r`, `\f` and `\uXXXX`; any
//! other escaped character stands for itself.

/// Parses `text` into key and value pairs in file order.
pub(super) fn parse(text: &str) -> Vec<(String, String)> {
    logical_lines(text)
        .into_iter()
        .filter_map(|line| split_line(&line))
        .collect()
}

fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;
    for physical in text.lines() {
        let piece = match pending {
            Some(_) => physical.trim_start(),
            None => {
                let trimmed = physical.trim_start();
                if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                    continue;
                }
                trimmed
            }
        };
        let continued = !trailing_backslashes(piece).is_multiple_of(2);
        let content = if continued {
            piece.strip_suffix('\\').unwrap_or(piece)
        } else {
            piece
        };
        let mut line = pending.take().unwrap_or_default();
        line.push_str(content);
        if continued {
            pending = Some(line);
        } else {
            lines.push(line);
        }
    }
    lines.extend(pending);
    lines
}

fn trailing_backslashes(line: &str) -> usize {
    line.chars().rev().take_while(|c| *c == '\\').count()
}

fn split_line(line: &str) -> Option<(String, String)> {
    let mut key_end = line.len();
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || c.is_whitespace() {
            key_end = i;
            break;
        }
    }
    let key = unescape(line.get(..key_end)?);
    let after_key = line.get(key_end..)?.trim_start();
    let value = after_key
        .strip_prefix(['=', ':'])
        .map_or(after_key, str::trim_start);
    (!key.is_empty()).then(|| (key, unescape(value)))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
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
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        out.push(decoded);
                        chars.nth(3);
                    }
                    _ => out.push('u'),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    //! Unit tests for the properties parser.

    use rstest::rstest;

    use super::parse;

    fn pairs(text: &str) -> Vec<(String, String)> {
        parse(text)
    }

    fn owned(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[rstest]
    #[case("a.b=1", &[("a.b", "1")])]
    #[case("a.b : 1", &[("a.b", "1")])]
    #[case("a.b 1", &[("a.b", "1")])]
    #[case("  a.b=  spaced value", &[("a.b", "spaced value")])]
    #[case("a.b=", &[("a.b", "")])]
    #[case("flag", &[("flag", "")])]
    #[case("# comment\n! other\n\na=1", &[("a", "1")])]
    #[case("a\\=b=c", &[("a=b", "c")])]
    #[case("tab=x\\ty", &[("tab", "x\ty")])]
    #[case("u=\\u0041BC", &[("u", "ABC")])]
    fn parses_lines(#[case] text: &str, #[case] expected: &[(&str, &str)]) {
        assert_eq!(pairs(text), owned(expected));
    }

    #[test]
    fn joins_continuation_lines() {
        let text = "list=one, \\\n      two, \\\n      three\nnext=4";
        assert_eq!(
            pairs(text),
            owned(&[("list", "one, two, three"), ("next", "4")])
        );
    }

    #[test]
    fn even_backslashes_do_not_continue() {
        let text = "path=C:\\\\\nnext=1";
        assert_eq!(pairs(text), owned(&[("path", "C:\\"), ("next", "1")]));
    }
}
