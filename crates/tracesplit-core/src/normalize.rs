//! Line splitting and per-line token normalisation.
//!
//! A trace file is a header line, a body of `;`-separated records, and a
//! footer line. Record fields carry decoration characters (`-`, `*`) that are
//! dropped before splitting.

/// Characters removed from a line before it is split into tokens.
pub const STRIPPED_CHARS: [char; 2] = ['-', '*'];

/// Field separator inside a record line.
pub const FIELD_SEPARATOR: char = ';';

/// Characters that end a line. `\r\n` counts as a single break.
pub const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split text into lines on any of [`LINE_BREAKS`], with `\r\n` as one break.
///
/// A trailing terminator does not produce an extra empty line, so
/// `"a\nb\n"` and `"a\nb"` both yield `["a", "b"]`.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.char_indices().find(|(_, c)| LINE_BREAKS.contains(c)) {
            Some((i, c)) => {
                lines.push(&rest[..i]);
                let terminator = if rest[i..].starts_with("\r\n") {
                    2
                } else {
                    c.len_utf8()
                };
                rest = &rest[i + terminator..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }

    lines
}

/// Return the body of a trace file: every line except the first and the last.
///
/// The header and footer are dropped unconditionally, whatever they contain.
/// Files with fewer than three lines have an empty body.
pub fn body_lines(text: &str) -> Vec<&str> {
    let mut lines = split_lines(text);
    if lines.len() < 2 {
        return Vec::new();
    }
    lines.pop();
    lines.remove(0);
    lines
}

/// Normalise one record line into its non-empty, trimmed tokens.
///
/// Removes every `-` and `*`, splits on `;`, trims each piece and discards
/// pieces that end up empty. A line made only of separators and noise
/// yields an empty vector.
pub fn normalize_line(line: &str) -> Vec<String> {
    let cleaned: String = line.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect();

    cleaned
        .split(FIELD_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
