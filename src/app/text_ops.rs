//! Pure text helpers for the editor: cursor math, auto-indent, the
//! typographic operator substitutions, and pragma stripping.

use std::path::Path;

/// Typed ASCII digraphs that get replaced by the PPL glyphs as you type.
const OPERATOR_SUBSTITUTIONS: [(&str, &str); 5] = [
    ("!=", "\u{2260}"), // ≠
    ("<>", "\u{2260}"), // ≠
    (">=", "\u{2265}"), // ≥
    ("<=", "\u{2264}"), // ≤
    ("=>", "\u{25b6}"), // ▶
];

/// Lines ending in one of these get the next line indented one level deeper.
const INDENT_AFTER: [&str; 4] = ["then", "do", "repeat", "case"];

/// Extract filename from a file path, or "Unknown" if it can't be extracted.
pub fn extract_filename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// 1-based (line, column) for a byte position. Columns count characters.
pub fn line_col_at(text: &str, pos: usize) -> (usize, usize) {
    let pos = pos.min(text.len());
    let before = &text[..pos];
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}

/// Byte position of the start of a 1-based line number, or None when the
/// line number is out of range.
pub fn line_number_to_byte_position(text: &str, line_num: usize) -> Option<usize> {
    if line_num == 0 {
        return None;
    }
    if line_num == 1 {
        return Some(0);
    }
    let mut line = 1;
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            line += 1;
            if line == line_num {
                return Some(i + 1);
            }
        }
    }
    None
}

/// A pending operator substitution: replace `[start, end)` with `glyph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    pub start: usize,
    pub end: usize,
    pub glyph: &'static str,
}

/// Check whether the text just typed before `cursor` ends with one of the
/// ASCII operator digraphs and should become the real glyph.
pub fn operator_substitution(text: &str, cursor: usize) -> Option<Substitution> {
    if cursor < 2 || cursor > text.len() || !text.is_char_boundary(cursor) {
        return None;
    }
    let before = &text[..cursor];
    for (find, glyph) in OPERATOR_SUBSTITUTIONS {
        if before.ends_with(find) {
            return Some(Substitution {
                start: cursor - find.len(),
                end: cursor,
                glyph,
            });
        }
    }
    None
}

/// Indent to insert after a newline was typed at `cursor` (the position
/// right after the `\n`). Copies the previous line's leading whitespace and
/// adds one level when that line ends with a block-opening keyword.
pub fn auto_indent(text: &str, cursor: usize) -> Option<String> {
    if cursor == 0 || cursor > text.len() || !text.is_char_boundary(cursor) {
        return None;
    }
    let before = &text[..cursor];
    // The line the user just finished, without its trailing newline.
    let prev_end = before.strip_suffix('\n')?;
    let prev_start = prev_end.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prev_line = &prev_end[prev_start..];

    let mut indent: String = prev_line
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();

    let trimmed = prev_line.trim().to_lowercase();
    if INDENT_AFTER.iter().any(|kw| trimmed.ends_with(kw)) {
        indent.push_str("  ");
    }

    if indent.is_empty() { None } else { Some(indent) }
}

/// Drop `#pragma` lines from code about to be inserted into the document.
pub fn strip_pragmas(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("#pragma"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filename_from_path() {
        assert_eq!(extract_filename("/home/user/test.prgm+"), "test.prgm+");
        assert_eq!(extract_filename("test.prgm"), "test.prgm");
        assert_eq!(extract_filename(""), "Unknown");
        assert_eq!(extract_filename("/"), "Unknown");
    }

    #[test]
    fn test_line_col_at_start() {
        assert_eq!(line_col_at("abc", 0), (1, 1));
    }

    #[test]
    fn test_line_col_counts_lines_and_columns() {
        let text = "EXPORT F()\nBEGIN\n  X;\nEND;";
        assert_eq!(line_col_at(text, 0), (1, 1));
        assert_eq!(line_col_at(text, 11), (2, 1));
        assert_eq!(line_col_at(text, 16), (2, 6));
        assert_eq!(line_col_at(text, text.len()), (4, 5));
    }

    #[test]
    fn test_line_col_counts_chars_not_bytes() {
        let text = "X\u{2260}Y";
        // Past the 3-byte ≠ glyph: column 3, not 5
        assert_eq!(line_col_at(text, 4), (1, 3));
    }

    #[test]
    fn test_line_number_to_byte_position() {
        let text = "one\ntwo\nthree";
        assert_eq!(line_number_to_byte_position(text, 1), Some(0));
        assert_eq!(line_number_to_byte_position(text, 2), Some(4));
        assert_eq!(line_number_to_byte_position(text, 3), Some(8));
        assert_eq!(line_number_to_byte_position(text, 4), None);
        assert_eq!(line_number_to_byte_position(text, 0), None);
    }

    #[test]
    fn test_operator_substitution_matches() {
        let sub = operator_substitution("A!=", 3).unwrap();
        assert_eq!((sub.start, sub.end, sub.glyph), (1, 3, "\u{2260}"));

        let sub = operator_substitution("X=>", 3).unwrap();
        assert_eq!(sub.glyph, "\u{25b6}");

        let sub = operator_substitution("a<=b", 3).unwrap();
        assert_eq!((sub.start, sub.end, sub.glyph), (1, 3, "\u{2264}"));
    }

    #[test]
    fn test_operator_substitution_requires_cursor_context() {
        assert_eq!(operator_substitution("!=", 1), None);
        assert_eq!(operator_substitution("AB", 2), None);
        // Cursor beyond the text
        assert_eq!(operator_substitution("!=", 5), None);
    }

    #[test]
    fn test_auto_indent_copies_leading_whitespace() {
        let text = "  LOCAL a;\n";
        assert_eq!(auto_indent(text, text.len()), Some("  ".to_string()));
    }

    #[test]
    fn test_auto_indent_deepens_after_block_keywords() {
        let text = "IF a THEN\n";
        assert_eq!(auto_indent(text, text.len()), Some("  ".to_string()));

        let text = "  FOR i FROM 1 TO 9 DO\n";
        assert_eq!(auto_indent(text, text.len()), Some("    ".to_string()));

        let text = "REPEAT\n";
        assert_eq!(auto_indent(text, text.len()), Some("  ".to_string()));
    }

    #[test]
    fn test_auto_indent_plain_line() {
        let text = "X:=1;\n";
        assert_eq!(auto_indent(text, text.len()), None);
    }

    #[test]
    fn test_auto_indent_mid_document() {
        let text = "  a;\nrest";
        // Cursor right after the newline
        assert_eq!(auto_indent(text, 5), Some("  ".to_string()));
    }

    #[test]
    fn test_strip_pragmas() {
        let text = "#pragma mode( separator(.,;) integer(h32) )\nEXPORT F()\n  #pragma other\nBEGIN";
        assert_eq!(strip_pragmas(text), "EXPORT F()\nBEGIN");
    }

    #[test]
    fn test_strip_pragmas_keeps_other_directives() {
        let text = "#include \"color.h\"\n#pragma once\n#define N 4";
        assert_eq!(strip_pragmas(text), "#include \"color.h\"\n#define N 4");
    }
}
