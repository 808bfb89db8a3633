//! Regex-driven syntax highlighting.
//!
//! The highlighter scans the whole document against the grammar's patterns
//! in order and produces an FLTK style string: one style character per
//! **byte** of text, so multi-byte glyphs like `▶` stay aligned with their
//! styles. Later patterns overwrite earlier ones, which is how the grammar
//! expresses precedence (comments are listed last and win over everything
//! they contain).

pub mod grammar;
pub mod style_map;
pub mod theme;

use fltk::enums::Font;
use fltk::text::StyleTableEntry;

use crate::app::error::Result;
use grammar::{CompiledGrammar, Grammar};
use style_map::StyleMap;
use theme::{Rgb, Theme};

pub struct SyntaxHighlighter {
    grammar: CompiledGrammar,
    /// Style char per rule, parallel to `grammar.rules`.
    rule_chars: Vec<char>,
    style_map: StyleMap,
    font: Font,
    font_size: i32,
}

impl SyntaxHighlighter {
    pub fn new(grammar: &Grammar, theme: &Theme, font: Font, font_size: i32) -> Result<Self> {
        let compiled = grammar.compile()?;
        let (style_map, rule_chars) = build_style_map(&compiled, theme, font, font_size)?;
        Ok(Self {
            grammar: compiled,
            rule_chars,
            style_map,
            font,
            font_size,
        })
    }

    /// Rebuild the color table for a new theme. The grammar is unchanged.
    pub fn set_theme(&mut self, theme: &Theme) -> Result<()> {
        let (style_map, rule_chars) =
            build_style_map(&self.grammar, theme, self.font, self.font_size)?;
        self.style_map = style_map;
        self.rule_chars = rule_chars;
        Ok(())
    }

    pub fn set_font(&mut self, font: Font, size: i32) {
        self.font = font;
        self.font_size = size;
        self.style_map.update_font(font, size);
    }

    pub fn style_table(&self) -> Vec<StyleTableEntry> {
        self.style_map.entries()
    }

    /// Produce the style string for `text`.
    pub fn highlight(&self, text: &str) -> String {
        let mut styles = vec![b'A'; text.len()];
        for (rule, &ch) in self.grammar.rules.iter().zip(&self.rule_chars) {
            for m in rule.regex.find_iter(text) {
                styles[m.start()..m.end()].fill(ch as u8);
            }
        }
        // Style chars are ASCII by construction
        String::from_utf8(styles).expect("style chars are ASCII")
    }
}

fn build_style_map(
    grammar: &CompiledGrammar,
    theme: &Theme,
    font: Font,
    font_size: i32,
) -> Result<(StyleMap, Vec<char>)> {
    let foreground = theme.foreground()?;
    let mut style_map = StyleMap::new(font, font_size, foreground);
    let mut rule_chars = Vec::with_capacity(grammar.rules.len());
    for rule in &grammar.rules {
        let color: Rgb = theme.token_color(&rule.scope).unwrap_or(foreground);
        rule_chars.push(style_map.assign(&rule.scope, color));
    }
    Ok((style_map, rule_chars))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_grammar() -> Grammar {
        Grammar::from_json(
            r#"{
                "name": "PPL",
                "scopeName": "source.ppl",
                "patterns": [
                    {"name": "Keywords", "match": "(?i)\\b(begin|end|if|then)\\b"},
                    {"name": "Numbers", "match": "\\b-?\\d+(\\.\\d+)?\\b"},
                    {"name": "Strings", "match": "\".*?\""},
                    {"name": "Comments", "match": "//.*"}
                ]
            }"#,
        )
        .unwrap()
    }

    fn test_theme() -> Theme {
        Theme::from_json(
            r#"{
                "name": "T",
                "type": "dark",
                "colors": {
                    "editor.foreground": "#FFFFFF",
                    "editor.background": "#000000",
                    "editor.selectionBackground": "#333333",
                    "editor.cursor": "#FFFFFF"
                },
                "tokenColors": [
                    {"scope": ["Keywords"], "settings": {"foreground": "#5482FF"}},
                    {"scope": ["Numbers", "Strings"], "settings": {"foreground": "#FD8F3F"}},
                    {"scope": ["Comments"], "settings": {"foreground": "#8E8E93"}}
                ]
            }"#,
        )
        .unwrap()
    }

    fn highlighter() -> SyntaxHighlighter {
        SyntaxHighlighter::new(&test_grammar(), &test_theme(), Font::Courier, 14).unwrap()
    }

    #[test]
    fn test_style_string_length_matches_bytes() {
        let h = highlighter();
        let text = "IF x\u{2260}1 THEN // hm";
        assert_eq!(h.highlight(text).len(), text.len());
    }

    #[test]
    fn test_keywords_and_numbers_styled() {
        let h = highlighter();
        let styles = h.highlight("IF 42 THEN");
        // Keywords='B', Numbers='C' (assignment order)
        assert_eq!(&styles, "BBACCABBBB");
    }

    #[test]
    fn test_case_insensitive_keywords() {
        let h = highlighter();
        let styles = h.highlight("begin");
        assert_eq!(&styles, "BBBBB");
    }

    #[test]
    fn test_later_rules_win() {
        let h = highlighter();
        let styles = h.highlight("// if 12");
        // Comment overrides the keyword and number inside it
        assert!(styles.chars().all(|c| c == 'E'));
    }

    #[test]
    fn test_string_spans_styled() {
        let h = highlighter();
        let styles = h.highlight(r#"X:="ab";"#);
        assert_eq!(&styles, "AAADDDDA");
    }

    #[test]
    fn test_plain_text_stays_default() {
        let h = highlighter();
        let styles = h.highlight("xyz");
        assert_eq!(&styles, "AAA");
    }

    #[test]
    fn test_set_theme_keeps_rule_mapping() {
        let mut h = highlighter();
        let before = h.highlight("IF 1 THEN");
        h.set_theme(&test_theme()).unwrap();
        assert_eq!(h.highlight("IF 1 THEN"), before);
    }

    #[test]
    fn test_builtin_grammar_highlights_ppl() {
        let themes = theme::builtin_themes();
        let h = SyntaxHighlighter::new(
            &grammar::builtin_grammar(),
            &themes[0],
            Font::Courier,
            14,
        )
        .unwrap();
        let text = "EXPORT F()\nBEGIN\n  X:=#FFh; // hex\nEND;";
        let styles = h.highlight(text);
        assert_eq!(styles.len(), text.len());
        // BEGIN is a keyword: styled something other than plain
        let begin_at = text.find("BEGIN").unwrap();
        assert_ne!(&styles[begin_at..begin_at + 1], "A");
    }
}
