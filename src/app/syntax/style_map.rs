use std::collections::HashMap;

use fltk::enums::{Color, Font};
use fltk::text::StyleTableEntry;

use super::theme::Rgb;

/// Maps grammar scope names to FLTK style characters ('A', 'B', 'C', ...).
/// 'A' is always the plain-text style; each scope gets the next free char.
pub struct StyleMap {
    scope_to_char: HashMap<String, char>,
    entries: Vec<StyleTableEntry>,
    font: Font,
    font_size: i32,
}

impl StyleMap {
    pub fn new(font: Font, font_size: i32, foreground: Rgb) -> Self {
        let mut map = Self {
            scope_to_char: HashMap::new(),
            entries: Vec::new(),
            font,
            font_size,
        };
        map.entries.push(StyleTableEntry {
            color: Color::from_rgb(foreground.0, foreground.1, foreground.2),
            font,
            size: font_size,
        });
        map
    }

    /// Register a scope with its color, returning its style character.
    /// Registering the same scope twice returns the existing char.
    pub fn assign(&mut self, scope: &str, color: Rgb) -> char {
        if let Some(&ch) = self.scope_to_char.get(scope) {
            return ch;
        }

        let idx = self.entries.len();
        // Style chars go 'A'..'Z'; a grammar with more scopes than that
        // reuses the last entry
        if idx >= 26 {
            return (b'A' + 25) as char;
        }
        let ch = (b'A' + idx as u8) as char;
        self.entries.push(StyleTableEntry {
            color: Color::from_rgb(color.0, color.1, color.2),
            font: self.font,
            size: self.font_size,
        });
        self.scope_to_char.insert(scope.to_string(), ch);
        ch
    }

    /// Style char for a scope, 'A' (plain) when the scope was never assigned.
    pub fn char_for(&self, scope: &str) -> char {
        self.scope_to_char.get(scope).copied().unwrap_or('A')
    }

    /// Style table for FLTK's set_highlight_data.
    pub fn entries(&self) -> Vec<StyleTableEntry> {
        self.entries.clone()
    }

    /// Update font info for all entries.
    pub fn update_font(&mut self, font: Font, size: i32) {
        self.font = font;
        self.font_size = size;
        for entry in &mut self.entries {
            entry.font = font;
            entry.size = size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_style_is_a() {
        let map = StyleMap::new(Font::Courier, 14, Rgb(0, 0, 0));
        assert_eq!(map.char_for("Keywords"), 'A');
        assert_eq!(map.entries().len(), 1);
    }

    #[test]
    fn test_assign_hands_out_sequential_chars() {
        let mut map = StyleMap::new(Font::Courier, 14, Rgb(255, 255, 255));
        assert_eq!(map.assign("Keywords", Rgb(0x54, 0x82, 0xFF)), 'B');
        assert_eq!(map.assign("Numbers", Rgb(0xFD, 0x8F, 0x3F)), 'C');
        // Same scope, same char
        assert_eq!(map.assign("Keywords", Rgb(1, 2, 3)), 'B');
        assert_eq!(map.char_for("Numbers"), 'C');
        assert_eq!(map.entries().len(), 3);
    }
}
