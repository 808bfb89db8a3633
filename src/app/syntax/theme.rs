//! `.xpcolortheme` loading and color parsing.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::app::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Deserialize)]
pub struct Theme {
    pub name: String,
    /// "dark" or "light"
    #[serde(rename = "type")]
    pub kind: String,
    pub colors: HashMap<String, String>,
    #[serde(rename = "tokenColors")]
    pub token_colors: Vec<TokenColor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenColor {
    pub scope: Vec<String>,
    pub settings: TokenSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    pub foreground: String,
}

/// Parse `#RGB` or `#RRGGBB` (leading `#` optional, surrounding whitespace
/// ignored).
pub fn parse_hex_color(hex: &str) -> Result<Rgb> {
    let mut s = hex.trim().to_uppercase();
    if let Some(rest) = s.strip_prefix('#') {
        s = rest.to_string();
    }
    // Expand shorthand #RGB
    if s.len() == 3 {
        s = s
            .chars()
            .flat_map(|c| [c, c])
            .collect();
    }
    if s.len() != 6 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AppError::Theme(format!("invalid color `{}`", hex)));
    }
    let rgb = u32::from_str_radix(&s, 16).expect("checked hex digits");
    Ok(Rgb(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    ))
}

impl Theme {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Theme>(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn is_dark(&self) -> bool {
        self.kind.eq_ignore_ascii_case("dark")
    }

    fn editor_color(&self, key: &str) -> Result<Rgb> {
        let hex = self
            .colors
            .get(key)
            .ok_or_else(|| AppError::Theme(format!("missing color `{}`", key)))?;
        parse_hex_color(hex)
    }

    pub fn foreground(&self) -> Result<Rgb> {
        self.editor_color("editor.foreground")
    }

    pub fn background(&self) -> Result<Rgb> {
        self.editor_color("editor.background")
    }

    pub fn selection_background(&self) -> Result<Rgb> {
        self.editor_color("editor.selectionBackground")
    }

    pub fn cursor(&self) -> Result<Rgb> {
        self.editor_color("editor.cursor")
    }

    /// Foreground for a token scope. Misses fall back to the editor
    /// foreground, like the original does.
    pub fn token_color(&self, scope: &str) -> Option<Rgb> {
        for tc in &self.token_colors {
            if tc.scope.iter().any(|s| s == scope) {
                return parse_hex_color(&tc.settings.foreground).ok();
            }
        }
        None
    }
}

/// The themes bundled into the binary. Guarantees the Editor > Theme menu
/// is never empty.
pub fn builtin_themes() -> Vec<Theme> {
    vec![
        Theme::from_json(include_str!(
            "../../../resources/themes/Default (Dark).xpcolortheme"
        ))
        .expect("bundled dark theme is valid"),
        Theme::from_json(include_str!(
            "../../../resources/themes/Default (Light).xpcolortheme"
        ))
        .expect("bundled light theme is valid"),
    ]
}

/// All `.xpcolortheme` files in a directory, sorted by file name.
pub fn discover_themes(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("xpcolortheme") {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}

/// Load every discoverable theme: bundled defaults first, then any extras
/// from `dir` (files shadow bundled themes with the same name).
pub fn load_all_themes(dir: Option<&Path>) -> Vec<Theme> {
    let mut themes = builtin_themes();
    if let Some(dir) = dir {
        for path in discover_themes(dir) {
            match Theme::load(&path) {
                Ok(theme) => {
                    themes.retain(|t| t.name != theme.name);
                    themes.push(theme);
                }
                Err(e) => eprintln!("Skipping theme {}: {}", path.display(), e),
            }
        }
    }
    themes
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "name": "Test Dark",
        "type": "dark",
        "colors": {
            "editor.foreground": "#FFFFFF",
            "editor.background": "#1F1F24",
            "editor.selectionBackground": "#515B70",
            "editor.cursor": "#FFF"
        },
        "tokenColors": [
            {"scope": ["Keywords"], "settings": {"foreground": "#5482FF"}},
            {"scope": ["Numbers", "Strings"], "settings": {"foreground": "#FD8F3F"}}
        ]
    }"#;

    #[test]
    fn test_parse_hex_full() {
        assert_eq!(parse_hex_color("#5482FF").unwrap(), Rgb(0x54, 0x82, 0xFF));
        assert_eq!(parse_hex_color("1f1f24").unwrap(), Rgb(0x1F, 0x1F, 0x24));
    }

    #[test]
    fn test_parse_hex_shorthand() {
        assert_eq!(parse_hex_color("#FFF").unwrap(), Rgb(255, 255, 255));
        assert_eq!(parse_hex_color(" #abc ").unwrap(), Rgb(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("nope").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_theme_colors_and_tokens() {
        let theme = Theme::from_json(SAMPLE).unwrap();
        assert!(theme.is_dark());
        assert_eq!(theme.background().unwrap(), Rgb(0x1F, 0x1F, 0x24));
        assert_eq!(theme.cursor().unwrap(), Rgb(255, 255, 255));
        assert_eq!(theme.token_color("Keywords"), Some(Rgb(0x54, 0x82, 0xFF)));
        assert_eq!(theme.token_color("Strings"), Some(Rgb(0xFD, 0x8F, 0x3F)));
        assert_eq!(theme.token_color("Comments"), None);
    }

    #[test]
    fn test_missing_editor_color_is_error() {
        let theme = Theme::from_json(
            r#"{"name": "X", "type": "light", "colors": {}, "tokenColors": []}"#,
        )
        .unwrap();
        assert!(theme.foreground().is_err());
    }

    #[test]
    fn test_builtin_themes_are_valid() {
        let themes = builtin_themes();
        assert!(themes.len() >= 2);
        for theme in &themes {
            assert!(theme.foreground().is_ok());
            assert!(theme.background().is_ok());
            assert!(theme.selection_background().is_ok());
            assert!(theme.cursor().is_ok());
        }
        assert!(themes.iter().any(|t| t.is_dark()));
        assert!(themes.iter().any(|t| !t.is_dark()));
    }

    #[test]
    fn test_discover_themes_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("A.xpcolortheme"), SAMPLE).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let found = discover_themes(dir.path());
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("A.xpcolortheme"));
    }

    #[test]
    fn test_load_all_themes_shadows_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let replacement = SAMPLE.replace("Test Dark", "Default (Dark)");
        std::fs::write(dir.path().join("Default (Dark).xpcolortheme"), replacement).unwrap();
        let themes = load_all_themes(Some(dir.path()));
        let dark: Vec<_> = themes.iter().filter(|t| t.name == "Default (Dark)").collect();
        assert_eq!(dark.len(), 1);
        // The file version won: it uses the test palette
        assert_eq!(dark[0].background().unwrap(), Rgb(0x1F, 0x1F, 0x24));
    }
}
