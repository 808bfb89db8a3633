//! `.xpgrammar` loading.
//!
//! A grammar is a flat list of named regex patterns in priority order.
//! Patterns with an empty `match` are placeholders (the stock grammar ships
//! a few) and are skipped at compile time.

use std::fs;
use std::path::Path;

use regex_lite::Regex;
use serde::Deserialize;

use crate::app::error::{AppError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Grammar {
    pub name: String,
    #[serde(rename = "scopeName")]
    pub scope_name: String,
    pub patterns: Vec<GrammarPattern>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrammarPattern {
    pub name: String,
    #[serde(rename = "match")]
    pub pattern: String,
}

/// A grammar with its patterns compiled, ready for highlighting.
pub struct CompiledGrammar {
    pub name: String,
    pub rules: Vec<CompiledRule>,
}

pub struct CompiledRule {
    /// Scope name, matched against theme `tokenColors` entries.
    pub scope: String,
    pub regex: Regex,
}

impl Grammar {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Compile all non-empty patterns, preserving file order.
    pub fn compile(&self) -> Result<CompiledGrammar> {
        let mut rules = Vec::new();
        for p in &self.patterns {
            if p.pattern.is_empty() {
                continue;
            }
            let regex = Regex::new(&p.pattern).map_err(|e| {
                AppError::Grammar(format!("pattern `{}` does not compile: {}", p.name, e))
            })?;
            rules.push(CompiledRule {
                scope: p.name.clone(),
                regex,
            });
        }
        Ok(CompiledGrammar {
            name: self.name.clone(),
            rules,
        })
    }
}

/// The grammar bundled into the binary, used when no resources directory
/// is found next to the executable.
pub fn builtin_grammar() -> Grammar {
    Grammar::from_json(include_str!("../../../resources/Language.xpgrammar"))
        .expect("bundled grammar is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "name": "PPL",
        "scopeName": "source.ppl",
        "patterns": [
            {"name": "Keywords", "match": "(?i)\\b(begin|end)\\b"},
            {"name": "Functions", "match": ""},
            {"name": "Comments", "match": "//.*"}
        ]
    }"#;

    #[test]
    fn test_parse_grammar_json() {
        let g = Grammar::from_json(SAMPLE).unwrap();
        assert_eq!(g.name, "PPL");
        assert_eq!(g.scope_name, "source.ppl");
        assert_eq!(g.patterns.len(), 3);
        assert_eq!(g.patterns[1].pattern, "");
    }

    #[test]
    fn test_compile_skips_empty_patterns() {
        let g = Grammar::from_json(SAMPLE).unwrap();
        let compiled = g.compile().unwrap();
        assert_eq!(compiled.rules.len(), 2);
        assert_eq!(compiled.rules[0].scope, "Keywords");
        assert_eq!(compiled.rules[1].scope, "Comments");
    }

    #[test]
    fn test_compile_rejects_bad_regex() {
        let g = Grammar::from_json(
            r#"{"name": "X", "scopeName": "x", "patterns": [{"name": "Bad", "match": "("}]}"#,
        )
        .unwrap();
        let err = g.compile().unwrap_err();
        assert!(err.to_string().contains("Bad"));
    }

    #[test]
    fn test_builtin_grammar_compiles() {
        let g = builtin_grammar();
        assert!(g.compile().is_ok());
        assert!(g.patterns.iter().any(|p| p.name == "Keywords"));
    }
}
