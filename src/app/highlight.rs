//! Debounced re-highlighting over the message channel.
//!
//! PPL programs are small, so every edit triggers a full rescan; the timer
//! just coalesces bursts of keystrokes into one pass.

use fltk::app::Sender;
use fltk::enums::Font;
use fltk::prelude::*;
use fltk::text::{StyleTableEntry, TextEditor};

use super::document::{Document, buffer_text};
use super::error::{AppError, Result};
use super::messages::Message;
use super::syntax::SyntaxHighlighter;
use super::syntax::grammar::Grammar;
use super::syntax::theme::Theme;

const REHIGHLIGHT_DELAY: f64 = 0.05;

pub struct HighlightController {
    highlighter: SyntaxHighlighter,
    grammar: Grammar,
    themes: Vec<Theme>,
    theme_index: usize,
    pending_rehighlight: bool,
    rehighlight_timer_active: bool,
}

impl HighlightController {
    pub fn new(
        grammar: Grammar,
        themes: Vec<Theme>,
        theme_name: &str,
        font: Font,
        font_size: i32,
    ) -> Result<Self> {
        assert!(!themes.is_empty(), "at least the bundled themes exist");
        let theme_index = themes
            .iter()
            .position(|t| t.name == theme_name)
            .unwrap_or(0);
        let highlighter =
            SyntaxHighlighter::new(&grammar, &themes[theme_index], font, font_size)?;
        Ok(Self {
            highlighter,
            grammar,
            themes,
            theme_index,
            pending_rehighlight: false,
            rehighlight_timer_active: false,
        })
    }

    pub fn theme(&self) -> &Theme {
        &self.themes[self.theme_index]
    }

    pub fn theme_names(&self) -> Vec<String> {
        self.themes.iter().map(|t| t.name.clone()).collect()
    }

    pub fn set_theme(&mut self, name: &str) -> Result<()> {
        let index = self
            .themes
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| AppError::Theme(format!("unknown theme `{}`", name)))?;
        self.highlighter.set_theme(&self.themes[index])?;
        self.theme_index = index;
        Ok(())
    }

    pub fn set_font(&mut self, font: Font, size: i32) {
        self.highlighter.set_font(font, size);
    }

    pub fn style_table(&self) -> Vec<StyleTableEntry> {
        self.highlighter.style_table()
    }

    pub fn grammar_name(&self) -> &str {
        &self.grammar.name
    }

    /// Recompute the whole style buffer now.
    pub fn refresh(&self, doc: &mut Document, editor: &mut TextEditor) {
        let text = buffer_text(&doc.buffer);
        let styles = self.highlighter.highlight(&text);
        doc.style_buffer.set_text(&styles);
        editor.set_highlight_data(doc.style_buffer.clone(), self.style_table());
        editor.redraw();
    }

    /// Coalesce edits: the first call arms a short timer, the timer fires a
    /// `DoRehighlight`, and `take_pending` collapses everything in between.
    pub fn schedule(&mut self, sender: &Sender<Message>) {
        self.pending_rehighlight = true;
        if !self.rehighlight_timer_active {
            self.rehighlight_timer_active = true;
            let s = *sender;
            fltk::app::add_timeout3(REHIGHLIGHT_DELAY, move |_| {
                s.send(Message::DoRehighlight);
            });
        }
    }

    /// True when a scheduled rehighlight is due; resets the debounce state.
    pub fn take_pending(&mut self) -> bool {
        self.rehighlight_timer_active = false;
        std::mem::take(&mut self.pending_rehighlight)
    }
}
