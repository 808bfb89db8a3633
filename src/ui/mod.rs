//! FLTK shell: window construction, menu wiring, dialogs.

pub mod dialogs;
pub mod editor_theme;
pub mod file_dialogs;
pub mod main_window;
pub mod menu;
