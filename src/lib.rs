//! PrimePad library crate.
//!
//! Everything that does not need a display lives here so it can be unit
//! tested: document state, settings, encodings, the grammar/theme syntax
//! highlighter, and the PrimeSDK toolchain plumbing. The `PrimePad` binary
//! wires these into an FLTK window.

pub mod app;
pub mod ui;
