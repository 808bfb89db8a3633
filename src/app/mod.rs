//! Application layer.
//!
//! # Structure
//!
//! - `document` - The open document: buffers, path, dirty state, undo
//! - `settings` - Persisted preferences (toolchain paths, theme, editor)
//! - `syntax/` - Grammar/theme JSON loading and regex highlighting
//! - `toolchain` - Subprocess wrappers for the PrimeSDK tools
//! - `hp` - Calculator-side packaging, install, and launch
//! - `state` - Main application coordinator driven by `Message`s

pub mod document;
pub mod encoding;
pub mod error;
pub mod highlight;
pub mod hp;
pub mod messages;
pub mod platform;
pub mod settings;
pub mod state;
pub mod syntax;
pub mod temp;
pub mod text_ops;
pub mod toolchain;

pub use document::Document;
pub use error::{AppError, Result};
pub use messages::Message;
pub use settings::{AppSettings, CalculatorFlavor};
pub use toolchain::Toolchain;
