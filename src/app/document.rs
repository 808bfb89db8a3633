use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fltk::app::Sender;
use fltk::text::TextBuffer;

use super::messages::Message;
use super::text_ops::extract_filename;

/// Read text from an FLTK TextBuffer without leaking the C-allocated copy.
///
/// fltk-rs's `TextBuffer::text()` copies FLTK's `malloc()`'d C string into
/// a Rust String but never frees the original pointer, leaking the full
/// buffer size on every call. This calls the FFI directly and frees it.
pub fn buffer_text(buf: &TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: `buf.as_ptr()` is valid while `buf` lives; Fl_Text_Buffer_text
    // returns a malloc'd, null-terminated C string (or null when empty),
    // which we copy and then free with the matching allocator.
    unsafe {
        let inner = buf.as_ptr() as *mut std::ffi::c_void;
        let ptr = Fl_Text_Buffer_text(inner);
        if ptr.is_null() {
            return String::new();
        }
        let cstr = std::ffi::CStr::from_ptr(ptr);
        let result = cstr.to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        result
    }
}

/// The one open document: the text buffer, its parallel style buffer, and
/// where it lives on disk.
///
/// The modify callback keeps the style buffer byte-aligned with the text
/// buffer and reports every edit through the channel.
pub struct Document {
    pub buffer: TextBuffer,
    pub style_buffer: TextBuffer,
    pub file_path: Option<PathBuf>,
    pub has_unsaved_changes: Rc<Cell<bool>>,
    pub display_name: String,
    /// Whole-text snapshots taken before programmatic edits (reformat,
    /// insert code), so they can be undone as one step.
    undo_snapshots: Vec<(String, i32)>,
}

impl Document {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut buffer = TextBuffer::default();
        let style_buffer = TextBuffer::default();
        let has_unsaved_changes = Rc::new(Cell::new(false));

        let changes = has_unsaved_changes.clone();
        let mut style_buf = style_buffer.clone();
        buffer.add_modify_callback(move |pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted > 0 || deleted > 0 {
                changes.set(true);
                // Keep the style buffer the same byte length as the text
                if inserted > 0 {
                    let filler = "A".repeat(inserted as usize);
                    style_buf.insert(pos, &filler);
                }
                if deleted > 0 {
                    style_buf.remove(pos, pos + deleted);
                }
                sender.send(Message::BufferModified { pos, inserted });
            }
        });

        Self {
            buffer,
            style_buffer,
            file_path: None,
            has_unsaved_changes,
            display_name: "Untitled".to_string(),
            undo_snapshots: Vec::new(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.has_unsaved_changes.get()
    }

    pub fn mark_clean(&self) {
        self.has_unsaved_changes.set(false);
    }

    pub fn set_path(&mut self, path: PathBuf) {
        self.display_name = extract_filename(&path.to_string_lossy());
        self.file_path = Some(path);
    }

    pub fn clear_path(&mut self) {
        self.file_path = None;
        self.display_name = "Untitled".to_string();
    }

    pub fn path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Lowercased file extension, when the document has a path.
    pub fn extension(&self) -> Option<String> {
        self.path()?
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    /// File name without the extension, for naming built artifacts.
    pub fn file_stem(&self) -> Option<String> {
        self.path()?
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
    }

    pub fn push_undo_snapshot(&mut self, text: String, cursor: i32) {
        self.undo_snapshots.push((text, cursor));
    }

    pub fn pop_undo_snapshot(&mut self) -> Option<(String, i32)> {
        self.undo_snapshots.pop()
    }

    pub fn clear_undo_snapshots(&mut self) {
        self.undo_snapshots.clear();
    }
}
