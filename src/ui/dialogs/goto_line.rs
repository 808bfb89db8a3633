use fltk::{
    button::Button,
    dialog,
    enums::CallbackTrigger,
    frame::Frame,
    input::IntInput,
    prelude::*,
    text::{TextBuffer, TextEditor},
    window::Window,
};

use crate::app::document::buffer_text;
use crate::app::text_ops::line_number_to_byte_position;

/// Turn what the user typed into a byte position, or the message to show
/// instead.
fn resolve_line_request(text: &str, typed: &str) -> Result<usize, String> {
    let line: usize = typed
        .trim()
        .parse()
        .map_err(|_| "Please enter a valid line number".to_string())?;
    line_number_to_byte_position(text, line).ok_or_else(|| {
        let total = text.bytes().filter(|&b| b == b'\n').count() + 1;
        format!("Line number must be between 1 and {}", total)
    })
}

/// Show the Go to Line dialog and move the caret on success.
pub fn show_goto_line_dialog(buffer: &TextBuffer, editor: &mut TextEditor) {
    let mut dialog_win = Window::default()
        .with_size(260, 110)
        .with_label("Go to Line")
        .center_screen();
    Frame::default()
        .with_pos(15, 15)
        .with_size(110, 28)
        .with_label("Line number:");
    let mut line_input = IntInput::default().with_pos(135, 15).with_size(110, 28);

    let mut go_btn = Button::default()
        .with_pos(65, 65)
        .with_size(85, 28)
        .with_label("Go");
    let mut cancel_btn = Button::default()
        .with_pos(160, 65)
        .with_size(85, 28)
        .with_label("Cancel");

    dialog_win.end();
    dialog_win.make_resizable(false);
    dialog_win.show();

    let mut target_buffer = buffer.clone();
    let mut target_editor = editor.clone();
    let dialog_go = dialog_win.clone();
    let typed_input = line_input.clone();
    go_btn.set_callback(move |_| {
        let text = buffer_text(&target_buffer);
        match resolve_line_request(&text, &typed_input.value()) {
            Ok(pos) => {
                target_buffer.unselect();
                target_editor.set_insert_position(pos as i32);
                target_editor.show_insert_position();
                dialog_go.clone().hide();
            }
            Err(message) => dialog::message_default(&message),
        }
    });

    // Enter inside the input behaves like pressing Go
    let mut go_proxy = go_btn.clone();
    line_input.set_trigger(CallbackTrigger::EnterKey);
    line_input.set_callback(move |_| go_proxy.do_callback());

    let dialog_close = dialog_win.clone();
    cancel_btn.set_callback(move |_| dialog_close.clone().hide());

    super::run_dialog(&dialog_win);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_line_request_moves_to_line_start() {
        let text = "first\nsecond\nthird";
        assert_eq!(resolve_line_request(text, "1"), Ok(0));
        assert_eq!(resolve_line_request(text, " 2 "), Ok(6));
        assert_eq!(resolve_line_request(text, "3"), Ok(13));
    }

    #[test]
    fn test_resolve_line_request_rejects_garbage() {
        let err = resolve_line_request("x", "abc").unwrap_err();
        assert!(err.contains("valid line number"));
    }

    #[test]
    fn test_resolve_line_request_reports_range() {
        let err = resolve_line_request("one\ntwo", "9").unwrap_err();
        assert_eq!(err, "Line number must be between 1 and 2");
    }
}
