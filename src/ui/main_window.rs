use fltk::{
    enums::{Color, Font},
    frame::Frame,
    group::Flex,
    menu::MenuBar,
    prelude::*,
    text::{TextBuffer, TextDisplay, TextEditor, WrapMode},
    window::Window,
};

pub const OUTPUT_PANE_HEIGHT: i32 = 120;
pub const STATUS_BAR_HEIGHT: i32 = 24;

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub text_editor: TextEditor,
    pub output: TextDisplay,
    pub output_buffer: TextBuffer,
    pub status_bar: Frame,
}

pub fn build_main_window(font_size: i32) -> MainWidgets {
    let mut wind = Window::new(100, 100, 900, 640, "Untitled - PrimePad");
    wind.set_xclass("PrimePad");

    let mut flex = Flex::new(0, 0, 900, 640, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let mut text_editor = TextEditor::new(0, 0, 0, 0, "");
    text_editor.set_buffer(TextBuffer::default());
    text_editor.set_text_font(Font::Courier);
    text_editor.set_text_size(font_size);
    // Source code: no soft wrapping, scroll sideways instead
    text_editor.wrap_mode(WrapMode::None, 0);
    text_editor.set_linenumber_bgcolor(Color::from_rgb(40, 40, 40));
    text_editor.set_linenumber_fgcolor(Color::from_rgb(150, 150, 150));

    // Tool transcripts land here
    let output_buffer = TextBuffer::default();
    let mut output = TextDisplay::new(0, 0, 0, 0, "");
    output.set_buffer(output_buffer.clone());
    output.set_text_font(Font::Courier);
    output.set_text_size(12);
    flex.fixed(&output, OUTPUT_PANE_HEIGHT);

    let mut status_bar = Frame::default();
    status_bar.set_label("Line: 1  Col: 1");
    status_bar.set_label_size(12);
    status_bar.set_align(fltk::enums::Align::Left | fltk::enums::Align::Inside);
    flex.fixed(&status_bar, STATUS_BAR_HEIGHT);

    flex.end();
    wind.resizable(&flex);

    MainWidgets {
        wind,
        flex,
        menu,
        text_editor,
        output,
        output_buffer,
        status_bar,
    }
}
