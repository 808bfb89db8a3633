use fltk::{
    enums::Color,
    frame::Frame,
    menu::MenuBar,
    prelude::*,
    text::{TextDisplay, TextEditor},
    window::Window,
};

use crate::app::error::Result;
use crate::app::syntax::theme::{Rgb, Theme};

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Paint the editor and surrounding chrome from a loaded `.xpcolortheme`.
/// The editor colors come straight from the theme; window and menu chrome
/// follow the theme's light/dark type.
pub fn apply_editor_theme(
    editor: &mut TextEditor,
    window: &mut Window,
    menu: &mut MenuBar,
    output: &mut TextDisplay,
    status_bar: &mut Frame,
    theme: &Theme,
) -> Result<()> {
    let foreground = to_color(theme.foreground()?);
    let background = to_color(theme.background()?);
    let selection = to_color(theme.selection_background()?);
    let cursor = to_color(theme.cursor()?);

    editor.set_color(background);
    editor.set_text_color(foreground);
    editor.set_cursor_color(cursor);
    editor.set_selection_color(selection);

    output.set_color(background);
    output.set_text_color(foreground);

    if theme.is_dark() {
        editor.set_linenumber_bgcolor(Color::from_rgb(40, 40, 40));
        editor.set_linenumber_fgcolor(Color::from_rgb(150, 150, 150));
        window.set_color(Color::from_rgb(25, 25, 25));
        window.set_label_color(Color::from_rgb(220, 220, 220));
        menu.set_color(Color::from_rgb(35, 35, 35));
        menu.set_text_color(Color::from_rgb(220, 220, 220));
        menu.set_selection_color(Color::from_rgb(60, 60, 60));
        status_bar.set_label_color(Color::from_rgb(180, 180, 180));
    } else {
        editor.set_linenumber_bgcolor(Color::from_rgb(240, 240, 240));
        editor.set_linenumber_fgcolor(Color::from_rgb(100, 100, 100));
        window.set_color(Color::from_rgb(240, 240, 240));
        window.set_label_color(Color::Black);
        menu.set_color(Color::from_rgb(240, 240, 240));
        menu.set_text_color(Color::Black);
        menu.set_selection_color(Color::from_rgb(200, 200, 200));
        status_bar.set_label_color(Color::from_rgb(60, 60, 60));
    }

    editor.redraw();
    output.redraw();
    window.redraw();
    menu.redraw();
    Ok(())
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWINDOWATTRIBUTE};

    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);

        let on: i32 = if is_dark { 1 } else { 0 };

        // Attribute 20 (Windows 11 / Windows 10 2004+), then 19 (1809-1903)
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(20), // DWMWA_USE_IMMERSIVE_DARK_MODE
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(19),
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );
    }
}
