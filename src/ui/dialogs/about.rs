use fltk::{
    button::Button,
    enums::{Align, Color, Font},
    frame::Frame,
    group::Flex,
    prelude::*,
    window::Window,
};

fn caption(text: &str, size: i32, flex: &mut Flex, height: i32) -> Frame {
    let mut frame = Frame::default();
    frame.set_label(text);
    frame.set_label_size(size);
    frame.set_align(Align::Center | Align::Inside);
    flex.fixed(&frame, height);
    frame
}

/// Show the About dialog.
pub fn show_about_dialog() {
    let mut dialog = Window::default()
        .with_size(420, 310)
        .with_label("About PrimePad")
        .center_screen();
    dialog.make_modal(true);

    let mut flex = Flex::new(10, 10, 400, 290, None);
    flex.set_type(fltk::group::FlexType::Column);
    flex.set_spacing(10);

    let mut title = caption("PrimePad", 24, &mut flex, 40);
    title.set_label_font(Font::HelveticaBold);

    caption(
        &format!("Version {}", env!("CARGO_PKG_VERSION")),
        14,
        &mut flex,
        25,
    );

    let mut tagline = caption(
        "A source-code editor for HP Prime PPL and PPL+",
        12,
        &mut flex,
        25,
    );
    tagline.set_label_color(Color::from_rgb(100, 100, 100));

    caption(
        "Copyright \u{00a9} 2025 PrimePad Contributors\n\
         Licensed under the MIT License\n\n\
         Compiling, packaging, minifying and reformatting are\n\
         performed by the PrimeSDK command-line tools:\n\
         ppl+, hpprgm, pplmin, pplref, grob, pplfont",
        12,
        &mut flex,
        130,
    );

    let mut close_btn = Button::default().with_label("Close");
    flex.fixed(&close_btn, 35);

    flex.end();
    dialog.end();

    let mut dialog_close = dialog.clone();
    close_btn.set_callback(move |_| dialog_close.hide());

    dialog.show();
    super::run_dialog(&dialog);
}
