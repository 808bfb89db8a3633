use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use fltk::{
    button::{Button, CheckButton, RadioRoundButton},
    enums::{Align, Color},
    frame::Frame,
    group::Group,
    input::Input,
    prelude::*,
    window::Window,
};

use crate::app::settings::{AppSettings, CalculatorFlavor};

/// Show preferences dialog and return updated settings if the user clicked
/// Save.
pub fn show_preferences_dialog(current_settings: &AppSettings) -> Option<AppSettings> {
    let mut dialog = Window::default()
        .with_size(420, 560)
        .with_label("Preferences")
        .center_screen();
    dialog.make_modal(true);

    // Toolchain section
    Frame::default()
        .with_pos(15, 15)
        .with_size(390, 25)
        .with_label("PrimeSDK tools:")
        .with_align(Align::Left | Align::Inside);
    let mut bin_input = Input::default().with_pos(30, 45).with_size(360, 25);
    bin_input.set_value(&current_settings.toolchain_bin.to_string_lossy());

    Frame::default()
        .with_pos(15, 80)
        .with_size(390, 25)
        .with_label("Library path (-L):")
        .with_align(Align::Left | Align::Inside);
    let mut lib_input = Input::default().with_pos(30, 110).with_size(280, 25);
    lib_input.set_value(&current_settings.lib_path.to_string_lossy());
    let mut use_lib_check = CheckButton::default()
        .with_pos(320, 110)
        .with_size(80, 25)
        .with_label("Use");
    use_lib_check.set_value(current_settings.use_lib);

    Frame::default()
        .with_pos(15, 145)
        .with_size(390, 25)
        .with_label("Include path (-I):")
        .with_align(Align::Left | Align::Inside);
    let mut include_input = Input::default().with_pos(30, 175).with_size(280, 25);
    include_input.set_value(&current_settings.include_path.to_string_lossy());
    let mut use_include_check = CheckButton::default()
        .with_pos(320, 175)
        .with_size(80, 25)
        .with_label("Use");
    use_include_check.set_value(current_settings.use_include);

    let mut reset_btn = Button::default()
        .with_pos(30, 210)
        .with_size(160, 25)
        .with_label("Reset to SDK defaults");

    // Calculator section
    Frame::default()
        .with_pos(15, 250)
        .with_size(390, 25)
        .with_label("HP Prime installation:")
        .with_align(Align::Left | Align::Inside);
    let flavor_group = Group::default().with_pos(30, 280).with_size(360, 50);
    let mut flavor_native = RadioRoundButton::default()
        .with_pos(30, 280)
        .with_size(360, 25)
        .with_label("Native application");
    let mut flavor_wine = RadioRoundButton::default()
        .with_pos(30, 305)
        .with_size(360, 25)
        .with_label("Windows virtual calculator under Wine");
    flavor_group.end();

    match current_settings.calculator_flavor {
        CalculatorFlavor::Native => flavor_native.set_value(true),
        CalculatorFlavor::Wine => flavor_wine.set_value(true),
    }

    // Editor section
    Frame::default()
        .with_pos(15, 345)
        .with_size(390, 25)
        .with_label("Editor:")
        .with_align(Align::Left | Align::Inside);
    let size_group = Group::default().with_pos(30, 375).with_size(360, 25);
    let mut size_12 = RadioRoundButton::default()
        .with_pos(30, 375)
        .with_size(110, 25)
        .with_label("Small (12)");
    let mut size_14 = RadioRoundButton::default()
        .with_pos(150, 375)
        .with_size(110, 25)
        .with_label("Medium (14)");
    let mut size_18 = RadioRoundButton::default()
        .with_pos(270, 375)
        .with_size(110, 25)
        .with_label("Large (18)");
    size_group.end();

    match current_settings.font_size {
        12 => size_12.set_value(true),
        18 => size_18.set_value(true),
        _ => size_14.set_value(true),
    }

    let mut check_line_numbers = CheckButton::default()
        .with_pos(30, 410)
        .with_size(360, 25)
        .with_label("Show line numbers");
    check_line_numbers.set_value(current_settings.line_numbers_enabled);

    let mut check_auto_indent = CheckButton::default()
        .with_pos(30, 435)
        .with_size(360, 25)
        .with_label("Auto-indent after THEN / DO / REPEAT / CASE");
    check_auto_indent.set_value(current_settings.auto_indent_enabled);

    let mut check_operators = CheckButton::default()
        .with_pos(30, 460)
        .with_size(360, 25)
        .with_label("Replace typed operators (>= \u{2192} \u{2265}, => \u{2192} \u{25b6})");
    check_operators.set_value(current_settings.operator_substitution_enabled);

    let mut info_frame = Frame::default().with_pos(30, 485).with_size(360, 25);
    info_frame.set_label("Tool changes apply to the next build.");
    info_frame.set_label_size(11);
    info_frame.set_label_color(Color::from_rgb(100, 100, 100));
    info_frame.set_align(Align::Left | Align::Inside);

    // Buttons at bottom
    let mut save_btn = Button::default()
        .with_pos(220, 520)
        .with_size(90, 30)
        .with_label("Save");
    let mut cancel_btn = Button::default()
        .with_pos(320, 520)
        .with_size(90, 30)
        .with_label("Cancel");

    dialog.end();
    dialog.show();

    {
        let defaults = AppSettings::default();
        let mut lib_input = lib_input.clone();
        let mut include_input = include_input.clone();
        let mut use_lib_check = use_lib_check.clone();
        let mut use_include_check = use_include_check.clone();
        reset_btn.set_callback(move |_| {
            lib_input.set_value(&defaults.lib_path.to_string_lossy());
            include_input.set_value(&defaults.include_path.to_string_lossy());
            use_lib_check.set_value(true);
            use_include_check.set_value(true);
        });
    }

    let result = Rc::new(RefCell::new(None));
    let result_save = result.clone();

    let dialog_save = dialog.clone();
    let current = current_settings.clone();
    save_btn.set_callback(move |_| {
        let new_settings = AppSettings {
            toolchain_bin: PathBuf::from(bin_input.value()),
            lib_path: PathBuf::from(lib_input.value()),
            include_path: PathBuf::from(include_input.value()),
            use_lib: use_lib_check.value(),
            use_include: use_include_check.value(),
            calculator_flavor: if flavor_wine.value() {
                CalculatorFlavor::Wine
            } else {
                CalculatorFlavor::Native
            },
            font_size: if size_12.value() {
                12
            } else if size_18.value() {
                18
            } else {
                14
            },
            line_numbers_enabled: check_line_numbers.value(),
            auto_indent_enabled: check_auto_indent.value(),
            operator_substitution_enabled: check_operators.value(),
            theme_name: current.theme_name.clone(),
            last_open_directory: current.last_open_directory.clone(),
        };

        *result_save.borrow_mut() = Some(new_settings);
        dialog_save.clone().hide();
    });

    let dialog_cancel = dialog.clone();
    cancel_btn.set_callback(move |_| {
        dialog_cancel.clone().hide();
    });

    super::run_dialog(&dialog);

    let out = result.borrow().clone();
    out
}
