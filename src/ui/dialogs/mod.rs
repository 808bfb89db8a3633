pub mod about;
pub mod goto_line;
pub mod preferences;

use fltk::prelude::*;
use fltk::window::Window;

/// Pump events until the dialog window is closed.
pub(crate) fn run_dialog(dialog: &Window) {
    while dialog.shown() {
        fltk::app::wait();
    }
}
