use std::path::{Path, PathBuf};

use fltk::{
    app::Sender,
    dialog,
    enums::Font,
    frame::Frame,
    menu::MenuBar,
    prelude::*,
    text::{TextBuffer, TextDisplay, TextEditor},
    window::Window,
};

use super::document::{Document, buffer_text};
use super::encoding;
use super::error::Result;
use super::highlight::HighlightController;
use super::hp::{self, BundleResources};
use super::messages::Message;
use super::settings::AppSettings;
use super::temp::TempWorkspace;
use super::text_ops;
use super::toolchain::Toolchain;
use crate::ui::dialogs::about::show_about_dialog;
use crate::ui::dialogs::goto_line::show_goto_line_dialog;
use crate::ui::dialogs::preferences::show_preferences_dialog;
use crate::ui::editor_theme::apply_editor_theme;
use crate::ui::file_dialogs::{
    native_open_dialog, native_save_dialog, OPEN_SOURCE_FILTER, PLAIN_SOURCE_FILTER,
};

pub struct AppState {
    pub doc: Document,
    pub editor: TextEditor,
    pub output: TextDisplay,
    pub output_buffer: TextBuffer,
    pub status_bar: Frame,
    pub window: Window,
    pub menu: MenuBar,
    pub sender: Sender<Message>,
    pub settings: AppSettings,
    pub highlight: HighlightController,
    /// Scratch directory for intermediate tool output; removed on exit.
    #[allow(dead_code)]
    pub temp: TempWorkspace,
    pub resources_dir: Option<PathBuf>,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        doc: Document,
        editor: TextEditor,
        output: TextDisplay,
        output_buffer: TextBuffer,
        status_bar: Frame,
        window: Window,
        menu: MenuBar,
        sender: Sender<Message>,
        settings: AppSettings,
        highlight: HighlightController,
        temp: TempWorkspace,
        resources_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            doc,
            editor,
            output,
            output_buffer,
            status_bar,
            window,
            menu,
            sender,
            settings,
            highlight,
            temp,
            resources_dir,
        }
    }

    /// Central dispatch for the channel. Returns false when the app should
    /// exit.
    pub fn handle(&mut self, msg: Message) -> bool {
        match msg {
            Message::FileNew => self.file_new(),
            Message::FileOpen => self.file_open(),
            Message::FileSave => self.file_save(),
            Message::FileSaveAs => self.file_save_as(),
            Message::FileRevert => self.file_revert(),
            Message::FileQuit => {
                if self.confirm_quit() {
                    return false;
                }
            }
            Message::ExportPrgm => self.export_prgm(),
            Message::ExportHpprgm => self.export_hpprgm(),

            Message::EditUndo => self.edit_undo(),
            Message::EditRedo => self.editor.kf_redo(),
            Message::EditCut => self.editor.kf_cut(),
            Message::EditCopy => self.editor.kf_copy(),
            Message::EditPaste => self.editor.kf_paste(),
            Message::SelectAll => {
                let len = self.doc.buffer.length();
                self.doc.buffer.select(0, len);
            }
            Message::ShowGoToLine => {
                show_goto_line_dialog(&self.doc.buffer, &mut self.editor);
                self.update_status();
            }

            Message::Build => self.build(),
            Message::BuildAndPackage => self.build_and_package(),
            Message::RunInCalculator => self.run_in_calculator(),
            Message::MinifyAndPackage => self.minify_and_package(),
            Message::ReformatCode => self.reformat_code(),

            Message::InsertCodeFile => self.insert_code_file(),
            Message::EmbedImage => self.embed_image(),
            Message::EmbedFont => self.embed_font(),
            Message::InsertTemplate(path) => self.insert_template(&path),

            Message::SetTheme(name) => self.set_theme(&name),
            Message::ToggleLineNumbers => self.toggle_line_numbers(),

            Message::InstallProgram => self.install_program(),
            Message::CreateAppBundle => self.create_app_bundle(),
            Message::ArchiveAppBundle => self.archive_app_bundle(),
            Message::InstallLibraries => self.install_support("hpprgm", "libraries"),
            Message::InstallFonts => self.install_support("hpprgm/fonts", "fonts"),
            Message::LaunchCalculator => self.launch_calculator(),
            Message::LaunchConnectivityKit => self.launch_connectivity_kit(),

            Message::OpenPreferences => self.open_preferences(),
            Message::ShowAbout => show_about_dialog(),

            Message::BufferModified { pos, inserted } => self.buffer_modified(pos, inserted),
            Message::DoRehighlight => {
                if self.highlight.take_pending() {
                    self.highlight.refresh(&mut self.doc, &mut self.editor);
                }
            }
            Message::UpdateStatus => self.update_status(),
        }
        true
    }

    fn toolchain(&self) -> Toolchain {
        Toolchain::from_settings(&self.settings)
    }

    // --- Window chrome ---

    pub fn update_window_title(&mut self) {
        let prefix = if self.doc.is_dirty() { "*" } else { "" };
        self.window
            .set_label(&format!("{}{} - PrimePad", prefix, self.doc.display_name));
    }

    pub fn update_status(&mut self) {
        let text = buffer_text(&self.doc.buffer);
        let pos = self.editor.insert_position().max(0) as usize;
        let (line, col) = text_ops::line_col_at(&text, pos);
        self.status_bar
            .set_label(&format!("Line: {}  Col: {}", line, col));
    }

    fn set_output(&mut self, text: &str) {
        self.output_buffer.set_text(text);
        self.output.redraw();
    }

    fn report(&mut self, result: Result<String>) {
        match result {
            Ok(transcript) => self.set_output(&transcript),
            Err(e) => {
                self.set_output(&e.to_string());
                dialog::alert_default(&e.to_string());
            }
        }
    }

    pub fn update_linenumber_width(&mut self) {
        if !self.settings.line_numbers_enabled {
            self.editor.set_linenumber_width(0);
            return;
        }
        let line_count = self.doc.buffer.count_lines(0, self.doc.buffer.length());
        let digits = ((line_count + 1) as f64).log10().floor() as i32 + 1;
        let width = (digits * 8 + 16).max(40);
        self.editor.set_linenumber_width(width);
    }

    // --- File operations ---

    pub fn file_new(&mut self) {
        if self.doc.is_dirty() && !self.confirm_discard("Discard unsaved changes?") {
            return;
        }
        self.doc.buffer.set_text("");
        self.doc.clear_path();
        self.doc.clear_undo_snapshots();
        self.doc.mark_clean();
        self.highlight.refresh(&mut self.doc, &mut self.editor);
        self.update_window_title();
        self.update_linenumber_width();
        self.update_status();
    }

    pub fn file_open(&mut self) {
        let dir = self.settings.last_open_directory.clone();
        if let Some(path) = native_open_dialog("Open Program", OPEN_SOURCE_FILTER, dir.as_deref())
        {
            self.open_file(Path::new(&path));
        }
    }

    pub fn open_file(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            self.settings.last_open_directory = Some(parent.to_string_lossy().to_string());
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        let loaded = match ext.as_deref() {
            // Binary program packages are decoded by the SDK tool
            Some("hpprgm") | Some("hpappprgm") => self.toolchain().decode_program(path),
            _ => encoding::load_program(path),
        };

        match loaded {
            Ok(content) => {
                self.doc.buffer.set_text(&content);
                self.doc.set_path(path.to_path_buf());
                self.doc.clear_undo_snapshots();
                self.doc.mark_clean();
                self.editor.set_insert_position(0);
                self.highlight.refresh(&mut self.doc, &mut self.editor);
                self.update_window_title();
                self.update_linenumber_width();
                self.update_status();
            }
            Err(e) => dialog::alert_default(&format!("Error opening file: {}", e)),
        }
    }

    /// Load the bundled starter program into the empty untitled document.
    pub fn load_starter_template(&mut self) {
        let Some(ref resources) = self.resources_dir else {
            return;
        };
        let starter = resources.join("default.prgm+");
        if let Ok(content) = encoding::load_program(&starter) {
            self.doc.buffer.set_text(&content);
            self.doc.mark_clean();
            self.highlight.refresh(&mut self.doc, &mut self.editor);
            self.update_linenumber_width();
        }
    }

    pub fn file_save(&mut self) {
        let Some(path) = self.doc.file_path.clone() else {
            self.file_save_as();
            return;
        };
        let text = buffer_text(&self.doc.buffer);
        match encoding::save_program(&path, &text) {
            Ok(()) => {
                self.doc.mark_clean();
                self.update_window_title();
            }
            Err(e) => dialog::alert_default(&format!("Error saving file: {}", e)),
        }
    }

    pub fn file_save_as(&mut self) {
        let default_name = if self.doc.file_path.is_some() {
            self.doc.display_name.clone()
        } else {
            "Untitled.prgm+".to_string()
        };
        let dir = self.settings.last_open_directory.clone();
        let Some(path) = native_save_dialog(
            "Save Program As",
            OPEN_SOURCE_FILTER,
            dir.as_deref(),
            &default_name,
        ) else {
            return;
        };
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            self.settings.last_open_directory = Some(parent.to_string_lossy().to_string());
        }
        let text = buffer_text(&self.doc.buffer);
        match encoding::save_program(&path, &text) {
            Ok(()) => {
                self.doc.set_path(path);
                self.doc.mark_clean();
                self.update_window_title();
            }
            Err(e) => dialog::alert_default(&format!("Error saving file: {}", e)),
        }
    }

    pub fn file_revert(&mut self) {
        let Some(path) = self.doc.file_path.clone() else {
            return;
        };
        if self.doc.is_dirty() && !self.confirm_discard("Revert to the saved version?") {
            return;
        }
        self.open_file(&path);
    }

    fn confirm_discard(&self, question: &str) -> bool {
        matches!(
            dialog::choice2_default(question, "Discard", "Cancel", ""),
            Some(0)
        )
    }

    /// Handle quit request. Returns `true` if the app should exit.
    pub fn confirm_quit(&mut self) -> bool {
        let should_quit = if self.doc.is_dirty() {
            let choice = dialog::choice2_default(
                "You have unsaved changes.",
                "Save",
                "Quit Without Saving",
                "Cancel",
            );
            match choice {
                Some(0) => {
                    self.file_save();
                    !self.doc.is_dirty()
                }
                Some(1) => true,
                _ => false,
            }
        } else {
            true
        };

        if should_quit {
            if let Err(e) = self.settings.save() {
                eprintln!("Failed to save settings: {}", e);
            }
        }
        should_quit
    }

    // --- Preconditions (the original validates menu items by extension) ---

    fn is_plus_source(&self) -> bool {
        matches!(self.doc.extension().as_deref(), Some("prgm+") | Some("ppl+"))
    }

    fn is_plain_source(&self) -> bool {
        matches!(self.doc.extension().as_deref(), Some("prgm") | Some("ppl"))
    }

    /// Save, then hand back the document path. Status-bar note when the
    /// document was never saved.
    fn saved_path(&mut self) -> Option<PathBuf> {
        self.file_save();
        match self.doc.file_path.clone() {
            Some(path) if path.exists() => Some(path),
            _ => {
                self.status_bar.set_label("Save the program first.");
                None
            }
        }
    }

    // --- Build operations ---

    pub fn build(&mut self) {
        if !self.is_plus_source() {
            self.status_bar
                .set_label("Build needs a .prgm+/.ppl+ source.");
            return;
        }
        let Some(path) = self.saved_path() else { return };
        let result = self
            .toolchain()
            .preprocess(&path, None)
            .map(|out| out.transcript());
        self.report(result);
    }

    pub fn build_and_package(&mut self) {
        if !self.is_plus_source() {
            self.status_bar
                .set_label("Build needs a .prgm+/.ppl+ source.");
            return;
        }
        let Some(path) = self.saved_path() else { return };
        let toolchain = self.toolchain();
        let result = toolchain.preprocess(&path, None).and_then(|out| {
            let prgm = path.with_extension("prgm");
            if prgm.exists() {
                let packaged = toolchain.package(&prgm, None)?;
                Ok(format!("{}\n{}", out.transcript(), packaged.transcript()))
            } else {
                Ok(out.transcript())
            }
        });
        self.report(result);
    }

    pub fn run_in_calculator(&mut self) {
        self.build_and_package();
        let Some(path) = self.doc.file_path.clone() else {
            return;
        };
        let Some(stem) = self.doc.file_stem() else {
            return;
        };
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        if !hp::program_file_exists(parent, &stem) {
            return;
        }
        if let Err(e) = hp::install_program_file(parent, &stem) {
            dialog::alert_default(&format!("Could not install program: {}", e));
            return;
        }
        if !hp::is_virtual_calculator_installed(self.settings.calculator_flavor) {
            dialog::alert_default("The HP Prime virtual calculator is not installed.");
            return;
        }
        if let Err(e) = hp::launch_virtual_calculator(self.settings.calculator_flavor) {
            dialog::alert_default(&e.to_string());
        }
    }

    pub fn export_prgm(&mut self) {
        if !self.is_plus_source() {
            self.status_bar
                .set_label("Export as PPL needs a .prgm+/.ppl+ source.");
            return;
        }
        let Some(path) = self.saved_path() else { return };
        let stem = self.doc.file_stem().unwrap_or_else(|| "Untitled".into());
        let dir = self.settings.last_open_directory.clone();
        let Some(out) = native_save_dialog(
            "Export as PPL",
            PLAIN_SOURCE_FILTER,
            dir.as_deref(),
            &format!("{}.prgm", stem),
        ) else {
            return;
        };
        let result = self
            .toolchain()
            .preprocess(&path, Some(Path::new(&out)))
            .map(|o| o.transcript());
        self.report(result);
    }

    pub fn export_hpprgm(&mut self) {
        if !self.is_plain_source() {
            self.status_bar
                .set_label("Export as .hpprgm needs a .prgm/.ppl source.");
            return;
        }
        let Some(path) = self.saved_path() else { return };
        let stem = self.doc.file_stem().unwrap_or_else(|| "Untitled".into());
        let dir = self.settings.last_open_directory.clone();
        let Some(out) = native_save_dialog(
            "Export as Package",
            "*.hpprgm",
            dir.as_deref(),
            &format!("{}.hpprgm", stem),
        ) else {
            return;
        };
        let result = self
            .toolchain()
            .package(&path, Some(Path::new(&out)))
            .map(|o| o.transcript());
        self.report(result);
    }

    pub fn minify_and_package(&mut self) {
        if !self.is_plain_source() {
            self.status_bar
                .set_label("Minify needs a .prgm/.ppl source.");
            return;
        }
        let Some(path) = self.saved_path() else { return };
        let result = self
            .toolchain()
            .compress_program(&path)
            .map(|o| o.transcript());
        self.report(result);
    }

    pub fn reformat_code(&mut self) {
        if !self.is_plain_source() {
            self.status_bar
                .set_label("Reformat needs a .prgm/.ppl source.");
            return;
        }
        let Some(path) = self.saved_path() else { return };
        match self.toolchain().reformat(&path) {
            Ok(formatted) => {
                let cursor = self.editor.insert_position();
                let old = buffer_text(&self.doc.buffer);
                self.doc.push_undo_snapshot(old, cursor);
                self.doc.buffer.set_text(&formatted);
                self.editor.set_insert_position(cursor.min(self.doc.buffer.length()));
                self.highlight.refresh(&mut self.doc, &mut self.editor);
                self.update_window_title();
            }
            Err(e) => self.report(Err(e)),
        }
    }

    // --- Insert operations ---

    fn insert_at_cursor(&mut self, text: &str) {
        let cursor = self.editor.insert_position();
        let old = buffer_text(&self.doc.buffer);
        self.doc.push_undo_snapshot(old, cursor);

        if let Some((start, end)) = self.doc.buffer.selection_position() {
            self.doc.buffer.replace(start, end, text);
            self.editor.set_insert_position(start + text.len() as i32);
        } else {
            self.doc.buffer.insert(cursor, text);
            self.editor.set_insert_position(cursor + text.len() as i32);
        }
        self.editor.show_insert_position();
    }

    pub fn insert_code_file(&mut self) {
        // Plain PPL can always be inserted; PPL+ only into a PPL+ document
        let filter = if self.is_plus_source() {
            "*.{prgm,prgm+,ppl,ppl+}"
        } else {
            "*.{prgm,ppl}"
        };
        let dir = self.settings.last_open_directory.clone();
        let Some(path) = native_open_dialog("Insert Code", filter, dir.as_deref()) else {
            return;
        };
        match encoding::load_program(Path::new(&path)) {
            Ok(content) => self.insert_at_cursor(&text_ops::strip_pragmas(&content)),
            Err(e) => dialog::alert_default(&format!("Error opening file: {}", e)),
        }
    }

    pub fn embed_image(&mut self) {
        let dir = self.settings.last_open_directory.clone();
        let Some(path) = native_open_dialog("Embed Image", "*.{bmp,png}", dir.as_deref()) else {
            return;
        };
        match self.toolchain().image_to_code(Path::new(&path)) {
            Ok(code) => self.insert_at_cursor(&code),
            Err(e) => self.report(Err(e)),
        }
    }

    pub fn embed_font(&mut self) {
        let dir = self.settings.last_open_directory.clone();
        let Some(path) =
            native_open_dialog("Embed Adafruit GFX Font", "*.h", dir.as_deref())
        else {
            return;
        };
        match self.toolchain().font_to_code(Path::new(&path)) {
            Ok(code) => self.insert_at_cursor(&code),
            Err(e) => self.report(Err(e)),
        }
    }

    pub fn insert_template(&mut self, path: &Path) {
        match encoding::load_program(path) {
            Ok(content) => self.insert_at_cursor(&content),
            Err(e) => dialog::alert_default(&format!("Error loading template: {}", e)),
        }
    }

    // --- Edit ---

    pub fn edit_undo(&mut self) {
        if let Some((text, cursor)) = self.doc.pop_undo_snapshot() {
            self.doc.buffer.set_text(&text);
            self.editor.set_insert_position(cursor.min(self.doc.buffer.length()));
            self.highlight.refresh(&mut self.doc, &mut self.editor);
        } else {
            self.editor.kf_undo();
        }
    }

    // --- Editor appearance ---

    pub fn set_theme(&mut self, name: &str) {
        if let Err(e) = self.highlight.set_theme(name) {
            dialog::alert_default(&e.to_string());
            return;
        }
        self.settings.theme_name = name.to_string();
        let _ = self.settings.save();
        self.apply_theme_colors();
        self.highlight.refresh(&mut self.doc, &mut self.editor);
        self.update_theme_menu_marks();
    }

    pub fn apply_theme_colors(&mut self) {
        if let Err(e) = apply_editor_theme(
            &mut self.editor,
            &mut self.window,
            &mut self.menu,
            &mut self.output,
            &mut self.status_bar,
            self.highlight.theme(),
        ) {
            eprintln!("Failed to apply theme colors: {}", e);
        }
    }

    fn update_theme_menu_marks(&mut self) {
        for name in self.highlight.theme_names() {
            let path = format!("Editor/Theme/{}", name);
            let idx = self.menu.find_index(&path);
            if idx >= 0 {
                if let Some(mut item) = self.menu.at(idx) {
                    if name == self.settings.theme_name {
                        item.set();
                    } else {
                        item.clear();
                    }
                }
            }
        }
    }

    pub fn toggle_line_numbers(&mut self) {
        self.settings.line_numbers_enabled = !self.settings.line_numbers_enabled;
        let _ = self.settings.save();
        self.update_linenumber_width();
        self.editor.redraw();
    }

    // --- Tools ---

    pub fn install_program(&mut self) {
        let Some(path) = self.doc.file_path.clone() else {
            self.status_bar.set_label("Save the program first.");
            return;
        };
        let Some(stem) = self.doc.file_stem() else { return };
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        if !hp::program_file_exists(parent, &stem) {
            self.status_bar
                .set_label("No .hpprgm found; use Build & Package first.");
            return;
        }
        match hp::install_program_file(parent, &stem) {
            Ok(dest) => self.set_output(&format!("Installed {}", dest.display())),
            Err(e) => dialog::alert_default(&e.to_string()),
        }
    }

    pub fn create_app_bundle(&mut self) {
        let Some(path) = self.doc.file_path.clone() else {
            self.status_bar.set_label("Save the program first.");
            return;
        };
        let Some(stem) = self.doc.file_stem() else { return };
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let resources = BundleResources::locate(self.resources_dir.as_deref());
        match hp::create_application_directory(parent, &stem, &resources) {
            Ok(bundle) => self.set_output(&format!("Created {}", bundle.display())),
            Err(e) => dialog::alert_default(&e.to_string()),
        }
    }

    pub fn archive_app_bundle(&mut self) {
        let Some(path) = self.doc.file_path.clone() else {
            self.status_bar.set_label("Save the program first.");
            return;
        };
        let Some(stem) = self.doc.file_stem() else { return };
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        if !hp::application_directory_exists(parent, &stem) {
            self.status_bar
                .set_label("No app bundle found; create one first.");
            return;
        }
        let result = hp::archive_application_directory(parent, &stem, None)
            .map(|o| o.transcript());
        self.report(result);
    }

    /// Copy bundled library or font packages into the Connectivity Kit's
    /// content folder.
    fn install_support(&mut self, subdir: &str, what: &str) {
        let Some(dest) = hp::connectivity_kit_content_dir() else {
            self.status_bar
                .set_label("The HP Connectivity Kit folder was not found.");
            return;
        };
        let source = self
            .resources_dir
            .as_ref()
            .map(|d| d.join(subdir))
            .filter(|d| d.is_dir());
        let Some(source) = source else {
            self.status_bar
                .set_label(&format!("No bundled {} to install.", what));
            return;
        };
        match hp::install_support_files(&source, &dest) {
            Ok(count) => {
                self.set_output(&format!("Installed {} {} into {}", count, what, dest.display()))
            }
            Err(e) => dialog::alert_default(&e.to_string()),
        }
    }

    pub fn launch_calculator(&mut self) {
        if !hp::is_virtual_calculator_installed(self.settings.calculator_flavor) {
            dialog::alert_default("The HP Prime virtual calculator is not installed.");
            return;
        }
        if let Err(e) = hp::launch_virtual_calculator(self.settings.calculator_flavor) {
            dialog::alert_default(&e.to_string());
        }
    }

    pub fn launch_connectivity_kit(&mut self) {
        if !hp::is_connectivity_kit_installed(self.settings.calculator_flavor) {
            dialog::alert_default("The HP Connectivity Kit is not installed.");
            return;
        }
        if let Err(e) = hp::launch_connectivity_kit(self.settings.calculator_flavor) {
            dialog::alert_default(&e.to_string());
        }
    }

    // --- Settings ---

    pub fn open_preferences(&mut self) {
        if let Some(new_settings) = show_preferences_dialog(&self.settings) {
            if let Err(e) = new_settings.save() {
                dialog::alert_default(&format!("Failed to save settings: {}", e));
                return;
            }
            self.apply_settings(new_settings);
        }
    }

    pub fn apply_settings(&mut self, new_settings: AppSettings) {
        let theme_changed = new_settings.theme_name != self.settings.theme_name;
        self.settings = new_settings;

        self.editor.set_text_size(self.settings.font_size as i32);
        self.highlight
            .set_font(Font::Courier, self.settings.font_size as i32);
        self.update_linenumber_width();

        if theme_changed {
            let name = self.settings.theme_name.clone();
            self.set_theme(&name);
        } else {
            self.highlight.refresh(&mut self.doc, &mut self.editor);
        }
        self.editor.redraw();
    }

    // --- Typing assists ---

    fn buffer_modified(&mut self, pos: i32, inserted: i32) {
        if inserted > 0 {
            if self.settings.operator_substitution_enabled {
                self.substitute_operator();
            }
            if inserted == 1 && self.settings.auto_indent_enabled {
                self.auto_indent_after_newline(pos);
            }
        }
        self.highlight.schedule(&self.sender);
        self.update_window_title();
        self.update_linenumber_width();
        self.update_status();
    }

    fn substitute_operator(&mut self) {
        let cursor = self.editor.insert_position().max(0) as usize;
        let text = buffer_text(&self.doc.buffer);
        if let Some(sub) = text_ops::operator_substitution(&text, cursor) {
            self.doc
                .buffer
                .replace(sub.start as i32, sub.end as i32, sub.glyph);
            self.editor
                .set_insert_position((sub.start + sub.glyph.len()) as i32);
        }
    }

    fn auto_indent_after_newline(&mut self, pos: i32) {
        let text = buffer_text(&self.doc.buffer);
        let pos = pos.max(0) as usize;
        if text.as_bytes().get(pos) != Some(&b'\n') {
            return;
        }
        if let Some(indent) = text_ops::auto_indent(&text, pos + 1) {
            self.doc.buffer.insert(pos as i32 + 1, &indent);
            self.editor
                .set_insert_position(pos as i32 + 1 + indent.len() as i32);
        }
    }
}
