use fltk::{app, enums::Event, enums::Font, prelude::*};

use prime_pad::app::document::Document;
use prime_pad::app::highlight::HighlightController;
use prime_pad::app::messages::Message;
use prime_pad::app::platform;
use prime_pad::app::settings::AppSettings;
use prime_pad::app::state::AppState;
use prime_pad::app::syntax::grammar::{self, Grammar};
use prime_pad::app::syntax::theme;
use prime_pad::app::temp::TempWorkspace;
use prime_pad::ui::main_window::build_main_window;
use prime_pad::ui::menu::{build_menu, discover_templates};

#[cfg(not(target_os = "windows"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn load_grammar(resources: Option<&std::path::Path>) -> Grammar {
    if let Some(path) = resources
        .map(|d| d.join("Language.xpgrammar"))
        .filter(|p| p.is_file())
    {
        match Grammar::load(&path) {
            Ok(g) => return g,
            Err(e) => eprintln!("Falling back to bundled grammar: {}", e),
        }
    }
    grammar::builtin_grammar()
}

fn main() {
    let first_run = !AppSettings::get_config_path().exists();
    let mut settings = AppSettings::load();
    if first_run && !platform::detect_system_dark_mode() {
        settings.theme_name = "Default (Light)".to_string();
    }
    let resources = platform::resources_dir();

    let fltk_app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let mut widgets = build_main_window(settings.font_size as i32);

    let grammar = load_grammar(resources.as_deref());
    let theme_dir = resources.as_ref().map(|d| d.join("themes"));
    let themes = theme::load_all_themes(theme_dir.as_deref());

    let font_size = settings.font_size as i32;
    let highlight = HighlightController::new(
        grammar,
        themes,
        &settings.theme_name,
        Font::Courier,
        font_size,
    )
    .unwrap_or_else(|e| {
        // A broken user grammar must not keep the editor from starting
        eprintln!("Grammar rejected ({}), using the bundled one.", e);
        HighlightController::new(
            grammar::builtin_grammar(),
            theme::builtin_themes(),
            &settings.theme_name,
            Font::Courier,
            font_size,
        )
        .expect("bundled grammar and themes are valid")
    });

    let templates = discover_templates(resources.as_deref());
    build_menu(
        &mut widgets.menu,
        &sender,
        &highlight.theme_names(),
        &templates,
        &settings,
    );

    let doc = Document::new(sender);
    widgets.text_editor.set_buffer(doc.buffer.clone());

    let temp = TempWorkspace::new().expect("failed to create temp directory");

    let mut state = AppState::new(
        doc,
        widgets.text_editor.clone(),
        widgets.output.clone(),
        widgets.output_buffer.clone(),
        widgets.status_bar.clone(),
        widgets.wind.clone(),
        widgets.menu.clone(),
        sender,
        settings,
        highlight,
        temp,
        resources,
    );

    state.apply_theme_colors();
    state.highlight.refresh(&mut state.doc, &mut state.editor);
    state.update_linenumber_width();

    // Open a file given on the command line, otherwise show the starter
    match std::env::args().nth(1) {
        Some(path) => state.open_file(std::path::Path::new(&path)),
        None => state.load_starter_template(),
    }
    state.update_window_title();

    // Keep the Line/Col readout tracking the caret
    {
        let mut editor = state.editor.clone();
        editor.handle(move |_, ev| {
            match ev {
                Event::KeyUp | Event::Released | Event::Drag => {
                    sender.send(Message::UpdateStatus);
                }
                _ => {}
            }
            false
        });
    }

    // Route window close through the same quit confirmation as File/Quit
    widgets.wind.set_callback(move |_| {
        if app::event() == Event::Close {
            sender.send(Message::FileQuit);
        }
    });

    widgets.wind.show();

    #[cfg(target_os = "windows")]
    prime_pad::ui::editor_theme::set_windows_titlebar_theme(
        &widgets.wind,
        state.highlight.theme().is_dark(),
    );

    while fltk_app.wait() {
        if let Some(msg) = receiver.recv() {
            if !state.handle(msg) {
                fltk_app.quit();
            }
        }
    }
}
