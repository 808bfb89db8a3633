use std::fs;
use std::path::{Path, PathBuf};

use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::messages::Message;
use crate::app::settings::AppSettings;

/// Wire up the whole menu bar. Every item just sends a `Message`; the
/// dispatch loop in main does the work.
pub fn build_menu(
    menu: &mut MenuBar,
    sender: &Sender<Message>,
    theme_names: &[String],
    templates: &[(String, PathBuf)],
    settings: &AppSettings,
) {
    // File
    menu.add_emit(
        "File/New",
        Shortcut::Ctrl | 'n',
        MenuFlag::Normal,
        *sender,
        Message::FileNew,
    );
    menu.add_emit(
        "File/Open...",
        Shortcut::Ctrl | 'o',
        MenuFlag::Normal,
        *sender,
        Message::FileOpen,
    );
    menu.add_emit(
        "File/Save",
        Shortcut::Ctrl | 's',
        MenuFlag::Normal,
        *sender,
        Message::FileSave,
    );
    menu.add_emit(
        "File/Save As...",
        Shortcut::Ctrl | Shortcut::Shift | 's',
        MenuFlag::Normal,
        *sender,
        Message::FileSaveAs,
    );
    menu.add_emit(
        "File/Revert to Saved",
        Shortcut::None,
        MenuFlag::MenuDivider,
        *sender,
        Message::FileRevert,
    );
    menu.add_emit(
        "File/Export/As PPL (.prgm)...",
        Shortcut::None,
        MenuFlag::Normal,
        *sender,
        Message::ExportPrgm,
    );
    menu.add_emit(
        "File/Export/As Package (.hpprgm)...",
        Shortcut::None,
        MenuFlag::Normal,
        *sender,
        Message::ExportHpprgm,
    );
    menu.add_emit(
        "File/Quit",
        Shortcut::Ctrl | 'q',
        MenuFlag::Normal,
        *sender,
        Message::FileQuit,
    );

    // Edit
    menu.add_emit(
        "Edit/Undo",
        Shortcut::Ctrl | 'z',
        MenuFlag::Normal,
        *sender,
        Message::EditUndo,
    );
    menu.add_emit(
        "Edit/Redo",
        Shortcut::Ctrl | Shortcut::Shift | 'z',
        MenuFlag::MenuDivider,
        *sender,
        Message::EditRedo,
    );
    menu.add_emit(
        "Edit/Cut",
        Shortcut::Ctrl | 'x',
        MenuFlag::Normal,
        *sender,
        Message::EditCut,
    );
    menu.add_emit(
        "Edit/Copy",
        Shortcut::Ctrl | 'c',
        MenuFlag::Normal,
        *sender,
        Message::EditCopy,
    );
    menu.add_emit(
        "Edit/Paste",
        Shortcut::Ctrl | 'v',
        MenuFlag::Normal,
        *sender,
        Message::EditPaste,
    );
    menu.add_emit(
        "Edit/Select All",
        Shortcut::Ctrl | 'a',
        MenuFlag::MenuDivider,
        *sender,
        Message::SelectAll,
    );
    menu.add_emit(
        "Edit/Go to Line...",
        Shortcut::Ctrl | 'g',
        MenuFlag::Normal,
        *sender,
        Message::ShowGoToLine,
    );

    // Build
    menu.add_emit(
        "Build/Build",
        Shortcut::Ctrl | 'b',
        MenuFlag::Normal,
        *sender,
        Message::Build,
    );
    menu.add_emit(
        "Build/Build & Package",
        Shortcut::Ctrl | Shortcut::Shift | 'b',
        MenuFlag::Normal,
        *sender,
        Message::BuildAndPackage,
    );
    menu.add_emit(
        "Build/Run in Calculator",
        Shortcut::Ctrl | 'r',
        MenuFlag::MenuDivider,
        *sender,
        Message::RunInCalculator,
    );
    menu.add_emit(
        "Build/Minify & Package",
        Shortcut::None,
        MenuFlag::Normal,
        *sender,
        Message::MinifyAndPackage,
    );
    menu.add_emit(
        "Build/Reformat Code",
        Shortcut::None,
        MenuFlag::Normal,
        *sender,
        Message::ReformatCode,
    );

    // Insert
    menu.add_emit(
        "Insert/Code File...",
        Shortcut::None,
        MenuFlag::Normal,
        *sender,
        Message::InsertCodeFile,
    );
    menu.add_emit(
        "Insert/Image as GROB...",
        Shortcut::None,
        MenuFlag::Normal,
        *sender,
        Message::EmbedImage,
    );
    menu.add_emit(
        "Insert/Adafruit GFX Font...",
        Shortcut::None,
        MenuFlag::Normal,
        *sender,
        Message::EmbedFont,
    );
    for (label, path) in templates {
        menu.add_emit(
            &format!("Insert/Template/{}", label),
            Shortcut::None,
            MenuFlag::Normal,
            *sender,
            Message::InsertTemplate(path.clone()),
        );
    }

    // Editor
    for name in theme_names {
        menu.add_emit(
            &format!("Editor/Theme/{}", name),
            Shortcut::None,
            MenuFlag::Radio,
            *sender,
            Message::SetTheme(name.clone()),
        );
    }
    menu.add_emit(
        "Editor/Show Line Numbers",
        Shortcut::None,
        MenuFlag::Toggle,
        *sender,
        Message::ToggleLineNumbers,
    );

    // Tools
    menu.add_emit(
        "Tools/Install Program",
        Shortcut::None,
        MenuFlag::Normal,
        *sender,
        Message::InstallProgram,
    );
    menu.add_emit(
        "Tools/Create App Bundle",
        Shortcut::None,
        MenuFlag::Normal,
        *sender,
        Message::CreateAppBundle,
    );
    menu.add_emit(
        "Tools/Archive App Bundle",
        Shortcut::None,
        MenuFlag::MenuDivider,
        *sender,
        Message::ArchiveAppBundle,
    );
    menu.add_emit(
        "Tools/Install Libraries",
        Shortcut::None,
        MenuFlag::Normal,
        *sender,
        Message::InstallLibraries,
    );
    menu.add_emit(
        "Tools/Install Fonts",
        Shortcut::None,
        MenuFlag::MenuDivider,
        *sender,
        Message::InstallFonts,
    );
    menu.add_emit(
        "Tools/Launch Virtual Calculator",
        Shortcut::None,
        MenuFlag::Normal,
        *sender,
        Message::LaunchCalculator,
    );
    menu.add_emit(
        "Tools/Launch Connectivity Kit",
        Shortcut::None,
        MenuFlag::Normal,
        *sender,
        Message::LaunchConnectivityKit,
    );

    // Help
    menu.add_emit(
        "Help/Preferences...",
        Shortcut::Ctrl | ',',
        MenuFlag::Normal,
        *sender,
        Message::OpenPreferences,
    );
    menu.add_emit(
        "Help/About PrimePad",
        Shortcut::None,
        MenuFlag::Normal,
        *sender,
        Message::ShowAbout,
    );

    // Initial checkmarks
    set_menu_check(menu, "Editor/Show Line Numbers", settings.line_numbers_enabled);
    set_menu_check(
        menu,
        &format!("Editor/Theme/{}", settings.theme_name),
        true,
    );
}

fn set_menu_check(menu: &MenuBar, path: &str, checked: bool) {
    let idx = menu.find_index(path);
    if idx >= 0 {
        if let Some(mut item) = menu.at(idx) {
            if checked {
                item.set();
            } else {
                item.clear();
            }
        }
    }
}

/// Find template programs under `resources/templates/<group>/<name>.prgm`.
/// Returns `("group/name", path)` pairs in menu order.
pub fn discover_templates(resources_dir: Option<&Path>) -> Vec<(String, PathBuf)> {
    let mut found = Vec::new();
    let Some(dir) = resources_dir else {
        return found;
    };
    let root = dir.join("templates");
    let Ok(groups) = fs::read_dir(&root) else {
        return found;
    };
    for group in groups.flatten() {
        if !group.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let group_name = group.file_name().to_string_lossy().into_owned();
        if let Ok(items) = fs::read_dir(group.path()) {
            for item in items.flatten() {
                let path = item.path();
                if path.extension().and_then(|e| e.to_str()) == Some("prgm") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        found.push((format!("{}/{}", group_name, stem), path.clone()));
                    }
                }
            }
        }
    }
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_templates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("templates");
        fs::create_dir_all(root.join("Graphics")).unwrap();
        fs::create_dir_all(root.join("Program")).unwrap();
        fs::write(root.join("Graphics/Sprite.prgm"), "X").unwrap();
        fs::write(root.join("Program/Basic.prgm"), "X").unwrap();
        fs::write(root.join("Program/notes.txt"), "X").unwrap();

        let found = discover_templates(Some(dir.path()));
        let labels: Vec<&str> = found.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Graphics/Sprite", "Program/Basic"]);
    }

    #[test]
    fn test_discover_templates_missing_dir() {
        assert!(discover_templates(None).is_empty());
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_templates(Some(dir.path())).is_empty());
    }
}
