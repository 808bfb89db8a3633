use std::path::PathBuf;

/// All messages that can be sent through the FLTK channel.
/// Each menu callback sends one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // File
    FileNew,
    FileOpen,
    FileSave,
    FileSaveAs,
    FileRevert,
    FileQuit,
    ExportPrgm,
    ExportHpprgm,

    // Edit
    EditUndo,
    EditRedo,
    EditCut,
    EditCopy,
    EditPaste,
    SelectAll,
    ShowGoToLine,

    // Build
    Build,
    BuildAndPackage,
    RunInCalculator,
    MinifyAndPackage,
    ReformatCode,

    // Insert
    InsertCodeFile,
    EmbedImage,
    EmbedFont,
    InsertTemplate(PathBuf),

    // Editor
    SetTheme(String),
    ToggleLineNumbers,

    // Tools
    InstallProgram,
    CreateAppBundle,
    ArchiveAppBundle,
    InstallLibraries,
    InstallFonts,
    LaunchCalculator,
    LaunchConnectivityKit,

    // Settings & Help
    OpenPreferences,
    ShowAbout,

    // Internal plumbing
    BufferModified { pos: i32, inserted: i32 },
    DoRehighlight,
    UpdateStatus,
}
