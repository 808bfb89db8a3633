use fltk::dialog;

/// Everything the editor can open directly.
pub const OPEN_SOURCE_FILTER: &str = "*.{prgm,prgm+,ppl,ppl+,hpprgm}";

/// Preprocessed PPL output.
pub const PLAIN_SOURCE_FILTER: &str = "*.{prgm,ppl}";

pub fn native_open_dialog(title: &str, filter: &str, dir: Option<&str>) -> Option<String> {
    let start = dir.unwrap_or(".");
    dialog::file_chooser(title, filter, start, false).filter(|s| !s.is_empty())
}

pub fn native_save_dialog(
    title: &str,
    filter: &str,
    dir: Option<&str>,
    default_name: &str,
) -> Option<String> {
    // Pre-seeding the chooser with dir/default_name preselects the name
    let start = match dir {
        Some(d) => format!("{}/{}", d, default_name),
        None => default_name.to_string(),
    };
    dialog::file_chooser(title, filter, &start, false).filter(|s| !s.is_empty())
}
