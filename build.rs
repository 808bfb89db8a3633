fn main() {
    // Embed Windows icon
    #[cfg(target_os = "windows")]
    {
        if std::path::Path::new("primepad.ico").exists() {
            let mut res = winres::WindowsResource::new();
            res.set_icon("primepad.ico");
            res.compile().unwrap();
        }
    }
}
