//! Desktop environment probes and resource lookup.

use std::path::PathBuf;

/// Whether the user's desktop runs a dark appearance. Used once, to pick
/// the default theme on first launch; any probe failure counts as light.
pub fn detect_system_dark_mode() -> bool {
    dark_mode_probe()
}

#[cfg(target_os = "macos")]
fn dark_mode_probe() -> bool {
    use std::process::Command;

    // `defaults read -g AppleInterfaceStyle` prints "Dark" in dark mode
    // and exits non-zero in light mode.
    Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .map(|out| {
            out.status.success()
                && String::from_utf8_lossy(&out.stdout)
                    .to_lowercase()
                    .contains("dark")
        })
        .unwrap_or(false)
}

#[cfg(target_os = "linux")]
fn dark_mode_probe() -> bool {
    use std::process::Command;

    Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", "color-scheme"])
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).contains("prefer-dark"))
        .unwrap_or(false)
}

#[cfg(target_os = "windows")]
fn dark_mode_probe() -> bool {
    use winreg::RegKey;
    use winreg::enums::HKEY_CURRENT_USER;

    // AppsUseLightTheme: 0 = dark mode, 1 = light mode
    RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
        .and_then(|key| key.get_value::<u32, _>("AppsUseLightTheme"))
        .map(|value| value == 0)
        .unwrap_or(false)
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn dark_mode_probe() -> bool {
    false
}

/// Locate the resources directory (grammar, themes, starter template).
///
/// Checked in order: the `PRIMEPAD_RESOURCES` override, `resources/` next
/// to the executable, `resources/` in the working directory.
pub fn resources_dir() -> Option<PathBuf> {
    if let Ok(overridden) = std::env::var("PRIMEPAD_RESOURCES") {
        let path = PathBuf::from(overridden);
        if path.is_dir() {
            return Some(path);
        }
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let beside = parent.join("resources");
            if beside.is_dir() {
                return Some(beside);
            }
        }
    }

    let cwd = PathBuf::from("resources");
    if cwd.is_dir() { Some(cwd) } else { None }
}
