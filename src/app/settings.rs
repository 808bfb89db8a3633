use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::Result;

/// Which HP Prime installation the Tools menu talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CalculatorFlavor {
    /// The native macOS "HP Prime.app" / "HP Connectivity Kit.app".
    #[default]
    Native,
    /// The Windows virtual calculator running under Wine.
    Wine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_theme_name")]
    pub theme_name: String,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_line_numbers")]
    pub line_numbers_enabled: bool,

    #[serde(default = "default_auto_indent")]
    pub auto_indent_enabled: bool,

    #[serde(default = "default_operator_substitution")]
    pub operator_substitution_enabled: bool,

    /// Directory holding ppl+, hpprgm, pplmin, pplref, grob, pplfont.
    #[serde(default = "default_toolchain_bin")]
    pub toolchain_bin: PathBuf,

    #[serde(default = "default_lib_path")]
    pub lib_path: PathBuf,

    #[serde(default = "default_include_path")]
    pub include_path: PathBuf,

    #[serde(default = "default_use_lib")]
    pub use_lib: bool,

    #[serde(default = "default_use_include")]
    pub use_include: bool,

    #[serde(default)]
    pub calculator_flavor: CalculatorFlavor,

    /// Last directory used in a file open/save dialog.
    #[serde(default)]
    pub last_open_directory: Option<String>,
}

fn default_theme_name() -> String {
    "Default (Dark)".to_string()
}

fn default_font_size() -> u32 {
    14
}

fn default_line_numbers() -> bool {
    true
}

fn default_auto_indent() -> bool {
    true
}

fn default_operator_substitution() -> bool {
    true
}

fn sdk_root() -> PathBuf {
    PathBuf::from("/Applications/HP/PrimeSDK")
}

fn default_toolchain_bin() -> PathBuf {
    sdk_root().join("bin")
}

fn default_lib_path() -> PathBuf {
    sdk_root().join("lib")
}

fn default_include_path() -> PathBuf {
    sdk_root().join("include")
}

fn default_use_lib() -> bool {
    true
}

fn default_use_include() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_name: default_theme_name(),
            font_size: default_font_size(),
            line_numbers_enabled: default_line_numbers(),
            auto_indent_enabled: default_auto_indent(),
            operator_substitution_enabled: default_operator_substitution(),
            toolchain_bin: default_toolchain_bin(),
            lib_path: default_lib_path(),
            include_path: default_include_path(),
            use_lib: default_use_lib(),
            use_include: default_use_include(),
            calculator_flavor: CalculatorFlavor::default(),
            last_open_directory: None,
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;
        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("primepad");
        path.push("settings.json");
        path
    }

    /// Reset lib path and its toggle to the SDK defaults.
    pub fn reset_lib(&mut self) {
        self.lib_path = default_lib_path();
        self.use_lib = true;
    }

    /// Reset include path and its toggle to the SDK defaults.
    pub fn reset_include(&mut self) {
        self.include_path = default_include_path();
        self.use_include = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme_name, "Default (Dark)");
        assert_eq!(settings.font_size, 14);
        assert!(settings.line_numbers_enabled);
        assert!(settings.auto_indent_enabled);
        assert!(settings.operator_substitution_enabled);
        assert!(settings.use_lib);
        assert!(settings.use_include);
        assert_eq!(settings.calculator_flavor, CalculatorFlavor::Native);
        assert!(settings.toolchain_bin.ends_with("bin"));
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_partial_config() {
        // Old config missing new fields gets defaults for them
        let json = r#"{"line_numbers_enabled": false}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert!(!settings.line_numbers_enabled);
        assert_eq!(settings.font_size, 14);
        assert_eq!(settings.theme_name, "Default (Dark)");
    }

    #[test]
    fn test_toolchain_paths_round_trip() {
        let settings = AppSettings {
            toolchain_bin: PathBuf::from("/opt/primesdk/bin"),
            lib_path: PathBuf::from("/opt/primesdk/lib"),
            use_lib: false,
            calculator_flavor: CalculatorFlavor::Wine,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.toolchain_bin, PathBuf::from("/opt/primesdk/bin"));
        assert!(!loaded.use_lib);
        assert_eq!(loaded.calculator_flavor, CalculatorFlavor::Wine);
    }

    #[test]
    fn test_reset_lib_and_include() {
        let mut settings = AppSettings {
            lib_path: PathBuf::from("/tmp/x"),
            use_lib: false,
            include_path: PathBuf::from("/tmp/y"),
            use_include: false,
            ..Default::default()
        };
        settings.reset_lib();
        settings.reset_include();
        assert!(settings.use_lib);
        assert!(settings.use_include);
        assert!(settings.lib_path.ends_with("lib"));
        assert!(settings.include_path.ends_with("include"));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("settings.json");
        let settings = AppSettings {
            theme_name: "Default (Light)".to_string(),
            font_size: 18,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_from_corrupt_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded, AppSettings::default());
    }
}
