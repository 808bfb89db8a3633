//! Calculator-side packaging and deployment.
//!
//! The HP Prime virtual calculator and the Connectivity Kit both watch
//! `~/Documents/HP Prime/Calculators/Prime`; installing a program or an
//! app bundle means copying it there. App bundles (`.hpappdir`) are plain
//! directories: `<name>.hpapp` metadata, the packaged program renamed to
//! `<name>.hpappprgm`, and an `icon.png`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::error::{AppError, Result};
use super::settings::CalculatorFlavor;
use super::toolchain::ToolOutput;

pub const VIRTUAL_CALCULATOR_APP: &str = "/Applications/HP Prime.app";
pub const CONNECTIVITY_KIT_APP: &str = "/Applications/HP Connectivity Kit.app";

const WINE_CALCULATOR_EXE: &str =
    ".wine/drive_c/Program Files/HP/HP Prime Virtual Calculator/HPPrime.exe";
const WINE_CONNECTIVITY_KIT_EXE: &str =
    ".wine/drive_c/Program Files/HP/HP Connectivity Kit/ConnectivityKit.exe";
const WINE_APP: &str = "/Applications/Wine.app/Contents/MacOS/wine";

/// Where installed programs and app bundles go.
pub fn calculators_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents/HP Prime/Calculators/Prime")
}

fn wine_path(exe: &str) -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(exe)
}

pub fn is_virtual_calculator_installed(flavor: CalculatorFlavor) -> bool {
    match flavor {
        CalculatorFlavor::Native => Path::new(VIRTUAL_CALCULATOR_APP).exists(),
        CalculatorFlavor::Wine => wine_path(WINE_CALCULATOR_EXE).exists(),
    }
}

pub fn is_connectivity_kit_installed(flavor: CalculatorFlavor) -> bool {
    match flavor {
        CalculatorFlavor::Native => Path::new(CONNECTIVITY_KIT_APP).exists(),
        CalculatorFlavor::Wine => wine_path(WINE_CONNECTIVITY_KIT_EXE).exists(),
    }
}

pub fn program_file_exists(dir: &Path, name: &str) -> bool {
    dir.join(format!("{}.hpprgm", name)).is_file()
}

pub fn application_directory_exists(dir: &Path, name: &str) -> bool {
    dir.join(format!("{}.hpappdir", name)).is_dir()
}

/// Optional bundle ingredients shipped with the editor.
#[derive(Debug, Clone, Default)]
pub struct BundleResources {
    pub template_hpapp: Option<PathBuf>,
    pub fallback_icon: Option<PathBuf>,
}

impl BundleResources {
    /// Locate the ingredients inside a resources directory, when present.
    pub fn locate(resources_dir: Option<&Path>) -> Self {
        let mut found = Self::default();
        if let Some(dir) = resources_dir {
            let template = dir.join("template.hpapp");
            if template.is_file() {
                found.template_hpapp = Some(template);
            }
            let icon = dir.join("icon.png");
            if icon.is_file() {
                found.fallback_icon = Some(icon);
            }
        }
        found
    }
}

/// Create `<name>.hpappdir` next to the built `<name>.hpprgm` in `dir`.
/// An existing bundle is left alone.
pub fn create_application_directory(
    dir: &Path,
    name: &str,
    resources: &BundleResources,
) -> Result<PathBuf> {
    let bundle = dir.join(format!("{}.hpappdir", name));
    if bundle.is_dir() {
        return Ok(bundle);
    }
    fs::create_dir_all(&bundle)?;

    if let Some(ref template) = resources.template_hpapp {
        fs::copy(template, bundle.join(format!("{}.hpapp", name)))?;
    }

    let program = dir.join(format!("{}.hpprgm", name));
    if !program.is_file() {
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found; build the program first", program.display()),
        )));
    }
    fs::copy(&program, bundle.join(format!("{}.hpappprgm", name)))?;

    let sibling_icon = dir.join("icon.png");
    if sibling_icon.is_file() {
        fs::copy(&sibling_icon, bundle.join("icon.png"))?;
    } else if let Some(ref fallback) = resources.fallback_icon {
        fs::copy(fallback, bundle.join("icon.png"))?;
    }

    Ok(bundle)
}

pub fn remove_application_directory(dir: &Path, name: &str) -> Result<()> {
    fs::remove_dir_all(dir.join(format!("{}.hpappdir", name)))?;
    Ok(())
}

/// Zip `<name>.hpappdir` into `<name>.hpappdir.zip` (or `destination`),
/// replacing any existing archive. Finder droppings are excluded.
pub fn archive_application_directory(
    dir: &Path,
    name: &str,
    destination: Option<&Path>,
) -> Result<ToolOutput> {
    let archive: PathBuf = match destination {
        Some(dest) => {
            let _ = fs::remove_file(dest);
            dest.to_path_buf()
        }
        None => {
            let default = dir.join(format!("{}.hpappdir.zip", name));
            let _ = fs::remove_file(&default);
            default
        }
    };

    let output = Command::new("zip")
        .arg("-r")
        .arg(&archive)
        .arg(format!("{}.hpappdir", name))
        .arg("-x")
        .arg("*.DS_Store")
        .current_dir(dir)
        .output()
        .map_err(|e| AppError::tool("zip", format!("could not run: {}", e)))?;

    let out = ToolOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if !output.status.success() {
        return Err(AppError::tool("zip", out.stderr.trim().to_string()));
    }
    Ok(out)
}

/// Copy `<name>.hpprgm` from `dir` into `dest_dir`, replacing any existing
/// install.
pub fn install_program_file_into(dest_dir: &Path, dir: &Path, name: &str) -> Result<PathBuf> {
    let source = dir.join(format!("{}.hpprgm", name));
    fs::create_dir_all(dest_dir)?;
    let destination = dest_dir.join(format!("{}.hpprgm", name));
    if destination.exists() {
        fs::remove_file(&destination)?;
    }
    fs::copy(&source, &destination)?;
    Ok(destination)
}

pub fn install_program_file(dir: &Path, name: &str) -> Result<PathBuf> {
    install_program_file_into(&calculators_dir(), dir, name)
}

fn copy_dir_recursive(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Copy `<name>.hpappdir` from `dir` into `dest_dir`, replacing any
/// existing install.
pub fn install_application_directory_into(
    dest_dir: &Path,
    dir: &Path,
    name: &str,
) -> Result<PathBuf> {
    let source = dir.join(format!("{}.hpappdir", name));
    fs::create_dir_all(dest_dir)?;
    let destination = dest_dir.join(format!("{}.hpappdir", name));
    if destination.exists() {
        fs::remove_dir_all(&destination)?;
    }
    copy_dir_recursive(&source, &destination)?;
    Ok(destination)
}

pub fn install_application_directory(dir: &Path, name: &str) -> Result<PathBuf> {
    install_application_directory_into(&calculators_dir(), dir, name)
}

/// The Connectivity Kit's content folder, when the kit's document folder
/// exists at all.
pub fn connectivity_kit_content_dir() -> Option<PathBuf> {
    let kit = dirs::home_dir()?.join("Documents/HP Connectivity Kit");
    kit.is_dir().then(|| kit.join("Content"))
}

/// Copy every `.hpprgm` in `src_dir` into `dest_dir` (library and font
/// packages shipped with the editor), replacing existing copies. Returns
/// how many files were installed.
pub fn install_support_files(src_dir: &Path, dest_dir: &Path) -> Result<usize> {
    fs::create_dir_all(dest_dir)?;
    let mut packages: Vec<PathBuf> = fs::read_dir(src_dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("hpprgm"))
        .collect();
    packages.sort();

    for package in &packages {
        let Some(name) = package.file_name() else {
            continue;
        };
        let destination = dest_dir.join(name);
        if destination.exists() {
            fs::remove_file(&destination)?;
        }
        fs::copy(package, &destination)?;
    }
    Ok(packages.len())
}

/// Quit a running calculator instance so a relaunch picks up the freshly
/// installed program. Best effort.
fn terminate(process_name: &str) {
    #[cfg(unix)]
    {
        let _ = Command::new("pkill").arg("-x").arg(process_name).status();
    }
    #[cfg(not(unix))]
    {
        let _ = process_name;
    }
}

pub fn launch_virtual_calculator(flavor: CalculatorFlavor) -> Result<()> {
    match flavor {
        CalculatorFlavor::Native => {
            terminate("HP Prime");
            open::that(VIRTUAL_CALCULATOR_APP)
                .map_err(|e| AppError::tool("HP Prime", e.to_string()))
        }
        CalculatorFlavor::Wine => {
            terminate("HPPrime.exe");
            Command::new(WINE_APP)
                .arg(wine_path(WINE_CALCULATOR_EXE))
                .spawn()
                .map(|_| ())
                .map_err(|e| AppError::tool("wine", e.to_string()))
        }
    }
}

pub fn launch_connectivity_kit(flavor: CalculatorFlavor) -> Result<()> {
    match flavor {
        CalculatorFlavor::Native => open::that(CONNECTIVITY_KIT_APP)
            .map_err(|e| AppError::tool("HP Connectivity Kit", e.to_string())),
        CalculatorFlavor::Wine => Command::new(WINE_APP)
            .arg(wine_path(WINE_CONNECTIVITY_KIT_EXE))
            .spawn()
            .map(|_| ())
            .map_err(|e| AppError::tool("wine", e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_program(dir: &Path, name: &str) {
        fs::write(dir.join(format!("{}.hpprgm", name)), b"\x00binary").unwrap();
    }

    #[test]
    fn test_create_application_directory_layout() {
        let work = tempfile::tempdir().unwrap();
        let res = tempfile::tempdir().unwrap();
        make_program(work.path(), "Mandelbrot");
        fs::write(res.path().join("template.hpapp"), b"template").unwrap();
        fs::write(res.path().join("icon.png"), b"png").unwrap();

        let resources = BundleResources::locate(Some(res.path()));
        let bundle =
            create_application_directory(work.path(), "Mandelbrot", &resources).unwrap();

        assert!(bundle.ends_with("Mandelbrot.hpappdir"));
        assert!(bundle.join("Mandelbrot.hpapp").is_file());
        assert!(bundle.join("Mandelbrot.hpappprgm").is_file());
        assert!(bundle.join("icon.png").is_file());
        assert!(application_directory_exists(work.path(), "Mandelbrot"));
    }

    #[test]
    fn test_create_application_directory_prefers_sibling_icon() {
        let work = tempfile::tempdir().unwrap();
        let res = tempfile::tempdir().unwrap();
        make_program(work.path(), "App");
        fs::write(res.path().join("icon.png"), b"fallback").unwrap();
        fs::write(work.path().join("icon.png"), b"sibling").unwrap();

        let resources = BundleResources::locate(Some(res.path()));
        let bundle = create_application_directory(work.path(), "App", &resources).unwrap();
        assert_eq!(fs::read(bundle.join("icon.png")).unwrap(), b"sibling");
    }

    #[test]
    fn test_create_application_directory_without_program_fails() {
        let work = tempfile::tempdir().unwrap();
        let err =
            create_application_directory(work.path(), "Nope", &BundleResources::default())
                .unwrap_err();
        assert!(err.to_string().contains("build the program first"));
    }

    #[test]
    fn test_existing_bundle_is_left_alone() {
        let work = tempfile::tempdir().unwrap();
        make_program(work.path(), "App");
        let bundle = work.path().join("App.hpappdir");
        fs::create_dir(&bundle).unwrap();
        fs::write(bundle.join("keep.txt"), b"x").unwrap();

        create_application_directory(work.path(), "App", &BundleResources::default()).unwrap();
        assert!(bundle.join("keep.txt").is_file());
        assert!(!bundle.join("App.hpappprgm").exists());
    }

    #[test]
    fn test_install_program_file_replaces_existing() {
        let work = tempfile::tempdir().unwrap();
        let calc = tempfile::tempdir().unwrap();
        make_program(work.path(), "Prog");
        fs::write(calc.path().join("Prog.hpprgm"), b"old").unwrap();

        let dest = install_program_file_into(calc.path(), work.path(), "Prog").unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"\x00binary");
        assert!(program_file_exists(calc.path(), "Prog"));
    }

    #[test]
    fn test_install_application_directory_copies_tree() {
        let work = tempfile::tempdir().unwrap();
        let calc = tempfile::tempdir().unwrap();
        let bundle = work.path().join("App.hpappdir");
        fs::create_dir_all(bundle.join("nested")).unwrap();
        fs::write(bundle.join("App.hpappprgm"), b"prgm").unwrap();
        fs::write(bundle.join("nested/data.bin"), b"d").unwrap();

        let dest = install_application_directory_into(calc.path(), work.path(), "App").unwrap();
        assert!(dest.join("App.hpappprgm").is_file());
        assert!(dest.join("nested/data.bin").is_file());
    }

    #[test]
    fn test_install_support_files_copies_packages() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let content = dest.path().join("Content");
        fs::write(src.path().join("HP.hpprgm"), b"lib").unwrap();
        fs::write(src.path().join("GROB.hpprgm"), b"lib").unwrap();
        fs::write(src.path().join("README.txt"), b"skip").unwrap();

        let installed = install_support_files(src.path(), &content).unwrap();
        assert_eq!(installed, 2);
        assert!(content.join("HP.hpprgm").is_file());
        assert!(content.join("GROB.hpprgm").is_file());
        assert!(!content.join("README.txt").exists());
    }

    #[test]
    fn test_install_support_files_replaces_existing() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        fs::write(src.path().join("HP.hpprgm"), b"new").unwrap();
        fs::write(dest.path().join("HP.hpprgm"), b"old").unwrap();

        install_support_files(src.path(), dest.path()).unwrap();
        assert_eq!(fs::read(dest.path().join("HP.hpprgm")).unwrap(), b"new");
    }

    #[test]
    fn test_bundle_resources_locate_missing_dir() {
        let found = BundleResources::locate(None);
        assert!(found.template_hpapp.is_none());
        assert!(found.fallback_icon.is_none());
    }
}
