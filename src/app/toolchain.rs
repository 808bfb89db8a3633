//! Subprocess wrappers for the PrimeSDK command-line tools.
//!
//! The editor never parses, compiles, or packs anything itself: `ppl+`,
//! `hpprgm`, `pplmin`, `pplref`, `grob` and `pplfont` do all of that. Every
//! call here is synchronous: spawn, wait, capture stdout/stderr. A non-zero
//! exit or a missing expected output file becomes an `AppError::Tool`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::error::{AppError, Result};
use super::settings::AppSettings;

/// Captured transcript of one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Combined text for the output pane.
    pub fn transcript(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

pub struct Toolchain {
    bin_dir: PathBuf,
    lib_path: Option<PathBuf>,
    include_path: Option<PathBuf>,
}

impl Toolchain {
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
            lib_path: None,
            include_path: None,
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            bin_dir: settings.toolchain_bin.clone(),
            lib_path: settings.use_lib.then(|| settings.lib_path.clone()),
            include_path: settings.use_include.then(|| settings.include_path.clone()),
        }
    }

    pub fn tool_path(&self, tool: &str) -> PathBuf {
        self.bin_dir.join(tool)
    }

    fn run(&self, tool: &str, args: &[OsString]) -> Result<ToolOutput> {
        let output = Command::new(self.tool_path(tool))
            .args(args)
            .output()
            .map_err(|e| AppError::tool(tool, format!("could not run: {}", e)))?;

        let out = ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !output.status.success() {
            let detail = if out.stderr.trim().is_empty() {
                format!("{}", output.status)
            } else {
                out.stderr.trim().to_string()
            };
            return Err(AppError::tool(tool, detail));
        }
        Ok(out)
    }

    /// Check that a tool claimed to write its output file and actually did.
    fn expect_output(tool: &str, path: &Path) -> Result<()> {
        if path.exists() {
            Ok(())
        } else {
            Err(AppError::tool(
                tool,
                format!("completed, but output file not found: {}", path.display()),
            ))
        }
    }

    /// Arguments for the `ppl+` preprocessor.
    fn preprocess_args(&self, input: &Path, output: Option<&Path>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![input.into()];
        if let Some(ref lib) = self.lib_path {
            let mut flag = OsString::from("-L");
            flag.push(lib);
            args.push(flag);
        }
        if let Some(ref include) = self.include_path {
            let mut flag = OsString::from("-I");
            flag.push(include);
            args.push(flag);
        }
        if let Some(out) = output {
            args.push("-o".into());
            args.push(out.into());
        }
        args
    }

    /// Preprocess a `.prgm+`/`.ppl+` source into plain PPL.
    pub fn preprocess(&self, input: &Path, output: Option<&Path>) -> Result<ToolOutput> {
        let result = self.run("ppl+", &self.preprocess_args(input, output))?;
        if let Some(out) = output {
            Self::expect_output("ppl+", out)?;
        }
        Ok(result)
    }

    /// Package a `.prgm` into the calculator-loadable `.hpprgm` binary.
    pub fn package(&self, input: &Path, output: Option<&Path>) -> Result<ToolOutput> {
        let mut args: Vec<OsString> = vec![input.into()];
        if let Some(out) = output {
            args.push("-o".into());
            args.push(out.into());
        }
        let result = self.run("hpprgm", &args)?;
        if let Some(out) = output {
            Self::expect_output("hpprgm", out)?;
        }
        Ok(result)
    }

    /// Decode an `.hpprgm`/`.hpappprgm` binary back into source text.
    pub fn decode_program(&self, input: &Path) -> Result<String> {
        let args: Vec<OsString> = vec![input.into(), "-o".into(), "/dev/stdout".into()];
        let out = self.run("hpprgm", &args)?;
        if out.stdout.is_empty() {
            return Err(AppError::tool("hpprgm", "produced no output"));
        }
        Ok(out.stdout)
    }

    /// Minify PPL source into `output`.
    pub fn minify(&self, input: &Path, output: &Path) -> Result<ToolOutput> {
        let args: Vec<OsString> = vec![input.into(), "-o".into(), output.into()];
        let result = self.run("pplmin", &args)?;
        Self::expect_output("pplmin", output)?;
        Ok(result)
    }

    /// Pretty-print PPL source, returning the reformatted text.
    pub fn reformat(&self, input: &Path) -> Result<String> {
        let args: Vec<OsString> = vec![input.into()];
        let out = self.run("pplref", &args)?;
        if out.stdout.is_empty() {
            return Err(AppError::tool("pplref", "produced no output"));
        }
        Ok(out.stdout)
    }

    /// Convert a bitmap image into embeddable PPL graphics code.
    pub fn image_to_code(&self, input: &Path) -> Result<String> {
        let args: Vec<OsString> = vec![input.into(), "-o".into(), "/dev/stdout".into()];
        Ok(self.run("grob", &args)?.stdout)
    }

    /// Convert an Adafruit GFX font header into embeddable PPL font code.
    pub fn font_to_code(&self, input: &Path) -> Result<String> {
        let args: Vec<OsString> = vec![
            input.into(),
            "-o".into(),
            "/dev/stdout".into(),
            "--ppl".into(),
        ];
        Ok(self.run("pplfont", &args)?.stdout)
    }

    /// Minify `input` through a sibling `~name` temp file, package the
    /// result as `name.hpprgm`, then drop the temp file.
    pub fn compress_program(&self, input: &Path) -> Result<ToolOutput> {
        let file_name = input
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::tool("pplmin", "input has no file name"))?;
        let parent = input.parent().unwrap_or_else(|| Path::new("."));
        let temp = parent.join(format!("~{}", file_name));

        self.minify(input, &temp)?;

        let packaged = self.package(&temp, Some(&input.with_extension("hpprgm")));
        let _ = fs::remove_file(&temp);
        packaged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_path_joins_bin_dir() {
        let tc = Toolchain::new("/opt/sdk/bin");
        assert_eq!(tc.tool_path("ppl+"), PathBuf::from("/opt/sdk/bin/ppl+"));
    }

    #[test]
    fn test_preprocess_args_full() {
        let mut tc = Toolchain::new("/sdk/bin");
        tc.lib_path = Some(PathBuf::from("/sdk/lib"));
        tc.include_path = Some(PathBuf::from("/sdk/include"));
        let args = tc.preprocess_args(Path::new("in.prgm+"), Some(Path::new("out.prgm")));
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec!["in.prgm+", "-L/sdk/lib", "-I/sdk/include", "-o", "out.prgm"]
        );
    }

    #[test]
    fn test_preprocess_args_respects_toggles() {
        let settings = AppSettings {
            use_lib: false,
            use_include: false,
            ..Default::default()
        };
        let tc = Toolchain::from_settings(&settings);
        let args = tc.preprocess_args(Path::new("in.prgm+"), None);
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_missing_tool_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let tc = Toolchain::new(dir.path());
        let err = tc.reformat(Path::new("x.prgm")).unwrap_err();
        assert!(err.to_string().contains("pplref"));
    }

    #[test]
    fn test_transcript_combines_streams() {
        let out = ToolOutput {
            stdout: "ok".to_string(),
            stderr: String::new(),
        };
        assert_eq!(out.transcript(), "ok");

        let out = ToolOutput {
            stdout: "a".to_string(),
            stderr: "b".to_string(),
        };
        assert_eq!(out.transcript(), "a\nb");
    }

    #[cfg(unix)]
    mod fake_tools {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn install_fake(dir: &Path, name: &str, script: &str) {
            let path = dir.join(name);
            fs::write(&path, script).unwrap();
            let mut perms = fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms).unwrap();
        }

        #[test]
        fn test_captures_stdout() {
            let dir = tempfile::tempdir().unwrap();
            install_fake(dir.path(), "pplref", "#!/bin/sh\necho REFORMATTED\n");
            let tc = Toolchain::new(dir.path());
            let text = tc.reformat(Path::new("x.prgm")).unwrap();
            assert_eq!(text, "REFORMATTED\n");
        }

        #[test]
        fn test_nonzero_exit_reports_stderr() {
            let dir = tempfile::tempdir().unwrap();
            install_fake(
                dir.path(),
                "ppl+",
                "#!/bin/sh\necho 'syntax error on line 3' >&2\nexit 1\n",
            );
            let tc = Toolchain::new(dir.path());
            let err = tc.preprocess(Path::new("x.prgm+"), None).unwrap_err();
            assert!(err.to_string().contains("syntax error on line 3"));
        }

        #[test]
        fn test_missing_output_file_is_error() {
            let dir = tempfile::tempdir().unwrap();
            // Claims success but writes nothing
            install_fake(dir.path(), "pplmin", "#!/bin/sh\nexit 0\n");
            let tc = Toolchain::new(dir.path());
            let err = tc
                .minify(Path::new("x.prgm"), &dir.path().join("out.prgm"))
                .unwrap_err();
            assert!(err.to_string().contains("output file not found"));
        }

        #[test]
        fn test_compress_program_cleans_temp() {
            let dir = tempfile::tempdir().unwrap();
            let work = tempfile::tempdir().unwrap();
            let input = work.path().join("prog.prgm");
            fs::write(&input, "BEGIN END;").unwrap();

            // pplmin copies input to output, hpprgm writes the packaged file
            install_fake(dir.path(), "pplmin", "#!/bin/sh\ncp \"$1\" \"$3\"\n");
            install_fake(dir.path(), "hpprgm", "#!/bin/sh\ncp \"$1\" \"$3\"\n");

            let tc = Toolchain::new(dir.path());
            tc.compress_program(&input).unwrap();

            assert!(work.path().join("prog.hpprgm").exists());
            assert!(!work.path().join("~prog.prgm").exists());
        }
    }
}
