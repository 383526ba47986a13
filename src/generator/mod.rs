//! Client code generation and output directory handling

pub mod rust;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, error, info, warn};

use crate::errors::{ErrorContext, ErrorExt, GeneratorResult};

pub use self::rust::RustRenderer;

/// How a renderer writes its output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Run the formatter over the written files
    pub format_code: bool,
    /// Client crate root; when set, `cargo fmt` runs against its manifest
    pub crate_folder: Option<PathBuf>,
    /// Wipe the output directory before writing
    pub delete_folder_before_rendering: bool,
    /// Toolchain argument for the formatter, e.g. `+nightly-2024-07-25`
    pub toolchain: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format_code: true,
            crate_folder: None,
            delete_folder_before_rendering: true,
            toolchain: None,
        }
    }
}

/// Generated files in memory, keyed by relative path
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderMap {
    files: BTreeMap<PathBuf, String>,
}

impl RenderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.keys()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every file under `dir`, creating directories as needed
    pub fn write(&self, dir: &Path) -> GeneratorResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.files.len());

        let total = self.files.len();
        for (relative, content) in &self.files {
            let path = dir.join(relative);
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    debug!("Creating directory: {}", parent.display());
                    fs::create_dir_all(parent).with_context(
                        ErrorContext::new("generator", "create directory").with_path(parent),
                    )?;
                }
            }

            if let Err(e) = fs::write(&path, content) {
                error!("Failed to write file: {} - Error: {}", path.display(), e);
                return Err(e).with_context(
                    ErrorContext::new("generator", "write file")
                        .with_path(&path)
                        .with_details(format!("{} of {} files written", written.len(), total)),
                );
            }
            debug!("Wrote {} bytes to {}", content.len(), path.display());
            written.push(path);
        }

        info!("Wrote {} files to {}", written.len(), dir.display());
        Ok(written)
    }
}

/// Delete `dir` with everything in it, then create it empty
pub fn reset_directory(dir: &Path) -> GeneratorResult<()> {
    if dir.exists() {
        info!("Deleting directory: {}", dir.display());
        fs::remove_dir_all(dir)
            .with_context(ErrorContext::new("generator", "delete output directory").with_path(dir))?;
    }
    fs::create_dir_all(dir)
        .with_context(ErrorContext::new("generator", "create output directory").with_path(dir))?;
    Ok(())
}

/// Command line that formats the written files
fn formatter_command(options: &RenderOptions, files: &[PathBuf]) -> Command {
    match &options.crate_folder {
        Some(crate_folder) => {
            let mut command = Command::new("cargo");
            if let Some(toolchain) = &options.toolchain {
                command.arg(toolchain);
            }
            command
                .arg("fmt")
                .arg("--manifest-path")
                .arg(crate_folder.join("Cargo.toml"));
            command
        }
        None => {
            let mut command = Command::new("rustfmt");
            if let Some(toolchain) = &options.toolchain {
                command.arg(toolchain);
            }
            command.args(["--edition", "2021"]).args(files);
            command
        }
    }
}

/// Run the formatter. A failing or missing formatter only logs a warning:
/// the unformatted files are still valid output.
pub fn format_generated(options: &RenderOptions, files: &[PathBuf]) {
    if let Some(crate_folder) = &options.crate_folder {
        if !crate_folder.join("Cargo.toml").exists() {
            warn!(
                "No Cargo.toml in {}, skipping formatting",
                crate_folder.display()
            );
            return;
        }
    }

    let mut command = formatter_command(options, files);
    debug!("Running formatter: {:?}", command);
    match command.output() {
        Ok(output) if output.status.success() => info!("Formatted generated code"),
        Ok(output) => warn!(
            "Formatter exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ),
        Err(e) => warn!("Could not run formatter: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_nested_directories() {
        let dir = tempdir().unwrap();
        let mut map = RenderMap::new();
        map.add("mod.rs", "pub mod accounts;\n");
        map.add("accounts/config.rs", "pub struct Config;\n");

        let written = map.write(dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("accounts/config.rs")).unwrap(),
            "pub struct Config;\n"
        );
    }

    #[test]
    fn test_write_failure_reports_progress() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("mod.rs")).unwrap();
        let mut map = RenderMap::new();
        map.add("mod.rs", "pub mod accounts;\n");

        let err = map.write(dir.path()).unwrap_err();
        assert!(matches!(err, crate::errors::GeneratorError::Io(_)));
        let message = err.to_string();
        assert!(message.contains("In generator while write file"), "{message}");
        assert!(message.contains("(0 of 1 files written)"), "{message}");
    }

    #[test]
    fn test_reset_directory_removes_stale_files() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("generated");
        fs::create_dir_all(out.join("old")).unwrap();
        fs::write(out.join("old/stale.rs"), "// hand edit").unwrap();

        reset_directory(&out).unwrap();
        assert!(out.exists());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_formatter_command_for_crate() {
        let options = RenderOptions {
            format_code: true,
            crate_folder: Some(PathBuf::from("/work/client")),
            delete_folder_before_rendering: true,
            toolchain: Some("+nightly-2024-07-25".to_string()),
        };
        let command = formatter_command(&options, &[]);
        let args: Vec<_> = command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(command.get_program(), "cargo");
        assert_eq!(
            args,
            vec!["+nightly-2024-07-25", "fmt", "--manifest-path", "/work/client/Cargo.toml"]
        );
    }

    #[test]
    fn test_formatter_command_for_loose_files() {
        let options = RenderOptions::default();
        let command = formatter_command(&options, &[PathBuf::from("/tmp/mod.rs")]);
        let args: Vec<_> = command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(command.get_program(), "rustfmt");
        assert_eq!(args, vec!["--edition", "2021", "/tmp/mod.rs"]);
    }
}
