//! Rewriting the embedded title of Matroska files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::TitleEditError;

pub const DEFAULT_MKVPROPEDIT: &str = "mkvpropedit";

/// Sets the title tag of a media file.
pub trait TitleEditor {
    fn set_title(&self, file: &Path, title: &str) -> Result<(), TitleEditError>;
}

/// Runs `mkvpropedit` against the file. Blocks until the tool exits.
#[derive(Debug, Clone)]
pub struct MkvPropEdit {
    program: PathBuf,
}

impl MkvPropEdit {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }
}

impl TitleEditor for MkvPropEdit {
    fn set_title(&self, file: &Path, title: &str) -> Result<(), TitleEditError> {
        let args = title_args(file, title);
        tracing::debug!("Executing {} {:?}", self.program.display(), args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| TitleEditError::Spawn {
                tool: self.tool_name(),
                source,
            })?;

        if !output.status.success() {
            tracing::debug!(
                "{} stdout: {} stderr: {}",
                self.tool_name(),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
            return Err(TitleEditError::Failed {
                tool: self.tool_name(),
                status: output.status,
            });
        }

        Ok(())
    }
}

/// Arguments for `mkvpropedit`. An empty title deletes the tag.
pub fn title_args(file: &Path, title: &str) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![file.into(), "--edit".into(), "info".into()];
    if title.is_empty() {
        args.push("--delete".into());
        args.push("title".into());
    } else {
        args.push("--set".into());
        args.push(format!("title={}", title).into());
    }
    args
}
