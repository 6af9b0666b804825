use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::Error;

pub const DEFAULT_EDITOR: &str = "vim";

/// A pending editor invocation on one record file. The line hint is only
/// passed along when the editor came from `$EDITOR`; the vim fallback
/// opens at the top of the file.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSession {
    program: String,
    line_hint: Option<usize>,
    path: PathBuf,
}

impl EditorSession {
    /// Build a session from `$EDITOR`, falling back to vim when the
    /// variable is unset or blank.
    pub fn from_env(path: &Path, line: usize) -> Self {
        Self::from_editor_var(env::var("EDITOR").ok().as_deref(), path, line)
    }

    fn from_editor_var(var: Option<&str>, path: &Path, line: usize) -> Self {
        match var {
            Some(editor) if !editor.trim().is_empty() => Self {
                program: editor.to_string(),
                line_hint: Some(line),
                path: path.to_path_buf(),
            },
            _ => Self {
                program: DEFAULT_EDITOR.to_string(),
                line_hint: None,
                path: path.to_path_buf(),
            },
        }
    }

    /// Run the editor to completion with the terminal handed through.
    pub fn run(self) -> Result<(), Error> {
        let mut cmd = Command::new(&self.program);
        if let Some(line) = self.line_hint {
            cmd.arg(format!("+{line}"));
        }
        let status = cmd
            .arg(&self.path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|err| Error::Editor {
                editor: self.program.clone(),
                reason: err.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Editor {
                editor: self.program,
                reason: status.to_string(),
            })
        }
    }
}
