//! External editor integration for `cadence config --edit`.

use anyhow::{Result, anyhow};
use std::env;
use std::path::Path;
use std::process::Command;

/// Opens a file path in the user's preferred editor.
///
/// Editor priority:
/// 1) `$VISUAL`
/// 2) `$EDITOR`
/// 3) `nvim`
/// 4) `vim`
/// 5) `vi`
pub fn edit_file_with_system_editor(path: &Path) -> Result<()> {
    let mut candidates = Vec::new();

    if let Some(visual) = env::var_os("VISUAL") {
        let visual = visual.to_string_lossy().trim().to_owned();
        if !visual.is_empty() {
            candidates.push(visual);
        }
    }

    if let Some(editor) = env::var_os("EDITOR") {
        let editor = editor.to_string_lossy().trim().to_owned();
        if !editor.is_empty() {
            candidates.push(editor);
        }
    }

    candidates.extend(["nvim".to_owned(), "vim".to_owned(), "vi".to_owned()]);

    for command in candidates {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            continue;
        };
        let args: Vec<String> = parts.map(|part| part.to_owned()).collect();

        let status = Command::new(program).args(&args).arg(path).status();
        match status {
            Ok(status) => {
                if status.success() {
                    return Ok(());
                }
                return Err(anyhow!(
                    "editor `{}` exited with status {}",
                    command,
                    status
                        .code()
                        .map(|code| code.to_string())
                        .unwrap_or_else(|| "unknown".to_owned())
                ));
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                continue;
            }
            Err(err) => {
                return Err(anyhow!("failed to launch editor `{}`: {}", command, err));
            }
        }
    }

    Err(anyhow!(
        "no editor found (tried $VISUAL, $EDITOR, nvim, vim, vi)"
    ))
}
