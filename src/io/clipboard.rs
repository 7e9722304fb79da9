use std::io::Write;
use std::process::{Command, Stdio};

use crate::ops::emit::{ClipboardError, ClipboardSink};

/// Copies text by piping it into a clipboard program (pbcopy, wl-copy, xclip)
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    /// Program followed by its arguments; None when nothing suitable was found
    command: Option<Vec<String>>,
}

impl SystemClipboard {
    /// Use the configured command, or pick one for the current platform
    pub fn new(configured: Option<&[String]>) -> Self {
        let command = match configured {
            Some(cmd) if !cmd.is_empty() => Some(cmd.to_vec()),
            _ => platform_command(),
        };
        SystemClipboard { command }
    }
}

#[cfg(target_os = "macos")]
fn platform_command() -> Option<Vec<String>> {
    Some(vec!["pbcopy".to_string()])
}

#[cfg(target_os = "linux")]
fn platform_command() -> Option<Vec<String>> {
    if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        Some(vec!["wl-copy".to_string()])
    } else {
        Some(vec![
            "xclip".to_string(),
            "-selection".to_string(),
            "clipboard".to_string(),
        ])
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn platform_command() -> Option<Vec<String>> {
    None
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let (program, args) = self
            .command
            .as_deref()
            .and_then(|cmd| cmd.split_first())
            .ok_or_else(|| {
                ClipboardError::Unavailable(
                    "set clipboard.command in config.toml".to_string(),
                )
            })?;

        let spawn_err = |source| ClipboardError::Spawn {
            program: program.clone(),
            source,
        };
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(spawn_err)?;
        // stdin is dropped at the end of the match so the program sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        // reap the child even when the write failed (e.g. it exited early)
        let status = child.wait().map_err(spawn_err)?;
        written.map_err(spawn_err)?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Failed {
                program: program.clone(),
                status: status.to_string(),
            })
        }
    }
}
