use arboard::Clipboard;
use std::env;
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Default)]
pub struct SystemClipboard {
    // Kept alive so X11/Wayland selections survive after the copy returns.
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    fn clipboard(&mut self) -> Result<&mut Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                Clipboard::new().map_err(|error| ClipboardError::Unavailable(error.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard not initialised".to_string()))
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let native = self.clipboard().and_then(|clipboard| {
            clipboard
                .set_text(text.to_string())
                .map_err(|error| ClipboardError::Write(error.to_string()))
        });
        match native {
            Ok(()) => Ok(()),
            Err(error) if is_wsl_environment() => {
                tracing::debug!(%error, "native clipboard failed, falling back to clip.exe");
                copy_with_clip_exe(text)
            }
            Err(error) => Err(error),
        }
    }
}

fn is_wsl_environment() -> bool {
    if env::var_os("WSL_DISTRO_NAME").is_some() || env::var_os("WSL_INTEROP").is_some() {
        return true;
    }
    fs::read_to_string("/proc/sys/kernel/osrelease")
        .map(|value| value.to_ascii_lowercase().contains("microsoft"))
        .unwrap_or(false)
}

fn copy_with_clip_exe(text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new("clip.exe")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|error| ClipboardError::Unavailable(format!("failed to launch clip.exe: {error}")))?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|error| ClipboardError::Write(error.to_string()))?;
    }
    let status = child
        .wait()
        .map_err(|error| ClipboardError::Write(error.to_string()))?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::Write(format!("clip.exe exited with {status}")))
    }
}
