//! Pushing images onto the host's system clipboard.
//!
//! Each platform shells out to whatever utility it ships with (or commonly
//! has installed). The adapter is picked once at startup from the running
//! OS and shared through the server state.

mod linux;
mod macos;
mod windows;

pub use linux::LinuxClipboard;
pub use macos::MacClipboard;
pub use windows::WindowsClipboard;

use bytes::Bytes;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::Arc;
use tempfile::TempPath;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("`{utility}` was not found: {hint}")]
    UtilityMissing {
        utility: &'static str,
        hint: &'static str,
    },
    #[error("Clipboard images are not supported on {0}")]
    Unsupported(String),
    #[error("`{utility}` failed: {detail}")]
    CommandFailed {
        utility: &'static str,
        detail: String,
    },
    #[error("Could not stage image: {0}")]
    Io(#[from] io::Error),
}

/// Image encodings recognised from their leading magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
}

impl ImageFormat {
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageFormat::Webp)
        } else if bytes.starts_with(b"BM") && bytes.len() > 14 {
            Some(ImageFormat::Bmp)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
            ImageFormat::Bmp => "bmp",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Bmp => "image/bmp",
        }
    }
}

/// Platform adapter that places an image file on the system clipboard.
///
/// Implementations block while the external utility runs; callers should
/// invoke them from a blocking-friendly context.
pub trait ClipboardBridge: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn push_image(&self, image: &Path, format: ImageFormat) -> Result<(), ClipboardError>;
}

/// Stand-in for platforms without a known clipboard utility.
pub struct UnsupportedClipboard {
    os: String,
}

impl ClipboardBridge for UnsupportedClipboard {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn push_image(&self, _image: &Path, _format: ImageFormat) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unsupported(self.os.clone()))
    }
}

/// Picks the adapter for `os` (as reported by `std::env::consts::OS`).
pub fn for_platform(os: &str) -> Arc<dyn ClipboardBridge> {
    match os {
        "macos" => Arc::new(MacClipboard),
        "windows" => Arc::new(WindowsClipboard),
        "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => {
            Arc::new(LinuxClipboard::detect())
        }
        other => Arc::new(UnsupportedClipboard {
            os: other.to_string(),
        }),
    }
}

/// Stages `image` in a temporary file, hands it to `bridge` and lets the
/// file go once the bridge is done with it.
pub async fn push_image_bytes(
    bridge: Arc<dyn ClipboardBridge>,
    image: Bytes,
    format: ImageFormat,
) -> Result<(), ClipboardError> {
    let utility = bridge.name();
    tokio::task::spawn_blocking(move || {
        let staged = stage_image(&image, format)?;
        bridge.push_image(&staged, format)
    })
    .await
    .unwrap_or_else(|e| {
        Err(ClipboardError::CommandFailed {
            utility,
            detail: e.to_string(),
        })
    })
}

/// The returned path deletes the file when dropped. The handle is closed
/// first so the platform utility can open the file on Windows too.
fn stage_image(image: &[u8], format: ImageFormat) -> io::Result<TempPath> {
    let mut file = tempfile::Builder::new()
        .prefix("dlsync-clipboard-")
        .suffix(&format!(".{}", format.extension()))
        .tempfile()?;
    file.write_all(image)?;
    file.flush()?;
    Ok(file.into_temp_path())
}

/// Runs `command` to completion, mapping a missing binary to
/// [`ClipboardError::UtilityMissing`] and a non-zero exit to
/// [`ClipboardError::CommandFailed`] carrying its stderr.
fn run_utility(
    utility: &'static str,
    hint: &'static str,
    command: &mut Command,
) -> Result<(), ClipboardError> {
    let output = command.output().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ClipboardError::UtilityMissing { utility, hint },
        _ => ClipboardError::CommandFailed {
            utility,
            detail: e.to_string(),
        },
    })?;
    check_status(utility, &output)
}

fn check_status(utility: &'static str, output: &Output) -> Result<(), ClipboardError> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = stderr.trim();
    Err(ClipboardError::CommandFailed {
        utility,
        detail: if detail.is_empty() {
            output.status.to_string()
        } else {
            detail.to_string()
        },
    })
}
