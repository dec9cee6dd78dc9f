use super::{ClipboardBridge, ClipboardError, ImageFormat};
use std::fs::File;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Wayland,
    X11,
}

/// `wl-copy` under a Wayland session, `xclip` otherwise.
pub struct LinuxClipboard {
    backend: Backend,
}

impl LinuxClipboard {
    pub fn detect() -> Self {
        let backend = if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Backend::Wayland
        } else {
            Backend::X11
        };
        LinuxClipboard { backend }
    }
}

impl ClipboardBridge for LinuxClipboard {
    fn name(&self) -> &'static str {
        match self.backend {
            Backend::Wayland => "wl-copy",
            Backend::X11 => "xclip",
        }
    }

    fn push_image(&self, image: &Path, format: ImageFormat) -> Result<(), ClipboardError> {
        match self.backend {
            Backend::Wayland => {
                let mut command = Command::new("wl-copy");
                command
                    .args(["--type", format.mime()])
                    .stdin(Stdio::from(File::open(image)?));
                run_detached("wl-copy", "install wl-clipboard", &mut command)
            }
            Backend::X11 => {
                let mut command = Command::new("xclip");
                command
                    .args(["-selection", "clipboard", "-t", format.mime(), "-i"])
                    .arg(image);
                run_detached("xclip", "install xclip", &mut command)
            }
        }
    }
}

/// Both utilities fork a child that keeps serving the selection, so their
/// output pipes are never captured: waiting on them would not return.
fn run_detached(
    utility: &'static str,
    hint: &'static str,
    command: &mut Command,
) -> Result<(), ClipboardError> {
    let status = command
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ClipboardError::UtilityMissing { utility, hint },
            _ => ClipboardError::CommandFailed {
                utility,
                detail: e.to_string(),
            },
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed {
            utility,
            detail: status.to_string(),
        })
    }
}
