use super::{run_utility, ClipboardBridge, ClipboardError, ImageFormat};
use std::path::Path;
use std::process::Command;

/// Uses Windows PowerShell and `System.Windows.Forms.Clipboard`.
pub struct WindowsClipboard;

impl ClipboardBridge for WindowsClipboard {
    fn name(&self) -> &'static str {
        "powershell"
    }

    fn push_image(&self, image: &Path, _format: ImageFormat) -> Result<(), ClipboardError> {
        let mut command = Command::new("powershell");
        command
            .args(["-NoProfile", "-NonInteractive", "-STA", "-Command"])
            .arg(set_image_script(image));
        run_utility(
            "powershell",
            "install Windows PowerShell or add it to PATH",
            &mut command,
        )
    }
}

/// Clipboard access needs an STA thread, hence `-STA` above. The image is
/// disposed before exit so the staged file can be removed.
fn set_image_script(image: &Path) -> String {
    format!(
        "Add-Type -AssemblyName System.Windows.Forms; \
         Add-Type -AssemblyName System.Drawing; \
         $img = [System.Drawing.Image]::FromFile('{}'); \
         try {{ [System.Windows.Forms.Clipboard]::SetImage($img) }} finally {{ $img.Dispose() }}",
        powershell_quote(&image.to_string_lossy())
    )
}

/// Escapes text for a single-quoted PowerShell string literal.
fn powershell_quote(text: &str) -> String {
    text.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_quotes_path() {
        let script = set_image_script(Path::new("C:\\Temp\\it's.png"));
        assert!(script.contains("FromFile('C:\\Temp\\it''s.png')"));
        assert!(script.contains("SetImage($img)"));
    }
}
