use super::{run_utility, ClipboardBridge, ClipboardError, ImageFormat};
use std::path::Path;
use std::process::Command;

/// JXA handler: loads the file into an `NSImage` and writes it to the general
/// pasteboard. The path arrives as the first script argument.
const PASTEBOARD_SCRIPT: &str = r#"
ObjC.import('AppKit');
function run(argv) {
    var image = $.NSImage.alloc.initWithContentsOfFile(argv[0]);
    if (image.isNil()) {
        throw new Error('unreadable image: ' + argv[0]);
    }
    var pasteboard = $.NSPasteboard.generalPasteboard;
    pasteboard.clearContents;
    if (!pasteboard.writeObjects($.NSArray.arrayWithObject(image))) {
        throw new Error('pasteboard rejected the image');
    }
}
"#;

/// Uses `osascript` with the JavaScript for Automation bridge to NSPasteboard.
pub struct MacClipboard;

impl ClipboardBridge for MacClipboard {
    fn name(&self) -> &'static str {
        "osascript"
    }

    fn push_image(&self, image: &Path, _format: ImageFormat) -> Result<(), ClipboardError> {
        let mut command = Command::new("osascript");
        command
            .args(["-l", "JavaScript", "-e", PASTEBOARD_SCRIPT])
            .arg(image);
        run_utility(
            "osascript",
            "osascript ships with macOS; check that /usr/bin is on PATH",
            &mut command,
        )
    }
}
