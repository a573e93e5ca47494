//! Clipboard side-channel via wl-copy

use std::process::Command;

use tracing::{debug, warn};

/// Copy `text` to the Wayland clipboard. A missing or failing wl-copy is
/// logged and otherwise ignored; the picker works fine without it.
pub fn copy_text(text: &str) {
    match Command::new("wl-copy").arg(text).status() {
        Ok(status) if status.success() => debug!("Copied command to clipboard"),
        Ok(status) => warn!(code = ?status.code(), "wl-copy exited with failure"),
        Err(err) => warn!(error = %err, "Clipboard unavailable"),
    }
}
