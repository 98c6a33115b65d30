//! Platform-specific helpers.

use crate::error::{CoreError, CoreResult, command_start_error};

use std::env;
use std::path::Path;
use std::process::Command;

/// Checks if the current platform is Windows.
pub fn is_windows() -> bool {
    env::consts::OS == "windows"
}

/// Checks if the current platform is macOS.
pub fn is_macos() -> bool {
    env::consts::OS == "macos"
}

/// Program used to show a folder in the desktop file manager.
pub fn file_manager_command() -> &'static str {
    if is_windows() {
        "explorer"
    } else if is_macos() {
        "open"
    } else {
        "xdg-open"
    }
}

/// Opens `folder` in the platform's file manager without waiting for it.
pub fn open_folder(folder: &Path) -> CoreResult<()> {
    if !folder.is_dir() {
        return Err(CoreError::PathError(format!(
            "Cannot open '{}': not a directory",
            folder.display()
        )));
    }

    let program = file_manager_command();
    log::debug!("Opening {} with {}", folder.display(), program);
    Command::new(program)
        .arg(folder)
        .spawn()
        .map(|_| ())
        .map_err(|e| command_start_error(program, e))
}
