use crossterm::{cursor, execute};

use crate::errors::PusherError;

/// Restore the cursor the progress bar hides if the user interrupts an upload.
///
/// # Errors
/// Returns an error if a Ctrl+C handler is already installed.
pub fn restore_cursor_on_interrupt() -> Result<(), PusherError> {
    ctrlc::set_handler(|| {
        let _ = execute!(std::io::stdout(), cursor::Show);
        eprintln!();
        std::process::exit(130);
    })
    .map_err(|e| PusherError::Runtime(format!("Error setting Ctrl+C handler: {e}")))
}
