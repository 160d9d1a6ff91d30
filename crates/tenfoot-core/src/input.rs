use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement};
use std::io::stdout;

/// Errors that can occur while configuring terminal input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// An I/O error from terminal setup or teardown.
    #[error("terminal input error: {0}")]
    Io(#[from] std::io::Error),
}

/// RAII guard that puts the terminal into remote-input mode.
///
/// Acquiring the guard enables raw mode and, where the terminal supports the
/// kitty keyboard protocol, pushes [`KeyboardEnhancementFlags::REPORT_EVENT_TYPES`]
/// so that key release edges reach the event stream. Both settings are undone
/// when the guard is dropped, including during unwinding.
///
/// Hold-to-zoom and full-press select both need release edges. Check
/// [`edge_reporting`](RemoteInputGuard::edge_reporting) after acquiring: when
/// it returns `false` the terminal only reports presses, and hosts should
/// degrade holds to taps (see the globe demo for one way to do that).
pub struct RemoteInputGuard {
    edge_reporting: bool,
    released: bool,
}

impl RemoteInputGuard {
    /// Enable raw mode and negotiate key-release reporting.
    pub fn acquire() -> Result<Self, InputError> {
        enable_raw_mode()?;
        let edge_reporting = supports_keyboard_enhancement().unwrap_or(false);
        if edge_reporting {
            if let Err(err) = execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            ) {
                disable_raw_mode().ok();
                return Err(err.into());
            }
            log::debug!("keyboard enhancement negotiated; release edges enabled");
        } else {
            log::warn!("terminal does not report key release events; holds degrade to taps");
        }
        Ok(Self {
            edge_reporting,
            released: false,
        })
    }

    /// Whether the terminal will deliver key release edges.
    pub fn edge_reporting(&self) -> bool {
        self.edge_reporting
    }

    /// Restore the terminal now, reporting any error.
    ///
    /// Dropping the guard restores the terminal too, but swallows errors.
    pub fn release(mut self) -> Result<(), InputError> {
        self.restore()
    }

    fn restore(&mut self) -> Result<(), InputError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        if self.edge_reporting {
            execute!(stdout(), PopKeyboardEnhancementFlags)?;
        }
        disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for RemoteInputGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
