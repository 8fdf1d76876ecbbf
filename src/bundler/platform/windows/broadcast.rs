//! Post-install environment change notification.
//!
//! Running processes only pick up new environment variables after a
//! `WM_SETTINGCHANGE` broadcast for the `Environment` section. The broadcast
//! is best effort: a hung window is skipped after [`BROADCAST_TIMEOUT`] and
//! the custom action reports success whatever the outcome.

use std::time::Duration;
use thiserror::Error;

/// Per-window timeout for the broadcast.
pub const BROADCAST_TIMEOUT: Duration = Duration::from_millis(5000);

/// `lParam` section name announcing an environment block change.
pub const ENVIRONMENT_SECTION: &str = "Environment";

/// Custom action result reported to Windows Installer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionResult {
    Success,
    Failure,
}

impl ActionResult {
    /// Process exit code for an EXE custom action.
    pub fn exit_code(self) -> i32 {
        match self {
            ActionResult::Success => 0,
            ActionResult::Failure => 1,
        }
    }
}

/// Why a notification did not go through.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("SendMessageTimeout failed: {0}")]
    Os(#[from] std::io::Error),

    #[error("setting change broadcast is only available on Windows")]
    Unsupported,
}

/// Delivers a setting change notification for a section.
pub trait SettingChangeNotifier {
    fn notify(&self, section: &str, timeout: Duration) -> Result<(), NotifyError>;
}

/// Broadcasts to all top-level windows through `SendMessageTimeoutW`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemNotifier;

impl SettingChangeNotifier for SystemNotifier {
    #[cfg(windows)]
    fn notify(&self, section: &str, timeout: Duration) -> Result<(), NotifyError> {
        use windows::Win32::Foundation::{LPARAM, WPARAM};
        use windows::Win32::UI::WindowsAndMessaging::{
            HWND_BROADCAST, SMTO_ABORTIFHUNG, SendMessageTimeoutW, WM_SETTINGCHANGE,
        };

        let section: Vec<u16> = section.encode_utf16().chain(std::iter::once(0)).collect();
        let timeout_ms = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        let mut result = 0usize;

        // SAFETY: `section` is NUL-terminated and outlives the call.
        let sent = unsafe {
            SendMessageTimeoutW(
                HWND_BROADCAST,
                WM_SETTINGCHANGE,
                WPARAM(0),
                LPARAM(section.as_ptr() as isize),
                SMTO_ABORTIFHUNG,
                timeout_ms,
                Some(&mut result as *mut usize),
            )
        };

        if sent.0 == 0 {
            return Err(NotifyError::Os(std::io::Error::last_os_error()));
        }
        Ok(())
    }

    #[cfg(not(windows))]
    fn notify(&self, _section: &str, _timeout: Duration) -> Result<(), NotifyError> {
        Err(NotifyError::Unsupported)
    }
}

/// Broadcast the environment change with the system notifier.
pub fn broadcast_setting_change() -> ActionResult {
    broadcast_setting_change_with(&SystemNotifier)
}

/// Broadcast the environment change through `notifier`.
///
/// Always returns [`ActionResult::Success`]; failures are only logged.
pub fn broadcast_setting_change_with<N>(notifier: &N) -> ActionResult
where
    N: SettingChangeNotifier + ?Sized,
{
    match notifier.notify(ENVIRONMENT_SECTION, BROADCAST_TIMEOUT) {
        Ok(()) => log::debug!("Broadcast WM_SETTINGCHANGE ({})", ENVIRONMENT_SECTION),
        Err(e) => log::warn!("Environment change broadcast failed: {}", e),
    }
    ActionResult::Success
}
