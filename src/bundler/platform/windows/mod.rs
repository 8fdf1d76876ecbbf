//! Windows Installer backend.
//!
//! - `wix` - WiX source generation, toolset acquisition and MSI compilation
//! - `broadcast` - the post-install `WM_SETTINGCHANGE` notification

pub mod broadcast;
pub mod wix;
