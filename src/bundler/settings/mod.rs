//! Configuration structures for installer builds.
//!
//! This module provides the configuration types for MSI bundling: package
//! metadata, Windows/WiX settings, and a builder for constructing settings.

mod arch;
mod builder;
mod core;
mod package;
mod windows;

// Re-export all public types
pub use arch::Arch;
pub use builder::SettingsBuilder;
pub use self::core::Settings;
pub use package::PackageSettings;
pub use windows::{WindowsSettings, WixInstallScope, WixSettings, WixUi};
