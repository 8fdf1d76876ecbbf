//! Windows platform-specific settings.

use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

/// Windows installer configuration.
///
/// # See Also
///
/// - [`WixSettings`] - WiX MSI installer configuration
#[derive(Clone, Debug, Default)]
pub struct WindowsSettings {
    /// WiX MSI installer settings.
    ///
    /// See [`WixSettings`] for details.
    pub wix: WixSettings,
}

/// Built-in WiX dialog sets (`WixUIExtension`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WixUi {
    /// No dialogs; the package installs silently.
    None,
    /// `WixUI_Minimal`: license and install button.
    Minimal,
    /// `WixUI_InstallDir`: lets the user pick the folder.
    InstallDir,
    /// `WixUI_FeatureTree`: feature selection.
    FeatureTree,
    /// `WixUI_Mondo`: typical/custom/complete.
    Mondo,
    /// `WixUI_Advanced`: per-user or per-machine choice, folder and features.
    #[default]
    Advanced,
}

impl WixUi {
    /// `UIRef` identifier, or `None` when no dialog set is referenced.
    pub fn ui_ref(self) -> Option<&'static str> {
        match self {
            WixUi::None => None,
            WixUi::Minimal => Some("WixUI_Minimal"),
            WixUi::InstallDir => Some("WixUI_InstallDir"),
            WixUi::FeatureTree => Some("WixUI_FeatureTree"),
            WixUi::Mondo => Some("WixUI_Mondo"),
            WixUi::Advanced => Some("WixUI_Advanced"),
        }
    }
}

impl FromStr for WixUi {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("WixUI_").unwrap_or(s);
        match name.to_ascii_lowercase().as_str() {
            "none" => Ok(WixUi::None),
            "minimal" => Ok(WixUi::Minimal),
            "installdir" => Ok(WixUi::InstallDir),
            "featuretree" => Ok(WixUi::FeatureTree),
            "mondo" => Ok(WixUi::Mondo),
            "advanced" => Ok(WixUi::Advanced),
            _ => Err(format!(
                "Invalid WiX UI: {}. Valid values: none, minimal, installdir, featuretree, mondo, advanced",
                s
            )),
        }
    }
}

/// Package-level install scope (`Package/@InstallScope`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WixInstallScope {
    /// Installs for all users (requires admin rights).
    #[default]
    PerMachine,
    /// Installs for the current user only.
    PerUser,
}

impl WixInstallScope {
    pub fn wix_name(self) -> &'static str {
        match self {
            WixInstallScope::PerMachine => "perMachine",
            WixInstallScope::PerUser => "perUser",
        }
    }
}

/// WiX MSI installer configuration.
///
/// # Configuration
///
/// Overrides can be placed in the manifest:
///
/// ```toml
/// [package.metadata.wix]
/// upgrade_code = "b4505233-6377-406b-955b-2547d86a99a7"
/// license = "LICENSE.rtf"
/// ui = "advanced"
/// light_options = ["-sval"]
/// ```
#[derive(Clone, Debug)]
pub struct WixSettings {
    /// Upgrade code shared by every version of the product.
    ///
    /// Also seeds the deterministic component GUIDs.
    pub upgrade_code: Uuid,

    /// Dialog set.
    ///
    /// Default: [`WixUi::Advanced`]
    pub ui: WixUi,

    /// Path to license file (.rtf format required).
    ///
    /// Default: None
    pub license: Option<PathBuf>,

    /// Package install scope.
    ///
    /// Default: [`WixInstallScope::PerMachine`]
    pub install_scope: WixInstallScope,

    /// Request elevated privileges (`InstallPrivileges="elevated"`).
    ///
    /// Default: true
    pub elevated: bool,

    /// Emit a default `MajorUpgrade` element so newer versions replace older ones.
    ///
    /// Default: true
    pub major_upgrade: bool,

    /// Windows language id of the package.
    ///
    /// Default: 1033 (en-US)
    pub language: u16,

    /// Cultures passed to `light`.
    ///
    /// Default: `["en-us"]`
    pub cultures: Vec<String>,

    /// WiX extensions passed to both `candle` and `light`.
    ///
    /// Default: `["WixUIExtension"]`
    pub extensions: Vec<String>,

    /// Extra `light` arguments.
    ///
    /// Default: `["-sval"]` (skip ICE validation)
    pub light_options: Vec<String>,

    /// Directory containing `candle.exe` and `light.exe`.
    ///
    /// Default: None (auto-detect)
    pub toolset: Option<PathBuf>,

    /// Download the WiX binaries when no toolset is found.
    ///
    /// Default: true
    pub allow_download: bool,
}

impl Default for WixSettings {
    fn default() -> Self {
        Self {
            upgrade_code: Uuid::nil(),
            ui: WixUi::default(),
            license: None,
            install_scope: WixInstallScope::default(),
            elevated: true,
            major_upgrade: true,
            language: 1033,
            cultures: vec!["en-us".to_string()],
            extensions: vec!["WixUIExtension".to_string()],
            light_options: vec!["-sval".to_string()],
            toolset: None,
            allow_download: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_accepts_wix_names() {
        assert_eq!("WixUI_Advanced".parse::<WixUi>(), Ok(WixUi::Advanced));
        assert_eq!("installdir".parse::<WixUi>(), Ok(WixUi::InstallDir));
        assert!("fancy".parse::<WixUi>().is_err());
        assert_eq!(WixUi::None.ui_ref(), None);
    }
}
