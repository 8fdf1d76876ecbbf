//! The octobuild installer definition.
//!
//! Everything the octobuild MSI contains: features, installed files,
//! environment variables, the default-folder workaround and the
//! environment-change broadcast.

use crate::bundler::{
    Arch, Entry, EnvAction, EnvPart, EnvironmentVariable, ExeCustomAction, Feature,
    InstallerLayout, PackageSettings, Property, Result, Sequence, SetPropertyAction,
    WindowsSettings, WixInstallScope, WixSettings, WixUi,
};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const PRODUCT_NAME: &str = "Octobuild";
pub const MANUFACTURER: &str = "Artem V. Navrotskiy";
pub const URL_INFO_ABOUT: &str = "https://github.com/bozaro/octobuild";
pub const UPGRADE_CODE: Uuid = Uuid::from_u128(0xb4505233_6377_406b_955b_2547d86a99a7);

pub const FEATURE_BUILDER: &str = "OctobuildBuilder";
pub const FEATURE_MSBUILD: &str = "MSBuildIntegration";

pub const INSTALL_DIR_ID: &str = "APPLICATIONFOLDER";

/// Default target triple of the builder binaries.
pub const DEFAULT_TARGET: &str = "x86_64-pc-windows-gnu";

/// File name of the environment-change custom action.
pub const BROADCAST_EXE: &str = "broadcast_setting_change.exe";

// MSBuild loads the plugin matching its own bitness, so both are always shipped.
const X64_TARGET: &str = "x86_64-pc-windows-gnu";
const X86_TARGET: &str = "i686-pc-windows-gnu";

/// Build-tree locations the installer payload is taken from.
#[derive(Clone, Debug)]
pub struct LayoutPaths {
    /// Repository root (holds `LICENSE` and `LICENSE.rtf`).
    pub root: PathBuf,
    /// Cargo target directory with the cross-compiled binaries.
    pub target_dir: PathBuf,
    /// Directory with installer resources (`octobuild.targets`).
    pub wixcs_dir: PathBuf,
    /// Target triple of `xgConsole.exe`; also selects the package platform.
    pub target: String,
    /// The `broadcast_setting_change.exe` embedded as a custom action.
    pub broadcast_exe: PathBuf,
}

impl LayoutPaths {
    /// Default locations relative to `root`: `target/` and `wixcs/`, the
    /// x86_64 builder and [`default_broadcast_exe`].
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            target_dir: root.join("target"),
            wixcs_dir: root.join("wixcs"),
            root,
            target: DEFAULT_TARGET.to_string(),
            broadcast_exe: default_broadcast_exe(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_broadcast_exe(mut self, path: impl Into<PathBuf>) -> Self {
        self.broadcast_exe = path.into();
        self
    }

    fn release_artifact(&self, target: &str, name: &str) -> PathBuf {
        self.target_dir.join(target).join("release").join(name)
    }

    /// Location of the license shown by the installer UI.
    pub fn license_rtf(&self) -> PathBuf {
        self.root.join("LICENSE.rtf")
    }
}

/// `broadcast_setting_change.exe` next to the running installer executable.
///
/// A Windows build of this crate places both binaries in the same directory.
pub fn default_broadcast_exe() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(BROADCAST_EXE)))
        .unwrap_or_else(|| PathBuf::from(BROADCAST_EXE))
}

/// Default package metadata for `version`.
pub fn octobuild_package(version: semver::Version) -> PackageSettings {
    PackageSettings {
        product_name: PRODUCT_NAME.to_string(),
        version,
        description: "Octobuild distributed compilation".to_string(),
        manufacturer: MANUFACTURER.to_string(),
        url_info_about: Some(URL_INFO_ABOUT.to_string()),
    }
}

/// Default WiX configuration: per-machine, elevated, `WixUI_Advanced`,
/// default major upgrade and `light -sval`.
pub fn octobuild_wix_settings(paths: &LayoutPaths) -> WindowsSettings {
    WindowsSettings {
        wix: WixSettings {
            upgrade_code: UPGRADE_CODE,
            ui: WixUi::Advanced,
            license: Some(paths.license_rtf()),
            install_scope: WixInstallScope::PerMachine,
            elevated: true,
            major_upgrade: true,
            ..Default::default()
        },
    }
}

/// The octobuild installer tree for `paths.target`.
///
/// Fails when the target is not a packageable architecture.
pub fn octobuild_layout(paths: &LayoutPaths) -> Result<InstallerLayout> {
    let arch = Arch::from_target(&paths.target)?;

    let features = vec![
        Feature::new(FEATURE_BUILDER, "Octobuild Builder")
            .allow_change(false)
            .allow_advertise(false),
        Feature::new(FEATURE_MSBUILD, "MSBuild integration"),
    ];

    let entries = vec![
        Entry::file(
            FEATURE_BUILDER,
            paths.release_artifact(&paths.target, "xgConsole.exe"),
        ),
        Entry::file(FEATURE_BUILDER, paths.root.join("LICENSE")),
        Entry::dir(
            FEATURE_MSBUILD,
            "msbuild",
            vec![
                Entry::inherited_file(paths.release_artifact(X64_TARGET, "octobuild.dll"))
                    .renamed("octobuild.x64.dll"),
                Entry::inherited_file(paths.release_artifact(X86_TARGET, "octobuild.dll"))
                    .renamed("octobuild.x86.dll"),
                Entry::inherited_file(paths.wixcs_dir.join("octobuild.targets")),
            ],
        ),
    ];

    let app_folder = format!("[{}]", INSTALL_DIR_ID);
    let environment = vec![
        EnvironmentVariable::new(FEATURE_BUILDER, "PATH", app_folder.as_str())
            .part(EnvPart::Last)
            .action(EnvAction::Set),
        EnvironmentVariable::new(FEATURE_BUILDER, "OCTOBUILD", app_folder.as_str())
            .part(EnvPart::All)
            .action(EnvAction::Set),
    ];

    // WixUI_Advanced defaults per-machine installs to "Program Files (x86)" on x64.
    let set_properties = if arch.is_64bit() {
        [Sequence::InstallUi, Sequence::InstallExecute]
            .into_iter()
            .map(|sequence| SetPropertyAction {
                property: "WixPerMachineFolder".to_string(),
                value: "[ProgramFiles64Folder][ApplicationFolderName]".to_string(),
                sequence,
                after: "WixSetDefaultPerMachineFolder".to_string(),
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(InstallerLayout {
        install_dir_id: INSTALL_DIR_ID.to_string(),
        install_dir_name: PRODUCT_NAME.to_string(),
        features,
        entries,
        properties: vec![
            Property::new("ApplicationFolderName", PRODUCT_NAME),
            Property::new("WixAppFolder", "WixPerMachineFolder"),
        ],
        environment,
        set_properties,
        custom_actions: vec![ExeCustomAction {
            id: "BroadcastSettingChange".to_string(),
            binary: paths.broadcast_exe.clone(),
            after: "InstallFinalize".to_string(),
            condition: "1".to_string(),
            ignore_result: true,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::platform::windows::wix::environment::expand_all;

    #[test]
    fn layout_is_valid() {
        let layout = octobuild_layout(&LayoutPaths::from_root("repo")).unwrap();
        layout.validate().unwrap();
        assert_eq!(layout.source_files().len(), 6);
        assert_eq!(layout.set_properties.len(), 2);
    }

    #[test]
    fn builder_follows_target() {
        let paths = LayoutPaths::from_root("repo").with_target("i686-pc-windows-gnu");
        let layout = octobuild_layout(&paths).unwrap();
        let sources = layout.source_files();
        assert!(sources.contains(
            &Path::new("repo/target/i686-pc-windows-gnu/release/xgConsole.exe").to_path_buf()
        ));
        assert!(layout.set_properties.is_empty());
    }

    #[test]
    fn unsupported_target_is_rejected() {
        let paths = LayoutPaths::from_root("repo").with_target("aarch64-pc-windows-msvc");
        assert!(octobuild_layout(&paths).is_err());
    }

    #[test]
    fn broadcast_exe_override() {
        let paths = LayoutPaths::from_root("repo").with_broadcast_exe("dist/broadcast.exe");
        let layout = octobuild_layout(&paths).unwrap();
        assert_eq!(
            layout.custom_actions[0].binary,
            Path::new("dist/broadcast.exe").to_path_buf()
        );
        assert_eq!(default_broadcast_exe().file_name().unwrap(), BROADCAST_EXE);
    }

    #[test]
    fn environment_expands_to_four_declarations() {
        let layout = octobuild_layout(&LayoutPaths::from_root("repo")).unwrap();
        let expanded = expand_all(&layout.environment);
        assert_eq!(expanded.len(), 4);
        assert!(expanded.iter().all(|v| v.variable.value == "[APPLICATIONFOLDER]"));
    }

    #[test]
    fn dlls_come_from_both_targets() {
        let paths = LayoutPaths::from_root("repo");
        let sources = octobuild_layout(&paths).unwrap().source_files();
        assert!(sources.contains(
            &Path::new("repo/target/i686-pc-windows-gnu/release/octobuild.dll").to_path_buf()
        ));
        assert!(sources.contains(&Path::new("repo/wixcs/octobuild.targets").to_path_buf()));
    }
}
