//! WiX source generation for the octobuild layout.

use octobuild_installer::bundler::platform::windows::wix::script::render_wxs;
use octobuild_installer::bundler::{PackageType, Settings, SettingsBuilder};
use octobuild_installer::layout::{self, LayoutPaths};

fn settings(root: &str, target: &str) -> Settings {
    let paths = LayoutPaths::from_root(root)
        .with_target(target)
        .with_broadcast_exe(format!("{}/dist/broadcast_setting_change.exe", root));
    SettingsBuilder::new()
        .project_out_directory(format!("{}/target", root))
        .package_settings(layout::octobuild_package(semver::Version::new(0, 4, 2)))
        .windows_settings(layout::octobuild_wix_settings(&paths))
        .layout(layout::octobuild_layout(&paths).unwrap())
        .package_types(vec![PackageType::Wxs])
        .target(target.to_string())
        .build()
        .unwrap()
}

fn render() -> String {
    render_wxs(&settings("repo", "x86_64-pc-windows-gnu")).unwrap()
}

#[test]
fn product_metadata() {
    let wxs = render();
    assert!(wxs.contains(r#"Name="Octobuild""#));
    assert!(wxs.contains(r#"Version="0.4.2""#));
    assert!(wxs.contains(r#"UpgradeCode="B4505233-6377-406B-955B-2547D86A99A7""#));
    assert!(wxs.contains(r#"Platform="x64""#));
    assert!(wxs.contains(r#"InstallScope="perMachine""#));
    assert!(wxs.contains(r#"<UIRef Id="WixUI_Advanced" />"#));
}

#[test]
fn environment_is_declared_for_both_scopes() {
    let wxs = render();
    assert_eq!(wxs.matches(r#"Name="PATH""#).count(), 2);
    assert_eq!(wxs.matches(r#"Name="OCTOBUILD""#).count(), 2);
    assert_eq!(wxs.matches("<Condition>ALLUSERS</Condition>").count(), 2);
    assert_eq!(wxs.matches("<Condition>NOT ALLUSERS</Condition>").count(), 2);
    assert_eq!(wxs.matches(r#"System="yes""#).count(), 2);
    assert_eq!(wxs.matches(r#"System="no""#).count(), 2);
    assert!(wxs.contains(r#"Value="[APPLICATIONFOLDER]""#));
    assert!(wxs.contains(r#"Part="last""#));
}

#[test]
fn msbuild_integration_files_are_renamed() {
    let wxs = render();
    assert!(wxs.contains(r#"Name="octobuild.x64.dll""#));
    assert!(wxs.contains(r#"Name="octobuild.x86.dll""#));
    assert!(wxs.contains(r#"Name="octobuild.targets""#));
    assert!(wxs.contains(r#"Name="msbuild""#));
    assert!(wxs.contains(r#"<Feature Id="MSBuildIntegration""#));
}

#[test]
fn builder_feature_cannot_be_removed() {
    let wxs = render();
    assert!(wxs.contains(
        r#"<Feature Id="OctobuildBuilder" Title="Octobuild Builder" Level="1" Absent="disallow" AllowAdvertise="no">"#
    ));
}

#[test]
fn broadcast_runs_after_install_finalize() {
    let wxs = render();
    assert!(wxs.contains(r#"<CustomAction Id="BroadcastSettingChange""#));
    assert!(wxs.contains(r#"Return="ignore""#));
    assert!(wxs.contains(r#"<Custom Action="BroadcastSettingChange" After="InstallFinalize">1</Custom>"#));
    assert!(wxs.contains(
        r#"<Binary Id="BroadcastSettingChangeBinary" SourceFile="repo/dist/broadcast_setting_change.exe" />"#
    ));
}

#[test]
fn per_machine_folder_defaults_to_64_bit_program_files() {
    let wxs = render();
    assert_eq!(wxs.matches(r#"<SetProperty Id="WixPerMachineFolder""#).count(), 2);
    assert!(wxs.contains(r#"Sequence="ui""#));
    assert!(wxs.contains(r#"Sequence="execute""#));
    assert!(wxs.contains(r#"After="WixSetDefaultPerMachineFolder""#));
}

#[test]
fn output_is_deterministic() {
    assert_eq!(render(), render());
}

#[test]
fn component_ids_do_not_depend_on_source_location() {
    let a = render_wxs(&settings("repo", "x86_64-pc-windows-gnu")).unwrap();
    let b = render_wxs(&settings("elsewhere", "x86_64-pc-windows-gnu")).unwrap();
    let guids = |wxs: &str| -> Vec<String> {
        wxs.lines()
            .filter_map(|l| l.split("Guid=\"").nth(1))
            .map(|rest| rest.split('"').next().unwrap_or_default().to_string())
            .collect()
    };
    assert_eq!(guids(&a), guids(&b));
    assert_eq!(guids(&a).len(), 9);
}

#[test]
fn x86_package_installs_x86_builder() {
    let wxs = render_wxs(&settings("repo", "i686-pc-windows-gnu")).unwrap();
    assert!(wxs.contains(r#"Platform="x86""#));
    assert!(wxs.contains(r#"<Directory Id="ProgramFilesFolder">"#));
    assert!(wxs.contains("repo/target/i686-pc-windows-gnu/release/xgConsole.exe"));
    assert!(!wxs.contains("x86_64-pc-windows-gnu/release/xgConsole.exe"));
    assert!(!wxs.contains("ProgramFiles64Folder"));
    assert!(!wxs.contains("<SetProperty"));
    assert!(!wxs.contains("Win64"));
}

#[test]
fn arm64_layout_is_rejected() {
    let paths = LayoutPaths::from_root("repo").with_target("aarch64-pc-windows-msvc");
    assert!(layout::octobuild_layout(&paths).is_err());
}
