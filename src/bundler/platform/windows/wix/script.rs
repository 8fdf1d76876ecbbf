//! WiX source generation.
//!
//! Flattens the [`InstallerLayout`] into directories, components and features
//! with deterministic identifiers, then renders [`WXS_TEMPLATE`].

use super::{
    environment::{EnvAction, EnvPart, expand_all},
    template::WXS_TEMPLATE,
    tree::{Entry, InstallerLayout},
    utils,
};
use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
};
use handlebars::Handlebars;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use uuid::Uuid;

#[derive(Serialize)]
struct WxsDocument<'a> {
    product_name: &'a str,
    manufacturer: &'a str,
    description: &'a str,
    version: String,
    upgrade_code: String,
    language: u16,
    platform: &'static str,
    install_scope: &'static str,
    elevated: bool,
    major_upgrade: bool,
    url_info_about: Option<&'a str>,
    license: Option<String>,
    ui_ref: Option<&'static str>,
    program_files_dir: &'static str,
    install_dir_id: &'a str,
    install_dir_name: &'a str,
    properties: Vec<PropertyView<'a>>,
    directories: Vec<DirectoryView>,
    components: Vec<ComponentView>,
    features: Vec<FeatureView>,
    set_properties: Vec<SetPropertyView<'a>>,
    custom_actions: Vec<CustomActionView<'a>>,
}

#[derive(Serialize)]
struct PropertyView<'a> {
    id: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct DirectoryView {
    parent: String,
    id: String,
    name: String,
}

#[derive(Serialize)]
struct ComponentView {
    directory: String,
    id: String,
    guid: String,
    win64: bool,
    file: Option<FileView>,
    environment: Option<EnvironmentView>,
    condition: Option<&'static str>,
}

#[derive(Serialize)]
struct FileView {
    id: String,
    source: String,
    name: String,
}

#[derive(Serialize)]
struct EnvironmentView {
    id: String,
    name: String,
    value: String,
    permanent: &'static str,
    part: EnvPart,
    action: EnvAction,
    system: &'static str,
}

#[derive(Serialize)]
struct FeatureView {
    id: String,
    title: String,
    level: u32,
    absent: &'static str,
    allow_advertise: &'static str,
    components: Vec<String>,
}

#[derive(Serialize)]
struct SetPropertyView<'a> {
    property: &'a str,
    action: String,
    value: &'a str,
    after: &'a str,
    sequence: &'static str,
}

#[derive(Serialize)]
struct CustomActionView<'a> {
    id: &'a str,
    binary_id: String,
    binary: String,
    after: &'a str,
    condition: &'a str,
    return_mode: &'static str,
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Collects directories and file components while walking the entry tree.
struct TreeFlattener<'a> {
    upgrade_code: &'a Uuid,
    win64: bool,
    directories: Vec<DirectoryView>,
    components: Vec<ComponentView>,
    feature_components: BTreeMap<String, Vec<String>>,
}

impl TreeFlattener<'_> {
    fn visit(
        &mut self,
        entries: &[Entry],
        directory_id: &str,
        install_path: &Path,
        inherited: Option<&str>,
    ) -> Result<()> {
        for entry in entries {
            match entry {
                Entry::File {
                    source,
                    name,
                    feature,
                } => {
                    let installed_name = match name {
                        Some(name) => name.clone(),
                        None => source
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .ok_or_else(|| {
                                Error::InvalidLayout(format!(
                                    "file {} has no file name",
                                    source.display()
                                ))
                            })?,
                    };
                    let key = install_path.join(&installed_name);
                    let key = key.to_string_lossy().replace('\\', "/");
                    let feature = feature.as_deref().or(inherited).ok_or_else(|| {
                        Error::InvalidLayout(format!(
                            "file {} does not belong to any feature",
                            source.display()
                        ))
                    })?;

                    let component_id = utils::wix_id("cmp", self.upgrade_code, &key);
                    self.feature_components
                        .entry(feature.to_string())
                        .or_default()
                        .push(component_id.clone());
                    self.components.push(ComponentView {
                        directory: directory_id.to_string(),
                        id: component_id,
                        guid: utils::component_guid(self.upgrade_code, &key),
                        win64: self.win64,
                        file: Some(FileView {
                            id: utils::wix_id("fil", self.upgrade_code, &key),
                            source: source.display().to_string(),
                            name: installed_name,
                        }),
                        environment: None,
                        condition: None,
                    });
                }
                Entry::Dir {
                    name,
                    feature,
                    entries,
                } => {
                    let path = install_path.join(name);
                    let key = path.to_string_lossy().replace('\\', "/");
                    let id = utils::wix_id("dir", self.upgrade_code, &key);
                    self.directories.push(DirectoryView {
                        parent: directory_id.to_string(),
                        id: id.clone(),
                        name: name.clone(),
                    });
                    self.visit(entries, &id, &path, feature.as_deref().or(inherited))?;
                }
            }
        }
        Ok(())
    }
}

/// Render the product `.wxs` document for `settings`.
pub fn render_wxs(settings: &Settings) -> Result<String> {
    let wix = &settings.windows().wix;
    let layout: &InstallerLayout = settings.layout();
    layout.validate()?;

    let platform = utils::map_arch(settings.binary_arch());
    let win64 = settings.binary_arch().is_64bit();
    let upgrade_code = &wix.upgrade_code;

    let mut flattener = TreeFlattener {
        upgrade_code,
        win64,
        directories: Vec::new(),
        components: Vec::new(),
        feature_components: BTreeMap::new(),
    };
    flattener.visit(&layout.entries, &layout.install_dir_id, Path::new(""), None)?;

    for (index, scoped) in expand_all(&layout.environment).into_iter().enumerate() {
        let key = format!(
            "env/{}/{}/{}",
            index,
            scoped.variable.name,
            scoped.condition()
        );
        let component_id = utils::wix_id("cmp", upgrade_code, &key);
        flattener
            .feature_components
            .entry(scoped.variable.feature.clone())
            .or_default()
            .push(component_id.clone());
        flattener.components.push(ComponentView {
            directory: layout.install_dir_id.clone(),
            id: component_id,
            guid: utils::component_guid(upgrade_code, &key),
            win64,
            file: None,
            condition: Some(scoped.condition()),
            environment: Some(EnvironmentView {
                id: utils::wix_id("env", upgrade_code, &key),
                system: yes_no(scoped.is_system()),
                permanent: yes_no(scoped.variable.permanent),
                part: scoped.variable.part,
                action: scoped.variable.action,
                name: scoped.variable.name,
                value: scoped.variable.value,
            }),
        });
    }

    let features = layout
        .features
        .iter()
        .map(|feature| FeatureView {
            id: feature.id.clone(),
            title: feature.title.clone(),
            level: if feature.enabled { 1 } else { 2 },
            absent: if feature.allow_change {
                "allow"
            } else {
                "disallow"
            },
            allow_advertise: yes_no(feature.allow_advertise),
            components: flattener
                .feature_components
                .remove(&feature.id)
                .unwrap_or_default(),
        })
        .collect();

    let document = WxsDocument {
        product_name: settings.product_name(),
        manufacturer: settings.manufacturer(),
        description: settings.description(),
        version: utils::format_version_for_msi(settings.version())?,
        upgrade_code: upgrade_code.hyphenated().to_string().to_uppercase(),
        language: wix.language,
        platform,
        install_scope: wix.install_scope.wix_name(),
        elevated: wix.elevated,
        major_upgrade: wix.major_upgrade,
        url_info_about: settings.url_info_about(),
        license: wix.license.as_ref().map(|p| p.display().to_string()),
        ui_ref: wix.ui.ui_ref(),
        program_files_dir: if win64 {
            "ProgramFiles64Folder"
        } else {
            "ProgramFilesFolder"
        },
        install_dir_id: &layout.install_dir_id,
        install_dir_name: &layout.install_dir_name,
        properties: layout
            .properties
            .iter()
            .map(|p| PropertyView {
                id: &p.id,
                value: &p.value,
            })
            .collect(),
        directories: flattener.directories,
        components: flattener.components,
        features,
        set_properties: layout
            .set_properties
            .iter()
            .map(|action| SetPropertyView {
                property: &action.property,
                action: format!("Set{}_{}", action.property, action.sequence.wix_name()),
                value: &action.value,
                after: &action.after,
                sequence: action.sequence.wix_name(),
            })
            .collect(),
        custom_actions: layout
            .custom_actions
            .iter()
            .map(|action| CustomActionView {
                id: &action.id,
                binary_id: format!("{}Binary", action.id),
                binary: action.binary.display().to_string(),
                after: &action.after,
                condition: &action.condition,
                return_mode: if action.ignore_result {
                    "ignore"
                } else {
                    "check"
                },
            })
            .collect(),
    };

    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string("main.wxs", WXS_TEMPLATE)
        .map_err(|e| Error::Template(format!("failed to register WXS template: {}", e)))?;

    handlebars
        .render("main.wxs", &document)
        .map_err(|e| Error::Template(format!("failed to render WXS template: {}", e)))
}

/// Generate the `.wxs` file at `wxs_path`.
///
/// Creates the parent directory when needed and returns the written path.
pub async fn generate_wxs(settings: &Settings, wxs_path: &Path) -> Result<PathBuf> {
    let content = render_wxs(settings)?;

    if let Some(parent) = wxs_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating WXS output directory", parent)?;
    }
    tokio::fs::write(wxs_path, content)
        .await
        .fs_context("writing WXS file", wxs_path)?;

    log::debug!("Wrote {}", wxs_path.display());
    Ok(wxs_path.to_path_buf())
}
