//! Declarative installer tree.
//!
//! An [`InstallerLayout`] describes what the package installs and which
//! actions it schedules. It carries no WiX identifiers; those are assigned
//! when the tree is rendered (see `script`).

use super::environment::EnvironmentVariable;
use crate::bundler::error::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// A user-selectable installer feature.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Feature {
    /// WiX identifier, referenced by entries and environment variables.
    pub id: String,
    /// Title shown in the feature tree.
    pub title: String,
    /// Selected by default.
    pub enabled: bool,
    /// The user may deselect it.
    pub allow_change: bool,
    /// Advertised installation is permitted.
    pub allow_advertise: bool,
}

impl Feature {
    /// Feature installed by default that the user may deselect.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            enabled: true,
            allow_change: true,
            allow_advertise: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn allow_change(mut self, allow_change: bool) -> Self {
        self.allow_change = allow_change;
        self
    }

    pub fn allow_advertise(mut self, allow_advertise: bool) -> Self {
        self.allow_advertise = allow_advertise;
        self
    }
}

/// A node of the installed file tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Entry {
    /// A single file.
    File {
        /// Path of the file on the build machine.
        source: PathBuf,
        /// Installed file name when it differs from the source name.
        name: Option<String>,
        /// Owning feature; inherited from the parent directory when `None`.
        feature: Option<String>,
    },
    /// A subdirectory.
    Dir {
        /// Directory name under its parent.
        name: String,
        /// Default feature for children without one.
        feature: Option<String>,
        entries: Vec<Entry>,
    },
}

impl Entry {
    /// File owned by `feature`.
    pub fn file(feature: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Entry::File {
            source: source.into(),
            name: None,
            feature: Some(feature.into()),
        }
    }

    /// File inheriting its feature from the enclosing directory.
    pub fn inherited_file(source: impl Into<PathBuf>) -> Self {
        Entry::File {
            source: source.into(),
            name: None,
            feature: None,
        }
    }

    /// Installs a file entry under a different name. Directories are unchanged.
    pub fn renamed(self, installed_name: impl Into<String>) -> Self {
        match self {
            Entry::File {
                source, feature, ..
            } => Entry::File {
                source,
                name: Some(installed_name.into()),
                feature,
            },
            dir => dir,
        }
    }

    /// Directory whose children default to `feature`.
    pub fn dir(feature: impl Into<String>, name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Entry::Dir {
            name: name.into(),
            feature: Some(feature.into()),
            entries,
        }
    }
}

/// Installer sequence tables.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Sequence {
    InstallUi,
    InstallExecute,
}

impl Sequence {
    /// Value of the WiX `Sequence` attribute.
    pub fn wix_name(self) -> &'static str {
        match self {
            Sequence::InstallUi => "ui",
            Sequence::InstallExecute => "execute",
        }
    }
}

/// A public installer property.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    pub id: String,
    pub value: String,
}

impl Property {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Immediate action assigning a property value during a sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetPropertyAction {
    pub property: String,
    pub value: String,
    pub sequence: Sequence,
    /// Standard or custom action this runs after.
    pub after: String,
}

/// Executable stored in the package and run as a custom action.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExeCustomAction {
    /// Custom action identifier.
    pub id: String,
    /// Executable embedded into the `Binary` table.
    pub binary: PathBuf,
    /// Action this runs after in the execute sequence.
    pub after: String,
    /// Scheduling condition (`1` runs always).
    pub condition: String,
    /// Ignore the exit code.
    pub ignore_result: bool,
}

/// Everything the package installs and schedules.
#[derive(Clone, Debug, Default)]
pub struct InstallerLayout {
    /// Identifier of the installation root directory.
    pub install_dir_id: String,
    /// Name of the installation root under Program Files.
    pub install_dir_name: String,
    pub features: Vec<Feature>,
    pub entries: Vec<Entry>,
    pub properties: Vec<Property>,
    /// Logical variables; each is expanded into both install scopes.
    pub environment: Vec<EnvironmentVariable>,
    pub set_properties: Vec<SetPropertyAction>,
    pub custom_actions: Vec<ExeCustomAction>,
}

impl InstallerLayout {
    /// Every source file referenced by the tree and the custom actions.
    pub fn source_files(&self) -> Vec<PathBuf> {
        fn collect(entries: &[Entry], out: &mut Vec<PathBuf>) {
            for entry in entries {
                match entry {
                    Entry::File { source, .. } => out.push(source.clone()),
                    Entry::Dir { entries, .. } => collect(entries, out),
                }
            }
        }

        let mut files = Vec::new();
        collect(&self.entries, &mut files);
        files.extend(self.custom_actions.iter().map(|a| a.binary.clone()));
        files
    }

    /// Check internal consistency.
    ///
    /// Rejects empty identifiers, duplicate feature ids, references to
    /// undeclared features and files that end up without a feature.
    pub fn validate(&self) -> Result<()> {
        if self.install_dir_id.is_empty() || self.install_dir_name.is_empty() {
            return Err(Error::InvalidLayout(
                "install directory id and name are required".into(),
            ));
        }

        let mut known = HashSet::new();
        for feature in &self.features {
            if feature.id.is_empty() {
                return Err(Error::InvalidLayout("feature with empty id".into()));
            }
            if !known.insert(feature.id.as_str()) {
                return Err(Error::InvalidLayout(format!(
                    "duplicate feature id '{}'",
                    feature.id
                )));
            }
        }

        let check_feature = |feature: &str, owner: &str| {
            if known.contains(feature) {
                Ok(())
            } else {
                Err(Error::InvalidLayout(format!(
                    "{} references unknown feature '{}'",
                    owner, feature
                )))
            }
        };

        fn walk(
            entries: &[Entry],
            inherited: Option<&str>,
            check: &dyn Fn(&str, &str) -> Result<()>,
        ) -> Result<()> {
            for entry in entries {
                match entry {
                    Entry::File {
                        source,
                        name,
                        feature,
                    } => {
                        let owner = format!("file {}", source.display());
                        if matches!(name.as_deref(), Some("")) {
                            return Err(Error::InvalidLayout(format!("{owner} has an empty name")));
                        }
                        match feature.as_deref().or(inherited) {
                            Some(f) => check(f, &owner)?,
                            None => {
                                return Err(Error::InvalidLayout(format!(
                                    "{owner} does not belong to any feature"
                                )));
                            }
                        }
                    }
                    Entry::Dir {
                        name,
                        feature,
                        entries,
                    } => {
                        if name.is_empty() {
                            return Err(Error::InvalidLayout("directory with empty name".into()));
                        }
                        if let Some(f) = feature {
                            check(f, &format!("directory {name}"))?;
                        }
                        walk(entries, feature.as_deref().or(inherited), check)?;
                    }
                }
            }
            Ok(())
        }

        walk(&self.entries, None, &check_feature)?;

        for variable in &self.environment {
            if variable.name.is_empty() {
                return Err(Error::InvalidLayout(
                    "environment variable with empty name".into(),
                ));
            }
            check_feature(
                &variable.feature,
                &format!("environment variable {}", variable.name),
            )?;
        }

        let mut action_ids = HashSet::new();
        for action in &self.custom_actions {
            if !action_ids.insert(action.id.as_str()) {
                return Err(Error::InvalidLayout(format!(
                    "duplicate custom action id '{}'",
                    action.id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> InstallerLayout {
        InstallerLayout {
            install_dir_id: "APPLICATIONFOLDER".into(),
            install_dir_name: "Octobuild".into(),
            features: vec![Feature::new("Main", "Main")],
            ..Default::default()
        }
    }

    #[test]
    fn files_inherit_directory_feature() {
        let mut layout = layout();
        layout.entries = vec![Entry::dir(
            "Main",
            "msbuild",
            vec![Entry::inherited_file("octobuild.targets")],
        )];
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn orphan_file_is_rejected() {
        let mut layout = layout();
        layout.entries = vec![Entry::inherited_file("LICENSE")];
        let err = layout.validate().unwrap_err();
        assert!(err.to_string().contains("does not belong to any feature"));
    }

    #[test]
    fn unknown_feature_is_rejected() {
        let mut layout = layout();
        layout.environment = vec![EnvironmentVariable::new("Missing", "PATH", "x")];
        let err = layout.validate().unwrap_err();
        assert!(err.to_string().contains("unknown feature 'Missing'"));
    }

    #[test]
    fn source_files_include_custom_action_binaries() {
        let mut layout = layout();
        layout.entries = vec![
            Entry::file("Main", "a.exe"),
            Entry::dir("Main", "sub", vec![Entry::inherited_file("b.dll")]),
        ];
        layout.custom_actions = vec![ExeCustomAction {
            id: "Notify".into(),
            binary: PathBuf::from("notify.exe"),
            after: "InstallFinalize".into(),
            condition: "1".into(),
            ignore_result: true,
        }];
        assert_eq!(
            layout.source_files(),
            vec![
                PathBuf::from("a.exe"),
                PathBuf::from("b.dll"),
                PathBuf::from("notify.exe")
            ]
        );
    }
}
