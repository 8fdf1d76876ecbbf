//! Environment variable declarations and install-scope expansion.
//!
//! A logical variable is declared once and materialised twice: a system
//! variable guarded by `ALLUSERS` and a user variable guarded by
//! `NOT ALLUSERS`. Exactly one of the two branches applies at install time.

use serde::Serialize;

/// Where the value goes relative to an existing variable value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvPart {
    /// Prepend to the existing value.
    First,
    /// Append to the existing value.
    Last,
    /// Replace the whole value.
    #[default]
    All,
}

/// What the installer does with the variable.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvAction {
    /// Create only if the variable does not exist.
    Create,
    /// Create or update.
    #[default]
    Set,
    /// Remove on install.
    Remove,
}

/// Install-scope branch a concrete declaration applies to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallScope {
    /// All users: system environment, `ALLUSERS` set.
    Machine,
    /// Current user: user environment, `ALLUSERS` unset.
    User,
}

impl InstallScope {
    /// Install condition selecting this branch.
    pub fn condition(self) -> &'static str {
        match self {
            InstallScope::Machine => "ALLUSERS",
            InstallScope::User => "NOT ALLUSERS",
        }
    }

    /// Whether the variable is written to the system environment.
    pub fn is_system(self) -> bool {
        matches!(self, InstallScope::Machine)
    }
}

/// One logical environment variable.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EnvironmentVariable {
    /// Id of the owning feature.
    pub feature: String,
    /// Variable name, e.g. `PATH`.
    pub name: String,
    /// Value; may contain installer properties such as `[APPLICATIONFOLDER]`.
    pub value: String,
    /// Keep the variable on uninstall.
    pub permanent: bool,
    /// Insertion part.
    pub part: EnvPart,
    /// Write action.
    pub action: EnvAction,
}

impl EnvironmentVariable {
    /// Declares `name = value` for `feature` with `part = all`, `action = set`,
    /// removed on uninstall.
    pub fn new(
        feature: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            feature: feature.into(),
            name: name.into(),
            value: value.into(),
            permanent: false,
            part: EnvPart::default(),
            action: EnvAction::default(),
        }
    }

    pub fn part(mut self, part: EnvPart) -> Self {
        self.part = part;
        self
    }

    pub fn action(mut self, action: EnvAction) -> Self {
        self.action = action;
        self
    }

    pub fn permanent(mut self, permanent: bool) -> Self {
        self.permanent = permanent;
        self
    }
}

/// A logical variable bound to one install-scope branch.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ScopedEnvironmentVariable {
    pub variable: EnvironmentVariable,
    pub scope: InstallScope,
}

impl ScopedEnvironmentVariable {
    /// Guard condition derived from the scope.
    pub fn condition(&self) -> &'static str {
        self.scope.condition()
    }

    pub fn is_system(&self) -> bool {
        self.scope.is_system()
    }
}

/// Expand a logical variable into its machine-wide and per-user declarations.
///
/// Element 0 is the machine branch (`ALLUSERS`), element 1 the user branch
/// (`NOT ALLUSERS`). Every other field is copied unchanged.
pub fn expand(variable: &EnvironmentVariable) -> [ScopedEnvironmentVariable; 2] {
    [InstallScope::Machine, InstallScope::User].map(|scope| ScopedEnvironmentVariable {
        variable: variable.clone(),
        scope,
    })
}

/// Expand every logical variable, preserving declaration order.
pub fn expand_all<'a, I>(variables: I) -> Vec<ScopedEnvironmentVariable>
where
    I: IntoIterator<Item = &'a EnvironmentVariable>,
{
    variables.into_iter().flat_map(expand).collect()
}
