//! Environment variable expansion tests.

use octobuild_installer::bundler::platform::windows::wix::environment::{expand, expand_all};
use octobuild_installer::bundler::{EnvAction, EnvPart, EnvironmentVariable, InstallScope};

#[test]
fn expands_into_machine_then_user() {
    let path = EnvironmentVariable::new("OctobuildBuilder", "PATH", "[APPLICATIONFOLDER]")
        .part(EnvPart::Last);

    let [machine, user] = expand(&path);

    assert_eq!(machine.scope, InstallScope::Machine);
    assert_eq!(machine.condition(), "ALLUSERS");
    assert!(machine.is_system());

    assert_eq!(user.scope, InstallScope::User);
    assert_eq!(user.condition(), "NOT ALLUSERS");
    assert!(!user.is_system());

    assert_eq!(machine.variable, path);
    assert_eq!(user.variable, path);
}

#[test]
fn every_field_but_scope_is_preserved() {
    let var = EnvironmentVariable::new("F", "OCTOBUILD", "C:\\octobuild")
        .part(EnvPart::First)
        .action(EnvAction::Create)
        .permanent(true);

    for scoped in expand(&var) {
        assert_eq!(scoped.variable.feature, "F");
        assert_eq!(scoped.variable.name, "OCTOBUILD");
        assert_eq!(scoped.variable.value, "C:\\octobuild");
        assert_eq!(scoped.variable.part, EnvPart::First);
        assert_eq!(scoped.variable.action, EnvAction::Create);
        assert!(scoped.variable.permanent);
    }
}

#[test]
fn conditions_are_mutually_exclusive() {
    let var = EnvironmentVariable::new("F", "PATH", "x");
    let conditions: Vec<_> = expand(&var).iter().map(|s| s.condition()).collect();
    assert_eq!(conditions, vec!["ALLUSERS", "NOT ALLUSERS"]);
}

#[test]
fn expand_all_preserves_declaration_order() {
    let vars = vec![
        EnvironmentVariable::new("F", "PATH", "[APPLICATIONFOLDER]").part(EnvPart::Last),
        EnvironmentVariable::new("F", "OCTOBUILD", "[APPLICATIONFOLDER]"),
    ];

    let names: Vec<_> = expand_all(&vars)
        .into_iter()
        .map(|s| (s.variable.name, s.scope))
        .collect();

    assert_eq!(
        names,
        vec![
            ("PATH".to_string(), InstallScope::Machine),
            ("PATH".to_string(), InstallScope::User),
            ("OCTOBUILD".to_string(), InstallScope::Machine),
            ("OCTOBUILD".to_string(), InstallScope::User),
        ]
    );
}

#[test]
fn expand_all_of_nothing_is_empty() {
    assert!(expand_all(&Vec::<EnvironmentVariable>::new()).is_empty());
}
