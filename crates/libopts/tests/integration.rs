//! Integration tests covering the resolver's concrete scenarios:
//! spec tree in, argv/env in, `proc` entries (or help) out.

use libopts::{resolve, ConfigStore, ConfigTree, EnvTable, Error, Outcome};

fn args(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn repeated_single_flag_is_rejected() {
    let mut tree = ConfigTree::new();
    tree.set_meta("spec/verbose", "opt", "v");
    tree.set_meta("spec/verbose", "opt/arg", "none");

    let result = resolve(&mut tree, &args(&["prog", "-vvv"]), EnvTable::from_pairs(Vec::<String>::new()), "error");
    assert!(matches!(result, Err(Error::Repeated(_))));
}

#[test]
fn repeated_short_option_accumulates_an_array() {
    let mut tree = ConfigTree::new();
    tree.set_meta("spec/items/#", "opt", "i");
    tree.set_meta("spec/items/#", "opt/arg", "required");

    let outcome = resolve(
        &mut tree,
        &args(&["prog", "-i", "a", "-i", "b"]),
        EnvTable::from_pairs(Vec::<String>::new()),
        "error",
    )
    .unwrap();

    assert_eq!(outcome, Outcome::Resolved);
    assert_eq!(tree.value("proc/items/#"), Some("#1"));
    assert_eq!(tree.value("proc/items/#0"), Some("a"));
    assert_eq!(tree.value("proc/items/#1"), Some("b"));
}

#[test]
fn optional_long_uses_flagvalue_or_attached_value() {
    let mut tree = ConfigTree::new();
    tree.set_meta("spec/out", "opt/long", "out");
    tree.set_meta("spec/out", "opt/arg", "optional");
    tree.set_meta("spec/out", "opt/flagvalue", "STDOUT");

    let mut without_value = tree.clone();
    resolve(&mut without_value, &args(&["prog", "--out"]), EnvTable::from_pairs(Vec::<String>::new()), "error")
        .unwrap();
    assert_eq!(without_value.value("proc/out"), Some("STDOUT"));

    let mut with_value = tree.clone();
    resolve(&mut with_value, &args(&["prog", "--out=file"]), EnvTable::from_pairs(Vec::<String>::new()), "error")
        .unwrap();
    assert_eq!(with_value.value("proc/out"), Some("file"));
}

#[test]
fn path_style_env_var_splits_into_an_array() {
    let mut tree = ConfigTree::new();
    tree.set_meta("spec/path/#", "env", "PATH");

    resolve(&mut tree, &args(&["prog"]), EnvTable::from_pairs(["PATH=/a:/b:"]), "error").unwrap();

    assert_eq!(tree.value("proc/path/#0"), Some("/a"));
    assert_eq!(tree.value("proc/path/#1"), Some("/b"));
    assert_eq!(tree.value("proc/path/#2"), Some(""));
    assert_eq!(tree.value("proc/path/#"), Some("#2"));
}

#[test]
fn remaining_positionals_after_terminator_are_not_reparsed_as_options() {
    let mut tree = ConfigTree::new();
    tree.set_meta("spec/files/#", "args", "remaining");

    resolve(&mut tree, &args(&["prog", "--", "-x", "y"]), EnvTable::from_pairs(Vec::<String>::new()), "error")
        .unwrap();

    assert_eq!(tree.value("proc/files/#0"), Some("-x"));
    assert_eq!(tree.value("proc/files/#1"), Some("y"));
}

#[test]
fn help_flag_returns_help_requested_and_renders_usage() {
    let mut tree = ConfigTree::new();
    tree.set_meta("spec/verbose", "opt", "v");
    tree.set_meta("spec/verbose", "opt/arg", "none");

    let outcome =
        resolve(&mut tree, &args(&["prog", "--help"]), EnvTable::from_pairs(Vec::<String>::new()), "error").unwrap();

    assert_eq!(outcome, Outcome::HelpRequested);
    let usage = tree.meta("error", "internal/libopts/help/usage").unwrap();
    assert!(usage.starts_with("Usage: prog"));
    assert!(tree.value("proc/verbose").is_none());
}

#[test]
fn short_wins_over_long_which_wins_over_env() {
    let mut tree = ConfigTree::new();
    tree.set_meta("spec/out", "opt", "o");
    tree.set_meta("spec/out", "opt/long", "out");
    tree.set_meta("spec/out", "env", "OUT");

    resolve(
        &mut tree,
        &args(&["prog", "--out", "from-long"]),
        EnvTable::from_pairs(["OUT=from-env"]),
        "error",
    )
    .unwrap();
    assert_eq!(tree.value("proc/out"), Some("from-long"));
}

#[test]
fn long_form_of_a_combined_slot_resolves_when_short_is_never_given() {
    let mut tree = ConfigTree::new();
    tree.set_meta("spec/out", "opt", "o");
    tree.set_meta("spec/out", "opt/long", "out");
    tree.set_meta("spec/out", "env", "OUT");

    resolve(&mut tree, &args(&["prog", "--out", "from-long"]), EnvTable::from_pairs(["OUT=from-env"]), "error")
        .unwrap();
    assert_eq!(tree.value("proc/out"), Some("from-long"));
}

#[test]
fn posix_mode_stops_at_first_positional() {
    let mut tree = ConfigTree::new();
    tree.set_meta("spec/verbose", "opt", "v");
    tree.set_meta("spec/verbose", "opt/arg", "none");
    tree.set_meta("error", "posixly", "1");

    resolve(
        &mut tree,
        &args(&["prog", "positional", "-v"]),
        EnvTable::from_pairs(Vec::<String>::new()),
        "error",
    )
    .unwrap();

    assert!(tree.value("proc/verbose").is_none());
}

#[test]
fn already_resolved_proc_value_blocks_a_fresh_write() {
    let mut tree = ConfigTree::new();
    tree.set_meta("spec/out", "opt/long", "out");
    tree.set_value("proc/out", "pre-existing");

    let result =
        resolve(&mut tree, &args(&["prog", "--out", "new"]), EnvTable::from_pairs(Vec::<String>::new()), "error");
    assert!(matches!(result, Err(Error::AlreadyResolved(_))));
}
