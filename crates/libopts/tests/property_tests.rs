//! Property-based tests for resolver invariants.
//!
//! These check that behavior holds across many inputs, not just the
//! hand-picked scenarios in `integration.rs`.

use libopts::{resolve, ConfigStore, ConfigTree, EnvTable};
use proptest::prelude::*;

fn spec_with_one_required_short(ch: char) -> ConfigTree {
    let mut tree = ConfigTree::new();
    tree.set_meta("spec/value", "opt", ch.to_string());
    tree.set_meta("spec/value", "opt/arg", "required");
    tree
}

proptest! {
    /// The parser never panics on an arbitrary argv, whether or not
    /// the tokens happen to match any compiled option.
    #[test]
    fn resolve_never_panics_on_arbitrary_argv(tokens in prop::collection::vec("[-a-zA-Z0-9=_]{0,8}", 0..12)) {
        let mut tree = spec_with_one_required_short('x');
        let mut args = vec!["prog".to_string()];
        args.extend(tokens);
        let _ = resolve(&mut tree, &args, EnvTable::from_pairs(Vec::<String>::new()), "error");
    }

    /// A required short option's attached remainder is always taken
    /// verbatim as the value, regardless of its content.
    #[test]
    fn required_short_attached_value_is_taken_verbatim(value in "[a-zA-Z0-9_./]{1,16}") {
        let mut tree = spec_with_one_required_short('x');
        let token = format!("-x{value}");
        let outcome = resolve(
            &mut tree,
            &["prog".to_string(), token],
            EnvTable::from_pairs(Vec::<String>::new()),
            "error",
        );
        prop_assert!(outcome.is_ok());
        prop_assert_eq!(tree.value("proc/value"), Some(value.as_str()));
    }

    /// Repeating an array-kind option any number of times never
    /// errors, and every occurrence is preserved in order.
    #[test]
    fn array_option_never_rejects_repetition(values in prop::collection::vec("[a-z]{1,6}", 0..10)) {
        let mut tree = ConfigTree::new();
        tree.set_meta("spec/items/#", "opt", "i");
        tree.set_meta("spec/items/#", "opt/arg", "required");

        let mut args = vec!["prog".to_string()];
        for v in &values {
            args.push("-i".to_string());
            args.push(v.clone());
        }

        let outcome = resolve(&mut tree, &args, EnvTable::from_pairs(Vec::<String>::new()), "error");
        prop_assert!(outcome.is_ok());

        if values.is_empty() {
            prop_assert_eq!(tree.value("proc/items/#"), None);
        } else {
            prop_assert_eq!(tree.value("proc/items/#"), Some(format!("#{}", values.len() - 1)).as_deref());
            for (i, v) in values.iter().enumerate() {
                prop_assert_eq!(tree.value(&format!("proc/items/#{i}")), Some(v.as_str()));
            }
        }
    }

    /// A short option always outranks a long option bound to the same
    /// key, no matter which one is given first on the command line.
    #[test]
    fn short_always_outranks_long(short_first in any::<bool>(), short_val in "[a-z]{1,6}", long_val in "[a-z]{1,6}") {
        let mut tree = ConfigTree::new();
        tree.set_meta("spec/out", "opt", "o");
        tree.set_meta("spec/out", "opt/long", "out");
        tree.set_meta("spec/out", "opt/arg", "required");

        let (first, second) = if short_first {
            (vec!["-o".to_string(), short_val.clone()], vec!["--out".to_string(), long_val])
        } else {
            (vec!["--out".to_string(), long_val], vec!["-o".to_string(), short_val.clone()])
        };

        let mut args = vec!["prog".to_string()];
        args.extend(first);
        args.extend(second);

        resolve(&mut tree, &args, EnvTable::from_pairs(Vec::<String>::new()), "error").unwrap();
        prop_assert_eq!(tree.value("proc/out"), Some(short_val.as_str()));
    }
}
