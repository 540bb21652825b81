#![no_main]

use libfuzzer_sys::fuzz_target;
use libopts::{resolve, ConfigStore, ConfigTree, EnvTable};

fn spec() -> ConfigTree {
    let mut tree = ConfigTree::new();
    tree.set_meta("spec/verbose", "opt", "v");
    tree.set_meta("spec/verbose", "opt/arg", "none");

    tree.set_meta("spec/out", "opt", "o");
    tree.set_meta("spec/out", "opt/long", "out");
    tree.set_meta("spec/out", "opt/arg", "optional");
    tree.set_meta("spec/out", "opt/flagvalue", "STDOUT");

    tree.set_meta("spec/items/#", "opt", "i");
    tree.set_meta("spec/items/#", "opt/arg", "required");

    tree.set_meta("spec/files/#", "args", "remaining");
    tree
}

fuzz_target!(|tokens: Vec<String>| {
    let mut tree = spec();
    let mut args = vec!["prog".to_string()];
    args.extend(tokens);

    // Should never panic, for any argv. A rejection (unknown option,
    // missing argument, repeated flag, ...) is a legitimate Err, not a
    // bug; a process abort or infinite loop would be.
    let _ = resolve(&mut tree, &args, EnvTable::from_pairs(Vec::<String>::new()), "error");
});
