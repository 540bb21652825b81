//! Example: resolving a handful of options against a tiny spec tree.
//!
//! Run with:
//!   `cargo run --package libopts --example basic -- -v --out report.txt`
//!   `cargo run --package libopts --example basic -- --help`

use libopts::{format_help, resolve, ConfigStore, ConfigTree, EnvTable, Outcome, HELP_OPTIONS_META, HELP_USAGE_META};

fn main() {
    let mut tree = ConfigTree::new();

    tree.set_meta("spec/verbose", "opt", "v");
    tree.set_meta("spec/verbose", "opt/arg", "none");
    tree.set_meta("spec/verbose", "opt/help", "print progress to stderr");

    tree.set_meta("spec/out", "opt", "o");
    tree.set_meta("spec/out", "opt/long", "out");
    tree.set_meta("spec/out", "opt/arg", "required");
    tree.set_meta("spec/out", "opt/arg/help", "FILE");
    tree.set_meta("spec/out", "opt/help", "write output to FILE instead of stdout");
    tree.set_meta("spec/out", "env", "BASIC_EXAMPLE_OUT");

    tree.set_meta("spec/files/#", "args", "remaining");

    let args: Vec<String> = std::env::args().collect();

    match resolve(&mut tree, &args, EnvTable::from_process(), "error") {
        Ok(Outcome::Resolved) => {
            println!("verbose = {:?}", tree.value("proc/verbose"));
            println!("out     = {:?}", tree.value("proc/out"));
            println!("files   = {:?}", tree.value("proc/files/#"));
        }
        Ok(Outcome::HelpRequested) => {
            let usage = tree.meta("error", HELP_USAGE_META).unwrap_or("");
            let options = tree.meta("error", HELP_OPTIONS_META).unwrap_or("");
            print!("{}", format_help(usage, Some("A demonstration of libopts."), options));
        }
        Err(err) => {
            eprintln!("{:?}", miette::Report::from(err));
            std::process::exit(1);
        }
    }
}
