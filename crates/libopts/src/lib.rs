//! A specification-driven command-line option and environment-variable
//! resolver.
//!
//! Given a [`ConfigStore`] populated with `spec`-namespace keys
//! annotated per the [data model](mod@compiler), [`resolve`] compiles
//! those annotations into an option table, parses `argv` and an
//! [`EnvTable`] against it, and writes the winning values into the
//! tree's `proc` namespace — or reports that `-h`/`--help` was
//! requested, in which case the tree is left untouched and the
//! rendered usage/options text is returned instead.
//!
//! ```
//! use libopts::{resolve, ConfigStore, ConfigTree, EnvTable, Outcome};
//!
//! let mut tree = ConfigTree::new();
//! tree.set_meta("spec/verbose", "opt", "v");
//! tree.set_meta("spec/verbose", "opt/arg", "none");
//! tree.set_meta("spec/verbose", "opt/help", "be noisy");
//!
//! let args = vec!["prog".to_string(), "-v".to_string()];
//! match resolve(&mut tree, &args, EnvTable::from_pairs(Vec::<String>::new()), "error") {
//!     Ok(Outcome::Resolved) => assert_eq!(tree.value("proc/verbose"), Some("1")),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

mod argparse;
mod compiler;
mod env;
mod error;
mod help;
mod tree;
mod writer;

pub use compiler::{CompiledSpec, HasArg, Kind, OptionEntry, OptionKey, PlanEntry};
pub use env::EnvTable;
pub use error::Error;
pub use tree::{array_element, is_array_key, swap_namespace, ConfigStore, ConfigTree, ENV_LIST_SEP};

/// Metadata name on the error key: `"1"` enables POSIX-mode option
/// parsing (first positional ends option processing).
pub const POSIXLY_META: &str = "posixly";
/// Metadata name on the error key: a caller-supplied help prefix,
/// inserted between the usage line and the options block.
pub const HELP_PREFIX_META: &str = "help/prefix";
/// Metadata name written on the error key: the rendered usage line.
pub const HELP_USAGE_META: &str = "internal/libopts/help/usage";
/// Metadata name written on the error key: the rendered options block.
pub const HELP_OPTIONS_META: &str = "internal/libopts/help/options";

/// What happened when [`resolve`] ran to completion without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Values were written into the tree's `proc` namespace.
    Resolved,
    /// `-h` or `--help` was matched; the tree is unchanged and the
    /// rendered usage/options text has been written onto the error
    /// key's `internal/libopts/help/*` metadata.
    HelpRequested,
}

/// Compiles `tree`'s `spec` namespace, parses `args` and `env` against
/// it, and writes resolved values into `tree`'s `proc` namespace.
///
/// `args` is the full argument vector, `argv[0]` included: the program
/// name is read off `args[0]` for the usage line, and option parsing
/// begins at `args[1]`. `error_key` is the tree key consulted for
/// `posixly`/`help/prefix` and written with the rendered help text on
/// [`Outcome::HelpRequested`].
///
/// # Errors
///
/// Returns [`Error`] if the specification is malformed (a bug in the
/// program's declared options) or if `args`/`env` cannot be legally
/// applied to it (a bug in how the program was invoked).
#[cfg_attr(feature = "tracing", tracing::instrument(skip(tree, env)))]
pub fn resolve(
    tree: &mut impl ConfigStore,
    args: &[String],
    env: EnvTable,
    error_key: &str,
) -> Result<Outcome, Error> {
    let spec = compiler::compile(tree)?;

    let progname = args.first().map(String::as_str).unwrap_or("");
    let rest = if args.is_empty() { &args[..] } else { &args[1..] };

    let posixly = tree.meta(error_key, POSIXLY_META) == Some("1");
    let parsed = argparse::parse(&spec.options, rest, posixly)?;

    if parsed.help_requested() {
        #[cfg(feature = "tracing")]
        tracing::debug!("help requested, skipping value resolution");

        let usage = help::usage_line(progname, &spec);
        let options = help::options_block(&spec);
        tree.set_meta(error_key, HELP_USAGE_META, usage);
        tree.set_meta(error_key, HELP_OPTIONS_META, options);
        return Ok(Outcome::HelpRequested);
    }

    writer::write(tree, &spec.plans, &parsed, &env)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(plans = spec.plans.len(), "resolution complete");

    Ok(Outcome::Resolved)
}

/// Concatenates a rendered usage line, an optional prefix, and a
/// rendered options block into final help text. A thin convenience
/// over [`help::format_help`] for callers who already split those
/// three pieces out (e.g. to re-render after reading them back off
/// the error key).
#[must_use]
pub fn format_help(usage: &str, prefix: Option<&str>, options: &str) -> String {
    help::format_help(usage, prefix, options)
}
