//! Value writer (C4).
//!
//! Applies the compiled plan list against parsed occurrences and the
//! environment table, one plan entry at a time, in plan order — an
//! ordered list of sources walked by priority, first match wins, with
//! a fixed four-source precedence: short option, long option,
//! environment variable, then remaining positionals.

use crate::argparse::{Occurrence, ParseOutcome};
use crate::compiler::{Kind, OptionKey, PlanEntry};
use crate::env::EnvTable;
use crate::error::Error;
use crate::tree::{array_element, ConfigStore, ENV_LIST_SEP};

enum Source {
    Scalar(String),
    List(Vec<String>),
}

/// Resolves every plan entry and writes the winning value into `tree`.
pub fn write(
    tree: &mut impl ConfigStore,
    plans: &[PlanEntry],
    parsed: &ParseOutcome,
    env: &EnvTable,
) -> Result<(), Error> {
    for plan in plans {
        let Some(source) = choose_source(plan, parsed, env)? else { continue };

        if plan.kind == Kind::Single {
            if let Some(existing) = tree.value(&plan.proc_key) {
                if !existing.is_empty() {
                    return Err(Error::AlreadyResolved(plan.spec_key.clone()));
                }
            }
        }

        match source {
            Source::Scalar(value) if plan.kind == Kind::Single => {
                tree.set_value(&plan.proc_key, value);
            }
            Source::Scalar(raw) => {
                let elements: Vec<String> = raw.split(ENV_LIST_SEP).map(str::to_string).collect();
                write_array(tree, &plan.proc_key, &elements);
            }
            Source::List(values) => write_array(tree, &plan.proc_key, &values),
        }
    }

    Ok(())
}

/// Picks the one source that wins for this plan entry, by the fixed
/// precedence short > long > env > remaining positionals.
///
/// Only an env name this plan actually binds is ever looked up via
/// [`EnvTable::try_get`], so a non-UTF-8 variable nobody consults never
/// surfaces [`Error::InvalidEnvValue`] — it errors only once it is the
/// binding that would have won.
fn choose_source(plan: &PlanEntry, parsed: &ParseOutcome, env: &EnvTable) -> Result<Option<Source>, Error> {
    for key in &plan.options {
        if matches!(key, OptionKey::Short(_)) {
            if let Some(occurrence) = parsed.occurrences.get(key) {
                return Ok(Some(occurrence_source(occurrence)));
            }
        }
    }

    for key in &plan.options {
        if matches!(key, OptionKey::Long(_)) {
            if let Some(occurrence) = parsed.occurrences.get(key) {
                return Ok(Some(occurrence_source(occurrence)));
            }
        }
    }

    for name in &plan.env_vars {
        if let Some(value) = env.try_get(name)? {
            return Ok(Some(Source::Scalar(value.to_string())));
        }
    }

    if plan.remaining_args {
        return Ok(Some(Source::List(parsed.positionals.clone())));
    }

    Ok(None)
}

fn occurrence_source(occurrence: &Occurrence) -> Source {
    match occurrence {
        Occurrence::Single(value) => Source::Scalar(value.clone()),
        Occurrence::Array(values) => Source::List(values.clone()),
    }
}

/// Writes an ordered list of elements under an array key, preserving
/// order, and sets the array parent's value to the last-index label.
/// An empty list writes nothing: there is no sensible "last index" for
/// zero elements, so a `remaining` plan with no positionals behaves as
/// if no source had resolved at all.
fn write_array(tree: &mut impl ConfigStore, proc_key: &str, elements: &[String]) {
    if elements.is_empty() {
        return;
    }
    for (index, value) in elements.iter().enumerate() {
        tree.set_value(&array_element(proc_key, index), value.clone());
    }
    tree.set_value(proc_key, format!("#{}", elements.len() - 1));
}
