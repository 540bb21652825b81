//! Specification compiler (C1).
//!
//! Walks every key in the `spec` namespace, validates its `opt`/`env`/
//! `args` annotations, and produces the [`CompiledSpec`]: an option
//! table keyed by [`OptionKey`] plus an ordered list of [`PlanEntry`]
//! values the writer later applies. Compilation is fail-fast — the
//! first illegal annotation aborts the walk, matching the "no partial
//! recovery" framing of the resolver's error model rather than the
//! accumulate-and-report-many style used elsewhere in this family of
//! crates for runtime value errors.

use std::collections::HashMap;

use crate::error::Error;
use crate::tree::{is_array_key, ConfigStore};

const SPEC_NAMESPACE: &str = "spec";
const HELP_COLUMN: usize = 30;
const WRAP_THRESHOLD: usize = 28;

/// Whether an option takes an argument, and if so, how.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HasArg {
    /// The option is a bare flag.
    None,
    /// The argument is attached-only (`--name=value`); never consumes
    /// the next token.
    Optional,
    /// The argument is mandatory, attached or as the next token.
    Required,
}

impl HasArg {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("none") => HasArg::None,
            Some("optional") => HasArg::Optional,
            _ => HasArg::Required,
        }
    }
}

/// Whether a spec key accumulates a sequence or holds a single value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// A plain scalar key.
    Single,
    /// A key whose last path segment is `#`.
    Array,
}

/// A handle into the compiled option table: either a short character or
/// a long name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OptionKey {
    /// `-x`
    Short(char),
    /// `--name`
    Long(String),
}

/// One usable short or long option, as recorded in the option table.
#[derive(Clone, Debug)]
pub struct OptionEntry {
    /// The spec key this option writes into. `None` for the
    /// preregistered `-h`/`--help` entries, which have no plan entry.
    pub spec_key: Option<String>,
    /// Whether and how this option takes an argument.
    pub hasarg: HasArg,
    /// Whether occurrences accumulate (array) or overwrite (single).
    pub kind: Kind,
    /// Value written when the option carries no argument.
    pub flagvalue: String,
}

/// The per-spec-key resolution descriptor the writer consumes.
#[derive(Clone, Debug)]
pub struct PlanEntry {
    /// The originating key, e.g. `"spec/items/#"`.
    pub spec_key: String,
    /// The destination key, e.g. `"proc/items/#"`.
    pub proc_key: String,
    /// Every option slot bound to this key, in declaration order. May
    /// mix [`OptionKey::Short`] and [`OptionKey::Long`] entries.
    pub options: Vec<OptionKey>,
    /// Every environment variable bound to this key, in declaration
    /// order.
    pub env_vars: Vec<String>,
    /// Whether env names should be omitted from an extended help
    /// rendering (this core's own usage/options block never lists env
    /// names, so this is carried for host integrations that do).
    pub env_nohelp: bool,
    /// Set when `args = "remaining"`.
    pub remaining_args: bool,
    /// Whether this key is an array key.
    pub kind: Kind,
    /// The precomputed options-block line, or `None` if every slot
    /// bound to this key is hidden from help.
    pub help_line: Option<String>,
}

/// The output of the specification compiler: an option table plus an
/// ordered plan list.
#[derive(Clone, Debug, Default)]
pub struct CompiledSpec {
    /// Every usable short/long option, including the preregistered
    /// `-h`/`--help`.
    pub options: HashMap<OptionKey, OptionEntry>,
    /// Every spec key with at least one binding, in spec-tree order.
    pub plans: Vec<PlanEntry>,
    /// Whether any non-hidden option slot exists, for the usage line.
    pub has_opts: bool,
    /// Whether any key is bound to `args = "remaining"`, for the usage
    /// line.
    pub has_args: bool,
}

struct Slot {
    prefix: String,
    short: Option<char>,
    long: Option<String>,
    hasarg: HasArg,
    arg_help: String,
    flagvalue: String,
    nohelp: bool,
}

/// Compiles every key under the `spec` namespace into an option table
/// and plan list.
pub fn compile(tree: &impl ConfigStore) -> Result<CompiledSpec, Error> {
    let mut spec = CompiledSpec::default();
    preregister_help(&mut spec);

    for spec_key in tree.keys_with_prefix(SPEC_NAMESPACE) {
        let kind = if is_array_key(&spec_key) { Kind::Array } else { Kind::Single };
        let slots = read_slots(tree, &spec_key)?;

        let mut options = Vec::with_capacity(slots.len() * 2);
        let mut shorts_for_help = Vec::new();
        let mut longs_for_help = Vec::new();
        let mut has_opts_here = false;

        for slot in &slots {
            validate_slot(&spec_key, slot)?;

            if let Some(ch) = slot.short {
                if let Some(existing) = spec.options.get(&OptionKey::Short(ch)) {
                    let existing = owner_label(existing);
                    return Err(Error::DuplicateShortOption { ch, existing, spec_key: spec_key.clone() });
                }
                spec.options.insert(
                    OptionKey::Short(ch),
                    OptionEntry {
                        spec_key: Some(spec_key.clone()),
                        hasarg: slot.hasarg,
                        kind,
                        flagvalue: slot.flagvalue.clone(),
                    },
                );
                if !slot.nohelp {
                    shorts_for_help.push(format!("-{ch}"));
                    has_opts_here = true;
                }
            }

            if let Some(name) = &slot.long {
                if let Some(existing) = spec.options.get(&OptionKey::Long(name.clone())) {
                    let existing = owner_label(existing);
                    return Err(Error::DuplicateLongOption { name: name.clone(), existing, spec_key: spec_key.clone() });
                }
                spec.options.insert(
                    OptionKey::Long(name.clone()),
                    OptionEntry {
                        spec_key: Some(spec_key.clone()),
                        hasarg: slot.hasarg,
                        kind,
                        flagvalue: slot.flagvalue.clone(),
                    },
                );
                if !slot.nohelp {
                    longs_for_help.push(format!("--{name}{}", arg_placeholder(slot.hasarg, &slot.arg_help)));
                    has_opts_here = true;
                }
            }

            if slot.short.is_none() && slot.long.is_none() {
                unreachable!("a slot always binds a short or a long option");
            }
            if let Some(ch) = slot.short {
                options.push(OptionKey::Short(ch));
            }
            if let Some(name) = &slot.long {
                options.push(OptionKey::Long(name.clone()));
            }
        }

        if has_opts_here {
            spec.has_opts = true;
        }

        let env_vars = read_list(tree, &spec_key, "env");
        for name in &env_vars {
            if let Some(existing) = find_env_owner(&spec.plans, name) {
                return Err(Error::DuplicateEnvVar {
                    name: name.clone(),
                    existing,
                    spec_key: spec_key.clone(),
                });
            }
        }
        let env_nohelp = tree.meta(&spec_key, "env/nohelp") == Some("1");

        let remaining_args = match tree.meta(&spec_key, "args") {
            Some("remaining") => {
                if kind != Kind::Array {
                    return Err(Error::RemainingArgsOnScalar { spec_key: spec_key.clone() });
                }
                spec.has_args = true;
                true
            }
            _ => false,
        };

        if options.is_empty() && env_vars.is_empty() && !remaining_args {
            continue;
        }

        let help_text = slots
            .iter()
            .find_map(|s| tree.meta(&spec_key, &format!("{}/help", s.prefix)))
            .or_else(|| tree.meta(&spec_key, "description"));

        let mut prefix_parts = shorts_for_help;
        prefix_parts.extend(longs_for_help);
        let help_line = if prefix_parts.is_empty() {
            None
        } else {
            Some(render_help_line(&prefix_parts.join(", "), help_text.unwrap_or("")))
        };

        spec.plans.push(PlanEntry {
            proc_key: crate::tree::swap_namespace(&spec_key, "spec", "proc"),
            spec_key,
            options,
            env_vars,
            env_nohelp,
            remaining_args,
            kind,
            help_line,
        });
    }

    Ok(spec)
}

fn preregister_help(spec: &mut CompiledSpec) {
    spec.options.insert(
        OptionKey::Short('h'),
        OptionEntry { spec_key: None, hasarg: HasArg::None, kind: Kind::Single, flagvalue: "1".to_string() },
    );
    spec.options.insert(
        OptionKey::Long("help".to_string()),
        OptionEntry { spec_key: None, hasarg: HasArg::None, kind: Kind::Single, flagvalue: "1".to_string() },
    );
}

fn owner_label(entry: &OptionEntry) -> String {
    entry.spec_key.clone().unwrap_or_else(|| "--help".to_string())
}

fn find_env_owner(plans: &[PlanEntry], name: &str) -> Option<String> {
    plans.iter().find(|p| p.env_vars.iter().any(|v| v == name)).map(|p| p.spec_key.clone())
}

/// Enumerates the slot metadata prefixes for a key's `opt` annotation:
/// `["opt"]` for a scalar (or long-only, or absent) declaration, or
/// `["opt/#0", "opt/#1", ...]` when `opt = "#"`.
fn opt_slot_prefixes(tree: &impl ConfigStore, spec_key: &str) -> Vec<String> {
    match tree.meta(spec_key, "opt") {
        Some("#") => {
            let mut prefixes = Vec::new();
            let mut i = 0;
            loop {
                let prefix = format!("opt/#{i}");
                let has_short = tree.meta(spec_key, &prefix).is_some();
                let has_long = tree.meta(spec_key, &format!("{prefix}/long")).is_some();
                if !has_short && !has_long {
                    break;
                }
                prefixes.push(prefix);
                i += 1;
            }
            prefixes
        }
        _ => {
            let has_short = tree.meta(spec_key, "opt").is_some();
            let has_long = tree.meta(spec_key, "opt/long").is_some();
            if has_short || has_long {
                vec!["opt".to_string()]
            } else {
                vec![]
            }
        }
    }
}

fn read_slots(tree: &impl ConfigStore, spec_key: &str) -> Result<Vec<Slot>, Error> {
    opt_slot_prefixes(tree, spec_key)
        .into_iter()
        .map(|prefix| {
            let short_raw = tree.meta(spec_key, &prefix);
            let short = match short_raw {
                None => None,
                Some("#") => None, // the array marker itself is not a slot value
                Some("") => return Err(Error::EmptyShortOption { spec_key: spec_key.to_string() }),
                Some(raw) => raw.chars().next(),
            };
            let long = tree.meta(spec_key, &format!("{prefix}/long")).map(str::to_string);
            let hasarg = HasArg::parse(tree.meta(spec_key, &format!("{prefix}/arg")));
            let arg_help = tree
                .meta(spec_key, &format!("{prefix}/arg/help"))
                .unwrap_or("ARG")
                .to_string();
            let flagvalue_raw = tree.meta(spec_key, &format!("{prefix}/flagvalue"));
            let flagvalue = flagvalue_raw.unwrap_or("1").to_string();
            let nohelp = tree.meta(spec_key, &format!("{prefix}/nohelp")) == Some("1");

            if flagvalue_raw.is_some() && hasarg == HasArg::Required {
                return Err(Error::FlagvalueOnRequired { spec_key: spec_key.to_string() });
            }

            Ok(Slot { prefix, short, long, hasarg, arg_help, flagvalue, nohelp })
        })
        .collect()
}

fn validate_slot(spec_key: &str, slot: &Slot) -> Result<(), Error> {
    if let Some(ch) = slot.short {
        if ch == '-' || ch == 'h' {
            return Err(Error::ReservedOptionName { spec_key: spec_key.to_string(), name: ch.to_string() });
        }
    }
    if slot.long.as_deref() == Some("help") {
        return Err(Error::ReservedOptionName { spec_key: spec_key.to_string(), name: "help".to_string() });
    }
    Ok(())
}

fn arg_placeholder(hasarg: HasArg, arg_help: &str) -> String {
    match hasarg {
        HasArg::None => String::new(),
        HasArg::Required => format!("={arg_help}"),
        HasArg::Optional => format!("=[{arg_help}]"),
    }
}

fn render_help_line(prefix: &str, help_text: &str) -> String {
    if help_text.is_empty() {
        return format!("  {prefix}");
    }
    if prefix.len() > WRAP_THRESHOLD {
        format!("  {prefix}\n{}{help_text}", " ".repeat(HELP_COLUMN))
    } else {
        let pad = " ".repeat(WRAP_THRESHOLD - prefix.len());
        format!("  {prefix}{pad}{help_text}")
    }
}

/// Reads a metadata annotation that may be a scalar or an array
/// (`"#"` plus indexed `name/#0`, `name/#1`, … siblings), in order.
pub(crate) fn read_list(tree: &impl ConfigStore, spec_key: &str, name: &str) -> Vec<String> {
    match tree.meta(spec_key, name) {
        None => Vec::new(),
        Some("#") => {
            let mut items = Vec::new();
            let mut i = 0;
            loop {
                match tree.meta(spec_key, &format!("{name}/#{i}")) {
                    Some(v) => {
                        items.push(v.to_string());
                        i += 1;
                    }
                    None => break,
                }
            }
            items
        }
        Some(scalar) => vec![scalar.to_string()],
    }
}
