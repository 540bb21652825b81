//! Help renderer (C5).
//!
//! Synthesizes a usage line and an options block from the compiled
//! specification alone — it never touches argv, the environment, or
//! the occurrence map. Assembly is a single pass per line: one
//! growable buffer, one `writeln!` per row, rather than repeated
//! allocate-format-concatenate cycles.

use std::fmt::Write as _;

use crate::compiler::CompiledSpec;

/// The literal header that begins a non-empty options block.
const OPTIONS_HEADER: &str = "OPTIONS";

/// Builds the `Usage: ...` line.
///
/// `progname` should be the raw `argv[0]`; everything up to and
/// including the last `/` is stripped.
#[must_use]
pub fn usage_line(progname: &str, spec: &CompiledSpec) -> String {
    let progname = progname.rsplit('/').next().unwrap_or(progname);
    let mut line = format!("Usage: {progname}");
    if spec.has_opts {
        line.push_str(" [OPTION]...");
    }
    if spec.has_args {
        line.push_str(" [ARG]...");
    }
    line.push('\n');
    line
}

/// Builds the `OPTIONS` block, or an empty string if no plan entry
/// carries a rendered help line.
#[must_use]
pub fn options_block(spec: &CompiledSpec) -> String {
    let lines: Vec<&str> = spec.plans.iter().filter_map(|p| p.help_line.as_deref()).collect();
    if lines.is_empty() {
        return String::new();
    }

    let mut block = String::with_capacity(OPTIONS_HEADER.len() + 1 + lines.iter().map(|l| l.len() + 1).sum::<usize>());
    let _ = writeln!(block, "{OPTIONS_HEADER}");
    for line in lines {
        let _ = writeln!(block, "{line}");
    }
    block
}

/// Concatenates the usage line, an optional caller-supplied prefix,
/// and the options block into the final help text.
#[must_use]
pub fn format_help(usage: &str, prefix: Option<&str>, options: &str) -> String {
    let mut text = String::from(usage);
    if let Some(prefix) = prefix {
        text.push_str(prefix);
        if !prefix.ends_with('\n') {
            text.push('\n');
        }
    }
    text.push_str(options);
    text
}
