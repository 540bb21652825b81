//! Errors raised by the resolver.
//!
//! Two families, matching the resolver's two failure modes: an
//! [`Error`] raised while compiling the specification tree is an
//! *illegal specification* (a bug in the program's declared options);
//! one raised while parsing argv or writing values is an *illegal use*
//! (a bug in how the program was invoked). Both carry a stable
//! diagnostic code and a short help hint via `miette`, the way the
//! rest of this crate's diagnostics are built.

use miette::Diagnostic;
use thiserror::Error as ThisError;

/// Everything that can go wrong resolving a specification against argv
/// and the environment.
#[derive(Debug, ThisError, Diagnostic)]
pub enum Error {
    // ------------------------------------------------------------------
    // Illegal specification (detected by the compiler, C1)
    // ------------------------------------------------------------------
    /// `opt` named `-` or `h`, or `opt/long` named `help`.
    #[error("'{spec_key}' binds the reserved option name '{name}'")]
    #[diagnostic(
        code(libopts::reserved_option_name),
        help("short option 'h' and long option \"help\" are reserved for --help")
    )]
    ReservedOptionName {
        /// The spec key attempting the reservation.
        spec_key: String,
        /// The offending name (`"-"`, `"h"`, or `"help"`).
        name: String,
    },

    /// The short character slot was empty.
    #[error("'{spec_key}' declares an empty short option character")]
    #[diagnostic(
        code(libopts::empty_short_option),
        help("a short option must be exactly one non-'-' byte")
    )]
    EmptyShortOption {
        /// The offending spec key.
        spec_key: String,
    },

    /// Two spec keys both declared the same short option character.
    #[error("short option '-{ch}' is already bound to '{existing}' (wanted by '{spec_key}')")]
    #[diagnostic(
        code(libopts::duplicate_short_option),
        help("each short option character may be bound to exactly one spec key")
    )]
    DuplicateShortOption {
        /// The repeated character.
        ch: char,
        /// The spec key that already owns it.
        existing: String,
        /// The spec key that tried to rebind it.
        spec_key: String,
    },

    /// Two spec keys both declared the same long option name.
    #[error("long option '--{name}' is already bound to '{existing}' (wanted by '{spec_key}')")]
    #[diagnostic(
        code(libopts::duplicate_long_option),
        help("each long option name may be bound to exactly one spec key")
    )]
    DuplicateLongOption {
        /// The repeated name.
        name: String,
        /// The spec key that already owns it.
        existing: String,
        /// The spec key that tried to rebind it.
        spec_key: String,
    },

    /// Two spec keys both declared the same environment variable.
    #[error("environment variable '{name}' is already bound to '{existing}' (wanted by '{spec_key}')")]
    #[diagnostic(
        code(libopts::duplicate_env_var),
        help("each environment variable may be bound to exactly one spec key")
    )]
    DuplicateEnvVar {
        /// The repeated variable name.
        name: String,
        /// The spec key that already owns it.
        existing: String,
        /// The spec key that tried to rebind it.
        spec_key: String,
    },

    /// `opt/flagvalue` set explicitly alongside `opt/arg = "required"`.
    #[error("'{spec_key}' sets flagvalue but its argument is required")]
    #[diagnostic(
        code(libopts::flagvalue_on_required),
        help("flagvalue only applies when opt/arg is \"none\" or \"optional\"")
    )]
    FlagvalueOnRequired {
        /// The offending spec key.
        spec_key: String,
    },

    /// `args = "remaining"` on a spec key that is not an array key.
    #[error("'{spec_key}' sets args = \"remaining\" but is not an array key")]
    #[diagnostic(
        code(libopts::remaining_args_on_scalar),
        help("args = \"remaining\" is only legal on a key whose last segment is '#'")
    )]
    RemainingArgsOnScalar {
        /// The offending spec key.
        spec_key: String,
    },

    // ------------------------------------------------------------------
    // Illegal use (detected by the parser and writer, C3/C4)
    // ------------------------------------------------------------------
    /// An unrecognized `-x`.
    #[error("unknown option '-{0}'")]
    #[diagnostic(code(libopts::unknown_short_option))]
    UnknownShortOption(char),

    /// An unrecognized `--name`.
    #[error("unknown option '--{0}'")]
    #[diagnostic(code(libopts::unknown_long_option))]
    UnknownLongOption(String),

    /// `-x` required an argument but none followed.
    #[error("option '-{0}' requires an argument")]
    #[diagnostic(code(libopts::missing_short_argument))]
    MissingShortArgument(char),

    /// `--name` required an argument but none followed.
    #[error("option '--{0}' requires an argument")]
    #[diagnostic(code(libopts::missing_long_argument))]
    MissingLongArgument(String),

    /// `--name=value` where `--name` takes no argument.
    #[error("option '--{0}' does not take an argument")]
    #[diagnostic(code(libopts::unexpected_long_argument))]
    UnexpectedLongArgument(String),

    /// A `single`-kind option appeared more than once.
    #[error("option '{0}' cannot be repeated")]
    #[diagnostic(
        code(libopts::repeated_option),
        help("declare this option as an array key if repetition should accumulate values")
    )]
    Repeated(String),

    /// Two distinct bindings both resolved a value for the same spec key.
    #[error("another option has already supplied a value for '{0}'")]
    #[diagnostic(code(libopts::already_resolved))]
    AlreadyResolved(String),

    /// An environment variable a plan entry binds holds a value that is
    /// not valid UTF-8.
    #[error("environment variable '{0}' is not valid UTF-8")]
    #[diagnostic(
        code(libopts::invalid_env_value),
        help("set this variable to a valid UTF-8 string, or stop binding it to an option")
    )]
    InvalidEnvValue(String),
}
