//! Environment reader (C2).
//!
//! Turns a list of `NAME=VALUE` strings into a lookup table. The first
//! `=` delimits; anything after it, including further `=` characters,
//! is part of the value. If a name repeats, the last occurrence wins: a
//! flat, unopinionated read of whatever the process environment (or a
//! caller-supplied stand-in) contains.

use std::collections::HashMap;
use std::ffi::OsString;

use crate::error::Error;

/// One table entry: a value that came through cleanly as UTF-8, or one
/// that did not and was only lossily convertible.
#[derive(Debug, Clone)]
enum EnvValue {
    Clean(String),
    Lossy(String),
}

impl EnvValue {
    fn as_str(&self) -> &str {
        match self {
            EnvValue::Clean(s) | EnvValue::Lossy(s) => s,
        }
    }
}

/// A `NAME -> VALUE` table read from an environment-like source.
#[derive(Debug, Default, Clone)]
pub struct EnvTable {
    vars: HashMap<String, EnvValue>,
}

impl EnvTable {
    /// Builds a table from `NAME=VALUE` pairs, such as a captured envp.
    /// Entries without an `=` are ignored. Pairs are always valid UTF-8
    /// here (the input is already `&str`), so every entry is `Clean`.
    #[must_use]
    pub fn from_pairs<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vars = HashMap::new();
        for entry in raw {
            let entry = entry.as_ref();
            if let Some((name, value)) = entry.split_once('=') {
                vars.insert(name.to_string(), EnvValue::Clean(value.to_string()));
            }
        }
        Self { vars }
    }

    /// Reads the table from this process's own environment.
    ///
    /// A value that is not valid UTF-8 is kept as its lossy conversion
    /// rather than dropped: a variable nobody's plan consults should
    /// never abort resolution just because it happens to hold garbage.
    /// [`try_get`](Self::try_get) surfaces [`Error::InvalidEnvValue`]
    /// for such a variable if and when a plan actually consults it.
    #[must_use]
    pub fn from_process() -> Self {
        let mut vars = HashMap::new();
        for (name, value) in std::env::vars_os() {
            let name = name.to_string_lossy().into_owned();
            vars.insert(name, env_value(value));
        }
        Self { vars }
    }

    /// Looks up a variable by name, lossily. Use this when the caller
    /// does not need to distinguish a mangled value from a clean one.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(EnvValue::as_str)
    }

    /// Looks up a variable by name, rejecting a value that was not
    /// valid UTF-8 to begin with. This is what the writer calls for
    /// every env name a plan entry actually binds: a variable nobody
    /// consults may hold anything, but one that resolution depends on
    /// must not be silently mangled.
    pub fn try_get(&self, name: &str) -> Result<Option<&str>, Error> {
        match self.vars.get(name) {
            None => Ok(None),
            Some(EnvValue::Clean(value)) => Ok(Some(value.as_str())),
            Some(EnvValue::Lossy(_)) => Err(Error::InvalidEnvValue(name.to_string())),
        }
    }
}

fn env_value(value: OsString) -> EnvValue {
    match value.into_string() {
        Ok(value) => EnvValue::Clean(value),
        Err(raw) => EnvValue::Lossy(raw.to_string_lossy().into_owned()),
    }
}
