//! The configuration-tree collaborator.
//!
//! The resolver does not own a configuration-tree implementation of its
//! own in the system this crate was extracted from; it is handed one by
//! its host. [`ConfigStore`] is the minimal seam the resolver needs, and
//! [`ConfigTree`] is a small in-memory implementation of it so this crate
//! is independently usable and testable.
//!
//! Paths are `/`-separated strings. A key whose last segment is `#` is an
//! *array key*; its concrete elements live at sibling paths `#0`, `#1`, …
//! and the array key's own value holds the last index as a string
//! (`"#2"` for a three-element array).

use std::collections::HashMap;

/// Separator used to split PATH-style environment variable values.
///
/// This is a compile-time platform choice, not a runtime setting.
pub const ENV_LIST_SEP: char = if cfg!(windows) { ';' } else { ':' };

/// The seam between the resolver and a host's configuration-tree type.
///
/// Implement this for your own tree type to resolve directly into it
/// instead of going through [`ConfigTree`].
pub trait ConfigStore {
    /// Returns every key whose path starts with `prefix`, in stable
    /// (insertion) order.
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;

    /// Reads a key's string value.
    fn value(&self, path: &str) -> Option<&str>;

    /// Reads one metadata entry on a key.
    fn meta(&self, path: &str, name: &str) -> Option<&str>;

    /// Writes a key's string value, creating the key if absent.
    fn set_value(&mut self, path: &str, value: impl Into<String>);

    /// Writes one metadata entry on a key, creating the key if absent.
    fn set_meta(&mut self, path: &str, name: &str, value: impl Into<String>);
}

#[derive(Debug, Default, Clone)]
struct Entry {
    value: String,
    meta: HashMap<String, String>,
}

/// A small in-memory, insertion-ordered implementation of [`ConfigStore`].
#[derive(Debug, Default, Clone)]
pub struct ConfigTree {
    order: Vec<String>,
    entries: HashMap<String, Entry>,
}

impl ConfigTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_mut(&mut self, path: &str) -> &mut Entry {
        if !self.entries.contains_key(path) {
            self.order.push(path.to_string());
            self.entries.insert(path.to_string(), Entry::default());
        }
        self.entries.get_mut(path).expect("just inserted")
    }
}

impl ConfigStore for ConfigTree {
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.order
            .iter()
            .filter(|k| k.as_str() == prefix || k.starts_with(&format!("{prefix}/")))
            .cloned()
            .collect()
    }

    fn value(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(|e| e.value.as_str())
    }

    fn meta(&self, path: &str, name: &str) -> Option<&str> {
        self.entries.get(path)?.meta.get(name).map(String::as_str)
    }

    fn set_value(&mut self, path: &str, value: impl Into<String>) {
        self.entry_mut(path).value = value.into();
    }

    fn set_meta(&mut self, path: &str, name: &str, value: impl Into<String>) {
        self.entry_mut(path).meta.insert(name.to_string(), value.into());
    }
}

/// Derives a sibling path by substituting a leading namespace segment,
/// e.g. `swap_namespace("spec/items/#", "spec", "proc")` is
/// `"proc/items/#"`.
#[must_use]
pub fn swap_namespace(path: &str, from: &str, to: &str) -> String {
    match path.strip_prefix(from) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => format!("{to}{rest}"),
        _ => path.to_string(),
    }
}

/// True if `path`'s last segment is the array marker `#`.
#[must_use]
pub fn is_array_key(path: &str) -> bool {
    path.rsplit('/').next() == Some("#")
}

/// Composes the path of the `index`-th element of an array key, e.g.
/// `array_element("proc/items/#", 3)` is `"proc/items/#3"`.
#[must_use]
pub fn array_element(array_path: &str, index: usize) -> String {
    let base = array_path.strip_suffix('#').unwrap_or(array_path);
    format!("{base}#{index}")
}
