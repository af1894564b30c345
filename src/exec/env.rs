// src/exec/env.rs

//! Environment mapping handed to child processes.
//!
//! [`Environment`] is an ordered `OsString -> OsString` map. Using OS strings
//! end to end means values with non-ASCII (or even non-UTF-8) content survive
//! the trip from the ambient environment to the spawn call unchanged.

use std::collections::{BTreeMap, HashMap};
use std::ffi::{OsStr, OsString};

/// Key/value environment for a child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<OsString, OsString>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment.
    pub fn from_ambient() -> Self {
        std::env::vars_os().collect()
    }

    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    pub fn set(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Remove a key. Absent keys are a no-op.
    pub fn remove(&mut self, key: impl AsRef<OsStr>) -> Option<OsString> {
        self.vars.remove(key.as_ref())
    }

    pub fn contains_key(&self, key: impl AsRef<OsStr>) -> bool {
        self.vars.contains_key(key.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for Environment {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for Environment {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

/// Turn an environment into the pairs the spawn call expects.
///
/// `None` means "the ambient environment". The input is never modified.
/// Windows treats variable names case-insensitively, so there the pairs are
/// deduplicated ignoring case with the last occurrence winning.
pub fn encode_environment(env: Option<&Environment>) -> Vec<(OsString, OsString)> {
    let pairs: Vec<(OsString, OsString)> = match env {
        Some(env) => env
            .iter()
            .map(|(k, v)| (k.to_os_string(), v.to_os_string()))
            .collect(),
        None => std::env::vars_os().collect(),
    };

    platform_encode(pairs)
}

#[cfg(windows)]
fn platform_encode(pairs: Vec<(OsString, OsString)>) -> Vec<(OsString, OsString)> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<(OsString, OsString)> = Vec::with_capacity(pairs.len());

    for (key, value) in pairs {
        let folded = key.to_string_lossy().to_uppercase();
        match seen.get(&folded) {
            Some(&idx) => out[idx] = (key, value),
            None => {
                seen.insert(folded, out.len());
                out.push((key, value));
            }
        }
    }

    out
}

#[cfg(not(windows))]
fn platform_encode(pairs: Vec<(OsString, OsString)>) -> Vec<(OsString, OsString)> {
    pairs
}
