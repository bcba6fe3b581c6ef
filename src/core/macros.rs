//! Path-variable macro tracking.
//!
//! Override urls may reference IDE path variables such as `$USER_HOME$`.
//! Every macro seen during a sync is collected so the caller can report
//! which variables the IDE must have defined.

use std::sync::LazyLock;

use regex::Regex;

static MACRO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$([^$]+)\$").unwrap());

/// Run-scoped accumulator of referenced macro names, insertion ordered.
#[derive(Debug, Default)]
pub struct MacroSet {
    names: Vec<String>,
}

impl MacroSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every `$NAME$` occurrence in the given url.
    pub fn scan(&mut self, url: &str) {
        for capture in MACRO_RE.captures_iter(url) {
            self.insert(&capture[1]);
        }
    }

    fn insert(&mut self, name: &str) {
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
