//! Module registry collaborator: which content modules the host has installed.

use std::collections::HashSet;

/// Answers whether a content module is installed in the host.
pub trait ModuleRegistry: Send + Sync {
    fn has_module(&self, identifier: &str) -> bool;
}

/// A fixed set of installed module identifiers.
///
/// Identifiers are compared exactly (`Radiantweb.Problog` and
/// `radiantweb.problog` are different modules).
#[derive(Debug, Clone, Default)]
pub struct StaticModuleRegistry {
    installed: HashSet<String>,
}

impl StaticModuleRegistry {
    pub fn new<I, S>(installed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            installed: installed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn install(&mut self, identifier: impl Into<String>) {
        self.installed.insert(identifier.into());
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }
}

impl ModuleRegistry for StaticModuleRegistry {
    fn has_module(&self, identifier: &str) -> bool {
        self.installed.contains(identifier)
    }
}
