// src/catalog/mod.rs

//! Task catalog adapter.
//!
//! The catalog is an external collaborator: it supplies the reusable task
//! definitions a placeholder can be resolved into.
//!
//! - [`definition`] holds the definition types and their conversion into a
//!   graph [`Task`](crate::model::Task).
//! - [`backend`] holds the [`CatalogBackend`] trait and the file-backed
//!   implementation.

pub mod backend;
pub mod definition;

pub use backend::{parse_catalog, CatalogBackend, FileCatalog, RawCatalogFile};
pub use definition::{ParamSpec, ResourceSpec, TaskDefinition};

use crate::model::TaskScope;

/// Definitions available to the "choose a task" picker, split by scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableTasks {
    pub local: Vec<TaskDefinition>,
    pub global: Vec<TaskDefinition>,
}

impl AvailableTasks {
    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.global.is_empty()
    }

    pub fn len(&self) -> usize {
        self.local.len() + self.global.len()
    }

    /// Resolve a definition by name.
    ///
    /// With an explicit scope only that scope is searched; without one, local
    /// definitions shadow global ones.
    pub fn resolve(&self, name: &str, scope: Option<TaskScope>) -> Option<&TaskDefinition> {
        match scope {
            Some(TaskScope::Local) => find_named(&self.local, name),
            Some(TaskScope::Global) => find_named(&self.global, name),
            None => find_named(&self.local, name).or_else(|| find_named(&self.global, name)),
        }
    }

    /// Copy of this catalog without definitions named in `names`.
    pub fn excluding<S: AsRef<str>>(&self, names: &[S]) -> AvailableTasks {
        let keep = |def: &&TaskDefinition| !names.iter().any(|n| n.as_ref() == def.name);
        AvailableTasks {
            local: self.local.iter().filter(keep).cloned().collect(),
            global: self.global.iter().filter(keep).cloned().collect(),
        }
    }
}

fn find_named<'a>(defs: &'a [TaskDefinition], name: &str) -> Option<&'a TaskDefinition> {
    defs.iter().find(|d| d.name == name)
}
