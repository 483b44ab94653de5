// src/errors.rs

//! Crate-wide error types and aliases.

use thiserror::Error;

use crate::model::TaskName;
use crate::pipeline::ValidationReport;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cycle detected in task graph: {0}")]
    GraphCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Edit rejected: {0}")]
    Edit(#[from] EditError),

    #[error("Pipeline cannot be saved: {0}")]
    Validation(ValidationReport),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<GraphDefect> for BuilderError {
    fn from(defect: GraphDefect) -> Self {
        match defect {
            GraphDefect::Cycle(_) => BuilderError::GraphCycle(defect.to_string()),
            other => BuilderError::ConfigError(other.to_string()),
        }
    }
}

/// Structural invariant violated by a task graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphDefect {
    #[error("name '{0}' is used by more than one node")]
    DuplicateName(TaskName),

    #[error("'{node}' runs after unknown node '{missing}'")]
    DanglingReference { node: TaskName, missing: TaskName },

    #[error("'{0}' cannot run after itself")]
    SelfReference(TaskName),

    #[error("'{node}' lists '{dep}' more than once in run_after")]
    DuplicateDependency { node: TaskName, dep: TaskName },

    #[error("name '{0}' contains '~', which is reserved for spacer and edge ids")]
    ReservedName(TaskName),

    #[error("cycle detected in task graph involving '{0}'")]
    Cycle(TaskName),
}

/// Why the graph engine refused an edit.
///
/// The caller's graph is always left untouched when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("no task or placeholder named '{0}'")]
    UnknownNode(TaskName),

    #[error("no task named '{0}'")]
    UnknownTask(TaskName),

    #[error("no placeholder named '{0}'")]
    UnknownPlaceholder(TaskName),

    #[error("name '{0}' is already used by another node")]
    NameTaken(TaskName),

    #[error("the first task can only be added to an empty graph")]
    GraphNotEmpty,

    #[error("task definition '{0}' is not in the catalog")]
    UnknownDefinition(String),

    #[error("task catalog is unavailable: {0}")]
    CatalogUnavailable(String),

    #[error(transparent)]
    Defect(#[from] GraphDefect),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BuilderError>;
