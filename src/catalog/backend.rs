// src/catalog/backend.rs

//! Pluggable catalog backend abstraction.
//!
//! An editing session asks a `CatalogBackend` once for the task definitions
//! it may offer. `FileCatalog` is the production implementation, reading a
//! TOML catalog file; tests provide their own backend that answers from
//! memory or fails on purpose.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use serde::Deserialize;
use tracing::debug;

use crate::catalog::{AvailableTasks, TaskDefinition};
use crate::errors::Result;
use crate::model::{TaskName, TaskScope};

/// Trait abstracting where task definitions come from.
pub trait CatalogBackend: Send + Sync + 'static {
    /// List every available definition whose name is not in `excluding`.
    fn list_available(
        &self,
        excluding: Vec<TaskName>,
    ) -> Pin<Box<dyn Future<Output = Result<AvailableTasks>> + Send + '_>>;
}

/// On-disk shape of a catalog file.
///
/// ```toml
/// [[local]]
/// name = "git-clone"
///
/// [[local.params]]
/// name = "url"
///
/// [[global]]
/// name = "buildah"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCatalogFile {
    #[serde(default)]
    pub local: Vec<TaskDefinition>,
    #[serde(default)]
    pub global: Vec<TaskDefinition>,
}

impl From<RawCatalogFile> for AvailableTasks {
    fn from(raw: RawCatalogFile) -> Self {
        let with_scope = |defs: Vec<TaskDefinition>, scope: TaskScope| -> Vec<TaskDefinition> {
            defs.into_iter()
                .map(|mut def| {
                    def.scope = scope;
                    def
                })
                .collect()
        };

        AvailableTasks {
            local: with_scope(raw.local, TaskScope::Local),
            global: with_scope(raw.global, TaskScope::Global),
        }
    }
}

/// Parse a catalog from TOML text.
pub fn parse_catalog(contents: &str) -> Result<AvailableTasks> {
    let raw: RawCatalogFile = toml::from_str(contents)?;
    Ok(raw.into())
}

/// Catalog backed by a TOML file, read fresh on every request.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogBackend for FileCatalog {
    fn list_available(
        &self,
        excluding: Vec<TaskName>,
    ) -> Pin<Box<dyn Future<Output = Result<AvailableTasks>> + Send + '_>> {
        Box::pin(async move {
            let contents = tokio::fs::read_to_string(&self.path).await?;
            let available = parse_catalog(&contents)?;
            let filtered = available.excluding(&excluding);

            debug!(
                path = %self.path.display(),
                local = filtered.local.len(),
                global = filtered.global.len(),
                "catalog loaded from file"
            );

            Ok(filtered)
        })
    }
}
