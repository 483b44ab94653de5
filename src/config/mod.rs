// src/config/mod.rs

//! Configuration loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed pipeline file and edit script (`model.rs`).
//! - Load them from disk (`loader.rs`).
//! - Validate a loaded pipeline into a [`TaskGraph`](crate::model::TaskGraph)
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_edit_script, load_from_path};
pub use model::{EditScript, RawListTaskEntry, RawPipelineFile, RawTaskEntry};
pub use validate::validate_raw_pipeline;
