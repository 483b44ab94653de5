// src/model/mod.rs

//! Task and reference model.
//!
//! - [`task`] holds the node value types ([`Task`], [`ListTask`]) and the
//!   [`GraphNode`] view shared by both.
//! - [`graph`] holds [`TaskGraph`], the (tasks, list tasks) pair, plus its
//!   integrity checks.
//! - [`naming`] generates fresh node names.

pub mod graph;
pub mod naming;
pub mod task;

pub use graph::TaskGraph;
pub use naming::{is_reserved_name, ID_SEPARATOR};
pub use task::{
    GraphNode, ListTask, ParamValue, Task, TaskName, TaskParam, TaskRef, TaskResourceBinding,
    TaskScope,
};
