// src/model/naming.rs

//! Fresh, collision-free node names.

use crate::model::graph::TaskGraph;
use crate::model::task::TaskName;

/// Joins the parts of synthetic view ids (spacers, edges). Node names may not
/// contain it.
pub const ID_SEPARATOR: char = '~';

/// Prefix for generated placeholder names (`placeholder-1`, `placeholder-2`, ...).
pub const PLACEHOLDER_PREFIX: &str = "placeholder";

/// Smallest `placeholder-<n>` (n >= 1) not used by any node in `graph`.
pub fn next_placeholder_name(graph: &TaskGraph) -> TaskName {
    suffixed_name(PLACEHOLDER_PREFIX, |candidate| graph.contains(candidate))
}

/// `base` itself if it is free, otherwise the first free `base-<n>`.
pub fn unique_name(base: &str, is_taken: impl Fn(&str) -> bool) -> TaskName {
    if is_taken(base) {
        suffixed_name(base, is_taken)
    } else {
        base.to_string()
    }
}

/// True when `name` could collide with a synthetic spacer or edge id.
pub fn is_reserved_name(name: &str) -> bool {
    name.contains(ID_SEPARATOR)
}

fn suffixed_name(base: &str, is_taken: impl Fn(&str) -> bool) -> TaskName {
    let mut n: usize = 1;
    loop {
        let candidate = format!("{base}-{n}");
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
