// src/types.rs

use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

use crate::view::LayoutParams;

/// Which canvas a pipeline is laid out for.
///
/// - `Builder`: the editable canvas, with outer padding around the graph.
/// - `Viewer`: the read-only canvas, flush with its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Builder,
    Viewer,
}

impl LayoutMode {
    pub fn params(self) -> LayoutParams {
        match self {
            LayoutMode::Builder => LayoutParams::builder(),
            LayoutMode::Viewer => LayoutParams::viewer(),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "builder" => Ok(LayoutMode::Builder),
            "viewer" => Ok(LayoutMode::Viewer),
            other => Err(format!(
                "invalid layout mode: {other} (expected \"builder\" or \"viewer\")"
            )),
        }
    }
}
