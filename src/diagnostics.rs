//! Build diagnostics and boundary errors.
//!
//! Nothing inside a garden build is fatal. Problems with individual papers
//! or connections degrade that paper's presence in the output and are
//! reported as [`Diagnostic`] values next to the drawing. [`GardenError`]
//! only covers the JS boundary: documents or configs that cannot be
//! decoded at all.

use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::paper::PaperId;

/// A non-fatal problem found while building a garden.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A non-root paper whose parent was not known when it was read.
    #[error("parent {} not found for paper {paper}", display_parent(.parent))]
    DanglingParent {
        paper: PaperId,
        parent: Option<PaperId>,
    },

    /// A paper attached to a parent chain that never reaches a root.
    #[error("paper {paper} is not reachable from any root")]
    UnreachablePaper { paper: PaperId },

    /// The same id was used by more than one record.
    #[error("duplicate paper id {paper}")]
    DuplicatePaperId { paper: PaperId },

    /// A paper with more children than a fork holds; children are fanned out.
    #[error("paper {paper} has {count} children, fanning them out")]
    ExcessChildren { paper: PaperId, count: usize },

    /// An indirect connection whose target had no position yet.
    #[error("indirect connection target {target} not found for paper {paper}")]
    UnresolvedConnection { paper: PaperId, target: PaperId },
}

fn display_parent(parent: &Option<PaperId>) -> String {
    match parent {
        Some(id) => id.to_string(),
        None => "<none>".to_owned(),
    }
}

impl Diagnostic {
    /// The paper the diagnostic is about.
    pub fn paper(&self) -> &PaperId {
        match self {
            Self::DanglingParent { paper, .. }
            | Self::UnreachablePaper { paper }
            | Self::DuplicatePaperId { paper }
            | Self::ExcessChildren { paper, .. }
            | Self::UnresolvedConnection { paper, .. } => paper,
        }
    }
}

/// Errors raised at the JS boundary.
#[derive(Error, Debug)]
pub enum GardenError {
    #[error("invalid paper document: {0}")]
    InvalidPapers(String),

    #[error("invalid garden config: {0}")]
    InvalidConfig(String),

    #[error("failed to serialize garden: {0}")]
    Serialization(String),
}

impl From<GardenError> for JsValue {
    fn from(err: GardenError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
