//! Paper records and the per-build identifier index.
//!
//! Records are the raw input of a garden build. The index keeps them
//! addressable by id for the lifetime of one build and serves the detail
//! and coauthor queries made against the finished garden.

mod id;
mod index;
mod record;

pub use id::PaperId;
pub use index::{
    CoauthorCount, CoauthorSelection, PaperDetails, PaperIndex, PaperLink,
    DEFAULT_COAUTHOR_LIMIT,
};
pub use record::PaperRecord;
