//! Spatial indexing for flower hit testing.
//!
//! This module provides an R-tree based index so pointer positions can be
//! mapped back to the paper under them in O(log n).

mod rtree;

pub use rtree::FlowerIndex;
