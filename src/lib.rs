//! Intersection of large sets of 32-bit values stored as flat binary files.
//!
//! Every source marks the values it contains in a [`PresenceTable`] holding
//! one byte per possible value, each source OR'ing its own disjoint
//! [`Tag`]. A single ascending scan then emits every value whose byte holds
//! all tags.

pub mod error;
pub mod extract;
pub mod intersect;
pub mod marker;
pub mod partition;
pub mod report;
pub mod source;
pub mod table;
pub mod tag;
pub mod visitor;

pub use error::{Error, Result};
pub use intersect::{Intersection, SourceSummary, Summary};
pub use marker::{mark_file, MarkOptions};
pub use source::InputMode;
pub use table::PresenceTable;
pub use tag::Tag;

/// Number of distinct 32-bit values.
pub const UNIVERSE: u64 = 1 << 32;
