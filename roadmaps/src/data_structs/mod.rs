//! Core in-memory representation of an imported roadmap file.
//!
//! - [`Annotation`]: one matched interval between a sequence and the
//!   reference k-mer index; its `start`/`finish` slots later hold graph-node
//!   identifiers.
//! - [`Roadmap`]: number of annotations belonging to one sequence.
//! - [`RoadmapArray`]: owner of all roadmaps and annotations, stored flat and
//!   without per-sequence offsets.
//! - [`IndexConversionTable`] / [`IndexOrder`]: recovery of the original
//!   sequence order when the file was written out of order.
//! - [`OffsetTable`]: optional cumulative offsets for random access.
//! - [`typedef`]: numeric aliases for coordinates, identifiers and counts.

pub mod annotation;
mod enums;
pub mod index_conversion;
mod offsets;
pub mod roadmap;
mod roadmap_array;
pub mod typedef;

pub use annotation::{
    annotation_length,
    Annotation,
};
pub use enums::{
    SlotPhase,
    Strand,
};
pub use index_conversion::{
    IndexConversion,
    IndexConversionTable,
    IndexOrder,
};
pub use offsets::OffsetTable;
pub use roadmap::Roadmap;
pub use roadmap_array::{
    RoadmapArray,
    RoadmapRun,
    RoadmapRuns,
};
