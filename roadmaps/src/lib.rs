//! # roadmaps
//!
//! `roadmaps` loads assembly "roadmap" files into a compact in-memory
//! structure for de Bruijn graph construction. A roadmap file records, for
//! every sequence of a read set, the intervals where the sequence matches a
//! reference k-mer index. Each interval is an [`Annotation`]; the per-sequence
//! count is a [`Roadmap`]; the whole collection is a [`RoadmapArray`].
//!
//! ## Key Features
//!
//! * **Exact-size storage**: a counting pre-pass sizes the roadmap and
//!   annotation vectors once, so the fill pass never reallocates.
//! * **Offset-free layout**: annotations of all sequences are stored back to
//!   back; a roadmap only stores its count. [`OffsetTable`] adds random
//!   access when needed.
//! * **Strand in the sign**: a positive sequence identifier is the forward
//!   strand, anything else the reverse complement; interval lengths are
//!   always non-negative.
//! * **Reordered input**: files written out of order by several workers are
//!   mapped back to the original sequence order through an [`IndexOrder`].
//! * **Streaming**: [`RoadmapStream`] reads one sequence at a time.
//! * **Node identifiers**: after graph construction the `start`/`finish`
//!   coordinates of an annotation are overwritten with graph-node
//!   identifiers; the array tracks which phase its annotations are in.
//!
//! ## Structure
//!
//! * [`data_structs`]: annotations, roadmaps, the roadmap array and the index
//!   conversion machinery.
//! * [`io`]: roadmap file parsing, the two-pass importer and the streaming
//!   reader.
//! * [`config`]: k-mer word-length configuration updated on load.
//! * [`error`]: the [`RoadmapError`] type.
//! * [`utils`]: helper macros.
//!
//! ## Usage
//!
//! ```no_run
//! use roadmaps::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut kmer_config = KmerConfig::default();
//!     let mut roadmaps = RoadmapImporter::default()
//!         .with_index_conversion(true)
//!         .import("assembly/Roadmaps", &mut kmer_config)?;
//!
//!     for run in roadmaps.runs() {
//!         println!(
//!             "sequence {:?}: {} annotations",
//!             roadmaps.original_sequence_id(run.index),
//!             run.annotations.len()
//!         );
//!     }
//!
//!     // Graph construction later replaces coordinates with node ids.
//!     for annotation in roadmaps.node_id_phase() {
//!         annotation.set_start_id(1);
//!         annotation.set_finish_id(1);
//!     }
//!
//!     roadmaps.destroy();
//!     Ok(())
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod utils;

pub use crate::config::KmerConfig;
pub use crate::data_structs::{
    Annotation,
    IndexOrder,
    OffsetTable,
    Roadmap,
    RoadmapArray,
    SlotPhase,
    Strand,
};
pub use crate::error::RoadmapError;
pub use crate::io::roadmap::{
    import_annotations,
    import_roadmap_array,
    RoadmapHeader,
    RoadmapImporter,
    RoadmapStream,
};
