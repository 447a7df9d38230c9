//! Reading of roadmap files.
//!
//! A roadmap file starts with a header line
//! `<sequenceCount> <referenceCount> <wordLength> <doubleStrandFlag>`
//! followed by one block per sequence: a marker line starting with `R`
//! (optionally carrying the original sequence index, e.g. `ROADMAP 17`) and
//! zero or more data lines `<sequenceID> <position> <start> <finish>`.
//!
//! [`RoadmapImporter`] loads a whole file into a
//! [`RoadmapArray`](crate::data_structs::RoadmapArray) in two passes;
//! [`import_annotations`] and [`RoadmapStream`] read it one sequence at a
//! time.

mod line;
mod read;
mod stream;

pub use line::{
    parse_annotation,
    parse_marker,
    LineKind,
    Marker,
    RoadmapHeader,
    RoadmapLine,
    RoadmapLines,
    DEFAULT_MARKER,
};
pub use read::{
    import_roadmap_array,
    RoadmapImporter,
};
pub use stream::{
    import_annotations,
    RoadmapStream,
    SequenceAnnotations,
};
