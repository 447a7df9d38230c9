pub use crate::config::KmerConfig;
pub use crate::data_structs::typedef::{
    Coordinate,
    CountType,
    IdNum,
};
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
    RoadmapLines,
    RoadmapStream,
    SequenceAnnotations,
};
