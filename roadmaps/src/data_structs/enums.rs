use std::fmt::Display;

use crate::data_structs::typedef::IdNum;

#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum Strand {
    /// Forward strand (positive sequence identifier).
    Forward,
    /// Reverse complement (zero or negative sequence identifier).
    Reverse,
}

impl Strand {
    /// Strand encoded by the sign of a sequence identifier.
    pub fn from_sequence_id(sequence_id: IdNum) -> Self {
        if sequence_id > 0 {
            Strand::Forward
        }
        else {
            Strand::Reverse
        }
    }
}

/// Meaning of the `start`/`finish` slots of every annotation in a
/// [`RoadmapArray`](crate::data_structs::RoadmapArray).
///
/// Import leaves the slots holding reference coordinates. Graph construction
/// overwrites them with node identifiers exactly once; after that the
/// coordinates are gone.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default)]
pub enum SlotPhase {
    #[default]
    Coordinates,
    NodeIds,
}

impl Display for SlotPhase {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            SlotPhase::Coordinates => write!(f, "coordinates"),
            SlotPhase::NodeIds => write!(f, "node ids"),
        }
    }
}
