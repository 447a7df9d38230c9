/// Offsets within a sequence, reference k-mer coordinates and interval
/// lengths.
pub type Coordinate = i64;
/// Sequence and graph-node identifiers. The sign of a sequence identifier
/// carries its strand.
pub type IdNum = i32;
/// Per-roadmap annotation counter.
pub type CountType = u32;
