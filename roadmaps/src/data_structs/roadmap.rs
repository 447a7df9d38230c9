use crate::data_structs::typedef::CountType;

/// Number of annotations recorded for one sequence.
///
/// A roadmap stores no pointer or offset into the annotation storage: its
/// run is located by consuming the counts of all preceding roadmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Roadmap {
    annotation_count: CountType,
}

impl Roadmap {
    /// Empty roadmap.
    pub fn new() -> Self { Self::default() }

    pub fn annotation_count(&self) -> CountType { self.annotation_count }

    pub(crate) fn with_count(annotation_count: CountType) -> Self {
        Self { annotation_count }
    }

    pub(crate) fn increment(&mut self) { self.annotation_count += 1; }
}
