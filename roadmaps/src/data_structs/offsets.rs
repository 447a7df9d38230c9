use std::ops::Range;

use crate::data_structs::annotation::Annotation;
use crate::data_structs::roadmap_array::RoadmapArray;

/// Cumulative start offsets of every roadmap's annotation run.
///
/// Roadmaps only store counts; this table is built once on demand when a
/// caller needs random access to a sequence's annotations instead of
/// walking [`RoadmapArray::runs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetTable {
    offsets: Vec<usize>,
}

impl OffsetTable {
    pub fn build(array: &RoadmapArray) -> Self {
        let mut offsets = Vec::with_capacity(array.len() + 1);
        let mut total = 0usize;
        offsets.push(total);
        for roadmap in array.roadmaps() {
            total += roadmap.annotation_count() as usize;
            offsets.push(total);
        }
        Self { offsets }
    }

    /// Number of roadmaps covered.
    pub fn len(&self) -> usize { self.offsets.len() - 1 }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Range of the flat annotation storage owned by roadmap `index`.
    pub fn range(
        &self,
        index: usize,
    ) -> Option<Range<usize>> {
        let start = *self.offsets.get(index)?;
        let end = *self.offsets.get(index + 1)?;
        Some(start..end)
    }

    /// Annotations of roadmap `index` in `array`, which must be the array the
    /// table was built from.
    pub fn run<'a>(
        &self,
        array: &'a RoadmapArray,
        index: usize,
    ) -> Option<&'a [Annotation]> {
        self.range(index)
            .and_then(|range| array.annotations().get(range))
    }
}
