use std::iter::FusedIterator;

use log::debug;

use crate::data_structs::annotation::Annotation;
use crate::data_structs::enums::SlotPhase;
use crate::data_structs::index_conversion::IndexOrder;
use crate::data_structs::roadmap::Roadmap;
use crate::data_structs::typedef::IdNum;
use crate::error::{
    Result,
    RoadmapError,
};
use crate::getter_fn;
use crate::io::roadmap::RoadmapHeader;

/// Every roadmap and annotation of a read set.
///
/// Roadmaps are stored in sequence order; annotations of all sequences are
/// stored back to back in one vector, so the `i`-th roadmap owns the
/// `annotation_count` annotations that follow those of roadmaps `0..i`.
/// Both vectors are allocated once at their final size and never grow.
#[derive(Debug, Clone)]
pub struct RoadmapArray {
    roadmaps:        Vec<Roadmap>,
    annotations:     Vec<Annotation>,
    word_length:     usize,
    reference_count: usize,
    double_strand:   bool,
    index_order:     Option<IndexOrder>,
    phase:           SlotPhase,
}

impl RoadmapArray {
    /// Assembles an array from already filled storage.
    ///
    /// Fails unless the roadmap counts sum to the number of annotations, the
    /// number of roadmaps matches the header, and the index order (if any)
    /// is a permutation with one entry per roadmap.
    pub fn try_new(
        header: RoadmapHeader,
        roadmaps: Vec<Roadmap>,
        annotations: Vec<Annotation>,
        index_order: Option<IndexOrder>,
    ) -> Result<Self> {
        if roadmaps.len() != header.sequence_count {
            return Err(RoadmapError::SequenceCountMismatch {
                expected: header.sequence_count,
                found:    roadmaps.len(),
            });
        }
        let counted: u64 = roadmaps
            .iter()
            .map(|roadmap| u64::from(roadmap.annotation_count()))
            .sum();
        if counted != annotations.len() as u64 {
            return Err(RoadmapError::InconsistentCounts {
                counted,
                stored: annotations.len(),
            });
        }
        if let Some(order) = index_order.as_ref() {
            if order.len() != roadmaps.len() || !order.is_permutation() {
                return Err(RoadmapError::SequenceCountMismatch {
                    expected: roadmaps.len(),
                    found:    order.len(),
                });
            }
        }

        Ok(Self {
            roadmaps,
            annotations,
            word_length: header.word_length,
            reference_count: header.reference_count,
            double_strand: header.double_strand,
            index_order,
            phase: SlotPhase::Coordinates,
        })
    }

    /// Number of sequences (roadmaps).
    pub fn len(&self) -> usize { self.roadmaps.len() }

    pub fn is_empty(&self) -> bool { self.roadmaps.is_empty() }

    /// Total number of annotations over all roadmaps.
    pub fn annotation_count(&self) -> usize { self.annotations.len() }

    pub fn word_length(&self) -> usize { self.word_length }

    pub fn reference_count(&self) -> usize { self.reference_count }

    pub fn double_strand(&self) -> bool { self.double_strand }

    pub fn phase(&self) -> SlotPhase { self.phase }

    getter_fn!(roadmaps, [Roadmap]);

    getter_fn!(annotations, [Annotation]);

    pub fn index_order(&self) -> Option<&IndexOrder> { self.index_order.as_ref() }

    /// Header fields this array was built from.
    pub fn header(&self) -> RoadmapHeader {
        RoadmapHeader {
            sequence_count:  self.len(),
            reference_count: self.reference_count,
            word_length:     self.word_length,
            double_strand:   self.double_strand,
        }
    }

    /// The `index`-th roadmap in storage order.
    pub fn roadmap(
        &self,
        index: usize,
    ) -> Option<&Roadmap> {
        self.roadmaps.get(index)
    }

    pub fn annotation(
        &self,
        index: usize,
    ) -> Option<&Annotation> {
        self.annotations.get(index)
    }

    /// The annotation stored right after `index` in the flat storage.
    ///
    /// This steps across roadmap boundaries; callers walking one roadmap must
    /// stop after its `annotation_count` annotations.
    pub fn next_annotation(
        &self,
        index: usize,
    ) -> Option<&Annotation> {
        index
            .checked_add(1)
            .and_then(|next| self.annotations.get(next))
    }

    /// Identifier of the sequence an annotation points to, translated
    /// through the index order when the file was reordered.
    pub fn annotation_sequence_id(
        &self,
        annotation: &Annotation,
    ) -> IdNum {
        match self.index_order.as_ref() {
            Some(order) => order.translate(annotation.sequence_id()),
            None => annotation.sequence_id(),
        }
    }

    /// Original identifier of the sequence stored at `reading_position`.
    ///
    /// Identifiers are one-based, as on marker lines. Without an index order
    /// the file was written in sequence order, so this is `reading_position + 1`.
    pub fn original_sequence_id(
        &self,
        reading_position: usize,
    ) -> Option<IdNum> {
        if reading_position >= self.len() {
            return None;
        }
        match self.index_order.as_ref() {
            Some(order) => order.original_id(reading_position),
            None => IdNum::try_from(reading_position + 1).ok(),
        }
    }

    /// Iterates roadmaps together with their annotation runs.
    pub fn runs(&self) -> RoadmapRuns<'_> {
        RoadmapRuns {
            roadmaps:    self.roadmaps.iter().enumerate(),
            annotations: &self.annotations,
        }
    }

    /// Hands out the annotations for node-identifier assignment and marks the
    /// whole array as holding node identifiers from now on.
    pub fn node_id_phase(&mut self) -> &mut [Annotation] {
        if self.phase == SlotPhase::Coordinates {
            debug!(
                "Switching {} annotations to node identifiers",
                self.annotations.len()
            );
        }
        self.phase = SlotPhase::NodeIds;
        &mut self.annotations
    }

    /// Mutable annotations while they still hold coordinates.
    pub fn annotations_mut(&mut self) -> Result<&mut [Annotation]> {
        self.require_phase(SlotPhase::Coordinates)?;
        Ok(&mut self.annotations)
    }

    /// Shifts the coordinates of every annotation by one.
    pub fn increment_all_coordinates(&mut self) -> Result<()> {
        self.annotations_mut()?
            .iter_mut()
            .for_each(Annotation::increment_coordinates);
        Ok(())
    }

    /// Releases the roadmaps, the annotations and the index order.
    pub fn destroy(self) {
        debug!(
            "Releasing {} roadmaps and {} annotations",
            self.roadmaps.len(),
            self.annotations.len()
        );
        drop(self);
    }

    fn require_phase(
        &self,
        expected: SlotPhase,
    ) -> Result<()> {
        if self.phase == expected {
            Ok(())
        }
        else {
            Err(RoadmapError::PhaseViolation {
                expected,
                actual: self.phase,
            })
        }
    }
}

/// One roadmap and the annotations it owns.
#[derive(Debug, Clone, Copy)]
pub struct RoadmapRun<'a> {
    pub index:       usize,
    pub roadmap:     &'a Roadmap,
    pub annotations: &'a [Annotation],
}

/// Iterator produced by [`RoadmapArray::runs`]. Each step consumes
/// `annotation_count` entries of the flat storage.
pub struct RoadmapRuns<'a> {
    roadmaps:    std::iter::Enumerate<std::slice::Iter<'a, Roadmap>>,
    annotations: &'a [Annotation],
}

impl<'a> Iterator for RoadmapRuns<'a> {
    type Item = RoadmapRun<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, roadmap) = self.roadmaps.next()?;
        let count =
            (roadmap.annotation_count() as usize).min(self.annotations.len());
        let (run, rest) = self.annotations.split_at(count);
        self.annotations = rest;
        Some(RoadmapRun {
            index,
            roadmap,
            annotations: run,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.roadmaps.size_hint() }
}

impl ExactSizeIterator for RoadmapRuns<'_> {}

impl FusedIterator for RoadmapRuns<'_> {}
