use crate::data_structs::enums::{
    SlotPhase,
    Strand,
};
use crate::data_structs::typedef::{
    Coordinate,
    IdNum,
};

/// One matched interval between a sequence and the reference k-mer index.
///
/// `start` and `finish` are single storage slots read in one of two ways:
/// as reference coordinates ([`Annotation::start`], [`Annotation::finish`])
/// until graph construction, and as graph-node identifiers
/// ([`Annotation::start_id`], [`Annotation::finish_id`]) after
/// [`Annotation::set_start_id`] / [`Annotation::set_finish_id`] overwrote
/// them. Nothing is stored in release builds to tell the two apart; the
/// owning [`RoadmapArray`](crate::data_structs::RoadmapArray) records the
/// phase for the whole collection. Debug builds additionally track the phase
/// of each slot and panic on a mismatched read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Annotation {
    position:    Coordinate,
    start:       Coordinate,
    finish:      Coordinate,
    length:      Coordinate,
    sequence_id: IdNum,
    #[cfg(debug_assertions)]
    slot_phase:  [SlotPhase; 2],
}

#[derive(Clone, Copy)]
enum Slot {
    Start  = 0,
    Finish = 1,
}

impl Annotation {
    /// Builds an annotation from one data line.
    ///
    /// `length` is `finish - start` on the forward strand
    /// (`sequence_id > 0`) and `start - finish` otherwise. A length that does
    /// not fit a [`Coordinate`] saturates; [`Annotation::try_new`] reports it
    /// instead.
    pub fn new(
        sequence_id: IdNum,
        position: Coordinate,
        start: Coordinate,
        finish: Coordinate,
    ) -> Self {
        let length = if sequence_id > 0 {
            finish.saturating_sub(start)
        }
        else {
            start.saturating_sub(finish)
        };
        Self::with_length(sequence_id, position, start, finish, length)
    }

    /// Like [`Annotation::new`], but `None` when the length overflows.
    pub fn try_new(
        sequence_id: IdNum,
        position: Coordinate,
        start: Coordinate,
        finish: Coordinate,
    ) -> Option<Self> {
        let length = if sequence_id > 0 {
            finish.checked_sub(start)
        }
        else {
            start.checked_sub(finish)
        }?;
        Some(Self::with_length(sequence_id, position, start, finish, length))
    }

    fn with_length(
        sequence_id: IdNum,
        position: Coordinate,
        start: Coordinate,
        finish: Coordinate,
        length: Coordinate,
    ) -> Self {
        Self {
            position,
            start,
            finish,
            length,
            sequence_id,
            #[cfg(debug_assertions)]
            slot_phase: [SlotPhase::Coordinates; 2],
        }
    }

    pub fn position(&self) -> Coordinate { self.position }

    /// Reference coordinate where the match starts.
    pub fn start(&self) -> Coordinate {
        self.check_slot(Slot::Start, SlotPhase::Coordinates);
        self.start
    }

    /// Reference coordinate where the match ends.
    pub fn finish(&self) -> Coordinate {
        self.check_slot(Slot::Finish, SlotPhase::Coordinates);
        self.finish
    }

    pub fn length(&self) -> Coordinate { self.length }

    /// Raw signed identifier of the originating sequence.
    ///
    /// Use [`RoadmapArray::annotation_sequence_id`](crate::data_structs::RoadmapArray::annotation_sequence_id)
    /// to account for reordered input.
    pub fn sequence_id(&self) -> IdNum { self.sequence_id }

    pub fn strand(&self) -> Strand { Strand::from_sequence_id(self.sequence_id) }

    /// Graph node the match starts in. Only meaningful after
    /// [`Annotation::set_start_id`].
    pub fn start_id(&self) -> IdNum {
        self.check_slot(Slot::Start, SlotPhase::NodeIds);
        self.start as IdNum
    }

    /// Graph node the match ends in. Only meaningful after
    /// [`Annotation::set_finish_id`].
    pub fn finish_id(&self) -> IdNum {
        self.check_slot(Slot::Finish, SlotPhase::NodeIds);
        self.finish as IdNum
    }

    /// Overwrites the start coordinate with a graph-node identifier. The
    /// coordinate is lost.
    pub fn set_start_id(
        &mut self,
        node_id: IdNum,
    ) {
        self.start = Coordinate::from(node_id);
        self.mark_slot(Slot::Start);
    }

    /// Overwrites the finish coordinate with a graph-node identifier. The
    /// coordinate is lost.
    pub fn set_finish_id(
        &mut self,
        node_id: IdNum,
    ) {
        self.finish = Coordinate::from(node_id);
        self.mark_slot(Slot::Finish);
    }

    /// Shifts both coordinates by one. Must not be called once either slot
    /// holds a node identifier.
    pub fn increment_coordinates(&mut self) {
        self.check_slot(Slot::Start, SlotPhase::Coordinates);
        self.check_slot(Slot::Finish, SlotPhase::Coordinates);
        self.start += 1;
        self.finish += 1;
    }

    #[inline]
    fn check_slot(
        &self,
        slot: Slot,
        expected: SlotPhase,
    ) {
        #[cfg(debug_assertions)]
        assert_eq!(
            self.slot_phase[slot as usize], expected,
            "annotation slot read as {} but holds {}",
            expected, self.slot_phase[slot as usize]
        );
        #[cfg(not(debug_assertions))]
        let _ = (slot, expected);
    }

    #[inline]
    fn mark_slot(
        &mut self,
        slot: Slot,
    ) {
        #[cfg(debug_assertions)]
        {
            self.slot_phase[slot as usize] = SlotPhase::NodeIds;
        }
        #[cfg(not(debug_assertions))]
        let _ = slot;
    }
}

/// Length of an optional annotation; a missing one counts as zero.
pub fn annotation_length(annotation: Option<&Annotation>) -> Coordinate {
    annotation.map_or(0, Annotation::length)
}
