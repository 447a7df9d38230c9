//! Recovery of the original sequence order from reordered roadmap files.
//!
//! A roadmap file written by several workers lists sequences in completion
//! order rather than in their original order. Every marker line still names
//! the original identifier of its sequence, so the importer records
//! `(reading position, original identifier)` pairs in an
//! [`IndexConversionTable`] and sorts them into an [`IndexOrder`].

use itertools::Itertools;
use log::debug;

use crate::data_structs::typedef::IdNum;
use crate::error::{
    Result,
    RoadmapError,
};

/// One marker line: where the sequence was read and what it is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConversion {
    pub reading_position: usize,
    pub original_id:      IdNum,
}

#[derive(Debug, Clone, Default)]
pub struct IndexConversionTable {
    entries: Vec<IndexConversion>,
}

impl IndexConversionTable {
    /// Table with room for exactly `capacity` entries.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(capacity)
            .map_err(|_| RoadmapError::Allocation {
                what:  "index conversion entries",
                count: capacity,
            })?;
        Ok(Self { entries })
    }

    /// Records the next marker line. Reading positions are assigned in call
    /// order, starting at zero.
    pub fn push(
        &mut self,
        original_id: IdNum,
    ) {
        let reading_position = self.entries.len();
        self.entries.push(IndexConversion {
            reading_position,
            original_id,
        });
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn entries(&self) -> &[IndexConversion] { &self.entries }

    /// Sorts the table by original identifier and returns the resulting
    /// order.
    ///
    /// Fails with [`RoadmapError::DuplicateSequenceIndex`] if two markers
    /// named the same sequence.
    pub fn into_index_order(mut self) -> Result<IndexOrder> {
        self.entries
            .sort_unstable_by_key(|entry| entry.original_id);

        if let Some((left, _)) = self
            .entries
            .iter()
            .tuple_windows()
            .find(|(left, right)| left.original_id == right.original_id)
        {
            return Err(RoadmapError::DuplicateSequenceIndex {
                index: i64::from(left.original_id),
            });
        }

        let mut original_ids = vec![0; self.entries.len()];
        for entry in self.entries.iter() {
            original_ids[entry.reading_position] = entry.original_id;
        }
        let order = self
            .entries
            .into_iter()
            .map(|entry| entry.reading_position)
            .collect_vec();

        debug!("Built index order for {} sequences", order.len());
        Ok(IndexOrder {
            order,
            original_ids,
        })
    }
}

/// Permutation of reading positions sorted by original sequence identifier.
///
/// `order()[rank]` is the reading position of the sequence with the
/// `rank`-th smallest original identifier; the inverse,
/// [`IndexOrder::original_id`], gives the identifier of the sequence read at
/// a given position. Both lookups are O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOrder {
    order:        Vec<usize>,
    original_ids: Vec<IdNum>,
}

impl IndexOrder {
    pub fn order(&self) -> &[usize] { &self.order }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// Reading position of the sequence with the given rank in original
    /// order.
    pub fn reading_position(
        &self,
        rank: usize,
    ) -> Option<usize> {
        self.order.get(rank).copied()
    }

    /// Original identifier of the sequence read at `reading_position`.
    pub fn original_id(
        &self,
        reading_position: usize,
    ) -> Option<IdNum> {
        self.original_ids.get(reading_position).copied()
    }

    /// `(original identifier, reading position)` pairs in ascending
    /// identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (IdNum, usize)> + '_ {
        self.order
            .iter()
            .map(|&position| (self.original_ids[position], position))
    }

    /// Translates a signed, one-based sequence identifier in original rank
    /// order to the signed, one-based identifier of the sequence in reading
    /// order. Identifiers outside `1..=len` in magnitude are returned
    /// unchanged.
    ///
    /// The magnitude is taken as a rank, so this assumes the marker ids are
    /// dense, i.e. exactly `1..=len`. With sparse ids such as `[5, 2, 8, 1]`
    /// the ranks no longer match the ids.
    pub fn translate(
        &self,
        sequence_id: IdNum,
    ) -> IdNum {
        let magnitude = sequence_id.unsigned_abs() as usize;
        match magnitude
            .checked_sub(1)
            .and_then(|rank| self.order.get(rank))
        {
            Some(&position) => {
                let translated = (position + 1) as IdNum;
                if sequence_id < 0 {
                    -translated
                }
                else {
                    translated
                }
            },
            None => sequence_id,
        }
    }

    /// Whether `order` holds every value of `0..len` exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.order.len()];
        self.order.iter().all(|&position| {
            match seen.get_mut(position) {
                Some(flag) if !*flag => {
                    *flag = true;
                    true
                },
                _ => false,
            }
        })
    }
}
