use log::debug;

use crate::error::{
    Result,
    RoadmapError,
};

/// K-mer word-length settings shared by every stage that hashes or compares
/// k-mers.
///
/// Loading a roadmap file records the word length the roadmaps were built
/// with, so later stages agree on the k-mer size. The value is threaded
/// explicitly instead of living in global state.
///
/// Any word length of at least one is accepted unless an upper bound is set
/// with [`KmerConfig::with_max_word_length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KmerConfig {
    word_length:     Option<usize>,
    max_word_length: Option<usize>,
}

impl KmerConfig {
    /// Rejects word lengths above `max_word_length` on later updates.
    pub fn with_max_word_length(
        mut self,
        max_word_length: usize,
    ) -> Self {
        self.max_word_length = Some(max_word_length);
        self
    }

    /// Word length recorded by the last successful [`KmerConfig::update`].
    pub fn word_length(&self) -> Option<usize> { self.word_length }

    pub fn max_word_length(&self) -> Option<usize> { self.max_word_length }

    /// Records a new word length.
    ///
    /// Fails with [`RoadmapError::WordLength`] for zero, or for a value above
    /// the configured maximum; the previous value is kept in that case.
    pub fn update(
        &mut self,
        word_length: usize,
    ) -> Result<()> {
        let above_max = self
            .max_word_length
            .is_some_and(|max| word_length > max);
        if word_length == 0 || above_max {
            return Err(RoadmapError::WordLength {
                word_length,
                max: self.max_word_length,
            });
        }
        if let Some(previous) = self.word_length {
            if previous != word_length {
                debug!("Word length changed from {} to {}", previous, word_length);
            }
        }
        self.word_length = Some(word_length);
        Ok(())
    }
}
