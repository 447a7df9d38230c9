#![allow(dead_code)]

use std::io::Write;

use rand::seq::SliceRandom;
use rand::{
    Rng,
    SeedableRng,
};
use tempfile::NamedTempFile;

/// One generated data line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAnnotation {
    pub sequence_id: i32,
    pub position:    i64,
    pub start:       i64,
    pub finish:      i64,
}

/// Generator of synthetic roadmap files with a random per-sequence
/// annotation distribution.
pub struct DemoRoadmapBuilder<R: Rng> {
    rng:             R,
    sequence_count:  usize,
    max_annotations: usize,
    word_length:     usize,
    double_strand:   bool,
    shuffle:         bool,
}

impl<R: Rng + SeedableRng> DemoRoadmapBuilder<R> {
    pub fn new(
        sequence_count: usize,
        max_annotations: usize,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => R::seed_from_u64(seed),
            None => R::from_entropy(),
        };
        Self {
            rng,
            sequence_count,
            max_annotations,
            word_length: 21,
            double_strand: true,
            shuffle: false,
        }
    }
}

/// Generated file together with what it should import as.
pub struct DemoRoadmaps {
    pub file:         NamedTempFile,
    /// Original one-based sequence index of each block, in file order.
    pub order:        Vec<i32>,
    /// Annotations of each block, in file order.
    pub blocks:       Vec<Vec<DemoAnnotation>>,
    pub word_length:  usize,
}

impl DemoRoadmaps {
    pub fn total(&self) -> usize { self.blocks.iter().map(Vec::len).sum() }

    pub fn counts(&self) -> Vec<u32> {
        self.blocks.iter().map(|b| b.len() as u32).collect()
    }
}

impl<R: Rng> DemoRoadmapBuilder<R> {
    pub fn with_word_length(
        mut self,
        word_length: usize,
    ) -> Self {
        self.word_length = word_length;
        self
    }

    pub fn with_shuffle(
        mut self,
        shuffle: bool,
    ) -> Self {
        self.shuffle = shuffle;
        self
    }

    fn annotation(&mut self) -> DemoAnnotation {
        let magnitude = self.rng.gen_range(1..=self.sequence_count.max(1) as i32);
        let forward = self.rng.gen_bool(0.5);
        let start = self.rng.gen_range(0..1_000_000i64);
        let span = self.rng.gen_range(0..500i64);
        let (sequence_id, finish) = if forward {
            (magnitude, start + span)
        }
        else {
            (-magnitude, start - span)
        };
        DemoAnnotation {
            sequence_id,
            position: self.rng.gen_range(0..10_000),
            start,
            finish,
        }
    }

    pub fn build(mut self) -> std::io::Result<DemoRoadmaps> {
        let mut order: Vec<i32> = (1..=self.sequence_count as i32).collect();
        if self.shuffle {
            order.shuffle(&mut self.rng);
        }

        let mut blocks = Vec::with_capacity(self.sequence_count);
        for _ in 0..self.sequence_count {
            let count = self.rng.gen_range(0..=self.max_annotations);
            blocks.push((0..count).map(|_| self.annotation()).collect::<Vec<_>>());
        }

        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            "{}\t{}\t{}\t{}",
            self.sequence_count,
            self.sequence_count,
            self.word_length,
            u8::from(self.double_strand)
        )?;
        for (index, block) in order.iter().zip(blocks.iter()) {
            writeln!(file, "ROADMAP {}", index)?;
            for a in block {
                writeln!(
                    file,
                    "{}\t{}\t{}\t{}",
                    a.sequence_id, a.position, a.start, a.finish
                )?;
            }
        }
        file.flush()?;

        Ok(DemoRoadmaps {
            file,
            order,
            blocks,
            word_length: self.word_length,
        })
    }
}

/// Writes `contents` to a temporary file.
pub fn roadmap_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temporary file");
    file.write_all(contents.as_bytes()).expect("write roadmap file");
    file.flush().expect("flush roadmap file");
    file
}
