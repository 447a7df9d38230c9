use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use itertools::Itertools;
use log::info;
use roadmaps::prelude::*;
use serde::Serialize;

use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct InspectArgs {
    #[arg(help = "Path of the roadmap file.")]
    input:           PathBuf,
    #[arg(
        long,
        default_value_t = false,
        help = "Recover the original sequence order from marker indices."
    )]
    reorder:         bool,
    #[arg(long, help = "Reject files with a larger k-mer word length.")]
    max_word_length: Option<usize>,
    #[arg(long, default_value_t = false, help = "Print the summary as JSON.")]
    json:            bool,
}

#[derive(Debug, Serialize)]
struct RoadmapSummary {
    #[serde(flatten)]
    header:              RoadmapHeader,
    annotations:         usize,
    forward_annotations: usize,
    reverse_annotations: usize,
    empty_roadmaps:      usize,
    largest_roadmap:     Option<LargestRoadmap>,
    reordered:           bool,
}

#[derive(Debug, Serialize)]
struct LargestRoadmap {
    reading_position: usize,
    sequence_id:      Option<IdNum>,
    annotations:      usize,
}

impl RoadmapSummary {
    fn from_array(array: &RoadmapArray) -> Self {
        let (forward, reverse) = array
            .annotations()
            .iter()
            .partition::<Vec<&_>, _>(|a| a.strand() == Strand::Forward);
        let largest = array
            .runs()
            .max_by_key(|run| run.annotations.len())
            .map(|run| LargestRoadmap {
                reading_position: run.index,
                sequence_id:      array.original_sequence_id(run.index),
                annotations:      run.annotations.len(),
            });

        Self {
            header: array.header(),
            annotations: array.annotation_count(),
            forward_annotations: forward.len(),
            reverse_annotations: reverse.len(),
            empty_roadmaps: array
                .roadmaps()
                .iter()
                .filter(|r| r.annotation_count() == 0)
                .count(),
            largest_roadmap: largest,
            reordered: array.index_order().is_some(),
        }
    }

    fn print(&self) {
        let header = &self.header;
        println!("{:<22}{}", "Sequences:", style(header.sequence_count).green());
        println!("{:<22}{}", "References:", header.reference_count);
        println!("{:<22}{}", "Word length:", style(header.word_length).green());
        println!(
            "{:<22}{}",
            "Strands:",
            if header.double_strand { "double" } else { "single" }
        );
        println!("{:<22}{}", "Annotations:", style(self.annotations).green());
        println!(
            "{:<22}{} forward / {} reverse",
            "",
            self.forward_annotations,
            self.reverse_annotations
        );
        println!("{:<22}{}", "Empty roadmaps:", self.empty_roadmaps);
        if let Some(largest) = self.largest_roadmap.as_ref() {
            println!(
                "{:<22}#{} (sequence {}) with {} annotations",
                "Largest roadmap:",
                largest.reading_position,
                largest
                    .sequence_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "?".into()),
                largest.annotations
            );
        }
        if self.reordered {
            println!("{:<22}{}", "Order:", style("recovered from markers").yellow());
        }
    }
}

impl InspectArgs {
    pub fn run(
        &self,
        _utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let mut kmer_config = match self.max_word_length {
            Some(max) => KmerConfig::default().with_max_word_length(max),
            None => KmerConfig::default(),
        };
        let array = RoadmapImporter::default()
            .with_index_conversion(self.reorder)
            .import(&self.input, &mut kmer_config)
            .with_context(|| format!("failed to load {}", self.input.display()))?;
        info!(
            "Loaded {} roadmaps, k = {}",
            array.len(),
            kmer_config
                .word_length()
                .map(|k| k.to_string())
                .unwrap_or_default()
        );

        let summary = RoadmapSummary::from_array(&array);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        else {
            summary.print();
        }

        array.destroy();
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct StreamArgs {
    #[arg(help = "Path of the roadmap file.")]
    input: PathBuf,
    #[arg(
        long,
        default_value_t = false,
        help = "Only print the final totals."
    )]
    quiet: bool,
}

impl StreamArgs {
    pub fn run(
        &self,
        _utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let mut stream = RoadmapStream::open(&self.input)
            .with_context(|| format!("failed to open {}", self.input.display()))?;
        let announced = stream.header().sequence_count;

        let mut sequences = 0usize;
        while let Some(sequence) = stream.next() {
            let sequence = sequence?;
            sequences += 1;
            if !self.quiet {
                println!(
                    "{}\t{}\t{}",
                    sequence.read_index + 1,
                    sequence.annotations.len(),
                    stream.annotation_count()
                );
            }
        }

        let counts = [
            ("Sequences", sequences.to_string()),
            ("Announced", announced.to_string()),
            ("Annotations", stream.annotation_count().to_string()),
        ];
        eprintln!(
            "{}",
            counts
                .iter()
                .map(|(name, value)| format!("{}: {}", name, style(value).green()))
                .join(", ")
        );
        Ok(())
    }
}
