use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{
    debug,
    info,
};

use super::line::{
    LineKind,
    RoadmapHeader,
    RoadmapLine,
    RoadmapLines,
    DEFAULT_MARKER,
};
use crate::config::KmerConfig;
use crate::data_structs::{
    Annotation,
    IndexConversionTable,
    Roadmap,
    RoadmapArray,
};
use crate::error::{
    Result,
    RoadmapError,
};
use crate::with_field_fn;

/// Sizes taken from the first pass over a roadmap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PassCounts {
    markers:     usize,
    annotations: usize,
}

/// Two-pass loader of roadmap files.
///
/// The first pass counts data lines so that the roadmap and annotation
/// storage is allocated once at its exact size; the second pass fills it.
///
/// ```no_run
/// use roadmaps::prelude::*;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut kmer_config = KmerConfig::default();
///     let roadmaps = RoadmapImporter::default()
///         .with_index_conversion(true)
///         .import("Roadmaps", &mut kmer_config)?;
///     println!("{} roadmaps, k = {:?}", roadmaps.len(), kmer_config.word_length());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RoadmapImporter {
    /// Record the original identifier of every marker and build an
    /// [`IndexOrder`](crate::data_structs::IndexOrder). Needed when the file
    /// was written by several workers out of sequence order.
    index_conversion: bool,
    /// First byte of marker lines.
    marker:           u8,
}

impl Default for RoadmapImporter {
    fn default() -> Self {
        Self {
            index_conversion: false,
            marker:           DEFAULT_MARKER,
        }
    }
}

impl RoadmapImporter {
    with_field_fn!(index_conversion, bool);

    with_field_fn!(marker, u8);

    /// Loads the whole file at `path`.
    ///
    /// On success `kmer_config` holds the word length from the header. On
    /// failure nothing is returned and `kmer_config` is left untouched.
    pub fn import<P: AsRef<Path>>(
        &self,
        path: P,
        kmer_config: &mut KmerConfig,
    ) -> Result<RoadmapArray> {
        let path = path.as_ref();
        info!("Reading roadmap file {}", path.display());

        let (header, counts) = self.count_pass(path)?;
        let mut updated_config = *kmer_config;
        updated_config.update(header.word_length)?;
        debug!(
            "Counted {} annotations in {} roadmaps (header announces {})",
            counts.annotations, counts.markers, header.sequence_count
        );

        let array = self.fill_pass(path, header, counts)?;
        *kmer_config = updated_config;

        info!("{} roadmaps read", array.len());
        Ok(array)
    }

    fn open(
        &self,
        path: &Path,
    ) -> Result<RoadmapLines<BufReader<File>>> {
        let file = File::open(path).map_err(|e| RoadmapError::io(path, e))?;
        Ok(RoadmapLines::with_marker(BufReader::new(file), self.marker))
    }

    fn count_pass(
        &self,
        path: &Path,
    ) -> Result<(RoadmapHeader, PassCounts)> {
        let input = path.display().to_string();
        let mut lines = self.open(path)?;
        let header = lines.read_header(&input)?;

        let mut counts = PassCounts {
            markers:     0,
            annotations: 0,
        };
        while let Some(kind) = lines
            .next_kind()
            .map_err(|e| RoadmapError::io(path, e))?
        {
            match kind {
                LineKind::Marker => counts.markers += 1,
                LineKind::Data => counts.annotations += 1,
                LineKind::Blank => {},
            }
        }

        if header.sequence_count > 0 && counts.markers == 0 && counts.annotations == 0
        {
            return Err(RoadmapError::MissingBody {
                input,
                expected: header.sequence_count,
            });
        }
        Ok((header, counts))
    }

    fn fill_pass(
        &self,
        path: &Path,
        header: RoadmapHeader,
        counts: PassCounts,
    ) -> Result<RoadmapArray> {
        let sequence_count = header.sequence_count;
        let mut roadmaps = try_allocate::<Roadmap>(sequence_count, "roadmaps")?;
        roadmaps.resize(sequence_count, Roadmap::new());
        let mut annotations =
            try_allocate::<Annotation>(counts.annotations, "annotations")?;
        let mut conversion = if self.index_conversion {
            Some(IndexConversionTable::try_with_capacity(sequence_count)?)
        }
        else {
            None
        };

        let mut lines = self.open(path)?;
        lines.read_header(&path.display().to_string())?;

        let mut current: Option<usize> = None;
        while let Some(record) = lines.next_record().map_err(|e| e.at_path(path))? {
            match record {
                RoadmapLine::Blank => {},
                RoadmapLine::Marker(marker) => {
                    let next = current.map_or(0, |index| index + 1);
                    if next >= sequence_count {
                        return Err(RoadmapError::TooManyRoadmaps {
                            line:     marker.line,
                            expected: sequence_count,
                        });
                    }
                    if let Some(table) = conversion.as_mut() {
                        table.push(marker.require_index()?);
                    }
                    current = Some(next);
                },
                RoadmapLine::Data(annotation) => {
                    let index = current.ok_or(RoadmapError::OrphanAnnotation {
                        line: lines.line_number(),
                    })?;
                    if annotations.len() == counts.annotations {
                        return Err(RoadmapError::parse(
                            lines.line_number(),
                            "more annotations than counted in the first pass",
                        ));
                    }
                    annotations.push(annotation);
                    roadmaps[index].increment();
                },
            }
        }

        let index_order = match conversion {
            Some(table) => {
                if table.len() != sequence_count {
                    return Err(RoadmapError::SequenceCountMismatch {
                        expected: sequence_count,
                        found:    table.len(),
                    });
                }
                Some(table.into_index_order()?)
            },
            None => None,
        };

        RoadmapArray::try_new(header, roadmaps, annotations, index_order)
    }
}

/// Empty vector with room for exactly `count` elements.
fn try_allocate<T>(
    count: usize,
    what: &'static str,
) -> Result<Vec<T>> {
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(count)
        .map_err(|_| RoadmapError::Allocation { what, count })?;
    Ok(storage)
}

/// Loads the roadmap file at `path` with default settings.
pub fn import_roadmap_array<P: AsRef<Path>>(
    path: P,
    kmer_config: &mut KmerConfig,
) -> Result<RoadmapArray> {
    RoadmapImporter::default().import(path, kmer_config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn roadmap_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn fills_roadmaps_in_order() {
        let file = roadmap_file(
            "3\t2\t21\t1\nROADMAP 1\n1\t0\t0\t21\n-2\t4\t50\t29\nROADMAP 2\nROADMAP 3\n3\t1\t7\t40\n",
        );
        let mut config = KmerConfig::default();
        let array = import_roadmap_array(file.path(), &mut config).unwrap();

        assert_eq!(array.len(), 3);
        assert_eq!(array.reference_count(), 2);
        assert!(array.double_strand());
        assert_eq!(config.word_length(), Some(21));
        let counts: Vec<_> = array
            .roadmaps()
            .iter()
            .map(Roadmap::annotation_count)
            .collect();
        assert_eq!(counts, vec![2, 0, 1]);
        assert_eq!(array.annotations().len(), 3);
        assert!(array.index_order().is_none());
    }

    #[test]
    fn failure_leaves_config_untouched() {
        let file = roadmap_file("1\t0\t21\t0\n5\t0\t0\t21\n");
        let mut config = KmerConfig::default();
        config.update(31).unwrap();
        let result = import_roadmap_array(file.path(), &mut config);
        assert!(matches!(result, Err(RoadmapError::OrphanAnnotation { line: 2 })));
        assert_eq!(config.word_length(), Some(31));
    }

    #[test]
    fn custom_marker_byte() {
        let file = roadmap_file("1\t0\t21\t0\n>seq\n1\t0\t0\t21\n");
        let mut config = KmerConfig::default();
        let array = RoadmapImporter::default()
            .with_marker(b'>')
            .import(file.path(), &mut config)
            .unwrap();
        assert_eq!(array.roadmap(0).map(Roadmap::annotation_count), Some(1));
    }
}
