use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
};
use std::path::{
    Path,
    PathBuf,
};

use log::{
    debug,
    trace,
};

use super::line::{
    Marker,
    RoadmapHeader,
    RoadmapLine,
    RoadmapLines,
};
use crate::data_structs::typedef::IdNum;
use crate::data_structs::Annotation;
use crate::error::{
    Result,
    RoadmapError,
};

const INITIAL_CAPACITY: usize = 8;

/// Annotations of one sequence read by [`import_annotations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceAnnotations {
    /// Zero-based original index of the sequence.
    pub read_index:  IdNum,
    pub annotations: Vec<Annotation>,
    /// Marker that ended the run, or `None` at end of input.
    pub next_marker: Option<Marker>,
}

/// Reads the data lines that follow `marker` up to the next marker or end of
/// input.
///
/// The buffer starts small, doubles as needed and is shrunk to the exact
/// count before returning. The number of annotations read is **added** to
/// `annotation_count`, so one counter can accumulate over many calls. A
/// marker followed directly by another marker yields an empty vector and
/// leaves the counter unchanged.
pub fn import_annotations<R: BufRead>(
    lines: &mut RoadmapLines<R>,
    marker: &Marker,
    annotation_count: &mut u64,
) -> Result<SequenceAnnotations> {
    let sequence_index = marker.require_index()?;
    if sequence_index < 1 {
        return Err(RoadmapError::parse(
            marker.line,
            format!("sequence index {} below 1", sequence_index),
        ));
    }
    let read_index = sequence_index - 1;

    let mut annotations: Vec<Annotation> = Vec::with_capacity(INITIAL_CAPACITY);
    let mut next_marker = None;
    while let Some(record) = lines.next_record()? {
        match record {
            RoadmapLine::Blank => {},
            RoadmapLine::Marker(next) => {
                next_marker = Some(next);
                break;
            },
            RoadmapLine::Data(annotation) => {
                if annotations.len() == annotations.capacity() {
                    annotations.reserve_exact(annotations.capacity());
                }
                annotations.push(annotation);
            },
        }
    }
    annotations.shrink_to_fit();
    *annotation_count += annotations.len() as u64;

    trace!(
        "Sequence {}: {} annotations",
        read_index,
        annotations.len()
    );
    Ok(SequenceAnnotations {
        read_index,
        annotations,
        next_marker,
    })
}

/// Sequence-by-sequence reader over a roadmap file.
///
/// Yields one [`SequenceAnnotations`] per marker line without materializing
/// the whole [`RoadmapArray`](crate::data_structs::RoadmapArray). Marker
/// lines must carry the one-based original sequence index.
pub struct RoadmapStream<R: BufRead> {
    lines:            RoadmapLines<R>,
    path:             Option<PathBuf>,
    header:           RoadmapHeader,
    pending:          Option<Marker>,
    started:          bool,
    finished:         bool,
    annotation_count: u64,
}

impl RoadmapStream<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Streaming roadmap file {}", path.display());
        let file = File::open(path).map_err(|e| RoadmapError::io(path, e))?;
        let mut stream = Self::try_new(
            RoadmapLines::new(BufReader::new(file)),
            &path.display().to_string(),
        )
        .map_err(|e| e.at_path(path))?;
        stream.path = Some(path.to_path_buf());
        Ok(stream)
    }
}

impl<R: BufRead> RoadmapStream<R> {
    /// Consumes the header from `lines`. `input` names the source in errors.
    pub fn try_new(
        mut lines: RoadmapLines<R>,
        input: &str,
    ) -> Result<Self> {
        let header = lines.read_header(input)?;
        Ok(Self {
            lines,
            path: None,
            header,
            pending: None,
            started: false,
            finished: false,
            annotation_count: 0,
        })
    }

    pub fn header(&self) -> &RoadmapHeader { &self.header }

    /// Annotations read so far over all sequences.
    pub fn annotation_count(&self) -> u64 { self.annotation_count }

    fn first_marker(&mut self) -> Result<Option<Marker>> {
        while let Some(record) = self.lines.next_record()? {
            match record {
                RoadmapLine::Blank => {},
                RoadmapLine::Marker(marker) => return Ok(Some(marker)),
                RoadmapLine::Data(_) => {
                    return Err(RoadmapError::OrphanAnnotation {
                        line: self.lines.line_number(),
                    })
                },
            }
        }
        Ok(None)
    }

    fn next_sequence(&mut self) -> Result<Option<SequenceAnnotations>> {
        let marker = if self.started {
            self.pending.take()
        }
        else {
            self.started = true;
            self.first_marker()?
        };
        let Some(marker) = marker
        else {
            return Ok(None);
        };

        let sequence =
            import_annotations(&mut self.lines, &marker, &mut self.annotation_count)?;
        self.pending = sequence.next_marker;
        Ok(Some(sequence))
    }
}

impl<R: BufRead> Iterator for RoadmapStream<R> {
    type Item = Result<SequenceAnnotations>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_sequence();
        match result {
            Ok(Some(sequence)) => Some(Ok(sequence)),
            Ok(None) => {
                self.finished = true;
                None
            },
            Err(e) => {
                self.finished = true;
                Some(Err(match self.path.as_deref() {
                    Some(path) => e.at_path(path),
                    None => e,
                }))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn lines_after_marker(body: &str) -> RoadmapLines<Cursor<&str>> {
        RoadmapLines::new(Cursor::new(body))
    }

    #[test]
    fn reads_until_next_marker() {
        let mut lines = lines_after_marker("1\t0\t0\t21\n-2\t3\t40\t19\nROADMAP 8\n5\t0\t0\t21\n");
        let marker = Marker {
            line:           1,
            sequence_index: Some(7),
        };
        let mut total = 10;
        let sequence = import_annotations(&mut lines, &marker, &mut total).unwrap();

        assert_eq!(sequence.read_index, 6);
        assert_eq!(sequence.annotations.len(), 2);
        assert_eq!(sequence.annotations.capacity(), 2);
        assert_eq!(total, 12);
        assert_eq!(sequence.next_marker.and_then(|m| m.sequence_index), Some(8));
    }

    #[test]
    fn grows_past_initial_capacity() {
        let body = (0..20)
            .map(|i| format!("1\t{}\t{}\t{}\n", i, i, i + 21))
            .collect::<String>();
        let mut lines = lines_after_marker(&body);
        let marker = Marker {
            line:           1,
            sequence_index: Some(1),
        };
        let mut total = 0;
        let sequence = import_annotations(&mut lines, &marker, &mut total).unwrap();
        assert_eq!(sequence.annotations.len(), 20);
        assert_eq!(sequence.annotations[19].position(), 19);
        assert_eq!(total, 20);
        assert!(sequence.next_marker.is_none());
    }

    #[test]
    fn rejects_marker_without_index() {
        let mut lines = lines_after_marker("");
        let marker = Marker {
            line:           4,
            sequence_index: None,
        };
        let mut total = 0;
        assert!(matches!(
            import_annotations(&mut lines, &marker, &mut total),
            Err(RoadmapError::MissingSequenceIndex { line: 4 })
        ));
    }

    #[test]
    fn stream_chains_sequences() {
        let input = "3\t0\t21\t0\nROADMAP 2\n1\t0\t0\t21\nROADMAP 1\nROADMAP 3\n3\t0\t0\t21\n3\t5\t5\t26\n";
        let stream =
            RoadmapStream::try_new(RoadmapLines::new(Cursor::new(input)), "test").unwrap();
        assert_eq!(stream.header().sequence_count, 3);

        let sequences = stream.collect::<Result<Vec<_>>>().unwrap();
        let summary: Vec<_> = sequences
            .iter()
            .map(|s| (s.read_index, s.annotations.len()))
            .collect();
        assert_eq!(summary, vec![(1, 1), (0, 0), (2, 2)]);
    }

    #[test]
    fn stream_reports_orphan_annotation_once() {
        let input = "1\t0\t21\t0\n1\t0\t0\t21\n";
        let mut stream =
            RoadmapStream::try_new(RoadmapLines::new(Cursor::new(input)), "test").unwrap();
        assert!(matches!(
            stream.next(),
            Some(Err(RoadmapError::OrphanAnnotation { line: 2 }))
        ));
        assert!(stream.next().is_none());
    }
}
