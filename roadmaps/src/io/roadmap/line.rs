use std::fmt::Display;
use std::io::BufRead;
use std::str::FromStr;

use serde::Serialize;

use crate::data_structs::typedef::{
    Coordinate,
    IdNum,
};
use crate::data_structs::Annotation;
use crate::error::{
    Result,
    RoadmapError,
};

/// First byte of a line that opens a new roadmap.
pub const DEFAULT_MARKER: u8 = b'R';

/// First line of a roadmap file:
/// `<sequenceCount> <referenceCount> <wordLength> <doubleStrandFlag>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoadmapHeader {
    pub sequence_count:  usize,
    pub reference_count: usize,
    pub word_length:     usize,
    pub double_strand:   bool,
}

impl FromStr for RoadmapHeader {
    type Err = RoadmapError;

    fn from_str(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(RoadmapError::malformed_header(
                line,
                format!("expected 4 fields, found {}", fields.len()),
            ));
        }

        let count = |name: &str, raw: &str| -> Result<usize> {
            raw.parse::<usize>().map_err(|e| {
                RoadmapError::malformed_header(
                    line,
                    format!("invalid {} '{}': {}", name, raw, e),
                )
            })
        };
        let double_strand = fields[3].parse::<i16>().map_err(|e| {
            RoadmapError::malformed_header(
                line,
                format!("invalid double strand flag '{}': {}", fields[3], e),
            )
        })?;

        Ok(Self {
            sequence_count:  count("sequence count", fields[0])?,
            reference_count: count("reference count", fields[1])?,
            word_length:     count("word length", fields[2])?,
            double_strand:   double_strand != 0,
        })
    }
}

impl Display for RoadmapHeader {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.sequence_count,
            self.reference_count,
            self.word_length,
            u8::from(self.double_strand)
        )
    }
}

/// A marker line, e.g. `ROADMAP 17`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// One-based line number in the input.
    pub line:           usize,
    /// Original identifier of the sequence, when the marker carries one.
    pub sequence_index: Option<IdNum>,
}

impl Marker {
    /// Original identifier, required.
    pub fn require_index(&self) -> Result<IdNum> {
        self.sequence_index
            .ok_or(RoadmapError::MissingSequenceIndex { line: self.line })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Marker,
    Data,
}

impl LineKind {
    /// Classifies a line by its first byte only.
    pub fn of(
        line: &str,
        marker: u8,
    ) -> Self {
        match line.as_bytes().first() {
            None => LineKind::Blank,
            Some(b) if *b == marker => LineKind::Marker,
            Some(_) if line.trim().is_empty() => LineKind::Blank,
            Some(_) => LineKind::Data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadmapLine {
    Blank,
    Marker(Marker),
    Data(Annotation),
}

fn parse_field<T>(
    raw: Option<&str>,
    name: &str,
    line_number: usize,
) -> Result<T>
where
    T: FromStr,
    T::Err: Display, {
    let raw = raw.ok_or_else(|| {
        RoadmapError::parse(line_number, format!("missing {}", name))
    })?;
    raw.parse::<T>().map_err(|e| {
        RoadmapError::parse(line_number, format!("invalid {} '{}': {}", name, raw, e))
    })
}

/// Parses `<sequenceID> <position> <start> <finish>`.
pub fn parse_annotation(
    line: &str,
    line_number: usize,
) -> Result<Annotation> {
    let mut fields = line.split_whitespace();
    let sequence_id: IdNum = parse_field(fields.next(), "sequence id", line_number)?;
    let position: Coordinate = parse_field(fields.next(), "position", line_number)?;
    let start: Coordinate = parse_field(fields.next(), "start", line_number)?;
    let finish: Coordinate = parse_field(fields.next(), "finish", line_number)?;

    let annotation = Annotation::try_new(sequence_id, position, start, finish)
        .ok_or_else(|| {
            RoadmapError::parse(
                line_number,
                format!("length of interval {}..{} overflows", start, finish),
            )
        })?;
    if annotation.length() < 0 {
        return Err(RoadmapError::parse(
            line_number,
            format!(
                "interval {}..{} runs against the strand of sequence {}",
                start, finish, sequence_id
            ),
        ));
    }
    Ok(annotation)
}

/// Parses the optional identifier token that follows the marker word.
pub fn parse_marker(
    line: &str,
    line_number: usize,
) -> Result<Marker> {
    let token = line.split_whitespace().nth(1);
    let sequence_index = match token {
        Some(_) => Some(parse_field(token, "sequence index", line_number)?),
        None => None,
    };
    Ok(Marker {
        line: line_number,
        sequence_index,
    })
}

/// Line-by-line reader over a roadmap body that reuses one buffer and
/// tracks line numbers.
pub struct RoadmapLines<R: BufRead> {
    reader:      R,
    buffer:      String,
    line_number: usize,
    marker:      u8,
}

impl<R: BufRead> RoadmapLines<R> {
    pub fn new(reader: R) -> Self { Self::with_marker(reader, DEFAULT_MARKER) }

    pub fn with_marker(
        reader: R,
        marker: u8,
    ) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line_number: 0,
            marker,
        }
    }

    /// Number of the last line returned, one-based.
    pub fn line_number(&self) -> usize { self.line_number }

    pub fn marker(&self) -> u8 { self.marker }

    /// Next raw line without its line terminator.
    pub fn next_line(&mut self) -> std::io::Result<Option<&str>> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(self.buffer.trim_end_matches(['\n', '\r'])))
    }

    /// Kind of the next line, without parsing its fields.
    pub fn next_kind(&mut self) -> std::io::Result<Option<LineKind>> {
        let marker = self.marker;
        Ok(self.next_line()?.map(|line| LineKind::of(line, marker)))
    }

    /// Next fully parsed line.
    pub fn next_record(&mut self) -> Result<Option<RoadmapLine>> {
        let marker = self.marker;
        let line_number = self.line_number + 1;
        let Some(line) = self.next_line()?
        else {
            return Ok(None);
        };
        let record = match LineKind::of(line, marker) {
            LineKind::Blank => RoadmapLine::Blank,
            LineKind::Marker => RoadmapLine::Marker(parse_marker(line, line_number)?),
            LineKind::Data => RoadmapLine::Data(parse_annotation(line, line_number)?),
        };
        Ok(Some(record))
    }

    /// Reads and parses the header line. `input` names the source in errors.
    pub fn read_header(
        &mut self,
        input: &str,
    ) -> Result<RoadmapHeader> {
        match self.next_line()? {
            Some(line) => line.parse(),
            None => Err(RoadmapError::TruncatedHeader {
                input: input.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;

    #[test]
    fn parses_tab_separated_header() {
        let header: RoadmapHeader = "4\t0\t21\t0".parse().unwrap();
        assert_eq!(header, RoadmapHeader {
            sequence_count:  4,
            reference_count: 0,
            word_length:     21,
            double_strand:   false,
        });
        assert_eq!(header.to_string(), "4\t0\t21\t0");
    }

    #[rstest]
    #[case::too_few_fields("4 0 21")]
    #[case::negative_count("-4 0 21 0")]
    #[case::not_a_number("four 0 21 1")]
    #[case::bad_flag("4 0 21 yes")]
    fn rejects_malformed_header(#[case] line: &str) {
        assert!(matches!(
            line.parse::<RoadmapHeader>(),
            Err(RoadmapError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn parses_data_line() {
        let annotation = parse_annotation("-12\t3\t500\t479", 7).unwrap();
        assert_eq!(annotation.sequence_id(), -12);
        assert_eq!(annotation.position(), 3);
        assert_eq!(annotation.length(), 21);
    }

    #[rstest]
    #[case::missing_field("1\t2\t3")]
    #[case::garbage("1\t2\tx\t4")]
    #[case::against_strand("1\t0\t40\t10")]
    #[case::id_overflow("99999999999\t0\t0\t1")]
    #[case::length_overflow("1\t0\t-9223372036854775808\t1")]
    #[case::reverse_length_overflow("-1\t0\t1\t-9223372036854775808")]
    fn rejects_malformed_data(#[case] line: &str) {
        assert!(matches!(
            parse_annotation(line, 9),
            Err(RoadmapError::Parse { line: 9, .. })
        ));
    }

    #[test]
    fn marker_index_is_optional() {
        assert_eq!(parse_marker("ROADMAP 17", 2).unwrap().sequence_index, Some(17));
        let bare = parse_marker("ROADMAP", 3).unwrap();
        assert_eq!(bare.sequence_index, None);
        assert!(matches!(
            bare.require_index(),
            Err(RoadmapError::MissingSequenceIndex { line: 3 })
        ));
        assert!(parse_marker("ROADMAP x", 4).is_err());
    }

    #[test]
    fn classifies_by_first_byte() {
        assert_eq!(LineKind::of("ROADMAP 1", b'R'), LineKind::Marker);
        assert_eq!(LineKind::of("1\t0\t0\t1", b'R'), LineKind::Data);
        assert_eq!(LineKind::of("", b'R'), LineKind::Blank);
        assert_eq!(LineKind::of("  ", b'R'), LineKind::Blank);
    }

    #[test]
    fn lines_track_numbers() {
        let input = "2 0 21 1\r\nROADMAP 1\n\n1\t0\t0\t21\n";
        let mut lines = RoadmapLines::new(Cursor::new(input));
        let header = lines.read_header("test").unwrap();
        assert!(header.double_strand);
        assert!(matches!(
            lines.next_record().unwrap(),
            Some(RoadmapLine::Marker(Marker { line: 2, sequence_index: Some(1) }))
        ));
        assert_eq!(lines.next_record().unwrap(), Some(RoadmapLine::Blank));
        assert!(matches!(lines.next_record().unwrap(), Some(RoadmapLine::Data(_))));
        assert_eq!(lines.line_number(), 4);
        assert_eq!(lines.next_record().unwrap(), None);
    }
}
