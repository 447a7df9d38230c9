//! Error type shared by the roadmap importers and the array mutators.
//!
//! Every structural problem in a roadmap file is reported before a
//! [`RoadmapArray`](crate::data_structs::RoadmapArray) is handed out, so a
//! caller never observes a partially filled array.

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::data_structs::SlotPhase;

#[derive(Error, Debug)]
pub enum RoadmapError {
    /// The file could not be opened or read.
    #[error("I/O error on {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure of a reader with no file behind it, e.g. an in-memory buffer.
    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),

    /// The input is empty, so there is no header line.
    #[error("{input} incomplete: missing header line")]
    TruncatedHeader { input: String },

    /// The header line does not hold four numeric fields.
    #[error("malformed header line '{line}': {message}")]
    MalformedHeader { line: String, message: String },

    /// The header announces sequences but no roadmap follows it.
    #[error("{input} incomplete: header announces {expected} sequences but the body is empty")]
    MissingBody { input: String, expected: usize },

    /// A data line could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A data line appeared before the first marker line.
    #[error("annotation at line {line} precedes the first roadmap marker")]
    OrphanAnnotation { line: usize },

    /// More marker lines than the header announced.
    #[error("roadmap marker at line {line} exceeds the {expected} sequences announced in the header")]
    TooManyRoadmaps { line: usize, expected: usize },

    /// A marker line carries no original sequence identifier.
    #[error("roadmap marker at line {line} has no sequence index")]
    MissingSequenceIndex { line: usize },

    /// The number of marker lines differs from the announced sequence count.
    #[error("found {found} roadmap markers, header announces {expected}")]
    SequenceCountMismatch { expected: usize, found: usize },

    /// Roadmap counts do not add up to the stored annotations.
    #[error("roadmaps count {counted} annotations, {stored} are stored")]
    InconsistentCounts { counted: u64, stored: usize },

    /// Two marker lines name the same original sequence.
    #[error("sequence index {index} appears more than once")]
    DuplicateSequenceIndex { index: i64 },

    /// The k-mer word length is zero or above the configured maximum.
    #[error("unsupported word length {word_length}{}", .max.map(|m| format!(" (maximum {})", m)).unwrap_or_default())]
    WordLength {
        word_length: usize,
        max:         Option<usize>,
    },

    /// Exact-size storage could not be reserved.
    #[error("could not allocate {count} {what}")]
    Allocation { what: &'static str, count: usize },

    /// An operation needs the annotation slots in a different phase.
    #[error("operation requires {expected}, annotations hold {actual}")]
    PhaseViolation {
        expected: SlotPhase,
        actual:   SlotPhase,
    },
}

pub type Result<T> = std::result::Result<T, RoadmapError>;

impl RoadmapError {
    pub fn io(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Turns a path-less reader failure into [`RoadmapError::Io`] for `path`.
    pub fn at_path(
        self,
        path: &Path,
    ) -> Self {
        match self {
            Self::Stream(source) => Self::io(path, source),
            other => other,
        }
    }

    pub fn malformed_header(
        line: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedHeader {
            line:    line.trim_end().to_string(),
            message: message.into(),
        }
    }
}
