mod common;

use std::io::Write;
use std::path::PathBuf;

use common::roadmap_file;
use roadmaps::prelude::*;
use rstest::rstest;

fn import(
    contents: &str,
    index_conversion: bool,
) -> Result<RoadmapArray, RoadmapError> {
    let file = roadmap_file(contents);
    let mut kmer_config = KmerConfig::default();
    RoadmapImporter::default()
        .with_index_conversion(index_conversion)
        .import(file.path(), &mut kmer_config)
}

#[test]
fn missing_file_is_io_error() {
    let path = PathBuf::from("definitely/not/here/Roadmaps");
    let mut kmer_config = KmerConfig::default();
    let result = import_roadmap_array(&path, &mut kmer_config);
    assert!(matches!(result, Err(RoadmapError::Io { path: p, .. }) if p == path));
    assert_eq!(kmer_config.word_length(), None);
}

#[test]
fn empty_file_has_no_header() {
    assert!(matches!(
        import("", false),
        Err(RoadmapError::TruncatedHeader { .. })
    ));
}

#[test]
fn header_without_body() {
    assert!(matches!(
        import("3\t0\t21\t0\n", false),
        Err(RoadmapError::MissingBody { expected: 3, .. })
    ));
}

#[test]
fn empty_read_set_is_valid() -> anyhow::Result<()> {
    let array = import("0\t0\t21\t0\n", false)?;
    assert!(array.is_empty());
    assert_eq!(array.annotation_count(), 0);
    Ok(())
}

#[rstest]
#[case::too_few_fields("2\t0\t21\n")]
#[case::garbage("two\t0\t21\t0\n")]
fn malformed_header(#[case] contents: &str) {
    assert!(matches!(
        import(contents, false),
        Err(RoadmapError::MalformedHeader { .. })
    ));
}

#[test]
fn zero_word_length() {
    assert!(matches!(
        import("1\t0\t0\t0\nROADMAP 1\n", false),
        Err(RoadmapError::WordLength { word_length: 0, .. })
    ));
}

#[test]
fn word_length_above_configured_maximum() {
    let file = roadmap_file("1\t0\t41\t0\nROADMAP 1\n");
    let mut kmer_config = KmerConfig::default().with_max_word_length(31);
    assert!(matches!(
        import_roadmap_array(file.path(), &mut kmer_config),
        Err(RoadmapError::WordLength {
            word_length: 41,
            max:         Some(31),
        })
    ));
    assert_eq!(kmer_config.word_length(), None);
}

#[test]
fn malformed_data_line_reports_line_number() {
    let result = import("1\t0\t21\t0\nROADMAP 1\n1\t0\t0\t21\n1\tzero\t0\t21\n", false);
    assert!(matches!(result, Err(RoadmapError::Parse { line: 4, .. })));
}

#[test]
fn annotation_before_first_marker() {
    assert!(matches!(
        import("1\t0\t21\t0\n1\t0\t0\t21\nROADMAP 1\n", false),
        Err(RoadmapError::OrphanAnnotation { line: 2 })
    ));
}

#[test]
fn more_markers_than_sequences() {
    assert!(matches!(
        import("1\t0\t21\t0\nROADMAP 1\nROADMAP 2\n", false),
        Err(RoadmapError::TooManyRoadmaps { line: 3, expected: 1 })
    ));
}

#[test]
fn fewer_markers_leave_empty_roadmaps() -> anyhow::Result<()> {
    let array = import("3\t0\t21\t0\nROADMAP 1\n1\t0\t0\t21\n", false)?;
    assert_eq!(array.len(), 3);
    assert_eq!(array.roadmap(1).map(|r| r.annotation_count()), Some(0));
    Ok(())
}

#[test]
fn reordering_needs_every_marker() {
    assert!(matches!(
        import("2\t0\t21\t0\nROADMAP 1\n", true),
        Err(RoadmapError::SequenceCountMismatch { expected: 2, found: 1 })
    ));
}

#[test]
fn reordering_needs_marker_index() {
    assert!(matches!(
        import("1\t0\t21\t0\nROADMAP\n", true),
        Err(RoadmapError::MissingSequenceIndex { line: 2 })
    ));
}

#[test]
fn reordering_rejects_duplicate_index() {
    assert!(matches!(
        import("2\t0\t21\t0\nROADMAP 4\nROADMAP 4\n", true),
        Err(RoadmapError::DuplicateSequenceIndex { index: 4 })
    ));
}

#[test]
fn blank_lines_are_ignored() -> anyhow::Result<()> {
    let array = import("2\t0\t21\t0\n\nROADMAP 1\n\n1\t0\t0\t21\n\nROADMAP 2\n", false)?;
    assert_eq!(array.annotation_count(), 1);
    Ok(())
}

#[test]
fn overflowing_interval_is_parse_error() {
    assert!(matches!(
        import("1\t0\t21\t0\nROADMAP 1\n1\t0\t-9223372036854775808\t1\n", false),
        Err(RoadmapError::Parse { line: 3, .. })
    ));
}

#[test]
fn unreadable_body_is_io_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temporary file");
    file.write_all(b"1\t0\t21\t0\nROADMAP 1\n\xff\n").expect("write");
    file.flush().expect("flush");
    let mut kmer_config = KmerConfig::default();
    assert!(matches!(
        import_roadmap_array(file.path(), &mut kmer_config),
        Err(RoadmapError::Io { path, .. }) if path == file.path()
    ));
}
