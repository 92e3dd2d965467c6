// src/tests/canlogreader_tests.rs

//! tests for `canlogreader.rs`

#![allow(non_snake_case)]

use std::io::ErrorKind;

use ::test_case::test_case;

use crate::analysis::counter::CounterSequence;
use crate::common::{
    FPath,
    ResultS3,
};
use crate::data::canframe::{
    CanId,
    Counter,
};
use crate::debug::helpers::{
    canlog_text,
    counter_cycle_without,
    counter_payloads,
    create_temp_file,
    ntf_fpath,
    CANLOG_HEADER,
};
use crate::readers::canlogreader::{
    CanLogReader,
    CanLogReaderOptions,
};

const OPTIONS_STRICT: CanLogReaderOptions = CanLogReaderOptions {
    skip_malformed: false,
};

const OPTIONS_SKIP: CanLogReaderOptions = CanLogReaderOptions {
    skip_malformed: true,
};

const GHOSTS: [Counter; 6] = [0x04, 0x0A, 0x5E, 0x78, 0x94, 0x9B];

/// a log of `0x0200` counter frames with `0x0100` and `0x0300` frames
/// interleaved
fn canlog_counter_text(counters: &[Counter]) -> String {
    let payloads = counter_payloads(counters);
    let mut rows: Vec<(&str, &str)> = Vec::with_capacity(payloads.len() * 2);
    for (index, payload) in payloads.iter().enumerate() {
        rows.push(("0x0200", payload.as_str()));
        if index % 2 == 0 {
            rows.push(("0x0100", "DEADBEEF"));
        } else {
            rows.push(("0x300", "00"));
        }
    }

    canlog_text(&rows)
}

#[test]
fn test_CanLogReader_read_all_ghosts() {
    let mut counters = counter_cycle_without(&GHOSTS);
    counters.extend(counter_cycle_without(&[]));
    let ntf = create_temp_file(&canlog_counter_text(&counters));
    let mut reader = CanLogReader::new(ntf_fpath(&ntf), OPTIONS_STRICT).unwrap();
    let scan = reader.read_all(&CanId(0x0200)).unwrap();

    let can_ids: Vec<CanId> = scan.can_ids.iter().copied().collect();
    assert_eq!(can_ids, vec![CanId(0x0100), CanId(0x0200), CanId(0x0300)]);
    assert_eq!(scan.frames.len(), counters.len());

    let sequence = CounterSequence::from_frames(&scan.frames, 0);
    assert_eq!(sequence.ghosts(), GHOSTS.to_vec());

    let summary = reader.summary();
    assert_eq!(summary.CanLogReader_rows, counters.len() as u64 * 2);
    assert_eq!(summary.CanLogReader_frames, counters.len() as u64 * 2);
    assert_eq!(summary.CanLogReader_frames_matched, counters.len() as u64);
    assert_eq!(summary.CanLogReader_rows_skipped, 0);
    assert_eq!(summary.CanLogReader_dlc_mismatch, 0);
    assert_eq!(summary.CanLogReader_can_ids.len(), 3);
    assert!(summary.CanLogReader_filesz.unwrap() > 0);
}

#[test_case("0x0200"; "canonical")]
#[test_case("0x200"; "short form")]
#[test_case("200"; "no prefix")]
fn test_CanLogReader_filter_numeric(can_id: &str) {
    let text = canlog_text(&[(can_id, "00"), ("0x0201", "01"), (can_id, "02")]);
    let ntf = create_temp_file(&text);
    let mut reader = CanLogReader::new(ntf_fpath(&ntf), OPTIONS_STRICT).unwrap();
    let scan = reader.read_all(&CanId(0x0200)).unwrap();
    assert_eq!(scan.frames.len(), 2);
    assert_eq!(scan.can_ids.len(), 2);
}

#[test]
fn test_CanLogReader_next_frame() {
    let text = canlog_text(&[("0x0200", "00"), ("0x0200", "01")]);
    let ntf = create_temp_file(&text);
    let mut reader = CanLogReader::new(ntf_fpath(&ntf), OPTIONS_STRICT).unwrap();

    let frame = match reader.next_frame() {
        ResultS3::Found(val) => val,
        result => panic!("expected Found, got {}", result),
    };
    assert_eq!(frame.rownumber, 2);
    assert_eq!(frame.counter_at(0), Some(0x00));
    let frame = match reader.next_frame() {
        ResultS3::Found(val) => val,
        result => panic!("expected Found, got {}", result),
    };
    assert_eq!(frame.rownumber, 3);
    assert_eq!(frame.counter_at(0), Some(0x01));
    assert!(reader.next_frame().is_done());
    assert!(reader.next_frame().is_done());
}

#[test]
fn test_CanLogReader_header_only() {
    let text = format!("{}\n", CANLOG_HEADER);
    let ntf = create_temp_file(&text);
    let mut reader = CanLogReader::new(ntf_fpath(&ntf), OPTIONS_STRICT).unwrap();
    let scan = reader.read_all(&CanId(0x0200)).unwrap();
    assert!(scan.can_ids.is_empty());
    assert!(scan.frames.is_empty());
    assert_eq!(reader.summary().CanLogReader_rows, 0);
}

#[test]
fn test_CanLogReader_empty_file() {
    let ntf = create_temp_file("");
    let mut reader = CanLogReader::new(ntf_fpath(&ntf), OPTIONS_STRICT).unwrap();
    let scan = reader.read_all(&CanId(0x0200)).unwrap();
    assert!(scan.frames.is_empty());
}

#[test]
fn test_CanLogReader_path() {
    let ntf = create_temp_file(CANLOG_HEADER);
    let path: FPath = ntf_fpath(&ntf);
    let reader = CanLogReader::new(path.clone(), OPTIONS_STRICT).unwrap();
    assert_eq!(reader.path(), &path);
    assert_eq!(reader.summary().path, path);
}

#[test]
fn test_CanLogReader_file_not_found() {
    let path: FPath = FPath::from("/tmp/tmp-cgh-test-this-file-does-not-exist.csv");
    let err = CanLogReader::new(path, OPTIONS_STRICT).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_CanLogReader_bad_header() {
    let ntf = create_temp_file("timestamp,can_id\n0.0,0x0200\n");
    let err = CanLogReader::new(ntf_fpath(&ntf), OPTIONS_STRICT).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

/// header, a good row, then `row` on line 3
fn canlog_with_bad_row(row: &str) -> String {
    format!("{}\n0.000000,0x0200,1,00\n{}\n0.002000,0x0200,1,01\n", CANLOG_HEADER, row)
}

#[test_case("0.001000,0x0200,1"; "too few fields")]
#[test_case("0.001000,0x0200,1,00,ff"; "too many fields")]
#[test_case("nope,0x0200,1,00"; "bad timestamp")]
#[test_case("NaN,0x0200,1,00"; "timestamp nan")]
#[test_case("0.001000,0xJJ,1,00"; "bad can_id")]
#[test_case("0.001000,0x0200,x,00"; "bad dlc")]
#[test_case("0.001000,0x0200,1,0"; "odd payload")]
fn test_CanLogReader_malformed_strict(row: &str) {
    let ntf = create_temp_file(&canlog_with_bad_row(row));
    let mut reader = CanLogReader::new(ntf_fpath(&ntf), OPTIONS_STRICT).unwrap();
    let err = reader.read_all(&CanId(0x0200)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
    let msg = err.to_string();
    assert!(msg.contains("row 3"), "unexpected message {:?}", msg);
    assert_eq!(msg.matches(&ntf_fpath(&ntf)).count(), 1, "unexpected message {:?}", msg);
}

#[test_case("0.001000,0x0200,1"; "too few fields")]
#[test_case("nope,0x0200,1,00"; "bad timestamp")]
#[test_case("0.001000,0x0200,1,0"; "odd payload")]
fn test_CanLogReader_malformed_skip(row: &str) {
    let ntf = create_temp_file(&canlog_with_bad_row(row));
    let mut reader = CanLogReader::new(ntf_fpath(&ntf), OPTIONS_SKIP).unwrap();
    let scan = reader.read_all(&CanId(0x0200)).unwrap();
    assert_eq!(scan.frames.len(), 2);
    let summary = reader.summary();
    assert_eq!(summary.CanLogReader_rows, 3);
    assert_eq!(summary.CanLogReader_frames, 2);
    assert_eq!(summary.CanLogReader_rows_skipped, 1);
}

#[test]
fn test_CanLogReader_dlc_mismatch() {
    let text = format!("{}\n0.0,0x0200,8,0102\n0.1,0x0200,2,0103\n", CANLOG_HEADER);
    let ntf = create_temp_file(&text);
    let mut reader = CanLogReader::new(ntf_fpath(&ntf), OPTIONS_STRICT).unwrap();
    let scan = reader.read_all(&CanId(0x0200)).unwrap();
    assert_eq!(scan.frames.len(), 2);
    assert_eq!(reader.summary().CanLogReader_dlc_mismatch, 1);
}

#[test]
fn test_CanLogReader_whitespace_fields() {
    let text = format!("{}\n 0.0 , 0x0200 , 1 , 0a \n", CANLOG_HEADER);
    let ntf = create_temp_file(&text);
    let mut reader = CanLogReader::new(ntf_fpath(&ntf), OPTIONS_STRICT).unwrap();
    let scan = reader.read_all(&CanId(0x0200)).unwrap();
    assert_eq!(scan.frames.len(), 1);
    assert_eq!(scan.frames[0].payload, "0A");
}
