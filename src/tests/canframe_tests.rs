// src/tests/canframe_tests.rs

//! tests for `canframe.rs`

#![allow(non_snake_case)]

use std::io::ErrorKind;

use ::test_case::test_case;

use crate::data::canframe::{
    hex_to_bytes,
    CanFrame,
    CanId,
    CANID_MAX,
};

#[test_case("0x0200", 0x0200)]
#[test_case("0x200", 0x0200; "short form")]
#[test_case("200", 0x0200; "no prefix")]
#[test_case("0X1f", 0x001F; "upper prefix lower digits")]
#[test_case(" 0x0300 ", 0x0300; "whitespace")]
#[test_case("0x1FFFFFFF", CANID_MAX; "max extended")]
fn test_CanId_from_str_ok(input: &str, expected: u32) {
    let can_id: CanId = input.parse().unwrap();
    assert_eq!(can_id, CanId(expected));
}

#[test_case(""; "empty")]
#[test_case("0x"; "prefix only")]
#[test_case("+12"; "plus sign")]
#[test_case("0xZZ"; "not hex")]
#[test_case("0x-1"; "negative")]
#[test_case("0x20000000"; "too large")]
fn test_CanId_from_str_err(input: &str) {
    let err = input.parse::<CanId>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test_case(0x0000, "0x0000")]
#[test_case(0x0200, "0x0200")]
#[test_case(0x949B, "0x949B")]
#[test_case(0x12345, "0x12345"; "wider than four digits")]
fn test_CanId_display(value: u32, expected: &str) {
    assert_eq!(CanId(value).to_string(), expected);
}

#[test]
fn test_CanId_from_pair() {
    assert_eq!(CanId::from_pair(0x94, 0x9B), CanId(0x949B));
    assert_eq!(CanId::from_pair(0x00, 0x27), CanId(0x0027));
}

#[test_case("", &[]; "empty")]
#[test_case("0A1b", &[0x0A, 0x1B]; "mixed case")]
#[test_case("FF00", &[0xFF, 0x00])]
fn test_hex_to_bytes_ok(input: &str, expected: &[u8]) {
    assert_eq!(hex_to_bytes(input).unwrap(), expected);
}

#[test_case("ABC"; "odd length")]
#[test_case("0G"; "not hex")]
#[test_case("+1"; "plus sign")]
fn test_hex_to_bytes_err(input: &str) {
    let err = hex_to_bytes(input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn test_CanFrame_from_fields() {
    let frame = CanFrame::from_fields(" 0.001 ", "0x0200", "8", "04a1b2c3d4e5f607", 2).unwrap();
    assert_eq!(frame.timestamp, 0.001);
    assert_eq!(frame.can_id, CanId(0x0200));
    assert_eq!(frame.dlc, 8);
    assert_eq!(frame.payload, "04A1B2C3D4E5F607");
    assert_eq!(frame.rownumber, 2);
    assert_eq!(frame.payload_len(), 8);
    assert!(frame.dlc_matches());
    assert_eq!(
        frame.payload_bytes().unwrap(),
        vec![0x04, 0xA1, 0xB2, 0xC3, 0xD4, 0xE5, 0xF6, 0x07]
    );
}

#[test]
fn test_CanFrame_dlc_mismatch() {
    let frame = CanFrame::from_fields("0.0", "0x0200", "8", "0102", 2).unwrap();
    assert_eq!(frame.payload_len(), 2);
    assert!(!frame.dlc_matches());
}

#[test_case(0, Some(0x04))]
#[test_case(1, Some(0xA1))]
#[test_case(7, Some(0x07))]
#[test_case(8, None; "past end")]
#[test_case(usize::MAX, None; "overflow")]
fn test_CanFrame_counter_at(byte_index: usize, expected: Option<u8>) {
    let frame = CanFrame::from_fields("0.0", "0x0200", "8", "04A1B2C3D4E5F607", 2).unwrap();
    assert_eq!(frame.counter_at(byte_index), expected);
}

#[test]
fn test_CanFrame_counter_at_empty_payload() {
    let frame = CanFrame::from_fields("0.0", "0x0200", "0", "", 2).unwrap();
    assert_eq!(frame.counter_at(0), None);
}

#[test_case("abc", "0x0200", "8", "04A1B2C3D4E5F607"; "bad timestamp")]
#[test_case("NaN", "0x0200", "8", "04A1B2C3D4E5F607"; "timestamp nan")]
#[test_case("inf", "0x0200", "8", "04A1B2C3D4E5F607"; "timestamp inf")]
#[test_case("-infinity", "0x0200", "8", "04A1B2C3D4E5F607"; "timestamp negative infinity")]
#[test_case("0.0", "0xQQ", "8", "04A1B2C3D4E5F607"; "bad can_id")]
#[test_case("0.0", "0x0200", "-1", "04A1B2C3D4E5F607"; "negative dlc")]
#[test_case("0.0", "0x0200", "300", "04A1B2C3D4E5F607"; "dlc overflow")]
#[test_case("0.0", "0x0200", "8", "04A1B"; "odd payload")]
#[test_case("0.0", "0x0200", "8", "XYZW"; "payload not hex")]
fn test_CanFrame_from_fields_err(timestamp: &str, can_id: &str, dlc: &str, payload: &str) {
    let err = CanFrame::from_fields(timestamp, can_id, dlc, payload, 5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
    let msg = err.to_string();
    assert!(msg.starts_with("row 5: "), "unexpected message {:?}", msg);
}
