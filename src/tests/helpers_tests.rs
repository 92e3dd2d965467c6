// src/tests/helpers_tests.rs

//! tests for `helpers.rs` functions

#![allow(non_snake_case)]

use std::path::Path;

use ::test_case::test_case;

use crate::common::FPath;
use crate::debug::helpers::{
    create_temp_file,
    ntf_fpath,
    STR_TEMPFILE_PREFIX,
};
use crate::debug::printers::str_to_String_noraw;
use crate::readers::helpers::{
    basename,
    fpath_to_path,
    path_filesz,
    path_to_fpath,
    split_list,
};

#[test_case("", &[]; "empty")]
#[test_case(" , ,", &[]; "only separators")]
#[test_case("04", &["04"]; "one")]
#[test_case("04, 0A,5E ,", &["04", "0A", "5E"]; "trimmed")]
#[test_case("0x0000,0x040A", &["0x0000", "0x040A"]; "can ids")]
fn test_split_list(input: &str, expected: &[&str]) {
    assert_eq!(split_list(input), expected);
}

#[test]
fn test_basename() {
    let path: FPath = ["", "tmp", "m1_can_log.csv"].join(std::path::MAIN_SEPARATOR_STR);
    assert_eq!(basename(&path), "m1_can_log.csv");
    assert_eq!(basename(&FPath::from("m1_can_log.csv")), "m1_can_log.csv");
}

#[test]
fn test_path_fpath() {
    let fpath: FPath = FPath::from("some/file.csv");
    let path: &Path = fpath_to_path(&fpath);
    assert_eq!(path_to_fpath(path), fpath);
}

#[test]
fn test_path_filesz() {
    let ntf = create_temp_file("0123456789");
    let fpath = ntf_fpath(&ntf);
    assert!(basename(&fpath).starts_with(STR_TEMPFILE_PREFIX));
    assert_eq!(path_filesz(fpath_to_path(&fpath)), Some(10));
    assert_eq!(path_filesz(Path::new("/tmp/tmp-cgh-test-does-not-exist.csv")), None);
}

#[test_case("a,b", "a,b"; "plain")]
#[test_case("a\tb\r\n", "a␉b␍␊"; "controls")]
fn test_str_to_String_noraw(input: &str, expected: &str) {
    assert_eq!(str_to_String_noraw(input), expected);
}
