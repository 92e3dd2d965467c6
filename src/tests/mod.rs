// src/tests/mod.rs

//! Tests for _cghlib_.
//!
//! Tests are placed at `src/tests/`, inside the `cghlib`, so they have
//! crate-internal visibility. Tests of only the public API are at
//! top-level path `tests/`.

pub mod canframe_tests;
pub mod canlogreader_tests;
pub mod helpers_tests;
