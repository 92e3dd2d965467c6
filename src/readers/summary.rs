// src/readers/summary.rs

//! Implements `SummaryCanLogReader` statistics tracking struct.

#![allow(non_snake_case)]

use crate::common::{Count, FPath, FileSz};
use crate::data::canframe::CanId;

use std::collections::BTreeSet;
use std::fmt;

use ::more_asserts::debug_assert_ge;

/// Accumulated statistics about reading a single CAN log file
/// by a [`CanLogReader`].
///
/// For CLI option `--summary`.
///
/// [`CanLogReader`]: crate::readers::canlogreader::CanLogReader
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SummaryCanLogReader {
    /// the `FPath` of the processed file
    pub path: FPath,
    /// file size in bytes, if it could be determined
    pub CanLogReader_filesz: Option<FileSz>,
    /// rows read, excluding the header row, including malformed rows
    pub CanLogReader_rows: Count,
    /// rows that parsed into a `CanFrame`
    pub CanLogReader_frames: Count,
    /// rows that matched the identifier filter
    pub CanLogReader_frames_matched: Count,
    /// malformed rows that were skipped
    pub CanLogReader_rows_skipped: Count,
    /// frames where the logged `dlc` disagrees with the payload length
    pub CanLogReader_dlc_mismatch: Count,
    /// distinct identifiers seen
    pub CanLogReader_can_ids: BTreeSet<CanId>,
}

impl SummaryCanLogReader {
    pub fn new(path: FPath, filesz: Option<FileSz>) -> SummaryCanLogReader {
        SummaryCanLogReader {
            path,
            CanLogReader_filesz: filesz,
            ..Default::default()
        }
    }
}

impl fmt::Debug for SummaryCanLogReader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        debug_assert_ge!(self.CanLogReader_rows, self.CanLogReader_frames, "more frames than rows");
        debug_assert_ge!(
            self.CanLogReader_frames,
            self.CanLogReader_frames_matched,
            "more matched frames than frames"
        );
        f.debug_struct("SummaryCanLogReader")
            .field("path", &self.path)
            .field("filesz", &self.CanLogReader_filesz)
            .field("rows", &self.CanLogReader_rows)
            .field("frames", &self.CanLogReader_frames)
            .field("frames_matched", &self.CanLogReader_frames_matched)
            .field("rows_skipped", &self.CanLogReader_rows_skipped)
            .field("dlc_mismatch", &self.CanLogReader_dlc_mismatch)
            .field("can_ids", &self.CanLogReader_can_ids.len())
            .finish()
    }
}
