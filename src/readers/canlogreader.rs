// src/readers/canlogreader.rs

//! Implements a [`CanLogReader`], the driver of deriving [`CanFrame`s]
//! from a CAN log file.
//!
//! [`CanFrame`s]: crate::data::canframe::CanFrame

use crate::common::{Count, FPath, File, ResultS3};
use crate::data::canframe::{CanFrame, CanId};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn, e_err, e_wrn};
use crate::readers::helpers::{fpath_to_path, path_filesz};
use crate::readers::summary::SummaryCanLogReader;

use std::collections::BTreeSet;
use std::fmt;
use std::io::{Error, ErrorKind, Result};

use ::itertools::Itertools; // brings in `join`
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Count of fields in every row: `timestamp,can_id,dlc,payload`.
pub const CANLOG_FIELDS: usize = 4;

/// Result of [`CanLogReader::next_frame`].
pub type ResultNextFrame = ResultS3<CanFrame, Error>;

/// Options for a [`CanLogReader`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanLogReaderOptions {
    /// Skip malformed rows (with a warning) instead of returning an error.
    pub skip_malformed: bool,
}

/// Everything a single pass over a CAN log gathers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanLogScan {
    /// Every distinct identifier in the file.
    pub can_ids: BTreeSet<CanId>,
    /// Frames matching the identifier filter, in file order.
    pub frames: Vec<CanFrame>,
}

/// A specialized reader that reads a CAN log file row by row and parses
/// each row into a [`CanFrame`].
///
/// The first row is a header and is not returned.
///
/// _This is not a rust "Reader"; it does not implement trait [`Read`]._
///
/// [`CanFrame`]: crate::data::canframe::CanFrame
/// [`Read`]: std::io::Read
pub struct CanLogReader {
    path: FPath,
    options: CanLogReaderOptions,
    reader: ::csv::Reader<File>,
    /// reused for every row
    record: ::csv::StringRecord,
    summary: SummaryCanLogReader,
}

impl fmt::Debug for CanLogReader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CanLogReader")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("summary", &self.summary)
            .finish()
    }
}

impl CanLogReader {
    /// Open the CAN log file at `path` and read the header row.
    pub fn new(path: FPath, options: CanLogReaderOptions) -> Result<CanLogReader> {
        defn!("({:?}, {:?})", path, options);
        let path_ = fpath_to_path(&path);
        let file: File = match File::open(path_) {
            Ok(val) => val,
            Err(err) => {
                defx!("File::open({:?}) error {}", path, err);
                return Err(Error::new(err.kind(), format!("{} for file {:?}", err, path)));
            }
        };
        let filesz = path_filesz(path_);
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(::csv::Trim::All)
            .from_reader(file);
        let headers = match reader.headers() {
            Ok(val) => val.clone(),
            Err(err) => {
                defx!("reader.headers() error {}", err);
                return Err(Error::new(ErrorKind::InvalidData, format!("{} for file {:?}", err, path)));
            }
        };
        defo!("headers {:?}", headers);
        // an empty file has no header row
        if !headers.is_empty() && headers.len() != CANLOG_FIELDS {
            defx!("bad header field count {}", headers.len());
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!(
                    "header row of {:?} has {} fields ({:?}), expected {} fields like \"timestamp,can_id,dlc,payload\"",
                    path,
                    headers.len(),
                    headers.iter().join(","),
                    CANLOG_FIELDS,
                ),
            ));
        }
        let summary = SummaryCanLogReader::new(path.clone(), filesz);
        let canlogreader = CanLogReader {
            path,
            options,
            reader,
            record: ::csv::StringRecord::new(),
            summary,
        };
        defx!("return {:?}", canlogreader);

        Ok(canlogreader)
    }

    pub fn path(&self) -> &FPath {
        &self.path
    }

    /// Read the next row and parse it into a [`CanFrame`].
    ///
    /// Returns `Done` at end of file. A malformed row returns `Err` unless
    /// option `skip_malformed` is set, in which case it is counted and
    /// skipped.
    pub fn next_frame(&mut self) -> ResultNextFrame {
        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(true) => {}
                Ok(false) => {
                    defñ!("Done");
                    return ResultNextFrame::Done;
                }
                Err(err) => {
                    defñ!("read_record error {}", err);
                    return ResultNextFrame::Err(Error::new(
                        ErrorKind::InvalidData,
                        format!("{} for file {:?}", err, self.path),
                    ));
                }
            }
            self.summary.CanLogReader_rows += 1;
            let rownumber: Count = match self.record.position() {
                Some(position) => position.line(),
                // header is line 1
                None => self.summary.CanLogReader_rows + 1,
            };
            match self.parse_record(rownumber) {
                Ok(frame) => {
                    self.summary.CanLogReader_frames += 1;
                    if !frame.dlc_matches() {
                        self.summary.CanLogReader_dlc_mismatch += 1;
                    }
                    self.summary.CanLogReader_can_ids.insert(frame.can_id);
                    return ResultNextFrame::Found(frame);
                }
                Err(err) => {
                    if !self.options.skip_malformed {
                        return ResultNextFrame::Err(Error::new(
                            err.kind(),
                            format!("{} for file {:?}", err, self.path),
                        ));
                    }
                    e_wrn!("skipping malformed {} in file {:?}", err, self.path);
                    self.summary.CanLogReader_rows_skipped += 1;
                }
            }
        }
    }

    /// Parse the current `self.record` into a `CanFrame`.
    fn parse_record(&self, rownumber: Count) -> Result<CanFrame> {
        #[cfg(any(debug_assertions, test))]
        defo!("row {} {:?}", rownumber, str_to_String_noraw(&self.record.iter().join(",")));
        if self.record.len() != CANLOG_FIELDS {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!(
                    "row {}: has {} fields, expected {}",
                    rownumber,
                    self.record.len(),
                    CANLOG_FIELDS,
                ),
            ));
        }

        CanFrame::from_fields(
            &self.record[0],
            &self.record[1],
            &self.record[2],
            &self.record[3],
            rownumber,
        )
    }

    /// Read every remaining row in one pass.
    ///
    /// Every distinct identifier is remembered; only frames with identifier
    /// `filter` are kept.
    pub fn read_all(&mut self, filter: &CanId) -> Result<CanLogScan> {
        defn!("({})", filter);
        let mut scan = CanLogScan::default();
        loop {
            match self.next_frame() {
                ResultS3::Found(frame) => {
                    scan.can_ids.insert(frame.can_id);
                    if frame.can_id == *filter {
                        self.summary.CanLogReader_frames_matched += 1;
                        scan.frames.push(frame);
                    }
                }
                ResultS3::Done => break,
                ResultS3::Err(err) => {
                    defx!("error {}", err);
                    return Err(err);
                }
            }
        }
        defx!("can_ids {}, frames {}", scan.can_ids.len(), scan.frames.len());

        Ok(scan)
    }

    /// Return an up-to-date [`SummaryCanLogReader`] instance for this
    /// `CanLogReader`.
    pub fn summary(&self) -> SummaryCanLogReader {
        self.summary.clone()
    }
}
