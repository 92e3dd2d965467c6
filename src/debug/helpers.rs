// src/debug/helpers.rs

//! Miscellaneous helper functions for testing.

use crate::common::FPath;
use crate::readers::helpers::path_to_fpath;

#[allow(unused_imports)] // XXX: clippy wrongly marks this as unused
use std::io::Write; // for `NamedTempFile.write_all`

use ::lazy_static::lazy_static;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

#[doc(hidden)]
pub use ::tempfile::NamedTempFile;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile instances default to this file name prefix.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-cgh-test-";

lazy_static! {
    pub static ref STRING_TEMPFILE_PREFIX: String = String::from(STR_TEMPFILE_PREFIX);
}

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    path_to_fpath(ntf.path())
}

/// Testing helper function to write a `str` to a temporary file
/// with suffix `.csv`.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    defñ!("(data len {})", data.len());
    let mut ntf = match ::tempfile::Builder::new()
        // use known prefix for easier cleanup
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .suffix(".csv")
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::tempfile() return Err {}", err);
        }
    };
    match ntf.write_all(data.as_bytes()) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }

    ntf
}

/// Header row of a CAN log file, without newline.
pub const CANLOG_HEADER: &str = "timestamp,can_id,dlc,payload";

/// Testing helper to build CAN log text.
///
/// Each `(can_id, payload)` becomes one row with timestamp `index * 0.001`
/// and a `dlc` matching the payload length.
pub fn canlog_text(rows: &[(&str, &str)]) -> String {
    let mut text = String::with_capacity(CANLOG_HEADER.len() + 1 + rows.len() * 40);
    text.push_str(CANLOG_HEADER);
    text.push('\n');
    for (index, (can_id, payload)) in rows.iter().enumerate() {
        text.push_str(&format!(
            "{:.6},{},{},{}\n",
            index as f64 * 0.001,
            can_id,
            payload.len() / 2,
            payload,
        ));
    }

    text
}

/// Testing helper to build the payloads of a counter message class.
///
/// Each counter value becomes an 8-byte payload with the counter as the
/// first byte.
pub fn counter_payloads(counters: &[u8]) -> Vec<String> {
    counters
        .iter()
        .map(|c| format!("{:02X}A1B2C3D4E5F607", c))
        .collect()
}

/// The counter values `00..=FF` in order, without the `missing` values.
pub fn counter_cycle_without(missing: &[u8]) -> Vec<u8> {
    (0..=u8::MAX)
        .filter(|c| !missing.contains(c))
        .collect()
}
