// src/data/canframe.rs

//! Implements a [`CanFrame`] struct and the [`CanId`] identifier.
//!
//! [`CanFrame`]: crate::data::canframe::CanFrame
//! [`CanId`]: crate::data::canframe::CanId

use crate::common::{Bytes, Count};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};

use std::fmt;
use std::io::{Error, ErrorKind, Result};
use std::str::FromStr;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CanId
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Largest extended (29-bit) CAN identifier.
pub const CANID_MAX: u32 = 0x1FFF_FFFF;

/// A CAN identifier, e.g. `0x0200`.
///
/// Parsed from hexadecimal text with an optional `0x` or `0X` prefix.
/// Compared by numeric value so `0x200` and `0x0200` are the same identifier.
/// Displayed as `0x` followed by at least four upper-case hex digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanId(pub u32);

impl CanId {
    /// Identifier made from two counter bytes, `hi` then `lo`,
    /// e.g. `0x94` and `0x9B` become `0x949B`.
    pub const fn from_pair(hi: u8, lo: u8) -> CanId {
        CanId(((hi as u32) << 8) | (lo as u32))
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CanId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl FromStr for CanId {
    type Err = Error;

    fn from_str(s: &str) -> Result<CanId> {
        let s_ = s.trim();
        let digits = s_
            .strip_prefix("0x")
            .or_else(|| s_.strip_prefix("0X"))
            .unwrap_or(s_);
        if digits.is_empty() {
            return Err(Error::new(ErrorKind::InvalidData, format!("empty CAN ID {:?}", s)));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::new(ErrorKind::InvalidData, format!("CAN ID {:?} is not hex", s)));
        }
        let value = match u32::from_str_radix(digits, 16) {
            Ok(val) => val,
            Err(err) => {
                return Err(Error::new(ErrorKind::InvalidData, format!("bad CAN ID {:?}; {}", s, err)));
            }
        };
        if value > CANID_MAX {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("CAN ID {:?} is larger than 29 bits (0x{:X})", s, CANID_MAX),
            ));
        }

        Ok(CanId(value))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CanFrame
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One counter value, one payload byte.
pub type Counter = u8;

/// Timestamp of a logged frame, seconds.
pub type Timestamp = f64;

/// A `CanFrame` is one row of a CAN log file:
/// `timestamp,can_id,dlc,payload`.
#[derive(Clone, PartialEq)]
pub struct CanFrame {
    /// Logged time in seconds.
    pub timestamp: Timestamp,
    pub can_id: CanId,
    /// Data Length Code as written in the log.
    pub dlc: u8,
    /// Payload as upper-case hex text, e.g. `"04A1FF00"`.
    pub payload: String,
    /// 1-based line number within the file. The header is line 1.
    pub rownumber: Count,
}

impl fmt::Debug for CanFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CanFrame")
            .field("rownumber", &self.rownumber)
            .field("timestamp", &self.timestamp)
            .field("can_id", &format_args!("{}", self.can_id))
            .field("dlc", &self.dlc)
            .field("payload", &self.payload)
            .finish()
    }
}

impl CanFrame {
    /// Create a `CanFrame` from the raw text fields of one row.
    ///
    /// Fields are trimmed. An error names the row and the field that failed.
    pub fn from_fields(
        timestamp: &str,
        can_id: &str,
        dlc: &str,
        payload: &str,
        rownumber: Count,
    ) -> Result<CanFrame> {
        defn!("({:?}, {:?}, {:?}, {:?}, row {})", timestamp, can_id, dlc, payload, rownumber);
        let timestamp_: Timestamp = match timestamp.trim().parse::<Timestamp>() {
            Ok(val) => val,
            Err(err) => {
                defx!("bad timestamp");
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("row {}: bad timestamp {:?}; {}", rownumber, timestamp, err),
                ));
            }
        };
        if !timestamp_.is_finite() {
            defx!("timestamp not finite");
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("row {}: timestamp {:?} is not a finite number", rownumber, timestamp),
            ));
        }
        let can_id_: CanId = match can_id.parse::<CanId>() {
            Ok(val) => val,
            Err(err) => {
                defx!("bad can_id");
                return Err(Error::new(ErrorKind::InvalidData, format!("row {}: {}", rownumber, err)));
            }
        };
        let dlc_: u8 = match dlc.trim().parse::<u8>() {
            Ok(val) => val,
            Err(err) => {
                defx!("bad dlc");
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("row {}: bad length {:?}; {}", rownumber, dlc, err),
                ));
            }
        };
        let payload_ = payload.trim().to_ascii_uppercase();
        if let Err(err) = hex_to_bytes(&payload_) {
            defx!("bad payload");
            return Err(Error::new(ErrorKind::InvalidData, format!("row {}: {}", rownumber, err)));
        }
        let frame = CanFrame {
            timestamp: timestamp_,
            can_id: can_id_,
            dlc: dlc_,
            payload: payload_,
            rownumber,
        };
        defx!("return {:?}", frame);

        Ok(frame)
    }

    /// Decode the hex payload text into bytes.
    pub fn payload_bytes(&self) -> Result<Bytes> {
        hex_to_bytes(&self.payload)
    }

    /// Count of payload bytes, derived from the payload text.
    pub fn payload_len(&self) -> usize {
        self.payload.len() / 2
    }

    /// Does the logged `dlc` agree with the payload length?
    pub fn dlc_matches(&self) -> bool {
        self.dlc as usize == self.payload_len()
    }

    /// The payload byte at `byte_index`, `None` if the payload is too short.
    ///
    /// Byte `0` is the first two hex characters of the payload.
    pub fn counter_at(&self, byte_index: usize) -> Option<Counter> {
        let at = byte_index.checked_mul(2)?;
        let pair = self.payload.as_bytes().get(at..at.checked_add(2)?)?;
        if !pair.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }

        Some((hexdigit_value(pair[0]) << 4) | hexdigit_value(pair[1]))
    }
}

/// Decode hex text like `"0A1B"` into bytes `[0x0A, 0x1B]`.
///
/// Errors on odd length or on characters that are not hex digits.
pub fn hex_to_bytes(hex: &str) -> Result<Bytes> {
    if hex.len() % 2 != 0 {
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!("payload {:?} has odd length {}", hex, hex.len()),
        ));
    }
    if let Some(at) = hex.bytes().position(|b| !b.is_ascii_hexdigit()) {
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!("payload {:?} is not hex at offset {}", hex, at),
        ));
    }
    let mut bytes: Bytes = Bytes::with_capacity(hex.len() / 2);
    for pair in hex.as_bytes().chunks_exact(2) {
        bytes.push((hexdigit_value(pair[0]) << 4) | hexdigit_value(pair[1]));
    }

    Ok(bytes)
}

/// Value of one ASCII hex digit. Caller must check `is_ascii_hexdigit`.
const fn hexdigit_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}
