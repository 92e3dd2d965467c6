// src/data/mod.rs

//! The `data` module is specialized data containers for
//! [`CanFrame`]s and [`CanId`]s.
//!
//! ## Definitions of data
//!
//! ### CAN log
//!
//! A "CAN log" is a comma-separated text file with one header row followed
//! by rows of
//!
//! ```text
//! timestamp,can_id,dlc,payload
//! 0.000100,0x0200,8,00A1B2C3D4E5F607
//! ```
//!
//! * `timestamp` is seconds as a decimal number.
//! * `can_id` is the hexadecimal CAN identifier.
//! * `dlc` is the Data Length Code, the payload length in bytes.
//! * `payload` is the payload as hexadecimal text.
//!
//! A CAN log is read by a [`CanLogReader`].
//!
//! ### CanFrame
//!
//! A "frame" is one row of a CAN log. It is represented by a [`CanFrame`].
//!
//! ### Counter
//!
//! A "counter" is one payload byte of a message class that increments by one
//! for each message of that class, wrapping from `FF` to `00`.
//!
//! [`CanLogReader`]: crate::readers::canlogreader::CanLogReader
//! [`CanFrame`]: crate::data::canframe::CanFrame
//! [`CanId`]: crate::data::canframe::CanId

pub mod canframe;
