// src/readers/mod.rs

//! "Readers" for _cghlib_.
//!
//! ## Overview of readers
//!
//! * A [`CanLogReader`] drives a [`csv::Reader`] to derive [`CanFrame`s].
//!
//! The _cgh_ binary program uses one `CanLogReader` for the one file it
//! analyzes. The `CanLogReader` gathers every distinct identifier and the
//! frames of one message class in a single pass, then the frames are handed
//! to the [`analysis`] module.
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [`analysis`]: crate::analysis
//! [`Read`]: std::io::Read
//! [`csv::Reader`]: https://docs.rs/csv/1/csv/struct.Reader.html
//! [`CanFrame`s]: crate::data::canframe::CanFrame
//! [`CanLogReader`]: crate::readers::canlogreader::CanLogReader

pub mod canlogreader;
pub mod helpers;
pub mod summary;
