// src/lib.rs

//! _cghlib_ is the library used by the _cgh_ binary program.
//!
//! _cgh_ reads a CAN bus log, finds the counter values missing from one
//! message class ("ghost signals"), and decodes them into candidate CAN IDs.
//!
//! See [_Definitions of data_] and [_Overview of readers_].
//!
//! [_Definitions of data_]: crate::data
//! [_Overview of readers_]: crate::readers

pub mod analysis;
pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
