// src/analysis/mod.rs

//! Analysis of the counter field of one message class.
//!
//! * [`counter`] finds the counter values missing from the log, the
//!   "ghosts".
//! * [`candidates`] decodes the ghosts into candidate CAN IDs and picks an
//!   answer.

pub mod candidates;
pub mod counter;
