// src/printer/mod.rs

//! The `printer` module is for printing the user-facing report about a
//! CAN log with various text effects (color, bold).

pub mod printers;
