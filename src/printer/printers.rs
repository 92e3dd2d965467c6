// src/printer/printers.rs

//! Specialized printer struct [`PrinterReport`] and helper functions
//! for printing the step-by-step counter gap report.
//!
//! [`PrinterReport`]: self::PrinterReport

use crate::analysis::candidates::{format_flag, Candidate};
use crate::analysis::counter::{CycleGhosts, PositionCheck};
use crate::common::Count;
use crate::data::canframe::{CanId, Counter};
use crate::debug::printers::de_err;
use crate::readers::summary::SummaryCanLogReader;

use std::collections::BTreeSet;
use std::io::{Result, Write};

use ::itertools::Itertools; // brings in `join`
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// globals and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`Color`] for printing headings and banners.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_HEADING: Color = Color::Cyan;

/// [`Color`] for a position that matches its expected counter.
pub const COLOR_OK: Color = Color::Green;

/// [`Color`] for ghosts, rejected candidates, and user-facing errors.
pub const COLOR_ERROR: Color = Color::Red;

/// [`Color`] for the final flag.
pub const COLOR_FLAG: Color = Color::Yellow;

/// Width of the `=` banner lines.
pub const BANNER_WIDTH: usize = 70;

const INDENT1: &str = "  ";
const INDENT2: &str = "    ";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PrinterReport
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A printer for the report, writes to any [`WriteColor`].
///
/// Use [`PrinterReport::stdout`] for the terminal, or pass a
/// [`termcolor::Buffer`] to capture the output.
///
/// [`termcolor::Buffer`]: https://docs.rs/termcolor/1.4.1/termcolor/struct.Buffer.html
pub struct PrinterReport<W: WriteColor> {
    out: W,
    color_spec_heading: ColorSpec,
    color_spec_ok: ColorSpec,
    color_spec_error: ColorSpec,
    color_spec_flag: ColorSpec,
}

/// Macro that sets output color, writes, then resets the color.
macro_rules! write_colored {
    ($self:expr, $color_spec:expr, $($args:tt)*) => {{
        if let Err(err) = $self.out.set_color(&$color_spec) {
            de_err!("set_color({:?}) returned error {}", $color_spec, err);
            return Err(err);
        }
        write!($self.out, $($args)*)?;
        $self.out.reset()?;
    }};
}

impl PrinterReport<StandardStream> {
    /// A `PrinterReport` for stdout.
    pub fn stdout(color_choice: ColorChoice) -> PrinterReport<StandardStream> {
        PrinterReport::new(StandardStream::stdout(color_choice))
    }
}

impl<W: WriteColor> PrinterReport<W> {
    pub fn new(out: W) -> PrinterReport<W> {
        let mut color_spec_heading = ColorSpec::new();
        color_spec_heading.set_fg(Some(COLOR_HEADING)).set_bold(true);
        let mut color_spec_ok = ColorSpec::new();
        color_spec_ok.set_fg(Some(COLOR_OK));
        let mut color_spec_error = ColorSpec::new();
        color_spec_error.set_fg(Some(COLOR_ERROR));
        let mut color_spec_flag = ColorSpec::new();
        color_spec_flag.set_fg(Some(COLOR_FLAG)).set_bold(true);

        PrinterReport {
            out,
            color_spec_heading,
            color_spec_ok,
            color_spec_error,
            color_spec_flag,
        }
    }

    /// Consume the printer, return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self, title: &str) -> Result<()> {
        let line = "=".repeat(BANNER_WIDTH);
        write_colored!(self, self.color_spec_heading, "{}\n{}\n{}\n", line, title, line);
        writeln!(self.out)?;

        Ok(())
    }

    pub fn step(&mut self, number: usize, title: &str) -> Result<()> {
        write_colored!(self, self.color_spec_heading, "Step {}: {}\n", number, title);

        Ok(())
    }

    /// Distinct identifiers and the count of matched frames.
    pub fn print_scan(
        &mut self,
        can_ids: &BTreeSet<CanId>,
        filter: &CanId,
        frames_matched: usize,
    ) -> Result<()> {
        writeln!(self.out, "{}Total CAN IDs found: {}", INDENT1, can_ids.len())?;
        writeln!(self.out, "{}CAN IDs: {}", INDENT1, can_ids.iter().join(", "))?;
        writeln!(self.out, "{}Total {} messages: {}", INDENT1, filter, frames_matched)?;
        writeln!(self.out)?;

        Ok(())
    }

    /// The position table, `✓` for a match, `✗ GHOST!` for a mismatch.
    pub fn print_positions(&mut self, positions: &[PositionCheck]) -> Result<()> {
        writeln!(self.out, "{}First {} counters in sequence:", INDENT1, positions.len())?;
        for check in positions.iter() {
            write!(
                self.out,
                "{}Position {:3}: Expected {:02X}, Got {:02X} ",
                INDENT2, check.position, check.expected, check.actual
            )?;
            if check.matches() {
                write_colored!(self, self.color_spec_ok, "✓");
            } else {
                write_colored!(self, self.color_spec_error, "✗ GHOST!");
            }
            writeln!(self.out)?;
        }
        writeln!(self.out)?;

        Ok(())
    }

    /// The ghost counters. `overridden` notes the list came from the user.
    pub fn print_ghosts(&mut self, ghosts: &[Counter], overridden: bool) -> Result<()> {
        write!(self.out, "{}Ghost signals detected: ", INDENT1)?;
        write_colored!(self, self.color_spec_error, "[{}]", counters_to_string(ghosts));
        if overridden {
            write!(self.out, " (given by user)")?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}Total ghost signals: {}", INDENT1, ghosts.len())?;
        writeln!(self.out)?;

        Ok(())
    }

    /// Ghosts of every cycle.
    pub fn print_cycles(&mut self, cycles: &[CycleGhosts]) -> Result<()> {
        for (index, ghosts) in cycles.iter() {
            writeln!(
                self.out,
                "{}Cycle {:3}: {} ghosts [{}]",
                INDENT2,
                index,
                ghosts.len(),
                counters_to_string(ghosts)
            )?;
        }
        writeln!(self.out)?;

        Ok(())
    }

    /// Every candidate with its method, rejected ones marked.
    pub fn print_candidates(&mut self, candidates: &[Candidate]) -> Result<()> {
        writeln!(self.out, "{}Possible CAN ID interpretations:", INDENT1)?;
        for (index, candidate) in candidates.iter().enumerate() {
            write!(
                self.out,
                "{}Method {} - {:<24} {}",
                INDENT2,
                index + 1,
                format!("{}:", candidate.method),
                candidate.can_id
            )?;
            if candidate.rejected {
                write!(self.out, " ")?;
                write_colored!(self, self.color_spec_error, "(REJECTED)");
            }
            writeln!(self.out)?;
        }
        writeln!(self.out)?;

        Ok(())
    }

    /// The final answer, the eliminated candidates, and the alternatives.
    pub fn print_answer(
        &mut self,
        candidates: &[Candidate],
        answer: &Candidate,
        alternatives: &[&Candidate],
        flag_prefix: &str,
    ) -> Result<()> {
        self.banner("SOLUTION - FINAL ANSWER")?;
        let rejected: Vec<&Candidate> = candidates
            .iter()
            .filter(|candidate| candidate.rejected)
            .collect();
        if !rejected.is_empty() {
            writeln!(self.out, "After systematic elimination:")?;
            for candidate in rejected.iter() {
                write!(self.out, "{}", INDENT1)?;
                write_colored!(self, self.color_spec_error, "✗");
                writeln!(self.out, " {} ({})", candidate.can_id, candidate.method)?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out, "Answer from the {}: {}", answer.method, answer.can_id)?;
        writeln!(self.out)?;
        write!(self.out, "FLAG: ")?;
        write_colored!(self, self.color_spec_flag, "{}", format_flag(flag_prefix, &answer.can_id));
        writeln!(self.out)?;
        writeln!(self.out)?;
        if !alternatives.is_empty() {
            writeln!(self.out, "Alternative if incorrect:")?;
            for candidate in alternatives.iter() {
                writeln!(
                    self.out,
                    "{}- {} ({})",
                    INDENT1,
                    format_flag(flag_prefix, &candidate.can_id),
                    candidate.method
                )?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out, "{}", "=".repeat(BANNER_WIDTH))?;
        writeln!(self.out)?;
        writeln!(self.out, "Final Answer: {}", format_flag(flag_prefix, &answer.can_id))?;
        self.out.flush()?;

        Ok(())
    }

    /// Plain text line.
    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// other printer functions (no use of PrinterReport)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Counters as `"04, 0A, 5E"`.
pub fn counters_to_string(counters: &[Counter]) -> String {
    counters
        .iter()
        .map(|c| format!("{:02X}", c))
        .join(", ")
}

/// Print the `--summary` about the reader to stderr.
pub fn print_summary(summary: &SummaryCanLogReader, short_payloads: Count) {
    eprintln!();
    eprintln!("Summary:");
    eprintln!("{}File                   : {}", INDENT1, summary.path);
    match summary.CanLogReader_filesz {
        Some(filesz) => eprintln!("{}File size              : {} bytes", INDENT1, filesz),
        None => eprintln!("{}File size              : unknown", INDENT1),
    }
    eprintln!("{}Rows read              : {}", INDENT1, summary.CanLogReader_rows);
    eprintln!("{}Frames parsed          : {}", INDENT1, summary.CanLogReader_frames);
    eprintln!("{}Frames matched         : {}", INDENT1, summary.CanLogReader_frames_matched);
    eprintln!("{}Rows skipped           : {}", INDENT1, summary.CanLogReader_rows_skipped);
    eprintln!("{}DLC mismatches         : {}", INDENT1, summary.CanLogReader_dlc_mismatch);
    eprintln!("{}Short payloads         : {}", INDENT1, short_payloads);
    eprintln!("{}Distinct CAN IDs       : {}", INDENT1, summary.CanLogReader_can_ids.len());
}
