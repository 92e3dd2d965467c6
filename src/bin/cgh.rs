// src/bin/cgh.rs
//
// ‥ … ≤ ≥ ≠ ≟ ×

//! Driver program _cgh_ drives the [_cghlib_].
//!
//! Processes user-passed command-line arguments.
//! Then reads the one CAN log file with a [`CanLogReader`], gathering every
//! distinct CAN ID and the frames of one message class.
//!
//! The counters of those frames become a [`CounterSequence`]. The counter
//! values missing from the first cycle are the "ghost signals". The ghosts
//! are decoded into [`Candidate`s], candidates the user already rejected are
//! eliminated, and the first survivor is printed as the flag.
//!
//! If passed CLI option `--summary`, statistics about the reading are printed
//! to stderr.
//!
//! [_cghlib_]: cghlib
//! [`CanLogReader`]: cghlib::readers::canlogreader::CanLogReader
//! [`CounterSequence`]: cghlib::analysis::counter::CounterSequence
//! [`Candidate`s]: cghlib::analysis::candidates::Candidate

#![allow(non_camel_case_types)]

use std::process::ExitCode;

use ::anyhow::Context;
use ::clap::error::ErrorKind;
use ::clap::{
    Parser,
    ValueEnum,
};
use ::const_format::concatcp;
use ::lazy_static::lazy_static;

use ::cghlib::analysis::candidates::{
    alternatives,
    eliminate,
    generate,
    Candidates,
    FLAG_PREFIX_DEFAULT,
};
use ::cghlib::analysis::counter::{
    CounterSequence,
    COUNTER_BYTE_DEFAULT,
    POSITIONS_SHOW_DEFAULT,
};
use ::cghlib::common::{
    FPath,
    CANLOG_PATH_DEFAULT,
};
use ::cghlib::data::canframe::{
    CanId,
    Counter,
};
use ::cghlib::debug::printers::{
    e_err,
    e_wrn,
};
use ::cghlib::printer::printers::{
    print_summary,
    ColorChoice,
    PrinterReport,
};
use ::cghlib::readers::canlogreader::{
    CanLogReader,
    CanLogReaderOptions,
    CanLogScan,
};
use ::cghlib::readers::helpers::split_list;
use ::si_trace_print::stack::stack_offset_set;
use ::si_trace_print::{
    defn,
    defo,
    defx,
};

// --------------------
// command-line parsing

/// general error exit value
const EXIT_ERR: i32 = 1;

/// `--ghosts` values.
// a plain `Vec` field is treated by `clap` as one value per occurrence
type CounterList = Vec<Counter>;

/// `--rejected` values.
type CanIdList = Vec<CanId>;

lazy_static! {
    /// CAN ID of the message class with the rolling counter.
    static ref CAN_ID_DEFAULT: CanId = CanId(0x0200);
}

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.ColorChoice.html
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    ValueEnum, // from `clap`
)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

const CLI_HELP_AFTER: &str = concatcp!(
    r#"The CAN log is a comma-separated file with one header row, then rows of
    timestamp,can_id,dlc,payload
for example
    0.001000,0x0200,8,04A1B2C3D4E5F607

The counter of a message class is one payload byte that increments by one
for every message, wrapping from FF to 00. Counter values missing from the
first cycle are "ghost signals". The ghosts are decoded into candidate
CAN IDs in this order:
    Code Name Zero literal  0x0000
    first pair of ghosts    ghosts 0,1
    CAN ID pairing pattern  0xNN01 when only 0xNN00 was seen
    middle pair of ghosts   ghosts 2,3
    last pair of ghosts     ghosts 4,5
    ghosts at indices 3,5   ghosts 3,5
    xor of ghost pairs      (ghost 0 ^ ghost 1)(ghost 2 ^ ghost 3)
    xor of all ghosts       0x00XX
The first candidate not passed to --rejected is the answer.

---

Version: "#, env!("CARGO_PKG_VERSION"), r#"
MSRV: "#, env!("CARGO_PKG_RUST_VERSION"), r#"
License: "#, env!("CARGO_PKG_LICENSE"), r#"
Repository: "#, env!("CARGO_PKG_REPOSITORY"), r#"
"#,
);

/// clap command-line arguments build-time definitions.
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "cgh",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(CAN Ghost Hunter)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Repository: ", env!("CARGO_PKG_REPOSITORY"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path of the CAN log CSV file.
    #[clap(
        verbatim_doc_comment,
        default_value_t = String::from(CANLOG_PATH_DEFAULT),
    )]
    path: String,

    /// CAN ID of the message class with the rolling counter.
    #[clap(
        short = 'i',
        long = "can-id",
        verbatim_doc_comment,
        default_value_t = *CAN_ID_DEFAULT,
        value_parser = cli_parse_can_id,
    )]
    can_id: CanId,

    /// Payload byte index of the counter.
    /// Byte 0 is the first two hex characters of the payload.
    #[clap(
        short = 'B',
        long = "counter-byte",
        verbatim_doc_comment,
        default_value_t = COUNTER_BYTE_DEFAULT,
    )]
    counter_byte: usize,

    /// Use these ghost counters instead of detecting them.
    /// Comma-separated hex values, e.g. "04,0A,5E,78,94,9B".
    #[clap(
        short = 'g',
        long = "ghosts",
        verbatim_doc_comment,
        value_parser = cli_parse_ghosts,
    )]
    ghosts: Option<CounterList>,

    /// CAN IDs already tried and known wrong.
    /// Comma-separated, e.g. "0x0000,0x040A".
    #[clap(
        short = 'r',
        long = "rejected",
        verbatim_doc_comment,
        value_parser = cli_parse_can_ids,
    )]
    rejected: Option<CanIdList>,

    /// Flag wrapper, the answer is printed as "FLAG_PREFIX{0x1234}".
    #[clap(
        short = 'f',
        long = "flag-prefix",
        verbatim_doc_comment,
        default_value_t = String::from(FLAG_PREFIX_DEFAULT),
    )]
    flag_prefix: String,

    /// Count of counters printed in the position table.
    #[clap(
        short = 'n',
        long = "show-positions",
        verbatim_doc_comment,
        default_value_t = POSITIONS_SHOW_DEFAULT,
    )]
    show_positions: usize,

    /// Print the ghosts of every counter cycle, not only the first.
    #[clap(
        long = "all-cycles",
        verbatim_doc_comment,
    )]
    all_cycles: bool,

    /// Warn about and skip malformed rows instead of stopping.
    #[clap(
        long = "skip-malformed",
        verbatim_doc_comment,
    )]
    skip_malformed: bool,

    /// Choose to print using colors.
    #[clap(
        required = false,
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,

    /// Print a summary of the file read to stderr.
    #[clap(
        short,
        long,
        verbatim_doc_comment,
    )]
    summary: bool,
}

/// `clap` argument parser for `--can-id`.
fn cli_parse_can_id(can_id: &str) -> std::result::Result<CanId, String> {
    match can_id.parse::<CanId>() {
        Ok(val) => Ok(val),
        Err(err) => Err(format!("Unable to parse --can-id; {}", err)),
    }
}

/// `clap` argument parser for `--rejected`.
fn cli_parse_can_ids(can_ids: &str) -> std::result::Result<CanIdList, String> {
    let mut can_ids_: CanIdList = CanIdList::new();
    for item in split_list(can_ids).into_iter() {
        match item.parse::<CanId>() {
            Ok(val) => can_ids_.push(val),
            Err(err) => return Err(format!("Unable to parse --rejected; {}", err)),
        }
    }

    Ok(can_ids_)
}

/// `clap` argument parser for `--ghosts`.
fn cli_parse_ghosts(ghosts: &str) -> std::result::Result<CounterList, String> {
    let mut ghosts_: CounterList = CounterList::new();
    for item in split_list(ghosts).into_iter() {
        let digits = item
            .strip_prefix("0x")
            .or_else(|| item.strip_prefix("0X"))
            .unwrap_or(item);
        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("Unable to parse --ghosts value {:?}, expected a hex byte like \"0A\"", item));
        }
        match Counter::from_str_radix(digits, 16) {
            Ok(val) => ghosts_.push(val),
            Err(err) => return Err(format!("Unable to parse --ghosts value {:?}; {}", item, err)),
        }
    }

    Ok(ghosts_)
}

/// Processed user-passed CLI arguments.
#[derive(Debug)]
struct CliOpts {
    path: FPath,
    can_id: CanId,
    counter_byte: usize,
    ghosts: Option<Vec<Counter>>,
    rejected: Vec<CanId>,
    flag_prefix: String,
    show_positions: usize,
    all_cycles: bool,
    skip_malformed: bool,
    color_choice: ColorChoice,
    summary: bool,
}

/// Process user-passed CLI argument strings into expected types.
///
/// This function will [`std::process::exit`] if there is an [`Err`].
fn cli_process_args() -> CliOpts {
    let args = match CLI_Args::try_parse() {
        Ok(val) => val,
        Err(err) => {
            // clap prints help and version to stdout, errors to stderr
            if let Err(err_print) = err.print() {
                e_err!("{}", err_print);
            }
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => std::process::exit(0),
                _ => std::process::exit(EXIT_ERR),
            }
        }
    };

    defo!("args {:?}", args);

    // map `CLI_Color_Choice` to `ColorChoice`
    let color_choice: ColorChoice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };
    defo!("color_choice {:?}", color_choice);

    CliOpts {
        path: args.path,
        can_id: args.can_id,
        counter_byte: args.counter_byte,
        ghosts: args.ghosts,
        rejected: args.rejected.unwrap_or_default(),
        flag_prefix: args.flag_prefix,
        show_positions: args.show_positions,
        all_cycles: args.all_cycles,
        skip_malformed: args.skip_malformed,
        color_choice,
        summary: args.summary,
    }
}

// --------------------
// main

/// Process the user-passed command-line arguments.
/// Start function `run`.
/// Determine a process return code.
pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let opts = cli_process_args();
    defo!("opts {:?}", opts);

    let exitcode = match run(&opts) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            e_err!("{:#}", err);
            ExitCode::FAILURE
        }
    };
    defx!("exitcode {:?}", exitcode);

    exitcode
}

/// Read the CAN log, analyze the counters, print the report.
///
/// Returns `Ok(false)` if every candidate was rejected.
fn run(opts: &CliOpts) -> anyhow::Result<bool> {
    defn!();
    let mut printer = PrinterReport::stdout(opts.color_choice);
    printer.banner("GHOST IN THE CAN - counter gap analysis")?;

    // Step 1: read the log
    printer.step(1, "Reading CAN log file...")?;
    let options = CanLogReaderOptions {
        skip_malformed: opts.skip_malformed,
    };
    let mut canlogreader = CanLogReader::new(opts.path.clone(), options)
        .context("cannot open CAN log")?;
    let scan: CanLogScan = canlogreader
        .read_all(&opts.can_id)
        .context("cannot read CAN log")?;
    printer.print_scan(&scan.can_ids, &opts.can_id, scan.frames.len())?;
    if scan.frames.is_empty() {
        e_wrn!("no messages with CAN ID {} in {:?}", opts.can_id, opts.path);
    }

    // Step 2: the counter sequence
    printer.step(2, &format!("Analyzing {} counter sequence...", opts.can_id))?;
    let sequence = CounterSequence::from_frames(&scan.frames, opts.counter_byte);
    if sequence.short_payloads() != 0 {
        e_wrn!(
            "{} messages with CAN ID {} have no payload byte {}",
            sequence.short_payloads(),
            opts.can_id,
            opts.counter_byte
        );
    }
    printer.print_positions(&sequence.position_table(opts.show_positions))?;

    // Step 3: the ghosts
    printer.step(3, "Identifying ghost signals (missing counters)...")?;
    let overridden = opts.ghosts.is_some();
    let ghosts: Vec<Counter> = match &opts.ghosts {
        Some(ghosts) => ghosts.clone(),
        None => sequence.ghosts(),
    };
    printer.print_ghosts(&ghosts, overridden)?;
    if opts.all_cycles {
        printer.print_cycles(&sequence.ghosts_all_cycles())?;
    }

    // Step 4: decode the ghosts
    printer.step(4, "Decoding the vanished vehicle CAN ID...")?;
    let mut candidates: Candidates = generate(&ghosts, &scan.can_ids);
    let answer = eliminate(&mut candidates, &opts.rejected);
    printer.print_candidates(&candidates)?;

    if opts.summary {
        print_summary(&canlogreader.summary(), sequence.short_payloads());
    }

    let answer = match answer {
        Some(val) => val,
        None => {
            printer.line("Every candidate was rejected.")?;
            e_err!("no candidate CAN ID remains after elimination");
            defx!("return false");
            return Ok(false);
        }
    };
    let alternatives_ = alternatives(&candidates);
    printer.print_answer(&candidates, &answer, &alternatives_, &opts.flag_prefix)?;
    defx!("return true");

    Ok(true)
}
