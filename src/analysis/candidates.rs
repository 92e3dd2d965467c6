// src/analysis/candidates.rs

//! Turn ghost counters into candidate CAN IDs and pick an answer.
//!
//! Each [`CandidateMethod`] is one way of reading an identifier out of the
//! ghosts. Methods are tried in a fixed priority order; the answer is the
//! first candidate the user has not already rejected.

use crate::data::canframe::{CanId, Counter};

use std::collections::BTreeSet;
use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Default flag wrapper, e.g. `LISA{0x949B}`.
pub const FLAG_PREFIX_DEFAULT: &str = "LISA";

/// A way to derive a candidate identifier.
///
/// Declaration order is priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CandidateMethod {
    /// The literal `0x0000`, after the puzzle hint "Code Name: Zero".
    CodeNameZero,
    /// Ghosts 0 and 1.
    FirstPair,
    /// The unobserved `0xNN01` partner of an observed `0xNN00`.
    PairingPattern,
    /// Ghosts 2 and 3.
    MiddlePair,
    /// Ghosts 4 and 5.
    LastPair,
    /// Ghosts 3 and 5.
    Indices3And5,
    /// Ghost 0 xor ghost 1, then ghost 2 xor ghost 3.
    XorPairs,
    /// Every ghost xor'd together.
    XorAll,
}

impl CandidateMethod {
    pub const ALL: [CandidateMethod; 8] = [
        CandidateMethod::CodeNameZero,
        CandidateMethod::FirstPair,
        CandidateMethod::PairingPattern,
        CandidateMethod::MiddlePair,
        CandidateMethod::LastPair,
        CandidateMethod::Indices3And5,
        CandidateMethod::XorPairs,
        CandidateMethod::XorAll,
    ];

    /// Short human description for the report.
    pub const fn describe(&self) -> &'static str {
        match self {
            CandidateMethod::CodeNameZero => "Code Name Zero literal",
            CandidateMethod::FirstPair => "first pair of ghosts",
            CandidateMethod::PairingPattern => "CAN ID pairing pattern",
            CandidateMethod::MiddlePair => "middle pair of ghosts",
            CandidateMethod::LastPair => "last pair of ghosts",
            CandidateMethod::Indices3And5 => "ghosts at indices 3,5",
            CandidateMethod::XorPairs => "xor of ghost pairs",
            CandidateMethod::XorAll => "xor of all ghosts",
        }
    }

    /// Identifiers this method derives. Empty if there are too few ghosts.
    pub fn derive(&self, ghosts: &[Counter], can_ids: &BTreeSet<CanId>) -> Vec<CanId> {
        let pair = |a: usize, b: usize| -> Vec<CanId> {
            match (ghosts.get(a), ghosts.get(b)) {
                (Some(hi), Some(lo)) => vec![CanId::from_pair(*hi, *lo)],
                _ => Vec::with_capacity(0),
            }
        };
        match self {
            CandidateMethod::CodeNameZero => vec![CanId(0)],
            CandidateMethod::FirstPair => pair(0, 1),
            CandidateMethod::PairingPattern => pairing_partners_missing(can_ids),
            CandidateMethod::MiddlePair => pair(2, 3),
            CandidateMethod::LastPair => pair(4, 5),
            CandidateMethod::Indices3And5 => pair(3, 5),
            CandidateMethod::XorPairs => {
                if ghosts.len() < 4 {
                    return Vec::with_capacity(0);
                }
                vec![CanId::from_pair(ghosts[0] ^ ghosts[1], ghosts[2] ^ ghosts[3])]
            }
            CandidateMethod::XorAll => {
                if ghosts.is_empty() {
                    return Vec::with_capacity(0);
                }
                let xor: Counter = ghosts.iter().fold(0, |acc, g| acc ^ g);
                vec![CanId::from_pair(0, xor)]
            }
        }
    }
}

impl fmt::Display for CandidateMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Identifiers seen in the log come in pairs `0xNN00`, `0xNN01`.
/// Return the `0xNN01` partner of every observed `0xNN00` whose partner
/// was not observed.
pub fn pairing_partners_missing(can_ids: &BTreeSet<CanId>) -> Vec<CanId> {
    can_ids
        .iter()
        .filter(|can_id| can_id.value() & 0xFF == 0x00)
        .map(|can_id| CanId(can_id.value() | 0x01))
        .filter(|partner| !can_ids.contains(partner))
        .collect()
}

/// One candidate answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub method: CandidateMethod,
    pub can_id: CanId,
    /// the user already tried this identifier and it was wrong
    pub rejected: bool,
}

pub type Candidates = Vec<Candidate>;

/// Derive candidates from `ghosts` and the identifiers seen in the log,
/// in priority order.
///
/// An identifier derived by more than one method is kept only for the first
/// (highest priority) method.
pub fn generate(ghosts: &[Counter], can_ids: &BTreeSet<CanId>) -> Candidates {
    defn!("(ghosts {:02X?}, can_ids {})", ghosts, can_ids.len());
    let mut seen: BTreeSet<CanId> = BTreeSet::new();
    let mut candidates: Candidates = Candidates::with_capacity(CandidateMethod::ALL.len());
    for method in CandidateMethod::ALL.iter() {
        for can_id in method.derive(ghosts, can_ids).into_iter() {
            if !seen.insert(can_id) {
                defo!("{:?} duplicate {}", method, can_id);
                continue;
            }
            candidates.push(Candidate {
                method: *method,
                can_id,
                rejected: false,
            });
        }
    }
    defx!("candidates {}", candidates.len());

    candidates
}

/// Mark candidates whose identifier is in `rejected` and return the first
/// candidate that is not rejected, the answer.
pub fn eliminate(candidates: &mut Candidates, rejected: &[CanId]) -> Option<Candidate> {
    defn!("(candidates {}, rejected {:?})", candidates.len(), rejected);
    for candidate in candidates.iter_mut() {
        candidate.rejected = rejected.contains(&candidate.can_id);
    }
    let answer = candidates.iter().find(|candidate| !candidate.rejected).copied();
    defx!("answer {:?}", answer);

    answer
}

/// The candidates after the answer that are not rejected.
pub fn alternatives(candidates: &[Candidate]) -> Vec<&Candidate> {
    candidates
        .iter()
        .filter(|candidate| !candidate.rejected)
        .skip(1)
        .collect()
}

/// Wrap `can_id` in the flag format, e.g. `LISA{0x949B}`.
pub fn format_flag(prefix: &str, can_id: &CanId) -> String {
    format!("{}{{{}}}", prefix, can_id)
}
