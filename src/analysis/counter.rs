// src/analysis/counter.rs

//! Implements [`CounterSequence`], the counter values of one message class
//! and the search for missing counter values ("ghosts").
//!
//! A message class with a rolling counter sends `00`, `01`, … `FF`, then
//! wraps back to `00`. Each run from `00` up to the wrap is a "cycle".
//! A counter value absent from a cycle is a "ghost"; a message that should
//! have been on the bus but was not.
//!
//! The bus is noisy. A repeated or slightly out-of-order counter stays in
//! its cycle; only a large drop is a wrap.

use crate::common::Count;
use crate::data::canframe::{CanFrame, Counter};

use std::collections::BTreeMap;
use std::ops::Range;

use ::more_asserts::debug_assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Count of distinct counter values, `00..=FF`.
pub const COUNTER_VALUES: usize = Counter::MAX as usize + 1;

/// Default payload byte holding the counter.
pub const COUNTER_BYTE_DEFAULT: usize = 0;

/// Default count of rows in the position table.
pub const POSITIONS_SHOW_DEFAULT: usize = 20;

/// A counter at least this much lower than the counter before it starts a
/// new cycle. Smaller drops are retransmits or reordering.
pub const COUNTER_WRAP_DROP: Counter = 0x80;

/// One row of the position table, see [`CounterSequence::position_table`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionCheck {
    pub position: usize,
    pub expected: Counter,
    pub actual: Counter,
}

impl PositionCheck {
    pub const fn matches(&self) -> bool {
        self.expected == self.actual
    }
}

/// Ghosts of one cycle, `(cycle index, ghost counters)`.
pub type CycleGhosts = (usize, Vec<Counter>);

/// The counter values of one message class, in log order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CounterSequence {
    counters: Vec<Counter>,
    /// frames whose payload was too short to hold the counter byte
    short_payloads: Count,
}

impl CounterSequence {
    /// Take the counter at payload byte `byte_index` of each frame.
    ///
    /// Frames with a payload too short for `byte_index` are skipped and
    /// counted.
    pub fn from_frames(frames: &[CanFrame], byte_index: usize) -> CounterSequence {
        defn!("(frames {}, byte_index {})", frames.len(), byte_index);
        let mut counters: Vec<Counter> = Vec::with_capacity(frames.len());
        let mut short_payloads: Count = 0;
        for frame in frames.iter() {
            match frame.counter_at(byte_index) {
                Some(counter) => counters.push(counter),
                None => {
                    defo!("short payload {:?}", frame);
                    short_payloads += 1;
                }
            }
        }
        defx!("counters {}, short_payloads {}", counters.len(), short_payloads);

        CounterSequence {
            counters,
            short_payloads,
        }
    }

    pub fn from_counters(counters: Vec<Counter>) -> CounterSequence {
        CounterSequence {
            counters,
            short_payloads: 0,
        }
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub const fn short_payloads(&self) -> Count {
        self.short_payloads
    }

    /// Index of the first occurrence of each counter value.
    pub fn first_appearance(&self) -> BTreeMap<Counter, usize> {
        let mut first: BTreeMap<Counter, usize> = BTreeMap::new();
        for (index, counter) in self.counters.iter().enumerate() {
            first.entry(*counter).or_insert(index);
        }

        first
    }

    /// Compare the first `count` counters to the ideal sequence
    /// `00, 01, 02, …` where position `i` expects `i mod 256`.
    pub fn position_table(&self, count: usize) -> Vec<PositionCheck> {
        self.counters
            .iter()
            .take(count)
            .enumerate()
            .map(|(position, actual)| PositionCheck {
                position,
                expected: (position % COUNTER_VALUES) as Counter,
                actual: *actual,
            })
            .collect()
    }

    /// Split the sequence into cycles.
    ///
    /// A new cycle starts wherever a counter is at least
    /// [`COUNTER_WRAP_DROP`] lower than the counter before it.
    pub fn cycles(&self) -> Vec<Range<usize>> {
        let mut cycles: Vec<Range<usize>> = Vec::new();
        if self.counters.is_empty() {
            return cycles;
        }
        let mut start: usize = 0;
        for (index, pair) in self.counters.windows(2).enumerate() {
            if pair[0].saturating_sub(pair[1]) >= COUNTER_WRAP_DROP {
                cycles.push(start..index + 1);
                start = index + 1;
            }
        }
        cycles.push(start..self.counters.len());
        defñ!("cycles {}", cycles.len());

        cycles
    }

    /// Counter values missing from the cycle at `range`.
    ///
    /// Values `00` up to `FF` are checked. The first cycle of the log is
    /// checked from its lowest value seen and the last cycle up to its
    /// highest value seen, so a log that starts or ends mid-cycle does not
    /// report the values it never reached.
    pub fn ghosts_in(&self, range: Range<usize>) -> Vec<Counter> {
        debug_assert_le!(range.end, self.counters.len(), "range {:?} out of bounds", range);
        let cycle = match self.counters.get(range.clone()) {
            Some(val) if !val.is_empty() => val,
            _ => return Vec::with_capacity(0),
        };
        let mut seen = [false; COUNTER_VALUES];
        for counter in cycle.iter() {
            seen[*counter as usize] = true;
        }
        let first: Counter = if range.start > 0 {
            Counter::MIN
        } else {
            // `cycle` is not empty
            cycle.iter().copied().min().unwrap_or(Counter::MIN)
        };
        let last: Counter = if range.end < self.counters.len() {
            Counter::MAX
        } else {
            cycle.iter().copied().max().unwrap_or(Counter::MAX)
        };
        defñ!("range {:?}, first {:02X}, last {:02X}", range, first, last);

        (first..=last)
            .filter(|counter| !seen[*counter as usize])
            .collect()
    }

    /// Ghosts of the first cycle.
    pub fn ghosts(&self) -> Vec<Counter> {
        defn!();
        let ghosts = match self.cycles().into_iter().next() {
            Some(range) => self.ghosts_in(range),
            None => Vec::with_capacity(0),
        };
        defx!("ghosts {:02X?}", ghosts);

        ghosts
    }

    /// Ghosts of every cycle, including cycles without ghosts.
    pub fn ghosts_all_cycles(&self) -> Vec<CycleGhosts> {
        self.cycles()
            .into_iter()
            .enumerate()
            .map(|(index, range)| (index, self.ghosts_in(range)))
            .collect()
    }
}
